use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{Result, SinkErrorExt};

/// Something the host renders text into. The indicator only ever replaces
/// the whole text.
pub trait TextSink {
    fn describe(&self) -> String;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

impl TextSink for Box<dyn TextSink> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        (**self).set_text(text)
    }
}

/// One line per update on stdout, optionally tagged so two sinks can share it.
pub struct StdoutSink {
    tag: Option<&'static str>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { tag: None }
    }

    pub fn tagged(tag: &'static str) -> Self {
        Self { tag: Some(tag) }
    }

    fn line(&self, text: &str) -> String {
        match self.tag {
            Some(tag) => format!("{}: {}", tag, text),
            None => text.to_string(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSink for StdoutSink {
    fn describe(&self) -> String {
        match self.tag {
            Some(tag) => format!("stdout ({})", tag),
            None => "stdout".to_string(),
        }
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", self.line(text)).sink_err("stdout")?;
        out.flush().sink_err("stdout")
    }
}

/// Keeps a file holding exactly the latest text, for bars that poll files.
pub struct FileSink {
    path: PathBuf,
    staging: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let staging = staging_path(&path);
        Self { path, staging }
    }
}

// Sibling file so the final rename stays on one filesystem.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("uptime"));
    name.push(".tmp");
    path.with_file_name(name)
}

impl TextSink for FileSink {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        let context = self.describe();
        fs::write(&self.staging, format!("{}\n", text)).sink_err(&context)?;
        fs::rename(&self.staging, &self.path).sink_err(&context)
    }
}

/// A file sink when a path is configured, stdout otherwise.
pub fn sink_for(path: Option<&Path>, tag: &'static str) -> Box<dyn TextSink> {
    match path {
        Some(path) => Box::new(FileSink::new(path)),
        None => Box::new(StdoutSink::tagged(tag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_line_tagging() {
        assert_eq!(StdoutSink::new().line("3 days"), "3 days");
        assert_eq!(StdoutSink::tagged("label").line("3 days"), "label: 3 days");
    }

    #[test]
    fn test_file_sink_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uptime.label");
        let mut sink = FileSink::new(&path);

        sink.set_text("1 hour").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1 hour\n");

        sink.set_text("2 hours").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2 hours\n");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_file_sink_missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("missing").join("uptime.label"));
        let err = sink.set_text("1 day").unwrap_err();
        assert!(err.to_string().starts_with("Display sink error: file "));
    }

    #[test]
    fn test_staging_path_is_sibling() {
        assert_eq!(
            staging_path(Path::new("/run/user/1000/uptime.label")),
            PathBuf::from("/run/user/1000/uptime.label.tmp")
        );
    }

    #[test]
    fn test_sink_for_selects_by_path() {
        let sink = sink_for(Some(Path::new("/tmp/uptime.detail")), "detail");
        assert_eq!(sink.describe(), "file /tmp/uptime.detail");

        let sink = sink_for(None, "detail");
        assert_eq!(sink.describe(), "stdout (detail)");
    }
}

use std::path::PathBuf;

use sysinfo::System;
use tracing::{debug, error};

use crate::config::{AppConfig, SourceKind};

/// Seconds since boot as last sampled. Zero when the source was unavailable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct UptimeSeconds(pub f64);

impl UptimeSeconds {
    pub const ZERO: UptimeSeconds = UptimeSeconds(0.0);

    pub fn as_secs_f64(self) -> f64 {
        self.0
    }
}

// Source trait for swappable uptime readers
pub trait UptimeSource {
    fn name(&self) -> &'static str;

    /// Never fails: an unavailable source is logged and reads as zero.
    async fn sample(&self) -> UptimeSeconds;
}

/// First whitespace-separated field of `/proc/uptime`, if it is a usable
/// number of seconds.
pub fn parse_uptime(contents: &str) -> Option<f64> {
    contents
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
}

pub struct ProcUptime {
    path: PathBuf,
}

impl ProcUptime {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UptimeSource for ProcUptime {
    fn name(&self) -> &'static str {
        "proc"
    }

    async fn sample(&self) -> UptimeSeconds {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Could not read uptime file");
                return UptimeSeconds::ZERO;
            }
        };

        let contents = match String::from_utf8(bytes) {
            Ok(contents) => contents,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Uptime file is not valid UTF-8");
                return UptimeSeconds::ZERO;
            }
        };

        match parse_uptime(&contents) {
            Some(seconds) => {
                debug!(seconds, "Sampled uptime");
                UptimeSeconds(seconds)
            }
            None => {
                error!(path = %self.path.display(), "Uptime file has no usable seconds field");
                UptimeSeconds::ZERO
            }
        }
    }
}

/// Uptime as reported by `sysinfo`, for hosts without procfs.
pub struct SysinfoUptime;

impl UptimeSource for SysinfoUptime {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    async fn sample(&self) -> UptimeSeconds {
        let seconds = System::uptime() as f64;
        debug!(seconds, "Sampled uptime");
        UptimeSeconds(seconds)
    }
}

/// The source selected by configuration.
pub enum Source {
    Proc(ProcUptime),
    Sysinfo(SysinfoUptime),
}

impl Source {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.source {
            SourceKind::Proc => Source::Proc(ProcUptime::new(config.uptime_path.clone())),
            SourceKind::Sysinfo => Source::Sysinfo(SysinfoUptime),
        }
    }
}

impl UptimeSource for Source {
    fn name(&self) -> &'static str {
        match self {
            Source::Proc(source) => source.name(),
            Source::Sysinfo(source) => source.name(),
        }
    }

    async fn sample(&self) -> UptimeSeconds {
        match self {
            Source::Proc(source) => source.sample().await,
            Source::Sysinfo(source) => source.sample().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn uptime_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_parse_uptime_basic() {
        assert_eq!(parse_uptime("12345.67 4321.00\n"), Some(12345.67));
        assert_eq!(parse_uptime("  60.00\t1.00"), Some(60.0));
    }

    #[test]
    fn test_parse_uptime_rejects_garbage() {
        assert_eq!(parse_uptime(""), None);
        assert_eq!(parse_uptime("\n"), None);
        assert_eq!(parse_uptime("uptime 12"), None);
        assert_eq!(parse_uptime("-5.0 1.0"), None);
        assert_eq!(parse_uptime("inf 1.0"), None);
        assert_eq!(parse_uptime("NaN 1.0"), None);
    }

    #[tokio::test]
    async fn test_proc_sample_reads_first_field() {
        let file = uptime_file(b"90061.42 180000.10\n");
        let source = ProcUptime::new(file.path());
        assert_eq!(source.sample().await, UptimeSeconds(90061.42));
    }

    #[tokio::test]
    async fn test_proc_sample_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let source = ProcUptime::new(dir.path().join("uptime"));
        assert_eq!(source.sample().await, UptimeSeconds::ZERO);
    }

    #[tokio::test]
    async fn test_proc_sample_directory_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let source = ProcUptime::new(dir.path());
        assert_eq!(source.sample().await, UptimeSeconds::ZERO);
    }

    #[tokio::test]
    async fn test_proc_sample_invalid_utf8_is_zero() {
        let file = uptime_file(&[0xff, 0xfe, b' ', b'1']);
        let source = ProcUptime::new(file.path());
        assert_eq!(source.sample().await, UptimeSeconds::ZERO);
    }

    #[tokio::test]
    async fn test_proc_sample_unparsable_is_zero() {
        let file = uptime_file(b"not-a-number 12.0\n");
        let source = ProcUptime::new(file.path());
        assert_eq!(source.sample().await, UptimeSeconds::ZERO);
    }

    #[tokio::test]
    async fn test_source_from_config() {
        let mut config = AppConfig::default();
        let source = Source::from_config(&config);
        assert_eq!(source.name(), "proc");
        match &source {
            Source::Proc(proc_source) => assert_eq!(proc_source.path, PathBuf::from("/proc/uptime")),
            Source::Sysinfo(_) => panic!("expected proc source"),
        }

        config.source = SourceKind::Sysinfo;
        let source = Source::from_config(&config);
        assert_eq!(source.name(), "sysinfo");
        assert!(source.sample().await.as_secs_f64() >= 0.0);
    }
}

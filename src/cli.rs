use std::env;
use std::path::PathBuf;

use crate::config::{AppConfig, ConfigError, SourceKind};

pub struct CliParser;

impl CliParser {
    pub fn parse() -> Result<AppConfig, ConfigError> {
        let args: Vec<String> = env::args().collect();
        Self::parse_from(&args)
    }

    pub fn parse_from(args: &[String]) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::from_env(); // Start with environment variables

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--daemon" | "-d" => config.daemon_mode = true,
                "--once" => config.once = true,
                "--sysinfo" => config.source = SourceKind::Sysinfo,
                "--interval" | "-i" => {
                    if let Some(value) = Self::get_next_arg(args, i) {
                        if let Ok(seconds) = value.parse::<u64>() {
                            config.interval_seconds = seconds;
                            i += 1;
                        }
                    }
                }
                "--source" => {
                    if let Some(value) = Self::get_next_arg(args, i) {
                        config.set_source(value)?;
                        i += 1;
                    }
                }
                "--path" => {
                    if let Some(value) = Self::get_next_arg(args, i) {
                        config.uptime_path = PathBuf::from(value);
                        i += 1;
                    }
                }
                "--label-file" => {
                    if let Some(value) = Self::get_next_arg(args, i) {
                        config.label_file = Some(PathBuf::from(value));
                        i += 1;
                    }
                }
                "--detail-file" => {
                    if let Some(value) = Self::get_next_arg(args, i) {
                        config.detail_file = Some(PathBuf::from(value));
                        i += 1;
                    }
                }
                "--pid-file" => {
                    if let Some(value) = Self::get_next_arg(args, i) {
                        config.pid_file = PathBuf::from(value);
                        i += 1;
                    }
                }
                "--help" | "-h" => {
                    Self::print_help(&args[0]);
                    std::process::exit(0);
                }
                arg if arg.starts_with("--interval=") => {
                    if let Some(value) = arg.strip_prefix("--interval=") {
                        if let Ok(seconds) = value.parse::<u64>() {
                            config.interval_seconds = seconds;
                        }
                    }
                }
                arg if arg.starts_with("--source=") => {
                    if let Some(value) = arg.strip_prefix("--source=") {
                        config.set_source(value)?;
                    }
                }
                arg if arg.starts_with("--path=") => {
                    if let Some(value) = arg.strip_prefix("--path=") {
                        config.uptime_path = PathBuf::from(value);
                    }
                }
                arg if arg.starts_with("--label-file=") => {
                    if let Some(value) = arg.strip_prefix("--label-file=") {
                        config.label_file = Some(PathBuf::from(value));
                    }
                }
                arg if arg.starts_with("--detail-file=") => {
                    if let Some(value) = arg.strip_prefix("--detail-file=") {
                        config.detail_file = Some(PathBuf::from(value));
                    }
                }
                _ => {}
            }
            i += 1;
        }

        config.validate()?;
        Ok(config)
    }

    fn get_next_arg(args: &[String], index: usize) -> Option<&String> {
        if index + 1 < args.len() {
            Some(&args[index + 1])
        } else {
            None
        }
    }

    fn print_help(program_name: &str) {
        println!("Uptime Indicator - system uptime for status bars");
        println!("Usage: {} [OPTIONS]", program_name);
        println!();
        println!("Options:");
        println!("  --interval, -i <N>     Refresh interval in seconds (default: 30)");
        println!("  --source <proc|sysinfo> Where uptime is read from (default: proc)");
        println!("  --sysinfo              Shorthand for --source sysinfo");
        println!("  --path <file>          Uptime file for the proc source (default: /proc/uptime)");
        println!("  --label-file <file>    Write the short label to a file instead of stdout");
        println!("  --detail-file <file>   Write the detailed text to a file instead of stdout");
        println!("  --once                 Print both texts once and exit");
        println!("  --daemon, -d           Run as daemon");
        println!("  --pid-file <file>      Pid file used in daemon mode (default: /tmp/uptime_indicator.pid)");
        println!("  --help, -h             Show this help message");
        println!();
        println!("Environment Variables:");
        println!("  UPTIME_INDICATOR_INTERVAL=<seconds>    Refresh interval");
        println!("  UPTIME_INDICATOR_SOURCE=<proc|sysinfo> Uptime source");
        println!("  UPTIME_INDICATOR_PATH=<file>           Uptime file");
        println!("  UPTIME_INDICATOR_LABEL_FILE=<file>     Short label output file");
        println!("  UPTIME_INDICATOR_DETAIL_FILE=<file>    Detailed text output file");
        println!("  UPTIME_INDICATOR_DAEMON=<true|false>   Daemon mode");
        println!("  UPTIME_INDICATOR_PID_FILE=<file>       Pid file");
        println!("  RUST_LOG=<filter>                      Log filter (default: info)");
        println!("  LOG_FORMAT=json                        JSON log lines on stderr");
        println!();
        println!("Examples:");
        println!("  {} --once                                   # Print uptime and exit", program_name);
        println!("  {} --interval 60                            # Refresh every minute", program_name);
        println!("  {} -d --label-file /run/user/1000/uptime     # Feed a status bar from a file", program_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("uptime_indicator")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_interval_forms() {
        let config = CliParser::parse_from(&args(&["-i", "45"])).unwrap();
        assert_eq!(config.interval_seconds, 45);

        let config = CliParser::parse_from(&args(&["--interval=90"])).unwrap();
        assert_eq!(config.interval_seconds, 90);
    }

    #[test]
    fn test_parse_zero_interval_rejected() {
        let result = CliParser::parse_from(&args(&["--interval", "0"]));
        assert!(matches!(result, Err(ConfigError::InvalidInterval)));
    }

    #[test]
    fn test_parse_source_and_path() {
        let config =
            CliParser::parse_from(&args(&["--source", "proc", "--path", "/tmp/fake_uptime"]))
                .unwrap();
        assert_eq!(config.source, SourceKind::Proc);
        assert_eq!(config.uptime_path, PathBuf::from("/tmp/fake_uptime"));

        let config = CliParser::parse_from(&args(&["--sysinfo"])).unwrap();
        assert_eq!(config.source, SourceKind::Sysinfo);
    }

    #[test]
    fn test_parse_unknown_source_rejected() {
        let result = CliParser::parse_from(&args(&["--source=kernel"]));
        assert!(matches!(result, Err(ConfigError::InvalidSource(_))));
    }

    #[test]
    fn test_parse_sink_files_and_modes() {
        let config = CliParser::parse_from(&args(&[
            "--label-file",
            "/tmp/label",
            "--detail-file=/tmp/detail",
            "--once",
            "-d",
        ]))
        .unwrap();
        assert_eq!(config.label_file, Some(PathBuf::from("/tmp/label")));
        assert_eq!(config.detail_file, Some(PathBuf::from("/tmp/detail")));
        assert!(config.once);
        assert!(config.daemon_mode);
    }

    #[test]
    fn test_unknown_flags_ignored() {
        let config = CliParser::parse_from(&args(&["--verbose"])).unwrap();
        assert!(!config.once);
    }
}

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_UPTIME_PATH: &str = "/proc/uptime";
pub const DEFAULT_PID_FILE: &str = "/tmp/uptime_indicator.pid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Proc,
    Sysinfo,
}

impl SourceKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "proc" | "procfs" => Some(SourceKind::Proc),
            "sysinfo" => Some(SourceKind::Sysinfo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub interval_seconds: u64,
    pub source: SourceKind,
    pub uptime_path: PathBuf,
    pub label_file: Option<PathBuf>,
    pub detail_file: Option<PathBuf>,
    pub daemon_mode: bool,
    pub once: bool,
    pub pid_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 30,
            source: SourceKind::Proc,
            uptime_path: PathBuf::from(DEFAULT_UPTIME_PATH),
            label_file: None,
            detail_file: None,
            daemon_mode: false,
            once: false,
            pid_file: PathBuf::from(DEFAULT_PID_FILE),
        }
    }
}

impl AppConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_vars();
        config
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(interval_str) = env::var("UPTIME_INDICATOR_INTERVAL") {
            if let Ok(interval) = interval_str.parse::<u64>() {
                if interval > 0 {
                    self.interval_seconds = interval;
                }
            }
        }

        if let Ok(source_str) = env::var("UPTIME_INDICATOR_SOURCE") {
            if let Some(source) = SourceKind::parse(&source_str) {
                self.source = source;
            }
        }

        if let Ok(path) = env::var("UPTIME_INDICATOR_PATH") {
            if !path.trim().is_empty() {
                self.uptime_path = PathBuf::from(path);
            }
        }

        if let Ok(path) = env::var("UPTIME_INDICATOR_LABEL_FILE") {
            if !path.trim().is_empty() {
                self.label_file = Some(PathBuf::from(path));
            }
        }

        if let Ok(path) = env::var("UPTIME_INDICATOR_DETAIL_FILE") {
            if !path.trim().is_empty() {
                self.detail_file = Some(PathBuf::from(path));
            }
        }

        if let Ok(daemon_str) = env::var("UPTIME_INDICATOR_DAEMON") {
            self.daemon_mode = daemon_str.to_lowercase() == "true" || daemon_str == "1";
        }

        if let Ok(path) = env::var("UPTIME_INDICATOR_PID_FILE") {
            if !path.trim().is_empty() {
                self.pid_file = PathBuf::from(path);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_seconds == 0 {
            return Err(ConfigError::InvalidInterval);
        }

        if self.source == SourceKind::Proc && self.uptime_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("uptime path"));
        }

        if matches!(&self.label_file, Some(p) if p.as_os_str().is_empty()) {
            return Err(ConfigError::EmptyPath("label file"));
        }

        if matches!(&self.detail_file, Some(p) if p.as_os_str().is_empty()) {
            return Err(ConfigError::EmptyPath("detail file"));
        }

        if self.daemon_mode && self.pid_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("pid file"));
        }

        Ok(())
    }

    pub fn set_source(&mut self, value: &str) -> Result<(), ConfigError> {
        self.source = SourceKind::parse(value)
            .ok_or_else(|| ConfigError::InvalidSource(value.to_string()))?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidInterval,
    InvalidSource(String),
    EmptyPath(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidInterval => write!(f, "Update interval must be greater than 0"),
            ConfigError::InvalidSource(source) => {
                write!(f, "Uptime source must be 'proc' or 'sysinfo', got: {}", source)
            }
            ConfigError::EmptyPath(what) => write!(f, "The {} must not be empty", what),
        }
    }
}

impl std::error::Error for ConfigError {}

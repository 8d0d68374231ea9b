use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Config(crate::config::ConfigError),
    Sink(String),
    Daemon(String),
    Runtime(String),
    Telemetry(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Config(err) => write!(f, "Configuration error: {}", err),
            AppError::Sink(msg) => write!(f, "Display sink error: {}", msg),
            AppError::Daemon(msg) => write!(f, "Daemon error: {}", msg),
            AppError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            AppError::Telemetry(msg) => write!(f, "Telemetry error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config(err)
    }
}

// Convenience type alias
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn sink(msg: &str) -> Self {
        AppError::Sink(msg.to_string())
    }

    pub fn daemon(msg: &str) -> Self {
        AppError::Daemon(msg.to_string())
    }

    pub fn runtime(msg: &str) -> Self {
        AppError::Runtime(msg.to_string())
    }

    pub fn telemetry(msg: &str) -> Self {
        AppError::Telemetry(msg.to_string())
    }
}

/// Attaches the failing sink's description to an I/O error.
pub trait SinkErrorExt<T> {
    fn sink_err(self, context: &str) -> Result<T>;
}

impl<T> SinkErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn sink_err(self, context: &str) -> Result<T> {
        self.map_err(|e| AppError::sink(&format!("{}: {}", context, e)))
    }
}

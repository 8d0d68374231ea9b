use daemonize::Daemonize;
use tokio::signal;
use tokio::signal::unix::{SignalKind, signal as unix_signal};
use tracing::{error, info};

use crate::cli::CliParser;
use crate::config::AppConfig;
use crate::display::{TextSink, sink_for};
use crate::errors::{AppError, Result};
use crate::refresh::RefreshController;
use crate::uptime::Source;

pub type Indicator = RefreshController<Source, Box<dyn TextSink>, Box<dyn TextSink>>;

pub struct Application {
    config: AppConfig,
}

impl Application {
    pub fn new() -> Result<Self> {
        let config = CliParser::parse()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn initialize(&self) -> Result<()> {
        // Must fork before the runtime exists.
        if self.config.daemon_mode && !self.config.once {
            self.start_daemon()?;
        }
        Ok(())
    }

    pub fn run(&self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::runtime(&format!("Failed to build runtime: {}", e)))?;

        runtime.block_on(async {
            let mut indicator = self.enable().await;
            if !self.config.once {
                indicator.run(shutdown_signal()).await;
            }
            Self::disable(indicator);
        });

        Ok(())
    }

    /// Builds the indicator from configuration and shows the first sample.
    pub async fn enable(&self) -> Indicator {
        let label = sink_for(self.config.label_file.as_deref(), "label");
        let detail = sink_for(self.config.detail_file.as_deref(), "detail");
        let mut indicator = RefreshController::new(
            Source::from_config(&self.config),
            label,
            detail,
            self.config.interval(),
        );
        indicator.start().await;
        indicator
    }

    /// Stops the indicator before its sinks are released.
    pub fn disable(mut indicator: Indicator) {
        info!(was_active = indicator.is_active(), "Disabling uptime indicator");
        indicator.stop();
        drop(indicator);
    }

    fn start_daemon(&self) -> Result<()> {
        let daemonize = Daemonize::new()
            .pid_file(&self.config.pid_file)
            .chown_pid_file(true)
            .working_directory("/tmp");

        daemonize
            .start()
            .map_err(|e| AppError::daemon(&format!("Failed to start daemon: {}", e)))?;

        info!(pid_file = %self.config.pid_file.display(), "Running as daemon");
        Ok(())
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match unix_signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, uptime: &str) -> AppConfig {
        let uptime_path = dir.path().join("uptime");
        fs::write(&uptime_path, uptime).unwrap();
        AppConfig {
            uptime_path,
            label_file: Some(dir.path().join("label")),
            detail_file: Some(dir.path().join("detail")),
            ..AppConfig::default()
        }
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[tokio::test]
    async fn test_enable_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let app = Application::with_config(config_in(&dir, "90061.93 170000.12\n"));

        let indicator = app.enable().await;
        assert!(indicator.is_active());
        assert_eq!(read(&dir.path().join("label")), "1 day\n");
        assert_eq!(read(&dir.path().join("detail")), "1 day 1 hour 1 minute\n");

        Application::disable(indicator);
    }

    #[tokio::test]
    async fn test_enable_with_unreadable_source_shows_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir, "");
        config.uptime_path = dir.path().join("no-such-file");
        let app = Application::with_config(config);

        let indicator = app.enable().await;
        assert_eq!(read(&dir.path().join("label")), "0 minutes\n");
        assert_eq!(read(&dir.path().join("detail")), "0 days 0 hours 0 minutes\n");

        Application::disable(indicator);
    }

    #[test]
    fn test_run_once_returns() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir, "61.0 10.0\n");
        config.once = true;
        let app = Application::with_config(config);

        app.initialize().unwrap();
        app.run().unwrap();
        assert_eq!(read(&dir.path().join("label")), "1 minute\n");
        assert_eq!(read(&dir.path().join("detail")), "0 days 0 hours 1 minute\n");
        assert!(app.config().once);
    }
}

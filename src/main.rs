mod app;
mod cli;
mod config;
mod display;
mod errors;
mod format;
mod refresh;
mod telemetry;
mod uptime;

use anyhow::{Context, Result};

use crate::app::Application;

fn main() -> Result<()> {
    telemetry::init().context("Failed to initialize logging")?;

    let app = Application::new().context("Invalid configuration")?;
    app.initialize().context("Failed to initialize uptime indicator")?;
    app.run().context("Uptime indicator stopped with an error")
}

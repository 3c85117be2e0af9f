mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use std::fs::{self, File};

use anyhow::{Context, Result};
use simplelog::WriteLogger;

use crate::config::{ensure_webview_data_dir, AppConfig};

fn init_logging(config: &AppConfig) -> Result<()> {
    if let Some(dir) = config.log_file.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log dir: {}", dir.display()))?;
    }
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("failed to create log file: {}", config.log_file.display()))?;
    WriteLogger::init(config.log_level, simplelog::Config::default(), log_file)
        .context("failed to install logger")?;
    Ok(())
}

fn main() {
    let mut desktop = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Compliance Tracker"));

    match AppConfig::resolve() {
        Ok(config) => {
            if let Err(err) = init_logging(&config) {
                eprintln!("logging disabled: {err:#}");
            }
            log::info!("starting with database {}", config.db_path.display());
            match ensure_webview_data_dir(&config.data_dir) {
                Ok(dir) => desktop = desktop.with_data_directory(dir),
                Err(err) => log::warn!("using default webview data dir: {err:#}"),
            }
        }
        Err(err) => eprintln!("failed to resolve app directories: {err:#}"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop)
        .launch(app::App);
}

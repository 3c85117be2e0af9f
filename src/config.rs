use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use simplelog::LevelFilter;

pub const DB_PATH_ENV: &str = "COMPLIANCE_TRACKER_DB";
pub const LOG_LEVEL_ENV: &str = "COMPLIANCE_TRACKER_LOG";

const DB_FILE_NAME: &str = "compliance.sqlite";
const LOG_FILE_NAME: &str = "compliance-tracker.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "compliance-tracker")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

/// Unknown or missing levels fall back to `Info`.
pub fn parse_log_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

impl AppConfig {
    /// Resolves paths from the platform data directories, honouring the
    /// `COMPLIANCE_TRACKER_DB` and `COMPLIANCE_TRACKER_LOG` overrides.
    pub fn resolve() -> Result<Self> {
        let dirs = project_dirs()?;
        Ok(Self::from_parts(
            dirs.data_local_dir(),
            dirs.cache_dir(),
            std::env::var(DB_PATH_ENV).ok().as_deref(),
            std::env::var(LOG_LEVEL_ENV).ok().as_deref(),
        ))
    }

    pub fn from_parts(
        data_dir: &Path,
        cache_dir: &Path,
        db_override: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let db_path = db_override
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE_NAME));

        Self {
            db_path,
            data_dir: data_dir.to_path_buf(),
            log_file: cache_dir.join(LOG_FILE_NAME),
            log_level: parse_log_level(log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_uses_data_dir_by_default() {
        let config = AppConfig::from_parts(
            Path::new("/data"),
            Path::new("/cache"),
            None,
            None,
        );

        assert_eq!(config.db_path, PathBuf::from("/data/compliance.sqlite"));
        assert_eq!(config.log_file, PathBuf::from("/cache/compliance-tracker.log"));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn from_parts_honours_overrides() {
        let config = AppConfig::from_parts(
            Path::new("/data"),
            Path::new("/cache"),
            Some(" /tmp/other.sqlite "),
            Some("debug"),
        );

        assert_eq!(config.db_path, PathBuf::from("/tmp/other.sqlite"));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn blank_db_override_is_ignored() {
        let config = AppConfig::from_parts(Path::new("/data"), Path::new("/cache"), Some(""), None);

        assert_eq!(config.db_path, PathBuf::from("/data/compliance.sqlite"));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        assert_eq!(parse_log_level(Some("loud")), LevelFilter::Info);
        assert_eq!(parse_log_level(Some("TRACE")), LevelFilter::Trace);
    }
}

//! Loading `edusync.toml` and building the shared services.

use std::path::{Path, PathBuf};

use api::AppError;
use store::EduSyncConfig;

use crate::context::Services;

/// `<config_dir>/edusync/edusync.toml`, when the platform has a config directory.
#[cfg(not(target_arch = "wasm32"))]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("edusync").join(EduSyncConfig::filename()))
}

#[cfg(target_arch = "wasm32")]
pub fn config_path() -> Option<PathBuf> {
    None
}

/// Read `path`, or fall back to defaults when it does not exist.
pub fn load_config_from(path: &Path) -> Result<EduSyncConfig, AppError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(EduSyncConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
    EduSyncConfig::from_toml(&text)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
}

/// The config file (if any) with environment overrides applied.
pub fn load_config() -> Result<EduSyncConfig, AppError> {
    let mut config = match config_path() {
        Some(path) => load_config_from(&path)?,
        None => EduSyncConfig::default(),
    };
    api::config::apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Construct the one backend handle for this run.
pub fn make_services(config: EduSyncConfig) -> Result<Services, AppError> {
    let backend = api::config::connect(&config)?;
    Ok(Services::new(backend, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::BackendKind;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("edusync.toml")).unwrap();
        assert_eq!(config, EduSyncConfig::default());
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edusync.toml");
        std::fs::write(&path, "[backend]\nkind = \"memory\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.backend.kind, BackendKind::Memory);
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edusync.toml");
        std::fs::write(&path, "[backend\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.is_local());
    }

    #[test]
    fn test_memory_services_share_one_backend() {
        let services = make_services(EduSyncConfig::default().with_memory_backend()).unwrap();
        let copy = services.clone();
        assert!(services == copy);
    }
}

//! Configuration overrides from environment variables, and backend construction.

use std::sync::Arc;

use store::{Backend, BackendKind, EduSyncConfig, MemoryBackend};

use crate::client::HostedClient;
use crate::error::AppError;

pub const ENV_URL: &str = "EDUSYNC_URL";
pub const ENV_ANON_KEY: &str = "EDUSYNC_ANON_KEY";
pub const ENV_BACKEND: &str = "EDUSYNC_BACKEND";
pub const ENV_RESET_REDIRECT: &str = "EDUSYNC_RESET_REDIRECT";

/// Layer environment variables (and a `.env` file, if present) over `config`.
pub fn apply_env_overrides(config: &mut EduSyncConfig) -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Override logic, with the variable source injected.
pub fn apply_overrides(
    config: &mut EduSyncConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<(), AppError> {
    if let Some(url) = var(ENV_URL) {
        config.backend.url = url;
    }
    if let Some(key) = var(ENV_ANON_KEY) {
        config.backend.anon_key = key;
    }
    if let Some(kind) = var(ENV_BACKEND) {
        config.backend.kind = BackendKind::parse(&kind)
            .ok_or_else(|| AppError::Config(format!("{ENV_BACKEND} must be 'hosted' or 'memory', got '{kind}'")))?;
    }
    if let Some(redirect) = var(ENV_RESET_REDIRECT) {
        config.auth.reset_redirect_url = redirect;
    }
    Ok(())
}

/// Build the one backend handle the app shares for its whole lifetime.
pub fn connect(config: &EduSyncConfig) -> Result<Arc<dyn Backend>, AppError> {
    match config.backend.kind {
        BackendKind::Hosted => {
            let client = HostedClient::from_config(&config.backend)?;
            tracing::info!(url = %client.base_url(), "using hosted backend");
            Ok(Arc::new(client))
        }
        BackendKind::Memory => {
            tracing::info!("using in-memory backend; nothing will be persisted");
            Ok(Arc::new(MemoryBackend::new()))
        }
    }
}

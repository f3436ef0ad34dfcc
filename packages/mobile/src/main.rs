use dioxus::prelude::*;
use store::EduSyncConfig;
use tracing_subscriber::EnvFilter;
use ui::{AlertHost, AppProvider, ScreenHost, Services};

fn main() {
    init_tracing();
    dioxus::launch(App);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load configuration and build the backend handle. A broken config file or
/// backend setting falls back to the in-memory backend so the app still opens.
fn startup_services() -> Services {
    let config = match ui::load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "could not load configuration, using defaults");
            EduSyncConfig::default()
        }
    };
    match ui::make_services(config.clone()) {
        Ok(services) => services,
        Err(e) => {
            tracing::error!(error = %e, "could not reach configured backend, using in-memory backend");
            let fallback = config.with_memory_backend();
            let backend: std::sync::Arc<dyn store::Backend> =
                std::sync::Arc::new(store::MemoryBackend::new());
            Services::new(backend, fallback)
        }
    }
}

#[component]
fn App() -> Element {
    let services = use_hook(startup_services);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::VIEWS_CSS }
        AppProvider {
            services,
            ScreenHost {}
            AlertHost {}
        }
    }
}

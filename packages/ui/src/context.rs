//! Application context shared by every screen.

use std::sync::Arc;

use api::NavStack;
use dioxus::prelude::*;
use store::{Backend, EduSyncConfig};

use crate::alert::Alert;

/// The backend handle and configuration, built once at startup.
#[derive(Clone)]
pub struct Services {
    pub backend: Arc<dyn Backend>,
    pub config: Arc<EduSyncConfig>,
}

impl Services {
    pub fn new(backend: Arc<dyn Backend>, config: EduSyncConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.backend, &other.backend) && Arc::ptr_eq(&self.config, &other.config)
    }
}

pub fn use_services() -> Services {
    use_context::<Services>()
}

pub fn use_nav() -> Signal<NavStack> {
    use_context::<Signal<NavStack>>()
}

/// Provides [`Services`], the navigation stack and the alert slot to `children`.
#[component]
pub fn AppProvider(services: Services, children: Element) -> Element {
    use_context_provider(|| services.clone());
    use_context_provider(|| Signal::new(NavStack::default()));
    use_context_provider(|| Signal::new(Option::<Alert>::None));

    rsx! {
        {children}
    }
}

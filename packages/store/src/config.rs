//! # App configuration: `edusync.toml`
//!
//! ```toml
//! [backend]
//! kind = "hosted"                 # or "memory" for the offline demo backend
//! url = "http://localhost:54321"
//! anon_key = ""
//!
//! [auth]
//! reset_redirect_url = "edusync://reset-password"
//!
//! [catalog]
//! faculties = ["Science", "Engineering", "Arts", "Business"]
//! programs = ["Computer Science", "Mechanical Engineering", "Literature", "Finance"]
//! courses = ["Math 101", "Physics 201", "CS 301", "History 101"]
//! ```
//!
//! Every section and field has a serde default, so a missing or empty file is
//! equivalent to [`EduSyncConfig::default`]. Environment overrides are layered on
//! top by the `api` crate.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EduSyncConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub catalog: Catalog,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Hosted,
    Memory,
}

impl BackendKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hosted" => Some(BackendKind::Hosted),
            "memory" => Some(BackendKind::Memory),
            _ => None,
        }
    }
}

/// Where the hosted service lives and the public key used to reach it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
}

fn default_backend_url() -> String {
    "http://localhost:54321".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            url: default_backend_url(),
            anon_key: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Deep link the password-reset email points back to.
    #[serde(default = "default_reset_redirect")]
    pub reset_redirect_url: String,
}

fn default_reset_redirect() -> String {
    "edusync://reset-password".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            reset_redirect_url: default_reset_redirect(),
        }
    }
}

/// Fixed candidate lists offered by the student profile editor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_faculties")]
    pub faculties: Vec<String>,
    #[serde(default = "default_programs")]
    pub programs: Vec<String>,
    #[serde(default = "default_courses")]
    pub courses: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_faculties() -> Vec<String> {
    strings(&["Science", "Engineering", "Arts", "Business"])
}

fn default_programs() -> Vec<String> {
    strings(&[
        "Computer Science",
        "Mechanical Engineering",
        "Literature",
        "Finance",
    ])
}

fn default_courses() -> Vec<String> {
    strings(&["Math 101", "Physics 201", "CS 301", "History 101"])
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            faculties: default_faculties(),
            programs: default_programs(),
            courses: default_courses(),
        }
    }
}

impl EduSyncConfig {
    /// Builder method to point at a hosted backend.
    pub fn with_backend(mut self, url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        self.backend.kind = BackendKind::Hosted;
        self.backend.url = url.into();
        self.backend.anon_key = anon_key.into();
        self
    }

    /// Builder method to use the in-memory backend.
    pub fn with_memory_backend(mut self) -> Self {
        self.backend.kind = BackendKind::Memory;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "edusync.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = EduSyncConfig::from_toml("").unwrap();
        assert_eq!(config, EduSyncConfig::default());
        assert_eq!(config.backend.kind, BackendKind::Hosted);
        assert_eq!(config.auth.reset_redirect_url, "edusync://reset-password");
        assert_eq!(config.catalog.courses.len(), 4);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = EduSyncConfig::from_toml(
            r#"
            [backend]
            url = "https://example.supabase.co"
            anon_key = "public-key"

            [catalog]
            courses = ["Biology 110"]
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.url, "https://example.supabase.co");
        assert_eq!(config.backend.anon_key, "public-key");
        assert_eq!(config.catalog.courses, vec!["Biology 110"]);
        assert_eq!(config.catalog.faculties, default_faculties());
    }

    #[test]
    fn test_memory_kind_survives_toml() {
        let config = EduSyncConfig::default().with_memory_backend();
        let text = config.to_toml().unwrap();
        assert!(text.contains("kind = \"memory\""));
        assert_eq!(EduSyncConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!(BackendKind::parse(" Memory "), Some(BackendKind::Memory));
        assert_eq!(BackendKind::parse("hosted"), Some(BackendKind::Hosted));
        assert_eq!(BackendKind::parse("sqlite"), None);
    }
}

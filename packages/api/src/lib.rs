//! # API crate: backend access and application flows for EduSync
//!
//! Every screen in the `ui` crate calls into this crate; none of them talk to
//! the hosted service directly. Flows are generic over [`store::Backend`], so
//! the same code runs against [`HostedClient`] in the app and against
//! [`store::MemoryBackend`] in tests and demo mode.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Login with role resolution, registration sequencing, password reset, sign-out |
//! | [`client`] | [`HostedClient`], the HTTP implementation of [`store::Backend`] |
//! | [`config`] | Environment overrides for `edusync.toml` and backend construction |
//! | [`dashboard`] | Display-name loading and the per-role tab sets |
//! | [`error`] | [`AppError`], whose text is what the user sees |
//! | [`nav`] | Screen stack and the navigation actions flows return |
//! | [`profile`] | Student profile editor state, load and save |

pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod nav;
pub mod profile;

pub use auth::{login, register, request_password_reset, sign_out, LoginOutcome, RegistrationForm};
pub use client::HostedClient;
pub use dashboard::{load_dashboard, DashboardIdentity, LecturerTab, StudentTab};
pub use error::{AppError, RegistrationError};
pub use nav::{NavAction, NavStack, Screen};
pub use profile::{load_profile, save_profile, ProfileEditor};

pub mod backend;
pub mod config;
pub mod error;
pub mod models;

mod memory;
pub use memory::{Call, MemoryBackend, Op};

pub use backend::{expect_single, Backend, Filter, Row};
pub use config::{AuthConfig, BackendConfig, BackendKind, Catalog, EduSyncConfig};
pub use error::BackendError;
pub use models::{
    AcademicDetails, AuthUser, NewProfileRow, Role, RoleDetails, Session, UserProfile,
    LECTURERS_TABLE, STUDENTS_TABLE,
};

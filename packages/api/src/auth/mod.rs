//! Authentication flows: login with role resolution, registration, password
//! reset, and sign-out.

mod login;
mod password;
mod register;
mod session;

pub use login::{login, resolve_role, LoginOutcome};
pub use password::request_password_reset;
pub use register::{register, RegisteredUser, RegistrationForm, MIN_PASSWORD_LEN};
pub use session::sign_out;

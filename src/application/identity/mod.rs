//! Identity module: authentication, sessions and the request principal

pub mod principal;
pub mod service;

pub use principal::AuthenticatedUser;
pub use service::{AuthResult, AuthService, MIN_PASSWORD_LEN};

pub mod password;
pub mod token;

pub use password::{PasswordHasher, MAX_COST, MIN_COST};
pub use token::generate_token;

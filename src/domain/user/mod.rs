//! User aggregate
//!
//! Contains the User entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto;

pub use dto::{NewUser, RegisterUser, UpdateUserDto};
pub use model::{User, UserCredentials, UserRole};
pub use repository::UserRepository;

//! Bearer-token session management

pub mod memory;
pub mod purge;
pub mod store;

pub use memory::InMemorySessionStore;
pub use purge::spawn_session_purger;
pub use store::{Session, SessionStore};

//! Local session persistence

mod store;

pub use store::{KeyringSessionStore, MemorySessionStore, SessionStore};

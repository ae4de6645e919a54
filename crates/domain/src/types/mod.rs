//! Domain data types

pub mod chat;
pub mod user;

pub use chat::{ChatMessage, InsertedRecord};
pub use user::{Language, ProfileUpdate, Session, UserProfile, UserRole};

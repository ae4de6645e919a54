//! # MediaTracker Common
//!
//! Cross-cutting helpers shared by the core and api crates.
//!
//! Currently this is content validation: chat message rules and email
//! format checks. Kept separate from the domain crate so validation can
//! grow rules without touching pure data types.

pub mod validation;

pub use validation::{is_valid_email, validate_message, MessageRejection};

//! Domain layer containing the passcode entity and validation outcomes.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;

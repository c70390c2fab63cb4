//! Domain layer containing the verification session entity.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;

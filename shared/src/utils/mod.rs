//! Common utility functions

pub mod card;
pub mod phone;
pub mod sanitize;
pub mod validation;

// Re-export commonly used utilities
pub use card::*;
pub use phone::*;
pub use sanitize::*;
pub use validation::*;

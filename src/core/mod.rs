// Public modules
pub mod compliance;
pub mod config;
pub mod error;
pub mod lexer;
pub mod naming;
pub mod refactor;
pub mod schema;
pub mod walker;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};

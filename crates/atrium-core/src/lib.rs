pub mod config;
pub mod error;
pub mod research;
pub mod roleplay;

// Re-export common error type
pub use error::AtriumError;

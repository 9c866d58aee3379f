// Public modules
pub mod config;
pub mod driver;
pub mod error;
pub mod mapping;
pub mod pattern;
pub mod renamer;
pub mod shell;

// Re-export common types for convenience
pub use driver::{run, run_reader, AppliedMapping, RunReport};
pub use error::{Error, ErrorCode, Result};
pub use mapping::Mapping;
pub use renamer::{DryRun, Fastmod, Renamer};

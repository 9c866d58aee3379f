pub mod core;

// Re-export everything from core for ergonomic library use
// Users can write `maprename::driver` instead of `maprename::core::driver`
pub use self::core::*;

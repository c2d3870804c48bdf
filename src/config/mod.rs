//! Configuration module.
//!
//! Defines the library configuration struct, logging enums, and the fixed
//! operational constants (pagination, SEO thresholds, timing).

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};

//! Initialization of shared resources (logger, HTTP client).

pub mod client;
pub mod logger;

pub use client::init_client;
pub use logger::init_logger_with;

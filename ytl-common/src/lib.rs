//! # YTL Common Library
//!
//! Shared code for the ytl crates:
//! - Common error type
//! - Bootstrap TOML configuration discovery and loading
//! - Logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};

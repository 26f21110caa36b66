//! # KortekStream Common Library
//!
//! Shared code for the KortekStream services:
//! - Common error type
//! - Bootstrap configuration loading (TOML + environment overrides)

pub mod config;
pub mod error;

pub use error::{Error, Result};

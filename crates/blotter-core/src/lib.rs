//! Core types and trait definitions for the Blotter incident service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod code;
pub mod error;
pub mod filter;
pub mod incident;
pub mod neighborhood;
pub mod store;

pub use error::{Error, Result};

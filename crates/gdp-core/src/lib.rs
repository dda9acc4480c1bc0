//! Core types and pure transforms for the GDP snapshot pipeline.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! extractor, the storage backends and the orchestrator all depend on it.

pub mod analysis;
pub mod error;
pub mod region;
pub mod row;
pub mod snapshot;
pub mod store;
pub mod transform;

pub use error::{Error, Result};

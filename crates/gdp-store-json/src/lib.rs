//! JSON document backend for the GDP snapshot history.
//!
//! The whole history lives in one pretty-printed JSON array. Appending reads
//! the array, extends it in memory and rewrites it in full.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;

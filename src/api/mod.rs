//! API access and document types
//!
//! This module fetches 4chan API documents through the on-disk cache
//! and provides types for working with them.

mod client;
mod fetcher;
mod search;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::*;
pub use fetcher::*;
pub use search::*;
pub use types::*;

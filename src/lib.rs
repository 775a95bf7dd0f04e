//! chanscope - Browse 4chan boards from the terminal
//!
//! This library fetches documents from the 4chan JSON API through a local
//! file cache. It can be used standalone or via the CLI.
//!
//! # Quick Start
//!
//! ```ignore
//! use chanscope::{Config, FileCache, HttpFetcher, ResourceClient};
//! use std::time::Duration;
//!
//! let config = Config::load()?;
//! let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout_secs))?;
//! let client = ResourceClient::new(fetcher, FileCache::new(config.resolved_cache_dir()), &config);
//!
//! // None means the fetch failed and was logged
//! if let Some(catalog) = client.catalog("g")? {
//!     for page in &catalog {
//!         println!("page {}: {} threads", page.page, page.threads.len());
//!     }
//! }
//! ```
//!
//! # Caching
//!
//! Listings (`boards.json`, `catalog.json`, `threads.json`, `archive.json`)
//! are cached once per calendar day. Threads are cached forever. Search
//! results are never cached.
//!
//! ```ignore
//! for hit in client.search("rust", Some("g")) {
//!     let hit = hit?;
//!     println!("{:?}", hit.thread);
//! }
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod stats;

// Public re-exports for library users
pub use api::{
    // Client
    Fetcher,
    HttpFetcher,
    ResourceClient,
    Search,
    Threads,
    // Types
    Archive,
    Board,
    BoardList,
    Catalog,
    CatalogPage,
    IndexPage,
    Post,
    SearchHit,
    SearchPage,
    Thread,
    ThreadIndex,
    ThreadStub,
};
pub use cache::{cache_key, FileCache};
pub use config::Config;
pub use error::{ChanError, ChanResult};
pub use stats::FieldStats;

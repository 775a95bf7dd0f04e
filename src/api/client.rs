//! Cached access to API documents

use crate::api::fetcher::Fetcher;
use crate::api::search::Search;
use crate::api::types::{Archive, BoardList, Catalog, Thread, ThreadIndex};
use crate::cache::{cache_key, FileCache};
use crate::config::Config;
use crate::error::{ChanError, ChanResult};
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use std::iter::FusedIterator;

/// Serves API documents from the file cache, fetching on a miss.
///
/// Every accessor returns `Ok(None)` when the network fetch failed; the
/// failure is logged and the caller should skip that resource. Cache and
/// decode failures are returned as errors.
pub struct ResourceClient<F> {
    fetcher: F,
    cache: FileCache,
    api_url: String,
    search_url: String,
    date: Option<NaiveDate>,
}

impl<F: Fetcher> ResourceClient<F> {
    pub fn new(fetcher: F, cache: FileCache, config: &Config) -> Self {
        Self {
            fetcher,
            cache,
            api_url: config.api_url.clone(),
            search_url: config.search_url.clone(),
            date: None,
        }
    }

    /// Pin the day used for cache keys instead of reading the clock
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Day used for cache keys
    pub fn today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Read the bytes for an API path, from cache or network
    fn load(&self, path: &str) -> ChanResult<Option<Vec<u8>>> {
        let key = cache_key(path, self.today());

        if self.cache.exists(&key) {
            tracing::debug!(path, key = %key, "cache hit");
            return self.cache.retrieve(&key).map(Some);
        }

        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(path, url = %url, "cache miss, fetching");

        let bytes = match self.fetcher.fetch(&url, None) {
            Ok(bytes) => bytes,
            Err(e) if e.is_transport() => {
                tracing::warn!(path, error = %e, "fetch failed, skipping");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        self.cache.store(&key, &bytes)?;
        Ok(Some(bytes))
    }

    /// Get the decoded JSON document at an API path
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> ChanResult<Option<T>> {
        let Some(bytes) = self.load(path)? else {
            return Ok(None);
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ChanError::Decode {
                path: path.to_string(),
                source,
            })
    }

    /// `boards.json`
    pub fn boards(&self) -> ChanResult<Option<BoardList>> {
        self.get_json("boards.json")
    }

    /// `{board}/catalog.json`
    pub fn catalog(&self, board: &str) -> ChanResult<Option<Catalog>> {
        self.get_json(&format!("{}/catalog.json", board))
    }

    /// `{board}/thread/{no}.json`
    pub fn thread(&self, board: &str, no: u64) -> ChanResult<Option<Thread>> {
        self.get_json(&format!("{}/thread/{}.json", board, no))
    }

    /// `{board}/threads.json` without following the thread numbers
    pub fn thread_index(&self, board: &str) -> ChanResult<Option<ThreadIndex>> {
        self.get_json(&format!("{}/threads.json", board))
    }

    /// `{board}/archive.json` without following the thread numbers
    pub fn archive_index(&self, board: &str) -> ChanResult<Option<Archive>> {
        self.get_json(&format!("{}/archive.json", board))
    }

    /// Every current thread of a board, loaded one at a time as iterated.
    ///
    /// Threads whose fetch failed are left out; the rest are still loaded.
    pub fn threads<'a>(&'a self, board: &'a str) -> ChanResult<Option<Threads<'a, F>>> {
        let Some(index) = self.thread_index(board)? else {
            return Ok(None);
        };

        let nos = index
            .iter()
            .flat_map(|page| page.threads.iter().map(|t| t.no))
            .collect();
        Ok(Some(Threads::new(self, board, nos)))
    }

    /// Every archived thread of a board, skipping ones that fail to fetch
    pub fn archive<'a>(&'a self, board: &'a str) -> ChanResult<Option<Threads<'a, F>>> {
        let Some(nos) = self.archive_index(board)? else {
            return Ok(None);
        };

        Ok(Some(Threads::new(self, board, nos)))
    }

    /// Search thread contents, optionally restricted to one board.
    ///
    /// Results come straight from the network and are not cached.
    pub fn search<'a>(&'a self, keywords: &'a str, board: Option<&'a str>) -> Search<'a, F> {
        Search::new(&self.fetcher, &self.search_url, keywords, board)
    }
}

/// Threads of a listing, fetched lazily in listing order.
///
/// A thread whose fetch failed is skipped. A cache or decode failure is
/// yielded as an error and ends the sequence.
pub struct Threads<'a, F> {
    client: &'a ResourceClient<F>,
    board: &'a str,
    nos: std::vec::IntoIter<u64>,
    done: bool,
}

impl<'a, F: Fetcher> Threads<'a, F> {
    fn new(client: &'a ResourceClient<F>, board: &'a str, nos: Vec<u64>) -> Self {
        Self {
            client,
            board,
            nos: nos.into_iter(),
            done: false,
        }
    }
}

impl<F: Fetcher> Iterator for Threads<'_, F> {
    type Item = ChanResult<Thread>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for no in self.nos.by_ref() {
            match self.client.thread(self.board, no) {
                Ok(Some(thread)) => return Some(Ok(thread)),
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        self.done = true;
        None
    }
}

impl<F: Fetcher> FusedIterator for Threads<'_, F> {}

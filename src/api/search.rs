//! Paged search results as an iterator

use crate::api::fetcher::Fetcher;
use crate::api::types::{SearchHit, SearchPage};
use crate::error::{ChanError, ChanResult};
use reqwest::Url;
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Results per search page; the offset advances by this much
pub const PAGE_SIZE: u32 = 10;

/// Last offset requested; at most `MAX_OFFSET / PAGE_SIZE + 1` pages are fetched
pub const MAX_OFFSET: u32 = 100;

/// Lazy sequence of search hits.
///
/// A page is only requested once every hit of the previous page has been
/// consumed. A failed request is yielded as an error and ends the sequence.
/// The sequence cannot be restarted; call search again for a new one.
pub struct Search<'a, F> {
    fetcher: &'a F,
    endpoint: &'a str,
    keywords: &'a str,
    board: Option<&'a str>,
    /// Offset of the next page, `None` once done
    offset: Option<u32>,
    pending: VecDeque<SearchHit>,
}

impl<'a, F: Fetcher> Search<'a, F> {
    pub(crate) fn new(
        fetcher: &'a F,
        endpoint: &'a str,
        keywords: &'a str,
        board: Option<&'a str>,
    ) -> Self {
        Self {
            fetcher,
            endpoint,
            keywords,
            board,
            offset: Some(0),
            pending: VecDeque::new(),
        }
    }

    /// Request URL for the page at `offset`
    pub fn page_url(&self, offset: u32) -> ChanResult<Url> {
        let mut params = vec![("q", self.keywords.to_string())];
        if let Some(board) = self.board {
            params.push(("b", board.to_string()));
        }
        if offset > 0 {
            params.push(("o", offset.to_string()));
        }

        Url::parse_with_params(self.endpoint, &params)
            .map_err(|e| ChanError::Config(format!("Invalid search URL {}: {}", self.endpoint, e)))
    }

    fn fetch_page(&self, offset: u32) -> ChanResult<SearchPage> {
        let url = self.page_url(offset)?;
        tracing::debug!(url = %url, offset, "fetching search page");

        let bytes = self.fetcher.fetch(url.as_str(), None)?;
        serde_json::from_slice(&bytes).map_err(|source| ChanError::Decode {
            path: url.to_string(),
            source,
        })
    }
}

impl<F: Fetcher> Iterator for Search<'_, F> {
    type Item = ChanResult<SearchHit>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(hit) = self.pending.pop_front() {
                return Some(Ok(hit));
            }

            let offset = self.offset?;
            let page = match self.fetch_page(offset) {
                Ok(page) => page,
                Err(e) => {
                    self.offset = None;
                    return Some(Err(e));
                }
            };

            self.pending.extend(page.threads);
            let next = offset + PAGE_SIZE;
            self.offset = (next <= MAX_OFFSET).then_some(next);
        }
    }
}

impl<F: Fetcher> FusedIterator for Search<'_, F> {}

#[cfg(test)]
mod tests {
    use crate::api::client::ResourceClient;
    use crate::api::testing::ScriptedFetcher;
    use crate::cache::FileCache;
    use crate::config::Config;
    use crate::error::ChanError;
    use tempfile::TempDir;

    const ENDPOINT: &str = "http://find.test/api";

    fn client(dir: &TempDir, fetcher: ScriptedFetcher) -> ResourceClient<ScriptedFetcher> {
        let config = Config {
            search_url: ENDPOINT.to_string(),
            ..Default::default()
        };
        ResourceClient::new(fetcher, FileCache::new(dir.path()), &config)
    }

    fn page(board: &str, hits: usize) -> Vec<u8> {
        let threads: Vec<serde_json::Value> = (0..hits)
            .map(|i| serde_json::json!({"board": board, "thread": format!("t{}", i), "posts": []}))
            .collect();
        serde_json::to_vec(&serde_json::json!({ "threads": threads })).unwrap()
    }

    #[test]
    fn test_query_parameters() {
        let dir = TempDir::new().unwrap();
        let client = client(&dir, ScriptedFetcher::new());

        let search = client.search("rust lang", None);
        assert_eq!(search.page_url(0).unwrap().as_str(), "http://find.test/api?q=rust+lang");

        let search = client.search("rust", Some("g"));
        assert_eq!(search.page_url(0).unwrap().as_str(), "http://find.test/api?q=rust&b=g");
        assert_eq!(
            search.page_url(20).unwrap().as_str(),
            "http://find.test/api?q=rust&b=g&o=20"
        );
    }

    #[test]
    fn test_stops_after_eleven_pages() {
        let dir = TempDir::new().unwrap();
        let client = client(&dir, ScriptedFetcher::new().fallback(page("g", 2)));

        let hits: Vec<_> = client.search("x", None).collect::<Result<_, _>>().unwrap();

        assert_eq!(hits.len(), 22);
        let calls = client.fetcher().calls();
        assert_eq!(calls.len(), 11);
        assert_eq!(calls[0], "http://find.test/api?q=x");
        assert_eq!(calls[10], "http://find.test/api?q=x&o=100");
    }

    #[test]
    fn test_pages_fetched_on_demand() {
        let dir = TempDir::new().unwrap();
        let client = client(&dir, ScriptedFetcher::new().fallback(page("g", 3)));

        let mut search = client.search("x", None);
        assert_eq!(client.fetcher().call_count(), 0);

        for _ in 0..3 {
            search.next().unwrap().unwrap();
        }
        assert_eq!(client.fetcher().call_count(), 1);

        search.next().unwrap().unwrap();
        assert_eq!(client.fetcher().call_count(), 2);
    }

    #[test]
    fn test_failure_on_third_page_propagates() {
        let dir = TempDir::new().unwrap();
        let fetcher = ScriptedFetcher::new()
            .respond("http://find.test/api?q=x", &page("a", 2))
            .respond("http://find.test/api?q=x&o=10", &page("b", 1))
            .fail("http://find.test/api?q=x&o=20")
            .fallback(page("c", 5));
        let client = client(&dir, fetcher);

        let mut search = client.search("x", None);
        let boards: Vec<_> = search
            .by_ref()
            .take(3)
            .map(|hit| hit.unwrap().board.unwrap())
            .collect();
        assert_eq!(boards, vec!["a", "a", "b"]);

        assert!(matches!(search.next(), Some(Err(ChanError::Transport { .. }))));
        assert!(search.next().is_none());
        assert!(search.next().is_none());
        assert_eq!(client.fetcher().call_count(), 3);
    }

    #[test]
    fn test_search_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let client = client(&dir, ScriptedFetcher::new().fallback(page("g", 0)));

        assert_eq!(client.search("x", None).count(), 0);
        assert_eq!(client.search("x", None).count(), 0);

        assert_eq!(client.fetcher().call_count(), 22);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_malformed_page_ends_search() {
        let dir = TempDir::new().unwrap();
        let client = client(&dir, ScriptedFetcher::new().fallback(b"<html>".to_vec()));

        let mut search = client.search("x", None);
        assert!(matches!(search.next(), Some(Err(ChanError::Decode { .. }))));
        assert!(search.next().is_none());
    }
}

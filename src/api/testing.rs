//! Scripted fetcher for unit tests

use crate::api::fetcher::Fetcher;
use crate::error::{ChanError, ChanResult};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Answers from a fixed table of URLs and records every request.
///
/// URLs marked with `fail`, and unknown URLs without a fallback, return a
/// transport error.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    responses: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
    broken: HashSet<String>,
    fallback: Option<Vec<u8>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: &[u8]) -> Self {
        self.responses.insert(url.to_string(), body.to_vec());
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Answer `url` with a local IO error instead of a network failure
    pub fn break_with_io(mut self, url: &str) -> Self {
        self.broken.insert(url.to_string());
        self
    }

    pub fn fallback(mut self, body: Vec<u8>) -> Self {
        self.fallback = Some(body);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch(&self, url: &str, _body: Option<&[u8]>) -> ChanResult<Vec<u8>> {
        self.calls.borrow_mut().push(url.to_string());

        if self.failing.contains(url) {
            return Err(ChanError::Transport {
                url: url.to_string(),
                reason: "connection reset".into(),
            });
        }

        if self.broken.contains(url) {
            return Err(ChanError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "socket setup denied",
            )));
        }

        self.responses
            .get(url)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| ChanError::Http {
                status: 404,
                url: url.to_string(),
            })
    }
}

//! Network access for chanscope
//!
//! The rest of the crate only sees the [`Fetcher`] trait, so tests can
//! script responses without a network.

use crate::error::{ChanError, ChanResult};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, USER_AGENT};
use std::time::Duration;

/// Sent with every request so board pages skip the disclaimer interstitial
const DISCLAIMER_COOKIE: &str = "4chan_disclaimer=1";

const DEFAULT_USER_AGENT: &str = concat!("chanscope/", env!("CARGO_PKG_VERSION"));

/// Fetch raw response bytes for a URL.
///
/// `body` turns the request into a POST. Any network or non-success HTTP
/// status is an error; the caller never sees status codes.
pub trait Fetcher {
    fn fetch(&self, url: &str, body: Option<&[u8]>) -> ChanResult<Vec<u8>>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str, body: Option<&[u8]>) -> ChanResult<Vec<u8>> {
        (**self).fetch(url, body)
    }
}

/// Blocking HTTP fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> ChanResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(DISCLAIMER_COOKIE));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ChanError::Transport {
                url: String::new(),
                reason: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, body: Option<&[u8]>) -> ChanResult<Vec<u8>> {
        let request = match body {
            Some(body) => self.client.post(url).body(body.to_vec()),
            None => self.client.get(url),
        };

        let response = request.send().map_err(|e| ChanError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(ChanError::Http {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().map_err(|e| ChanError::Transport {
            url: url.to_string(),
            reason: format!("Failed to read response body: {}", e),
        })?;

        Ok(bytes.to_vec())
    }
}

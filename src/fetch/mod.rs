// src/fetch/mod.rs
// =============================================================================
// The fetch collaborator: GET a URL and hand back its body as chunks.
//
// The worker pool only depends on the two traits below, so the HTTP
// transport can be swapped out (tests use an in-memory fake).
//
// Submodules:
// - http: the reqwest-backed implementation used by the CLI
// =============================================================================

mod http;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Performs a GET request and returns the response body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Box<dyn ResponseBody>, FetchError>;
}

/// A response body read one chunk at a time.
///
/// The body is released when the box is dropped.
#[async_trait]
pub trait ResponseBody: Send {
    /// Returns the next chunk, or `None` once the body is exhausted.
    async fn chunk(&mut self) -> Result<Option<Bytes>, FetchError>;
}

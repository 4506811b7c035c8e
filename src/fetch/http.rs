// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP(S) with reqwest.
//
// Key functionality:
// - One shared Client for every worker (connection pooling)
// - A fixed per-request timeout (default 10 seconds)
// - Non-2xx responses are reported as FetchError::Status
// - The body is streamed with Response::chunk(), never buffered whole
//
// Rust concepts:
// - Trait implementations: HttpFetcher implements our Fetcher trait
// - Box<dyn Trait>: the body is returned as a trait object
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use super::{Fetcher, ResponseBody};
use crate::error::FetchError;

/// Fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError::Transport(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, timeout))
    }

    /// Wraps an existing client. `timeout` is only used to label timeout errors.
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<Box<dyn ResponseBody>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(Box::new(HttpBody {
            response,
            timeout: self.timeout,
        }))
    }
}

// Owns the response; dropping it closes the connection or returns it to the pool.
struct HttpBody {
    response: Response,
    timeout: Duration,
}

#[async_trait]
impl ResponseBody for HttpBody {
    async fn chunk(&mut self) -> Result<Option<Bytes>, FetchError> {
        self.response
            .chunk()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves exactly one connection with a canned response.
    async fn serve_once(response: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        Url::parse(&format!("http://{}/", addr)).unwrap()
    }

    fn local_fetcher(timeout: Duration) -> HttpFetcher {
        let client = Client::builder().no_proxy().timeout(timeout).build().unwrap();
        HttpFetcher::with_client(client, timeout)
    }

    async fn read_all(mut body: Box<dyn ResponseBody>) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = body.chunk().await.unwrap() {
            out.extend_from_slice(&chunk);
        }
        out
    }

    #[tokio::test]
    async fn test_fetches_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\nfoo foo bar",
        )
        .await;

        let body = local_fetcher(Duration::from_secs(5)).get(&url).await.unwrap();
        assert_eq!(read_all(body).await, b"foo foo bar");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = local_fetcher(Duration::from_secs(5)).get(&url).await.err().unwrap();
        assert!(matches!(err, FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without answering.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let timeout = Duration::from_millis(200);
        let err = local_fetcher(timeout).get(&url).await.err().unwrap();
        assert!(matches!(err, FetchError::Timeout(t) if t == timeout));
    }

    #[test]
    fn test_new_builds_client() {
        assert!(HttpFetcher::new(Duration::from_secs(10)).is_ok());
    }
}

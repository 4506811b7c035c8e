// src/tally/testing.rs
// In-memory Fetcher used by the pool and coordinator tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::FetchError;
use crate::fetch::{Fetcher, ResponseBody};

enum Reply {
    Body(Vec<&'static [u8]>),
    Refuse(String),
    Hang,
    Panic,
}

/// Unknown URLs answer with HTTP 404.
#[derive(Default)]
pub struct FakeFetcher {
    replies: HashMap<String, Reply>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: &str, chunks: &[&'static [u8]]) -> Self {
        self.with_reply(url, Reply::Body(chunks.to_vec()))
    }

    pub fn with_error(self, url: &str, message: &str) -> Self {
        self.with_reply(url, Reply::Refuse(message.to_string()))
    }

    /// The request never answers; only the worker's timeout ends it.
    pub fn with_hang(self, url: &str) -> Self {
        self.with_reply(url, Reply::Hang)
    }

    /// The request panics inside the worker task.
    pub fn with_panic(self, url: &str) -> Self {
        self.with_reply(url, Reply::Panic)
    }

    /// Number of GET requests issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn with_reply(mut self, url: &str, reply: Reply) -> Self {
        let key = Url::parse(url).unwrap().to_string();
        self.replies.insert(key, reply);
        self
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn get(&self, url: &Url) -> Result<Box<dyn ResponseBody>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.replies.get(url.as_str()) {
            Some(Reply::Body(chunks)) => Ok(Box::new(FakeBody {
                chunks: chunks.iter().copied().map(Bytes::from_static).collect(),
            })),
            Some(Reply::Refuse(message)) => Err(FetchError::Connect(message.clone())),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(FetchError::Transport("hang ended".to_string()))
            }
            Some(Reply::Panic) => panic!("fetcher blew up on {}", url),
            None => Err(FetchError::Status(404)),
        }
    }
}

struct FakeBody {
    chunks: VecDeque<Bytes>,
}

#[async_trait]
impl ResponseBody for FakeBody {
    async fn chunk(&mut self) -> Result<Option<Bytes>, FetchError> {
        Ok(self.chunks.pop_front())
    }
}

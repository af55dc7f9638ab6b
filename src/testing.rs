//! Fakes shared by the unit tests.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use reqwest::Url;

use crate::error::{FetchError, FetchResult, SinkError, SinkResult};
use crate::fetch::Transport;
use crate::models::Batch;
use crate::sink::Sink;

/// One JSON paste object in the shape the scraping API returns.
pub fn paste_json(key: &str) -> String {
    format!(
        r#"{{"scrape_url":"https://x/{key}","full_url":"https://pastebin.com/{key}","date":"1700000000","key":"{key}","size":"12","expire":"N","title":"t","syntax":"text","user":"u"}}"#
    )
}

/// Replays canned bodies (or failures) in order, recording each URL.
/// Once the script runs out every request fails.
#[derive(Clone, Default)]
pub struct FakeTransport {
    script: Arc<Mutex<VecDeque<Result<String, &'static str>>>>,
    requests: Arc<Mutex<Vec<Url>>>,
}

impl FakeTransport {
    pub fn new(script: impl IntoIterator<Item = Result<String, &'static str>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: Url) -> FetchResult<Bytes> {
        self.requests.lock().unwrap().push(url);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(body)) => Ok(Bytes::from(body)),
            Some(Err(msg)) => Err(FetchError::Transport {
                source: Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, msg)),
            }),
            None => Err(FetchError::Transport {
                source: Box::new(io::Error::new(io::ErrorKind::Other, "script exhausted")),
            }),
        }
    }
}

/// Keeps every forwarded batch; optionally fails on the n-th forward.
#[derive(Clone, Default)]
pub struct RecordingSink {
    batches: Arc<Mutex<Vec<Batch>>>,
    fail_on: Option<usize>,
}

impl RecordingSink {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    pub fn batches(&self) -> Vec<Batch> {
        self.batches.lock().unwrap().clone()
    }
}

impl Sink for RecordingSink {
    async fn forward(&mut self, batch: Batch) -> SinkResult<()> {
        let mut batches = self.batches.lock().unwrap();
        if self.fail_on == Some(batches.len() + 1) {
            return Err(SinkError::Io {
                source: io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"),
            });
        }
        batches.push(batch);
        Ok(())
    }
}

use std::future::Future;

use bytes::Bytes;
use reqwest::Url;
use tracing::debug;

use crate::config::Limit;
use crate::error::FetchResult;
use crate::models::Batch;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Something that can perform a GET and hand back the whole body.
pub trait Transport {
    fn get(&self, url: Url) -> impl Future<Output = FetchResult<Bytes>> + Send;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    // status codes are not checked; an error page fails to decode instead
    async fn get(&self, url: Url) -> FetchResult<Bytes> {
        let response = self.client.get(url).send().await?;
        Ok(response.bytes().await?)
    }
}

pub struct Fetcher<T> {
    transport: T,
    endpoint: Url,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, endpoint: Url) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    /// Fetch the most recent pastes, at most `limit` of them.
    pub async fn fetch(&self, limit: Limit) -> FetchResult<Batch> {
        let url = scrape_url(&self.endpoint, limit);
        debug!(%url, "fetching recent pastes");

        let body = self.transport.get(url).await?;
        let batch: Batch = serde_json::from_slice(&body)?;

        debug!(count = batch.len(), "decoded pastes");
        Ok(batch)
    }
}

/// The endpoint with `limit` set, replacing any `limit` it already carries.
fn scrape_url(endpoint: &Url, limit: Limit) -> Url {
    let kept: Vec<(String, String)> = endpoint
        .query_pairs()
        .filter(|(name, _)| name != "limit")
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(&kept)
        .append_pair("limit", &limit.get().to_string());
    url
}

use std::future::Future;

use tokio::io::Stdout;

use crate::error::SinkResult;
use crate::models::Batch;

pub mod db;
pub mod stream;

pub use db::StoreSink;
pub use stream::StreamSink;

pub trait Sink {
    /// Hand over one batch. Stops at the first failure; whatever was
    /// written before it stays written.
    fn forward(&mut self, batch: Batch) -> impl Future<Output = SinkResult<()>> + Send;
}

pub enum AnySink {
    Store(StoreSink),
    Stream(StreamSink<Stdout>),
}

impl Sink for AnySink {
    async fn forward(&mut self, batch: Batch) -> SinkResult<()> {
        match self {
            AnySink::Store(store) => store.forward(batch).await,
            AnySink::Stream(stream) => stream.forward(batch).await,
        }
    }
}

impl From<StoreSink> for AnySink {
    fn from(value: StoreSink) -> Self {
        AnySink::Store(value)
    }
}

impl From<StreamSink<Stdout>> for AnySink {
    fn from(value: StreamSink<Stdout>) -> Self {
        AnySink::Stream(value)
    }
}

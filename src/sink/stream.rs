use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::Sink;
use crate::error::SinkResult;
use crate::models::Batch;

/// Writes each batch as a single JSON array line.
pub struct StreamSink<W> {
    writer: W,
}

impl<W> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        StreamSink { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: AsyncWrite + Unpin + Send> Sink for StreamSink<W> {
    async fn forward(&mut self, batch: Batch) -> SinkResult<()> {
        let mut line = serde_json::to_vec(&batch)?;
        line.push(b'\n');

        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

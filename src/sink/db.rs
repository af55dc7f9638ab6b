use tracing::debug;

use super::Sink;
use crate::config::TableName;
use crate::db::{insert_statement, Database};
use crate::error::SinkResult;
use crate::models::Batch;

/// Writes each paste as one row. Not transactional across a batch.
pub struct StoreSink {
    database: Database,
    insert: String,
}

impl StoreSink {
    pub fn new(database: Database, table: &TableName) -> Self {
        StoreSink {
            database,
            insert: insert_statement(table),
        }
    }
}

impl Sink for StoreSink {
    async fn forward(&mut self, batch: Batch) -> SinkResult<()> {
        for paste in &batch {
            self.database.insert_paste(&self.insert, paste).await?;
        }
        debug!(count = batch.len(), "stored pastes");
        Ok(())
    }
}

use anyhow::Context;
use tracing::info;

use crate::config::Config;
use crate::db::Database;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let table = config.database.table_name()?;
    let mut database = Database::connect(&config.database.url())
        .await
        .context("failed to connect to database")?;

    database.create_table(&table).await?;
    info!(%table, "paste table ready");

    Ok(())
}

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::config::TableName;
use crate::models::Paste;

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    /// Connect to a database by URL.
    ///
    /// The pool holds a single connection: pastes are written one at a time
    /// from the scrape loop, and the prepared insert stays cached on it.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Create the paste table if it does not exist yet.
    pub async fn create_table(&mut self, table: &TableName) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (scrape_url TEXT NOT NULL, full_url TEXT NOT \
             NULL, date TEXT NOT NULL, key TEXT NOT NULL, size TEXT NOT NULL, expire TEXT NOT \
             NULL, title TEXT NOT NULL, syntax TEXT NOT NULL, user_id TEXT NOT NULL)"
        ))
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    /// Insert a paste with a statement that binds all nine fields in order.
    pub async fn insert_paste(&mut self, sql: &str, paste: &Paste) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(sql)
            .bind(paste.scrape_url.as_str())
            .bind(paste.full_url.as_str())
            .bind(paste.date.as_str())
            .bind(paste.key.as_str())
            .bind(paste.size.as_str())
            .bind(paste.expire.as_str())
            .bind(paste.title.as_str())
            .bind(paste.syntax.as_str())
            .bind(paste.user.as_str())
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    /// Get all pastes in insertion order.
    #[cfg(test)]
    pub async fn get_all_pastes(&mut self, table: &TableName) -> Result<Vec<Paste>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Paste>(&format!("SELECT * FROM {table}"))
            .fetch_all(&mut conn)
            .await
    }

    #[cfg(test)]
    pub async fn execute_raw(&mut self, sql: &str) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(sql).execute(&mut conn).await?;
        Ok(())
    }
}

/// Positional insert for all nine paste columns.
pub fn insert_statement(table: &TableName) -> String {
    format!("INSERT INTO {table} VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)")
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single entry from the paste scraping API.
///
/// Every field is passed through exactly as the source delivered it. The
/// declaration order matches the column order of the paste table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Paste {
    pub scrape_url: String,
    pub full_url: String,
    pub date: String,
    pub key: String,
    pub size: String,
    pub expire: String,
    pub title: String,
    pub syntax: String,
    #[serde(rename = "user")]
    #[sqlx(rename = "user_id")]
    pub user: String,
}

/// The pastes decoded from one fetch, in source order.
pub type Batch = Vec<Paste>;

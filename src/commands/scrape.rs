use anyhow::Context;
use tracing::info;

use crate::config::{Config, SinkKind};
use crate::db::Database;
use crate::fetch::{Fetcher, HttpTransport};
use crate::scraper::Scraper;
use crate::sink::{AnySink, StoreSink, StreamSink};

pub async fn run(config: Config) -> anyhow::Result<()> {
    // everything is checked before a connection is opened or a timer armed
    let settings = config.scrape.validate().context("invalid scrape settings")?;

    let sink: AnySink = match config.sink {
        SinkKind::Store => {
            let table = config.database.table_name()?;
            let database = Database::connect(&config.database.url())
                .await
                .context("failed to connect to database")?;
            StoreSink::new(database, &table).into()
        }
        SinkKind::Stream => StreamSink::new(tokio::io::stdout()).into(),
    };

    let fetcher = Fetcher::new(HttpTransport::new()?, settings.endpoint.clone());

    info!(
        endpoint = %settings.endpoint,
        limit = %settings.limit,
        rate_secs = settings.rate.as_secs(),
        sink = %config.sink,
        "starting scraper"
    );

    Scraper::new(fetcher, sink, &settings)
        .run()
        .await
        .context("scraper stopped")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[tokio::test]
    async fn bad_limit_fails_before_connecting() {
        let mut config = Config::default();
        config.scrape.limit = 0;
        // would fail to connect if it got that far
        config.database.url = Some("postgres://nobody@127.0.0.1:1/none".to_owned());

        let err = run(config).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::LimitOutOfRange(0))
        );
    }

    #[tokio::test]
    async fn bad_table_fails_before_connecting() {
        let mut config = Config::default();
        config.database.table = "pastes; --".to_owned();
        config.database.url = Some("postgres://nobody@127.0.0.1:1/none".to_owned());

        let err = run(config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidTable(_))
        ));
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;
mod config;
mod db;
mod error;
mod fetch;
mod models;
mod scraper;
mod sink;
#[cfg(test)]
mod testing;

use config::{Config, SinkKind};

/// Periodically scrape recent public pastes into a database or stdout.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, env = "PASTESCRAPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the scraping API until the first error.
    Scrape(ScrapeArgs),
    /// Create the paste table if it is missing.
    InitDb(DatabaseArgs),
}

#[derive(Args)]
struct ScrapeArgs {
    /// Where fetched pastes go.
    #[arg(long, value_enum)]
    sink: Option<SinkKind>,

    /// Number of recent pastes to request (1 <= limit <= 250).
    #[arg(long)]
    limit: Option<i64>,

    /// Seconds between requests (at least 60).
    #[arg(long, value_name = "SECONDS")]
    rate: Option<u64>,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Args)]
struct DatabaseArgs {
    /// Database connection URL, used instead of the credentials below.
    #[arg(long = "db-url", env = "PASTESCRAPE_DB_URL")]
    url: Option<String>,

    /// Database username.
    #[arg(long = "user")]
    user: Option<String>,

    /// Database password.
    #[arg(long = "password", env = "PASTESCRAPE_DB_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Database name.
    #[arg(long = "db")]
    name: Option<String>,

    /// Table the pastes are inserted into.
    #[arg(long)]
    table: Option<String>,
}

impl ScrapeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(sink) = self.sink {
            config.sink = sink;
        }
        if let Some(limit) = self.limit {
            config.scrape.limit = limit;
        }
        if let Some(rate) = self.rate {
            config.scrape.rate_secs = rate;
        }
        self.database.apply(&mut config.database);
    }
}

impl DatabaseArgs {
    fn apply(self, database: &mut config::Database) {
        if self.url.is_some() {
            database.url = self.url;
        }
        if let Some(user) = self.user {
            database.user = user;
        }
        if let Some(password) = self.password {
            database.password = password;
        }
        if let Some(name) = self.name {
            database.name = name;
        }
        if let Some(table) = self.table {
            database.table = table;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries scraped data in stream mode, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).await?;

    match cli.command {
        Command::Scrape(args) => {
            args.apply(&mut config);
            commands::scrape::run(config).await
        }
        Command::InitDb(args) => {
            args.apply(&mut config.database);
            commands::init_db::run(config).await
        }
    }
}

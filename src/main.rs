//! `presto-query`: run one statement and print its rows as JSON lines.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use presto_client::{ClientConfig, Connection, PrestoClient};

#[derive(Debug, Parser)]
#[command(name = "presto-query", version, about = "Run a SQL statement against Presto")]
struct Cli {
    /// SQL statement to execute.
    sql: String,

    /// TOML config file. Falls back to PRESTO_* environment variables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Coordinator URL, e.g. http://localhost:8080
    #[arg(long, env = "PRESTO_HOST")]
    host: Option<String>,

    #[arg(long, env = "PRESTO_USER")]
    user: Option<String>,

    #[arg(long, env = "PRESTO_SCHEMA")]
    schema: Option<String>,

    #[arg(long, env = "PRESTO_CATALOG")]
    catalog: Option<String>,

    /// Delay before each nextUri request.
    #[arg(long, env = "PRESTO_POLL_INTERVAL_MS", default_value_t = 50)]
    poll_interval_ms: u64,

    /// Give up after this many nextUri requests.
    #[arg(long, env = "PRESTO_MAX_POLLS")]
    max_polls: Option<usize>,

    /// Print rows as objects keyed by column name.
    #[arg(long)]
    assoc: bool,
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        if let Some(path) = &self.config {
            return ClientConfig::load(path)
                .with_context(|| format!("loading {}", path.display()));
        }

        let (Some(host), Some(user), Some(schema), Some(catalog)) =
            (&self.host, &self.user, &self.schema, &self.catalog)
        else {
            bail!("pass --config or set --host, --user, --schema and --catalog");
        };

        let mut config = ClientConfig::new(Connection::new(host, user, schema, catalog));
        config.poll_interval_ms = self.poll_interval_ms;
        config.max_polls = self.max_polls;
        Ok(config)
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();
    let config = cli.client_config()?;
    let client = PrestoClient::from_config(&config);
    let query = client.query().raw(cli.sql.as_str());

    if cli.assoc {
        let rows = query.get_assoc().await?;
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
        tracing::info!(rows = rows.len(), "query finished");
    } else {
        let rows = query.get().await?;
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
        tracing::info!(rows = rows.len(), "query finished");
    }

    Ok(())
}

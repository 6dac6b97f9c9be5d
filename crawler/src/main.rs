use anyhow::Result;
use clap::Parser;
use crawler::config::{CrawlConfig, DEFAULT_SEED, DEFAULT_USER_AGENT};
use minisearch_core::persist::save_corpus;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl pages from a seed URL into a corpus snapshot")]
struct Cli {
    /// Seed URL the crawl starts from
    #[arg(long, default_value = DEFAULT_SEED)]
    seed: String,
    /// Output corpus file (JSON array of {url, title, content})
    #[arg(long, default_value = "crawled_data.json")]
    output: PathBuf,
    /// Maximum number of documents to fetch
    #[arg(long, default_value_t = 50)]
    max_docs: usize,
    /// URLs fetched in parallel per batch
    #[arg(long, default_value_t = 5)]
    batch_size: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    /// Only follow links whose path starts with this prefix ("" for any)
    #[arg(long, default_value = "/wiki/")]
    path_prefix: String,
    /// Skip pages whose body is larger than this many bytes
    #[arg(long, default_value_t = 2 * 1024 * 1024)]
    max_body_bytes: usize,
}

impl From<Cli> for CrawlConfig {
    fn from(cli: Cli) -> Self {
        Self {
            seed: cli.seed,
            max_docs: cli.max_docs,
            batch_size: cli.batch_size,
            timeout: Duration::from_secs(cli.timeout_secs),
            user_agent: cli.user_agent,
            path_prefix: cli.path_prefix,
            max_body_bytes: cli.max_body_bytes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let output = cli.output.clone();
    let config = CrawlConfig::from(cli);

    let report = crawler::crawl(&config).await?;
    save_corpus(&output, &report.documents)?;
    tracing::info!(
        documents = report.documents.len(),
        visited = report.visited.len(),
        failed = report.failed.len(),
        frontier = report.pending,
        output = %output.display(),
        "crawl complete"
    );
    Ok(())
}

//! Breadth-first crawler: a single-writer [`Frontier`], an HTTP [`Fetcher`]
//! and a [`Coordinator`] that runs fetches in bounded, synchronous batches.

pub mod config;
pub mod coordinator;
pub mod fetch;
pub mod frontier;
pub mod scope;

pub use config::CrawlConfig;
pub use coordinator::{Coordinator, CrawlReport};
pub use fetch::{extract_page, Fetch, FetchError, FetchedPage, Fetcher};
pub use frontier::Frontier;
pub use scope::{normalize_url, ScopeFilter};

use anyhow::{Context, Result};
use url::Url;

/// Crawl from `config.seed` over HTTP with the configured limits.
pub async fn crawl(config: &CrawlConfig) -> Result<CrawlReport> {
    let seed = Url::parse(&config.seed).with_context(|| format!("invalid seed url {}", config.seed))?;
    let scope = ScopeFilter::new(&seed, config.path_prefix.clone());
    let fetcher = Fetcher::new(config, scope).context("building http client")?;

    let mut coordinator = Coordinator::new(fetcher, config.max_docs, config.batch_size);
    coordinator.seed(normalize_url(&seed));
    tracing::info!(seed = %seed, max_docs = config.max_docs, batch_size = config.batch_size, "starting crawl");
    Ok(coordinator.run().await)
}

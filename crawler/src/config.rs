use std::time::Duration;

pub const DEFAULT_SEED: &str = "https://en.wikipedia.org/wiki/Software_engineering";
pub const DEFAULT_USER_AGENT: &str = "minisearch-bot/0.1 (+https://github.com/minisearch/minisearch)";

/// Everything a crawl run needs to know. The binary fills this from the
/// command line; tests build it directly.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: String,
    /// Crawl budget: the corpus never holds more documents than this.
    pub max_docs: usize,
    /// URLs fetched in parallel per round.
    pub batch_size: usize,
    pub timeout: Duration,
    pub user_agent: String,
    /// Links must start with this path to be followed; empty allows any path.
    pub path_prefix: String,
    pub max_body_bytes: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED.to_string(),
            max_docs: 50,
            batch_size: 5,
            timeout: Duration::from_secs(5),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            path_prefix: "/wiki/".to_string(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

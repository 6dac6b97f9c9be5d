use async_trait::async_trait;
use crawler::{Coordinator, Fetch, FetchError, FetchedPage};
use minisearch_core::Document;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// In-memory link graph. Each page may delay its response so tests can
/// control completion order within a batch.
#[derive(Default)]
struct GraphFetcher {
    links: HashMap<String, Vec<String>>,
    delays_ms: HashMap<String, u64>,
    failing: HashSet<String>,
}

impl GraphFetcher {
    fn page(mut self, url: &str, links: &[&str]) -> Self {
        self.links.insert(url.to_string(), links.iter().map(|s| s.to_string()).collect());
        self
    }
    fn delay(mut self, url: &str, ms: u64) -> Self {
        self.delays_ms.insert(url.to_string(), ms);
        self
    }
    fn fail(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }
}

#[async_trait]
impl Fetch for GraphFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if let Some(ms) = self.delays_ms.get(url) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.failing.contains(url) {
            return Err(FetchError::Status { url: url.to_string(), status: 500 });
        }
        Ok(FetchedPage {
            document: Document { url: url.to_string(), title: url.to_uppercase(), content: format!("page {url}") },
            links: self.links.get(url).cloned().unwrap_or_default(),
        })
    }
}

fn urls(docs: &[Document]) -> HashSet<String> {
    docs.iter().map(|d| d.url.clone()).collect()
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn visited_after(fetcher: GraphFetcher, cap: usize) -> HashSet<String> {
    let mut c = Coordinator::new(fetcher, cap, 5);
    c.seed("a");
    let report = c.run().await;
    assert_eq!(report.visited.iter().cloned().collect::<HashSet<_>>(), c.frontier().visited().clone());
    c.frontier().visited().clone()
}

#[tokio::test]
async fn visited_set_is_independent_of_completion_order() {
    let b_first = GraphFetcher::default()
        .page("a", &["b", "c"])
        .page("b", &["d"])
        .page("c", &["e"])
        .delay("c", 30);
    let c_first = GraphFetcher::default()
        .page("a", &["b", "c"])
        .page("b", &["d"])
        .page("c", &["e"])
        .delay("b", 30);

    assert_eq!(visited_after(b_first, 3).await, set(&["a", "b", "c"]));
    assert_eq!(visited_after(c_first, 3).await, set(&["a", "b", "c"]));
}

#[tokio::test]
async fn corpus_respects_cap_and_has_unique_urls() {
    // Every page links to every other page.
    let names: Vec<String> = (0..20).map(|i| format!("p{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut fetcher = GraphFetcher::default();
    for n in &refs {
        fetcher = fetcher.page(n, &refs);
    }

    let mut c = Coordinator::new(fetcher, 7, 5);
    c.seed("p0");
    let report = c.run().await;
    assert_eq!(report.documents.len(), 7);
    assert_eq!(urls(&report.documents).len(), 7);
    assert_eq!(report.pending, 13);
}

#[tokio::test]
async fn failures_do_not_stop_the_batch_or_later_batches() {
    let fetcher = GraphFetcher::default()
        .page("a", &["b", "c", "d"])
        .page("b", &["e"])
        .page("d", &["c"])
        .fail("c");

    let mut c = Coordinator::new(fetcher, 10, 5);
    c.seed("a");
    let report = c.run().await;

    assert_eq!(urls(&report.documents), set(&["a", "b", "d", "e"]));
    assert_eq!(report.failed, ["c"]);
    assert_eq!(report.pending, 0);
    // "c" was rediscovered from "d" but never fetched twice.
    assert_eq!(c.frontier().visited().len(), 5);
}

#[tokio::test]
async fn failed_fetches_do_not_count_towards_the_cap() {
    let fetcher = GraphFetcher::default().page("a", &["b", "c"]).fail("b");
    let mut c = Coordinator::new(fetcher, 2, 5);
    c.seed("a");
    let report = c.run().await;
    assert_eq!(urls(&report.documents), set(&["a", "c"]));
    assert_eq!(report.failed, ["b"]);
}

#[tokio::test]
async fn stops_when_frontier_is_empty() {
    let fetcher = GraphFetcher::default().page("a", &[]);
    let mut c = Coordinator::new(fetcher, 50, 5);
    c.seed("a");
    let report = c.run().await;
    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.visited, ["a"]);
}

#[tokio::test]
async fn each_url_is_fetched_at_most_once() {
    let fetcher = GraphFetcher::default()
        .page("a", &["b", "c", "a"])
        .page("b", &["a", "c"])
        .page("c", &["b", "a"]);
    let mut c = Coordinator::new(fetcher, 10, 2);
    c.seed("a");
    let report = c.run().await;
    assert_eq!(report.documents.len(), 3);
    assert_eq!(report.visited.len(), 3);
}

/// Panics instead of answering for one URL.
struct PanickingFetcher {
    inner: GraphFetcher,
    panics_on: &'static str,
}

#[async_trait]
impl Fetch for PanickingFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if url == self.panics_on {
            panic!("extractor blew up on {url}");
        }
        self.inner.fetch(url).await
    }
}

#[tokio::test]
async fn panicked_fetch_is_reported_as_failed() {
    let fetcher = PanickingFetcher { inner: GraphFetcher::default().page("a", &["b", "c"]), panics_on: "b" };
    let mut c = Coordinator::new(fetcher, 10, 5);
    c.seed("a");
    let report = c.run().await;

    assert_eq!(urls(&report.documents), set(&["a", "c"]));
    assert_eq!(report.failed, ["b"]);
    assert_eq!(report.visited.len(), report.documents.len() + report.failed.len());
}

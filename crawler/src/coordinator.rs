use crate::fetch::{Fetch, FetchError, FetchedPage};
use crate::frontier::Frontier;
use minisearch_core::Document;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Outcome of a crawl run.
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// Successfully fetched documents, batch by batch in claim order.
    pub documents: Vec<Document>,
    /// Every URL claimed during the run, fetched successfully or not.
    pub visited: Vec<String>,
    /// URLs whose fetch failed and were dropped.
    pub failed: Vec<String>,
    /// URLs still queued when the run stopped.
    pub pending: usize,
}

/// Drives the frontier and a pool of fetch tasks in synchronous batches.
///
/// The coordinator owns the [`Frontier`]; fetch tasks only ever see a URL
/// and hand their result back through their join handle, so the visited set and
/// queue are mutated on this task alone, between batches.
pub struct Coordinator<F> {
    fetcher: Arc<F>,
    frontier: Frontier,
    max_docs: usize,
    batch_size: usize,
}

impl<F: Fetch> Coordinator<F> {
    pub fn new(fetcher: F, max_docs: usize, batch_size: usize) -> Self {
        Self { fetcher: Arc::new(fetcher), frontier: Frontier::new(), max_docs, batch_size: batch_size.max(1) }
    }

    pub fn seed(&mut self, url: impl Into<String>) {
        self.frontier.seed(url);
    }

    pub fn frontier(&self) -> &Frontier { &self.frontier }

    /// Crawl until the corpus holds `max_docs` documents or the frontier
    /// runs dry. Individual fetch failures are logged and skipped.
    pub async fn run(&mut self) -> CrawlReport {
        let mut report = CrawlReport::default();
        let mut round = 0usize;

        while report.documents.len() < self.max_docs && !self.frontier.is_empty() {
            let room = self.max_docs - report.documents.len();
            let batch = self.frontier.next_batch(self.batch_size.min(room));
            if batch.is_empty() {
                break;
            }
            round += 1;
            report.visited.extend(batch.iter().cloned());

            for result in self.fetch_batch(batch).await {
                match result {
                    Ok(page) => {
                        let added = self.frontier.enqueue(page.links);
                        tracing::debug!(url = %page.document.url, title = %page.document.title, new_links = added, "fetched");
                        report.documents.push(page.document);
                    }
                    Err(err) => {
                        tracing::warn!(url = %err.url(), error = %err, "fetch failed, dropping url");
                        report.failed.push(err.url().to_string());
                    }
                }
            }

            tracing::info!(
                round,
                documents = report.documents.len(),
                visited = self.frontier.visited().len(),
                frontier = self.frontier.pending_len(),
                "batch complete"
            );
        }

        report.pending = self.frontier.pending_len();
        report
    }

    /// Fetch every URL of the batch in parallel and wait for all of them.
    /// A fetch task that panics comes back as [`FetchError::Aborted`].
    async fn fetch_batch(&self, batch: Vec<String>) -> Vec<Result<FetchedPage, FetchError>> {
        let inflight: Vec<(String, JoinHandle<Result<FetchedPage, FetchError>>)> = batch
            .into_iter()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                let task_url = url.clone();
                (url, tokio::spawn(async move { fetcher.fetch(&task_url).await }))
            })
            .collect();

        let mut results = Vec::with_capacity(inflight.len());
        for (url, handle) in inflight {
            results.push(match handle.await {
                Ok(res) => res,
                Err(e) => Err(FetchError::Aborted { url, reason: e.to_string() }),
            });
        }
        results
    }
}

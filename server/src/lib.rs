use anyhow::Result;
use axum::{extract::{Query, State}, routing::get, Json, Router};
use minisearch_core::persist::{load_index, load_meta, meta_path_for, MissingSnapshot};
use minisearch_core::Index;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod repl;

/// Read-only lookups over an index loaded once at startup.
///
/// Cloning is cheap and every clone shares the same immutable [`Index`], so
/// any number of threads or tasks can call [`QueryService::lookup`] without
/// locking.
#[derive(Clone, Default)]
pub struct QueryService {
    index: Arc<Index>,
}

impl QueryService {
    pub fn new(index: Index) -> Self {
        Self { index: Arc::new(index) }
    }

    /// Load the index snapshot at `path`. A missing file gives an empty
    /// service unless `missing` is [`MissingSnapshot::Fail`].
    pub fn load(path: &Path, missing: MissingSnapshot) -> Result<Self> {
        let index = load_index(path, missing)?;
        match load_meta(&meta_path_for(path))? {
            Some(meta) => tracing::info!(num_docs = meta.num_docs, created_at = %meta.created_at, "index metadata"),
            None => tracing::debug!("no index metadata sidecar"),
        }
        tracing::info!(path = %path.display(), num_terms = index.num_terms(), "index loaded");
        Ok(Self::new(index))
    }

    /// Exact-match lookup; unknown terms give an empty slice.
    pub fn lookup(&self, term: &str) -> &[String] {
        self.index.get(term)
    }

    pub fn num_terms(&self) -> usize { self.index.num_terms() }
}

/// Caller-side cleanup of raw user input before [`QueryService::lookup`].
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Deserialize)]
pub struct LookupParams {
    pub term: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 5 }

#[derive(Serialize)]
pub struct LookupResponse {
    pub term: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<String>,
}

pub fn build_app(service: QueryService) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/lookup", get(lookup_handler))
        .with_state(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn lookup_handler(State(service): State<QueryService>, Query(params): Query<LookupParams>) -> Json<LookupResponse> {
    let term = normalize_term(&params.term);
    let start = Instant::now();
    let hits = service.lookup(&term);
    let elapsed = start.elapsed();

    let k = params.k.clamp(1, 100);
    Json(LookupResponse {
        total_hits: hits.len(),
        results: hits.iter().take(k).cloned().collect(),
        took_s: elapsed.as_secs_f64(),
        term,
    })
}

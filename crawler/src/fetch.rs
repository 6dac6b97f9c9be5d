use crate::config::CrawlConfig;
use crate::scope::{normalize_url, ScopeFilter};
use async_trait::async_trait;
use lazy_static::lazy_static;
use minisearch_core::Document;
use reqwest::{header, Client, Url};
use scraper::{Html, Selector};

lazy_static! {
    static ref SEL_TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref SEL_LINK: Selector = Selector::parse("a[href]").expect("valid selector");
}

const NO_TITLE: &str = "No Title";

/// Why a single URL produced no document. Never fatal to the crawl.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid url {url}: {source}")]
    InvalidUrl { url: String, #[source] source: url::ParseError },
    #[error("timed out fetching {url}")]
    Timeout { url: String },
    #[error("request to {url} failed: {source}")]
    Request { url: String, #[source] source: reqwest::Error },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{url} is not HTML ({content_type})")]
    NotHtml { url: String, content_type: String },
    #[error("{url} body exceeds {limit} bytes")]
    TooLarge { url: String, limit: usize },
    #[error("fetch task for {url} aborted: {reason}")]
    Aborted { url: String, reason: String },
}

impl FetchError {
    fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.to_string() }
        } else {
            Self::Request { url: url.to_string(), source }
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Timeout { url }
            | Self::Request { url, .. }
            | Self::Status { url, .. }
            | Self::NotHtml { url, .. }
            | Self::TooLarge { url, .. }
            | Self::Aborted { url, .. } => url,
        }
    }
}

/// A fetched document plus its in-scope outbound links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub document: Document,
    pub links: Vec<String>,
}

/// One network fetch and extraction. Implementations hold no crawl state.
#[async_trait]
pub trait Fetch: Send + Sync + 'static {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// HTTP fetcher backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    scope: ScopeFilter,
    max_body_bytes: usize,
}

impl Fetcher {
    pub fn new(config: &CrawlConfig, scope: ScopeFilter) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, scope, max_body_bytes: config.max_body_bytes })
    }
}

#[async_trait]
impl Fetch for Fetcher {
    async fn fetch(&self, raw: &str) -> Result<FetchedPage, FetchError> {
        let url = Url::parse(raw).map_err(|source| FetchError::InvalidUrl { url: raw.to_string(), source })?;
        let mut resp = self.client.get(url.clone()).send().await.map_err(|e| FetchError::from_reqwest(raw, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: raw.to_string(), status: status.as_u16() });
        }
        if let Some(ct) = resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            if !ct.starts_with("text/html") {
                return Err(FetchError::NotHtml { url: raw.to_string(), content_type: ct.to_string() });
            }
        }
        let too_large = || FetchError::TooLarge { url: raw.to_string(), limit: self.max_body_bytes };
        if resp.content_length().is_some_and(|len| len > self.max_body_bytes as u64) {
            return Err(too_large());
        }

        // Relative links resolve against where redirects actually landed.
        let base = resp.url().clone();
        let mut bytes: Vec<u8> = Vec::new();
        // Chunked responses carry no length, so enforce the cap while reading.
        while let Some(chunk) = resp.chunk().await.map_err(|e| FetchError::from_reqwest(raw, e))? {
            if bytes.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }
        let body = String::from_utf8_lossy(&bytes);
        let mut page = extract_page(&base, &body, &self.scope);
        page.document.url = normalize_url(&url);
        Ok(page)
    }
}

/// Pull title, plain text and in-scope links out of an HTML page.
pub fn extract_page(page_url: &Url, html: &str, scope: &ScopeFilter) -> FetchedPage {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&SEL_TITLE)
        .next()
        .map(|n| n.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let mut parts: Vec<&str> = Vec::new();
    for node in doc.root_element().descendants() {
        let Some(text) = node.value().as_text() else { continue };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| matches!(e.name(), "script" | "style" | "noscript")))
            .unwrap_or(false);
        let text = text.trim();
        if !hidden && !text.is_empty() {
            parts.push(text);
        }
    }
    let content = parts.join(" ");

    let mut links = Vec::new();
    for a in doc.select(&SEL_LINK) {
        if let Some(link) = a.value().attr("href").and_then(|h| scope.resolve(page_url, h)) {
            if !links.contains(&link) {
                links.push(link);
            }
        }
    }

    FetchedPage {
        document: Document { url: normalize_url(page_url), title, content },
        links,
    }
}

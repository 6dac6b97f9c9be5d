use url::Url;

/// Canonical string form of a URL: the fragment is dropped so `#section`
/// anchors of one page collapse into a single document.
pub fn normalize_url(url: &Url) -> String {
    let mut u = url.clone();
    u.set_fragment(None);
    u.to_string()
}

/// Decides which discovered links are worth following.
///
/// A link is in scope when it is http(s), lives on the seed's host and port, its path
/// starts with `path_prefix` (if non-empty) and the path has no `:`, which
/// is how wiki-style sites mark namespace pages (`Special:`, `File:`, ...).
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    host: String,
    port: Option<u16>,
    path_prefix: String,
}

impl ScopeFilter {
    pub fn new(seed: &Url, path_prefix: impl Into<String>) -> Self {
        Self {
            host: seed.host_str().unwrap_or_default().to_string(),
            port: seed.port_or_known_default(),
            path_prefix: path_prefix.into(),
        }
    }

    pub fn accepts(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") { return false; }
        if url.host_str() != Some(self.host.as_str()) || url.port_or_known_default() != self.port { return false; }
        let path = url.path();
        if !self.path_prefix.is_empty() && !path.starts_with(&self.path_prefix) { return false; }
        // Percent-encoded colons still denote a namespace.
        !path.contains(':') && !path.to_ascii_lowercase().contains("%3a")
    }

    /// Resolve `href` against the page it was found on and keep it only if
    /// it is in scope. Returns the normalized URL string.
    pub fn resolve(&self, page: &Url, href: &str) -> Option<String> {
        let url = page.join(href.trim()).ok()?;
        self.accepts(&url).then(|| normalize_url(&url))
    }
}

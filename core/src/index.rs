use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One crawled page. The URL is the document's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub title: String,
    pub content: String,
}

/// Immutable inverted index: term -> URLs of the documents containing it.
///
/// Each posting list holds a URL at most once, in the order the documents
/// were fed to the [`IndexBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    postings: HashMap<String, Vec<String>>,
}

impl Index {
    pub fn new() -> Self { Self::default() }

    /// Exact-match lookup. Unknown terms yield an empty slice.
    pub fn get(&self, term: &str) -> &[String] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.postings.iter().map(|(t, urls)| (t.as_str(), urls.as_slice()))
    }
}

/// Owns the term -> postings mapping while documents are added; only
/// [`IndexBuilder::finish`] hands out a readable [`Index`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    postings: HashMap<String, Vec<String>>,
    indexed: HashMap<String, usize>,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    /// Add one document's distinct terms to the index.
    pub fn add(&mut self, doc: &Document) {
        let seen_before = self.indexed.contains_key(&doc.url);
        *self.indexed.entry(doc.url.clone()).or_insert(0) += 1;

        for term in tokenize(&doc.content) {
            let list = self.postings.entry(term).or_default();
            // A URL seen for the first time cannot be in any list yet.
            if seen_before && list.iter().any(|u| u == &doc.url) {
                continue;
            }
            list.push(doc.url.clone());
        }
    }

    pub fn extend<'a, I: IntoIterator<Item = &'a Document>>(&mut self, docs: I) {
        for doc in docs {
            self.add(doc);
        }
    }

    /// Number of distinct URLs added so far.
    pub fn num_docs(&self) -> usize { self.indexed.len() }

    /// Number of documents whose URL had already been added.
    pub fn duplicate_docs(&self) -> usize {
        self.indexed.values().map(|n| n - 1).sum()
    }

    pub fn finish(self) -> Index {
        Index { postings: self.postings }
    }
}

use std::collections::{HashSet, VecDeque};

/// Discovered-but-unfetched URLs plus every URL already claimed for fetching.
///
/// All mutators take `&mut self`; the crawl coordinator owns the frontier and
/// is the only code that touches it.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    pending: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self { Self::default() }

    pub fn seed(&mut self, url: impl Into<String>) {
        self.push(url.into());
    }

    /// Queue links that are neither visited nor already pending.
    /// Returns how many were actually added.
    pub fn enqueue<I, S>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for link in links {
            if self.push(link.into()) {
                added += 1;
            }
        }
        added
    }

    /// Claim up to `n` URLs: each returned URL is marked visited and removed
    /// from the queue in the same step, so it can never be handed out again.
    pub fn next_batch(&mut self, n: usize) -> Vec<String> {
        let mut batch = Vec::with_capacity(n.min(self.queue.len()));
        while batch.len() < n {
            let Some(url) = self.queue.pop_front() else { break };
            self.pending.remove(&url);
            if self.visited.insert(url.clone()) {
                batch.push(url);
            }
        }
        batch
    }

    pub fn is_empty(&self) -> bool { self.queue.is_empty() }

    pub fn pending_len(&self) -> usize { self.queue.len() }

    pub fn is_visited(&self, url: &str) -> bool { self.visited.contains(url) }

    pub fn visited(&self) -> &HashSet<String> { &self.visited }

    fn push(&mut self, url: String) -> bool {
        if self.visited.contains(&url) || self.pending.contains(&url) {
            return false;
        }
        self.pending.insert(url.clone());
        self.queue.push_back(url);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_are_fifo_and_bounded() {
        let mut f = Frontier::new();
        f.seed("a");
        f.enqueue(["b", "c", "d"]);
        assert_eq!(f.next_batch(2), ["a", "b"]);
        assert_eq!(f.next_batch(5), ["c", "d"]);
        assert!(f.next_batch(5).is_empty());
        assert!(f.is_empty());
    }

    #[test]
    fn claimed_urls_are_never_handed_out_again() {
        let mut f = Frontier::new();
        f.seed("a");
        assert_eq!(f.next_batch(1), ["a"]);
        assert!(f.is_visited("a"));
        assert_eq!(f.enqueue(["a", "b"]), 1);
        assert_eq!(f.next_batch(5), ["b"]);
        assert_eq!(f.visited().len(), 2);
    }

    #[test]
    fn pending_duplicates_are_collapsed() {
        let mut f = Frontier::new();
        assert_eq!(f.enqueue(["x", "y", "x", "y", "z"]), 3);
        assert_eq!(f.pending_len(), 3);
        assert_eq!(f.next_batch(10), ["x", "y", "z"]);
    }
}

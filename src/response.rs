//! List envelope and page links.

use crate::query::{PageRequest, PAGE_PARAM};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PageEnvelope<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T: Serialize> PageEnvelope<T> {
    /// `path` and `query` are the request's own, so links keep the mount prefix and every other parameter.
    pub fn new(count: u64, results: Vec<T>, page: PageRequest, path: &str, query: Option<&str>) -> Self {
        let next = page
            .has_next(count)
            .then(|| page_link(path, query, page.page + 1));
        let previous = page
            .has_previous()
            .then(|| page_link(path, query, page.page - 1));
        PageEnvelope {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Relative URL for `page`, replacing any existing page parameter. Other pairs are kept as sent.
pub fn page_link(path: &str, query: Option<&str>, page: u64) -> String {
    let mut pairs: Vec<String> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(PAGE_PARAM))
        .map(str::to_string)
        .collect();
    pairs.push(format!("{}={}", PAGE_PARAM, page));
    format!("{}?{}", path, pairs.join("&"))
}

//! Result records produced by a batch

use crate::scrape::extractor::ExtractedPage;
use serde::{Deserialize, Serialize};

/// Fields extracted from one successfully scraped page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// The requested URL, trimmed of surrounding whitespace
    pub url: String,

    /// Trimmed text of the title element, empty if absent
    pub title: String,

    /// Content of the description meta tag, empty if absent
    pub description: String,

    /// Trimmed, non-empty texts of the level-1 headers in document order
    pub headers: Vec<String>,
}

impl ScrapeResult {
    /// Builds a result record for `url` from an extracted page
    pub fn new(url: impl Into<String>, page: ExtractedPage) -> Self {
        Self {
            url: url.into(),
            title: page.title,
            description: page.description,
            headers: page.headers,
        }
    }
}

/// The aggregated results of a batch
///
/// Entries are in completion order, which is unrelated to input order.
/// Serializes as a plain JSON array of [`ScrapeResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<ScrapeResult>,
}

impl ResultSet {
    /// Number of results in the set
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no URL was scraped successfully
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScrapeResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[ScrapeResult] {
        &self.results
    }

    /// Finds the result recorded for `url`
    pub fn get(&self, url: &str) -> Option<&ScrapeResult> {
        self.results.iter().find(|result| result.url == url)
    }

    /// Returns the results sorted by URL, for order-independent comparison
    pub fn sorted_by_url(&self) -> Vec<ScrapeResult> {
        let mut sorted = self.results.clone();
        sorted.sort_by(|a, b| a.url.cmp(&b.url).then_with(|| a.title.cmp(&b.title)));
        sorted
    }

    pub fn into_vec(self) -> Vec<ScrapeResult> {
        self.results
    }
}

impl From<Vec<ScrapeResult>> for ResultSet {
    fn from(results: Vec<ScrapeResult>) -> Self {
        Self { results }
    }
}

impl FromIterator<ScrapeResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ScrapeResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = ScrapeResult;
    type IntoIter = std::vec::IntoIter<ScrapeResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ScrapeResult;
    type IntoIter = std::slice::Iter<'a, ScrapeResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

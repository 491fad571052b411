//! Parsing of the user-supplied URL list
//!
//! The list arrives as one comma-separated string. Each segment is trimmed
//! of surrounding whitespace. Segments that are blank after trimming (for
//! example after a trailing comma) are kept in the list so the orchestrator
//! can skip and count them when it dispatches.

use crate::InputError;

/// A parsed URL list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlList {
    segments: Vec<String>,
}

impl UrlList {
    /// All trimmed segments in input order, blank ones included
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The non-blank URLs in input order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Number of non-blank URLs
    pub fn len(&self) -> usize {
        self.urls().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits a comma-separated URL string into trimmed segments
///
/// # Returns
///
/// * `Ok(UrlList)` - The trimmed segments
/// * `Err(InputError::Empty)` - The whole input was blank
///
/// # Examples
///
/// ```
/// use page_gleaner::parse_url_list;
///
/// let list = parse_url_list(" https://a.example , https://b.example,").unwrap();
/// assert_eq!(list.urls().collect::<Vec<_>>(), vec!["https://a.example", "https://b.example"]);
/// assert_eq!(list.segments().len(), 3);
/// ```
pub fn parse_url_list(input: &str) -> Result<UrlList, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(UrlList {
        segments: input
            .split(',')
            .map(|segment| segment.trim().to_string())
            .collect(),
    })
}

//! HTML field extraction
//!
//! Extracts the three fields a batch records for every page:
//! - the page title (from the `<title>` tag)
//! - the meta description (`<meta name="description" content="...">`)
//! - the texts of all level-1 headers (`<h1>`), in document order

use crate::ExtractError;
use scraper::{ElementRef, Html, Selector};

const TITLE_SELECTOR: &str = "title";
const META_SELECTOR: &str = "meta[name]";
const HEADER_SELECTOR: &str = "h1";

/// Fields extracted from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Trimmed title text, empty if the page has no title
    pub title: String,

    /// Description meta content as written, empty if absent
    pub description: String,

    /// Trimmed non-empty `<h1>` texts in document order
    pub headers: Vec<String>,
}

/// Parses HTML content and extracts title, description and headers
///
/// Missing fields are not errors: an absent title or description yields an
/// empty string and a page without headers yields an empty list. Headers
/// whose trimmed text is empty are left out.
///
/// # Example
///
/// ```
/// use page_gleaner::scrape::extract;
///
/// let html = r#"<html><head><title> Test </title></head><body><h1>Hi</h1></body></html>"#;
/// let page = extract(html).unwrap();
/// assert_eq!(page.title, "Test");
/// assert_eq!(page.headers, vec!["Hi".to_string()]);
/// ```
pub fn extract(content: &str) -> Result<ExtractedPage, ExtractError> {
    let document = Html::parse_document(content);

    Ok(ExtractedPage {
        title: extract_title(&document)?,
        description: extract_description(&document)?,
        headers: extract_headers(&document)?,
    })
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts the page title from the first `<title>` element
fn extract_title(document: &Html) -> Result<String, ExtractError> {
    let title_selector = selector(TITLE_SELECTOR)?;

    Ok(document
        .select(&title_selector)
        .next()
        .map(element_text)
        .unwrap_or_default())
}

/// Extracts the description meta content
///
/// The `name` attribute must equal `description` exactly; `Description` or
/// `og:description` do not count.
fn extract_description(document: &Html) -> Result<String, ExtractError> {
    let meta_selector = selector(META_SELECTOR)?;

    Ok(document
        .select(&meta_selector)
        .find(|element| element.value().attr("name") == Some("description"))
        .and_then(|element| element.value().attr("content"))
        .unwrap_or_default()
        .to_string())
}

/// Extracts the trimmed, non-empty texts of all `<h1>` elements
fn extract_headers(document: &Html) -> Result<Vec<String>, ExtractError> {
    let header_selector = selector(HEADER_SELECTOR)?;

    Ok(document
        .select(&header_selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect())
}

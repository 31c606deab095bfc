use select::{
    document::Document,
    predicate::{Class, Name, Predicate},
};

use crate::errors::FetchError;

/// Converts every `<article class="day-desc">` of a puzzle page into Markdown.
/// Part two only shows up once part one is solved, so one or two articles
/// are expected.
///
/// # Errors
///
/// Returns `Err` if the page has no description article.
pub fn extract_description(html: &str) -> Result<String, FetchError> {
    let document = Document::from(html);

    let parts: Vec<String> = document
        .find(Name("article").and(Class("day-desc")))
        .map(|article| html2md::parse_html(&article.html()).trim().to_string())
        .collect();

    if parts.is_empty() {
        return Err(FetchError::DescriptionNotFound {});
    }

    let mut markdown = parts.join("\n\n");
    markdown.push('\n');
    Ok(markdown)
}

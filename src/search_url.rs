//! Job search URL construction

use crate::config::{KeywordFilter, SearchConfig};
use crate::models::LocationQuery;

/// Builds the search URL for one location.
///
/// The `l` parameter is left out when either location field is blank, so the
/// endpoint falls back to its own default area instead of a malformed one.
#[must_use]
pub fn build_search_url(search: &SearchConfig, location: &LocationQuery) -> String {
    let terms = search_terms(&search.term, &search.keywords);
    let mut url = format!(
        "{}?q={}",
        search.base_url.trim_end_matches('?'),
        urlencoding::encode(&terms)
    );

    let city = location.city.trim();
    let region = location.region.trim();
    if !city.is_empty() && !region.is_empty() {
        url.push_str("&l=");
        url.push_str(&urlencoding::encode(&format!("{city}, {region}")));
    }
    url
}

/// Search term followed by `keyword` or `-keyword` for each filter
#[must_use]
pub fn search_terms(term: &str, keywords: &[KeywordFilter]) -> String {
    let mut terms = term.trim().to_string();
    for keyword in keywords {
        terms.push(' ');
        if !keyword.include {
            terms.push('-');
        }
        terms.push_str(keyword.name.trim());
    }
    terms
}

//! Channel filtering

use crate::catalog::ALL_CATEGORY;
use crate::models::Channel;

/// Case-insensitive substring check without allocation
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }

    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Channels visible for the given search term and category selection.
///
/// A channel is visible iff its name or category contains the search term
/// case-insensitively AND the selected category is the "All" sentinel or an
/// exact match. Catalog order is preserved; an empty result is a valid state.
pub fn filter_channels<'a>(
    catalog: &'a [Channel],
    search_term: &str,
    selected_category: &str,
) -> Vec<&'a Channel> {
    catalog
        .iter()
        .filter(|channel| {
            let matches_search = contains_ignore_case(&channel.name, search_term)
                || contains_ignore_case(&channel.category, search_term);
            let matches_category =
                selected_category == ALL_CATEGORY || channel.category == selected_category;
            matches_search && matches_category
        })
        .collect()
}

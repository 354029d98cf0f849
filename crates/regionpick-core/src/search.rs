//! Substring search over country titles.
//!
//! Matching is containment of the query in the resolved title, ignoring case
//! and diacritics. There is no word-boundary or fuzzy matching. Each hit
//! carries the [`MatchRange`](crate::text::MatchRange) of the first match so
//! the presentation layer can highlight it.

use crate::catalog::Catalog;
use crate::display::{sort_by_title, DisplayItem, DisplaySection, Displayable};
use crate::grouping::country_items;
use crate::locale::RegionLocale;

/// Id of the synthetic section holding search results.
///
/// Contains a `.` so it can never collide with a region code.
pub const SEARCH_SECTION_ID: &str = "regionpick.search";

/// Search every country title for `query`.
///
/// Returns `None` when `query` is empty, meaning no search is active and the
/// grouped view applies. Otherwise returns a single section with an empty
/// title holding the matches, sorted by title. The section may be empty.
pub fn search<L: RegionLocale + ?Sized>(
    catalog: &Catalog,
    query: &str,
    locale: &L,
) -> Option<DisplaySection> {
    if query.is_empty() {
        return None;
    }

    let mut matches: Vec<DisplayItem> = country_items(catalog)
        .filter_map(|item| {
            let title = item.title(locale)?;
            let range = locale.find_folding(&title, query)?;
            Some(item.with_match_range(range))
        })
        .collect();
    sort_by_title(&mut matches, locale);

    Some(DisplaySection::with_fixed_title(
        Some(SEARCH_SECTION_ID),
        "",
        matches,
    ))
}

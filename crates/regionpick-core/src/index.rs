//! Single-character section index titles.
//!
//! Only the country-initial grouping gets an index: continent and subregion
//! titles don't have useful unique leading characters, and a search shows a
//! single untitled section.

use crate::display::{DisplaySection, Displayable};
use crate::grouping::GroupingMode;
use crate::locale::RegionLocale;
use crate::pin::is_current_section;

/// Default index entry for the pinned current-region section.
pub const CURRENT_INDEX_MARKER: &str = "◆";

/// Index titles for `sections`, or `None` when no index should be shown.
///
/// The pinned section contributes `marker`, always at the front. Every other
/// section contributes the first character of its title; sections without a
/// title are skipped.
pub fn index_titles<L: RegionLocale + ?Sized>(
    sections: &[DisplaySection],
    mode: GroupingMode,
    search_active: bool,
    marker: &str,
    locale: &L,
) -> Option<Vec<String>> {
    if mode != GroupingMode::ByCountryInitial || search_active {
        return None;
    }

    let mut titles = Vec::with_capacity(sections.len());
    for section in sections {
        if is_current_section(section) {
            titles.insert(0, marker.to_string());
        } else if let Some(first) = section.title(locale).and_then(|t| t.chars().next()) {
            titles.push(first.to_string());
        }
    }
    Some(titles)
}

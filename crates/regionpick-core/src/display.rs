//! Display items and sections.
//!
//! Both kinds share identity and ordering rules through [`Displayable`]:
//! equality and hashing go by `id`, ordering goes by resolved title with
//! diacritics ignored.
//!
//! # Titles
//!
//! | `title_is_precomputed` | Title |
//! |------------------------|-------|
//! | `false` | resolved from `region_code` by the locale |
//! | `true` | `region_code` verbatim (letters, "Device Current", search) |
//!
//! Entries whose title cannot be resolved sort after every titled entry and
//! keep their relative order among themselves. They compare greater than
//! any titled entry rather than being unordered against it, so the
//! ordering stays total.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::locale::RegionLocale;
use crate::text::MatchRange;

/// Shared title and identity behaviour of items and sections.
pub trait Displayable {
    /// Stable identity key.
    fn id(&self) -> &str;

    /// Region code, or the literal title when precomputed.
    fn region_code(&self) -> &str;

    /// Whether `region_code` already is the display title.
    fn title_is_precomputed(&self) -> bool {
        false
    }

    /// Title in the given locale.
    fn title<L: RegionLocale + ?Sized>(&self, locale: &L) -> Option<String> {
        if self.title_is_precomputed() {
            return Some(self.region_code().to_string());
        }
        locale.resolve_title(self.region_code())
    }

    /// Order by title, ignoring diacritics.
    fn cmp_by_title<L: RegionLocale + ?Sized>(&self, other: &Self, locale: &L) -> Ordering {
        compare_titles(
            self.title(locale).as_deref(),
            other.title(locale).as_deref(),
            locale,
        )
    }
}

/// Compare two optional titles. Missing titles go last.
pub fn compare_titles<L: RegionLocale + ?Sized>(
    a: Option<&str>,
    b: Option<&str>,
    locale: &L,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => locale.compare_folding_diacritics(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by title. Each title is resolved once.
pub fn sort_by_title<T: Displayable, L: RegionLocale + ?Sized>(entries: &mut Vec<T>, locale: &L) {
    let mut keyed: Vec<(Option<String>, T)> = entries
        .drain(..)
        .map(|entry| (entry.title(locale), entry))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_titles(a.as_deref(), b.as_deref(), locale));
    entries.extend(keyed.into_iter().map(|(_, entry)| entry));
}

/// One selectable country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayItem {
    pub id: String,
    pub region_code: String,
    /// Where the active search query matched this item's title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_match_range: Option<MatchRange>,
}

impl DisplayItem {
    /// An item whose id is its region code.
    pub fn new(region_code: impl Into<String>) -> Self {
        let region_code = region_code.into();
        Self {
            id: region_code.clone(),
            region_code,
            search_match_range: None,
        }
    }

    /// An item with an id distinct from its region code.
    pub fn with_id(id: impl Into<String>, region_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            region_code: region_code.into(),
            search_match_range: None,
        }
    }

    #[must_use]
    pub fn with_match_range(mut self, range: MatchRange) -> Self {
        self.search_match_range = Some(range);
        self
    }
}

impl Displayable for DisplayItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn region_code(&self) -> &str {
        &self.region_code
    }
}

impl PartialEq for DisplayItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DisplayItem {}

impl Hash for DisplayItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A group of items under one heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySection {
    pub id: String,
    pub region_code: String,
    pub items: Vec<DisplayItem>,
    #[serde(default)]
    pub title_is_precomputed: bool,
}

impl DisplaySection {
    /// A section titled by a region (continent or subregion).
    pub fn for_region(region_code: impl Into<String>, items: Vec<DisplayItem>) -> Self {
        let region_code = region_code.into();
        Self {
            id: region_code.clone(),
            region_code,
            items,
            title_is_precomputed: false,
        }
    }

    /// A section with a literal title. The id defaults to the title.
    pub fn with_fixed_title(
        id: Option<&str>,
        title: impl Into<String>,
        items: Vec<DisplayItem>,
    ) -> Self {
        let title = title.into();
        Self {
            id: id.map_or_else(|| title.clone(), str::to_string),
            region_code: title,
            items,
            title_is_precomputed: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Displayable for DisplaySection {
    fn id(&self) -> &str {
        &self.id
    }

    fn region_code(&self) -> &str {
        &self.region_code
    }

    fn title_is_precomputed(&self) -> bool {
        self.title_is_precomputed
    }
}

impl PartialEq for DisplaySection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DisplaySection {}

impl Hash for DisplaySection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::TitleTable;

    fn locale() -> TitleTable {
        TitleTable::new("en")
            .with_title("AX", "Åland Islands")
            .with_title("AL", "Albania")
            .with_title("BE", "Belgium")
            .with_title("DE", "Germany")
            .with_title("150", "Europe")
    }

    fn ids<T: Displayable>(entries: &[T]) -> Vec<&str> {
        entries.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn equality_is_by_id() {
        let plain = DisplayItem::new("FR");
        let ranged = DisplayItem::new("FR").with_match_range(MatchRange::new(0, 2));
        let pinned = DisplayItem::with_id("FR_Current", "FR");
        assert_eq!(plain, ranged);
        assert_ne!(plain, pinned);
        assert_eq!(plain.region_code, pinned.region_code);
    }

    #[test]
    fn hash_is_by_id() {
        use std::collections::HashSet;
        let set: HashSet<DisplayItem> = [
            DisplayItem::new("FR"),
            DisplayItem::new("FR").with_match_range(MatchRange::new(0, 1)),
            DisplayItem::with_id("FR_Current", "FR"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn titles_resolve_or_pass_through() {
        let locale = locale();
        assert_eq!(DisplayItem::new("DE").title(&locale).as_deref(), Some("Germany"));
        assert_eq!(DisplayItem::new("XX").title(&locale), None);

        let continent = DisplaySection::for_region("150", vec![]);
        assert_eq!(continent.title(&locale).as_deref(), Some("Europe"));

        let letter = DisplaySection::with_fixed_title(None, "G", vec![]);
        assert_eq!(letter.id, "G");
        assert_eq!(letter.title(&locale).as_deref(), Some("G"));

        let named = DisplaySection::with_fixed_title(Some("sect"), "Device Current", vec![]);
        assert_eq!(named.id, "sect");
        assert_eq!(named.title(&locale).as_deref(), Some("Device Current"));
    }

    #[test]
    fn sorts_by_folded_title() {
        let locale = locale();
        let mut items = vec![
            DisplayItem::new("DE"),
            DisplayItem::new("BE"),
            DisplayItem::new("AX"),
            DisplayItem::new("AL"),
        ];
        sort_by_title(&mut items, &locale);
        // "Åland Islands" sorts as "Aland Islands", ahead of "Albania"
        assert_eq!(ids(&items), vec!["AX", "AL", "BE", "DE"]);
    }

    #[test]
    fn untitled_entries_go_last_in_original_order() {
        let locale = locale();
        let mut items = vec![
            DisplayItem::new("YY"),
            DisplayItem::new("DE"),
            DisplayItem::new("XX"),
            DisplayItem::new("BE"),
        ];
        sort_by_title(&mut items, &locale);
        assert_eq!(ids(&items), vec!["BE", "DE", "YY", "XX"]);
    }

    #[test]
    fn missing_title_compares_greater_than_any_title() {
        let locale = locale();
        assert_eq!(compare_titles(Some("Zimbabwe"), None, &locale), Ordering::Less);
        assert_eq!(compare_titles(None, Some("Albania"), &locale), Ordering::Greater);
        assert_eq!(compare_titles(None, None, &locale), Ordering::Equal);
    }

    #[test]
    fn cmp_by_title_treats_missing_as_unordered_among_themselves() {
        let locale = locale();
        let xx = DisplayItem::new("XX");
        let yy = DisplayItem::new("YY");
        assert_eq!(xx.cmp_by_title(&yy, &locale), Ordering::Equal);
        assert_eq!(DisplayItem::new("BE").cmp_by_title(&xx, &locale), Ordering::Less);
    }

    #[test]
    fn serialization_omits_missing_match_range() {
        let json = serde_json::to_string(&DisplayItem::new("FR")).unwrap();
        assert_eq!(json, r#"{"id":"FR","region_code":"FR"}"#);

        let json = serde_json::to_string(
            &DisplayItem::new("FR").with_match_range(MatchRange::new(0, 3)),
        )
        .unwrap();
        assert!(json.contains(r#""search_match_range":{"start":0,"length":3}"#));
    }
}

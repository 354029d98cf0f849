//! Slicing the catalog into display sections.
//!
//! # Modes
//!
//! - **By country initial**: every country bucketed under the diacritic-folded
//!   first character of its title (`Å` → `A`). Countries without a title go
//!   to the `?` bucket, which always sorts last.
//! - **By continent**: one section per continent with all its countries.
//! - **By subregion**: one section per subregion; continents are not shown.
//!
//! Items within a section and the sections themselves are sorted by title,
//! ignoring diacritics. Sections that would be empty are left out, so a
//! continent or subregion without countries never shows up as a bare
//! header.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::display::{sort_by_title, DisplayItem, DisplaySection, Displayable};
use crate::locale::RegionLocale;

/// Title and id of the bucket for countries without a title.
pub const UNKNOWN_SECTION: &str = "?";

/// How the catalog is sliced into sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    /// One section per folded initial letter of the country title.
    #[default]
    ByCountryInitial,
    /// One section per continent.
    ByContinent,
    /// One section per subregion.
    BySubregion,
}

impl GroupingMode {
    /// All modes, in menu order.
    pub const ALL: [GroupingMode; 3] = [
        GroupingMode::ByCountryInitial,
        GroupingMode::ByContinent,
        GroupingMode::BySubregion,
    ];

    /// Menu label for the mode.
    pub fn label(self) -> &'static str {
        match self {
            GroupingMode::ByCountryInitial => "Country name",
            GroupingMode::ByContinent => "Continents",
            GroupingMode::BySubregion => "Subregions",
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingMode::ByCountryInitial => write!(f, "by_country_initial"),
            GroupingMode::ByContinent => write!(f, "by_continent"),
            GroupingMode::BySubregion => write!(f, "by_subregion"),
        }
    }
}

/// Every country in the catalog as a plain display item.
pub(crate) fn country_items(catalog: &Catalog) -> impl Iterator<Item = DisplayItem> + '_ {
    catalog.countries().map(DisplayItem::new)
}

/// Build sorted sections for a grouping mode.
pub fn group<L: RegionLocale + ?Sized>(
    catalog: &Catalog,
    mode: GroupingMode,
    locale: &L,
) -> Vec<DisplaySection> {
    let mut sections: Vec<DisplaySection> = match mode {
        GroupingMode::ByContinent => catalog
            .continents()
            .iter()
            .filter_map(|continent| {
                let items = continent
                    .subregions
                    .iter()
                    .flat_map(|s| s.countries.iter())
                    .map(DisplayItem::new)
                    .collect();
                region_section(&continent.code, items, locale)
            })
            .collect(),
        GroupingMode::BySubregion => catalog
            .subregions()
            .filter_map(|subregion| {
                let items = subregion.countries.iter().map(DisplayItem::new).collect();
                region_section(&subregion.code, items, locale)
            })
            .collect(),
        GroupingMode::ByCountryInitial => initial_sections(catalog, locale),
    };

    sort_by_title(&mut sections, locale);

    if mode == GroupingMode::ByCountryInitial {
        if let Some(pos) = sections.iter().position(is_unknown_section) {
            let unknown = sections.remove(pos);
            sections.push(unknown);
        }
    }

    sections
}

fn region_section<L: RegionLocale + ?Sized>(
    code: &str,
    mut items: Vec<DisplayItem>,
    locale: &L,
) -> Option<DisplaySection> {
    if items.is_empty() {
        return None;
    }
    sort_by_title(&mut items, locale);
    Some(DisplaySection::for_region(code, items))
}

fn initial_sections<L: RegionLocale + ?Sized>(
    catalog: &Catalog,
    locale: &L,
) -> Vec<DisplaySection> {
    let mut buckets: BTreeMap<String, Vec<DisplayItem>> = BTreeMap::new();

    for item in country_items(catalog) {
        let key = item
            .title(locale)
            .and_then(|title| title.chars().next())
            .map(|first| locale.fold_diacritics(&first.to_string()))
            .filter(|folded| !folded.is_empty())
            .unwrap_or_else(|| UNKNOWN_SECTION.to_string());
        buckets.entry(key).or_default().push(item);
    }

    buckets
        .into_iter()
        .map(|(key, mut items)| {
            sort_by_title(&mut items, locale);
            DisplaySection::with_fixed_title(None, key, items)
        })
        .collect()
}

fn is_unknown_section(section: &DisplaySection) -> bool {
    section.title_is_precomputed && section.id == UNKNOWN_SECTION
}

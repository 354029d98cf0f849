//! Title resolution and current-region sources.
//!
//! [`RegionLocale`] is the single seam where locale data enters the crate.
//! Every sort and every search goes through it, so tests can pin a fixed
//! [`TitleTable`] and get reproducible output.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::env;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::text::{self, MatchRange};

/// Resolves region titles and compares them for the active locale.
pub trait RegionLocale {
    /// Locale identifier, e.g. `"en"` or `"fr_CA"`.
    fn identifier(&self) -> &str;

    /// Human-readable title for a region code, if the locale knows it.
    fn resolve_title(&self, region_code: &str) -> Option<String>;

    /// Order two titles ignoring diacritics.
    fn compare_folding_diacritics(&self, a: &str, b: &str) -> Ordering {
        text::compare_folding_diacritics(a, b)
    }

    /// Find `query` in `title`, ignoring case and diacritics.
    fn find_folding(&self, title: &str, query: &str) -> Option<MatchRange> {
        text::find_folding(title, query)
    }

    /// Strip diacritics from `s`, keeping case.
    fn fold_diacritics(&self, s: &str) -> String {
        text::fold_diacritics(s)
    }
}

impl<L: RegionLocale + ?Sized> RegionLocale for &L {
    fn identifier(&self) -> &str {
        (**self).identifier()
    }

    fn resolve_title(&self, region_code: &str) -> Option<String> {
        (**self).resolve_title(region_code)
    }

    fn compare_folding_diacritics(&self, a: &str, b: &str) -> Ordering {
        (**self).compare_folding_diacritics(a, b)
    }

    fn find_folding(&self, title: &str, query: &str) -> Option<MatchRange> {
        (**self).find_folding(title, query)
    }

    fn fold_diacritics(&self, s: &str) -> String {
        (**self).fold_diacritics(s)
    }
}

/// A fixed locale backed by a code → title map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleTable {
    locale: String,
    #[serde(default)]
    titles: HashMap<String, String>,
}

impl TitleTable {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            titles: HashMap::new(),
        }
    }

    /// Add or replace a title.
    #[must_use]
    pub fn with_title(mut self, code: impl Into<String>, title: impl Into<String>) -> Self {
        self.titles.insert(code.into(), title.into());
        self
    }

    pub fn insert(&mut self, code: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(code.into(), title.into());
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let table: Self = serde_json::from_reader(reader).map_err(DataError::malformed_titles)?;
        table.validated()
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let table: Self = serde_json::from_str(json).map_err(DataError::malformed_titles)?;
        table.validated()
    }

    fn validated(self) -> Result<Self, DataError> {
        if self.locale.trim().is_empty() {
            return Err(DataError::EmptyLocale);
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl RegionLocale for TitleTable {
    fn identifier(&self) -> &str {
        &self.locale
    }

    fn resolve_title(&self, region_code: &str) -> Option<String> {
        self.titles.get(region_code).cloned()
    }
}

/// Source of the device's current region code.
pub trait CurrentRegionSource {
    fn current_region_code(&self) -> Option<String>;
}

/// A current region fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedRegion(pub Option<String>);

impl FixedRegion {
    pub fn new(code: impl Into<String>) -> Self {
        Self(Some(code.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CurrentRegionSource for FixedRegion {
    fn current_region_code(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the region from the POSIX locale environment.
///
/// Checks `LC_ALL`, `LC_MESSAGES` and `LANG` in that order, skipping empty
/// values, and takes the region from the first one that has it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PosixLocaleRegion;

impl CurrentRegionSource for PosixLocaleRegion {
    fn current_region_code(&self) -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .filter(|value| !value.is_empty())
            .find_map(|value| region_from_locale_tag(&value))
    }
}

/// Extract the region subtag from a locale tag.
///
/// Accepts POSIX (`en_AU.UTF-8`, `de_DE@euro`) and BCP 47 (`en-AU`,
/// `zh-Hant-TW`) forms. The region is a two-letter code or a three-digit
/// area code.
///
/// ```
/// use regionpick_core::locale::region_from_locale_tag;
///
/// assert_eq!(region_from_locale_tag("en_AU.UTF-8").as_deref(), Some("AU"));
/// assert_eq!(region_from_locale_tag("es-419").as_deref(), Some("419"));
/// assert_eq!(region_from_locale_tag("C"), None);
/// ```
pub fn region_from_locale_tag(tag: &str) -> Option<String> {
    let tag = tag.split(['.', '@']).next().unwrap_or_default();
    tag.split(['_', '-'])
        .skip(1)
        .find(|part| {
            (part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
                || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
        })
        .map(|part| part.to_ascii_uppercase())
}

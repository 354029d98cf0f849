//! Core types and logic for regionpick.
//!
//! This crate turns a flat dump of region relationships into a
//! continent → subregion → country catalog, slices that catalog into
//! display sections, and searches it with locale-aware, diacritic-insensitive
//! matching. It has no rendering surface: a presentation layer consumes the
//! [`picker::RegionPicker`] store and draws whatever it publishes.
//!
//! # Modules
//!
//! - [`provider`]: region relationship records and the provider seam
//! - [`catalog`]: the immutable continent/subregion/country tree
//! - [`text`]: diacritic folding, collation and match ranges
//! - [`locale`]: title resolution and current-region sources
//! - [`display`]: display items and sections, ordered by title
//! - [`grouping`]: the three grouping modes
//! - [`search`]: substring search over country titles
//! - [`pin`]: the pinned "current region" section
//! - [`index`]: single-character section index titles
//! - [`config`]: picker options
//! - [`picker`]: the store tying it all together
//! - [`error`]: data loading errors with suggestions
//!
//! # Grouping Modes
//!
//! | Mode | Sections | Headers |
//! |------|----------|---------|
//! | **Country initial** | one per folded first letter | letter, plus index titles |
//! | **Continent** | one per continent | continent title |
//! | **Subregion** | one per subregion | subregion title |
//!
//! Sections are sorted by title in every mode. The current region section,
//! when pinned, always sits at index 0.

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod grouping;
pub mod index;
pub mod locale;
pub mod picker;
pub mod pin;
pub mod provider;
pub mod search;
pub mod text;

#[cfg(test)]
pub(crate) mod fixtures;

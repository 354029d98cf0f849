//! Region relationship records and the provider seam.
//!
//! A provider reports every region it knows about together with its parent
//! continent (if any) and its child region codes. Continents have no parent
//! continent; subregions have a parent and children; countries have a parent
//! and no children.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// The pseudo-region standing for the whole world. Never part of the catalog.
pub const WORLD_REGION_CODE: &str = "001";

/// One region as reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub code: String,
    /// Parent continent code, `None` for continents themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    /// Child region codes. Order carries no meaning.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl RegionRecord {
    /// A region with no parent continent.
    pub fn continent(code: impl Into<String>, children: &[&str]) -> Self {
        Self {
            code: code.into(),
            continent: None,
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// A region with a parent continent and the given children.
    pub fn within(code: impl Into<String>, continent: impl Into<String>, children: &[&str]) -> Self {
        Self {
            code: code.into(),
            continent: Some(continent.into()),
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[must_use]
    pub fn is_continent(&self) -> bool {
        self.continent.is_none()
    }
}

/// Source of truth for region relationships.
pub trait RegionProvider {
    /// Full dump of regions. Called once when the catalog is built.
    fn list_regions(&self) -> Vec<RegionRecord>;
}

impl RegionProvider for Vec<RegionRecord> {
    fn list_regions(&self) -> Vec<RegionRecord> {
        self.clone()
    }
}

impl RegionProvider for [RegionRecord] {
    fn list_regions(&self) -> Vec<RegionRecord> {
        self.to_vec()
    }
}

/// A provider backed by a fixed list, typically decoded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticRegions {
    records: Vec<RegionRecord>,
}

impl StaticRegions {
    pub fn new(records: Vec<RegionRecord>) -> Self {
        Self { records }
    }

    /// Decode a JSON array of records.
    ///
    /// Fails on the first record with an empty code.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let records: Vec<RegionRecord> =
            serde_json::from_reader(reader).map_err(DataError::malformed_regions)?;
        Self::validated(records)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let records: Vec<RegionRecord> =
            serde_json::from_str(json).map_err(DataError::malformed_regions)?;
        Self::validated(records)
    }

    fn validated(records: Vec<RegionRecord>) -> Result<Self, DataError> {
        if let Some(index) = records.iter().position(|r| r.code.trim().is_empty()) {
            return Err(DataError::EmptyCode { index });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RegionProvider for StaticRegions {
    fn list_regions(&self) -> Vec<RegionRecord> {
        self.records.clone()
    }
}

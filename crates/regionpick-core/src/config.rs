//! Picker options.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::grouping::GroupingMode;
use crate::index::CURRENT_INDEX_MARKER;

/// Default title of the pinned current-region section.
pub const DEFAULT_CURRENT_SECTION_TITLE: &str = "Device Current";

/// Options for [`RegionPicker`](crate::picker::RegionPicker).
///
/// Every field has a default, so a partial JSON object is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    /// Grouping shown when the picker opens.
    pub initial_grouping: GroupingMode,
    /// Title of the pinned current-region section.
    pub current_section_title: String,
    /// Index entry standing for the pinned section.
    pub current_index_marker: String,
    /// Whether grouped views pin the current region at the top.
    pub pin_current_region: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            initial_grouping: GroupingMode::default(),
            current_section_title: DEFAULT_CURRENT_SECTION_TITLE.to_string(),
            current_index_marker: CURRENT_INDEX_MARKER.to_string(),
            pin_current_region: true,
        }
    }
}

impl PickerOptions {
    pub fn from_json_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    #[must_use]
    pub fn with_grouping(mut self, mode: GroupingMode) -> Self {
        self.initial_grouping = mode;
        self
    }

    #[must_use]
    pub fn with_pinning(mut self, pin: bool) -> Self {
        self.pin_current_region = pin;
        self
    }
}

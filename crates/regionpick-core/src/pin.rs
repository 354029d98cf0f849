//! The pinned "current region" section.

use crate::display::{DisplayItem, DisplaySection};

/// Id of the pinned section.
///
/// Contains a `.` so it can never collide with a region code or a letter.
pub const CURRENT_SECTION_ID: &str = "regionpick.current";

/// Appended to the current region's code to form the pinned item's id.
///
/// The same country also sits in its grouped section, and ids must be
/// unique across the whole list.
pub const CURRENT_ITEM_SUFFIX: &str = "_Current";

/// Id of the pinned item for a region code.
pub fn current_item_id(region_code: &str) -> String {
    format!("{}{}", region_code, CURRENT_ITEM_SUFFIX)
}

/// Insert the current region at the top of `sections`.
///
/// Does nothing when the current region is unknown. The pinned section is
/// never sorted with the others.
pub fn pin_current_region(
    mut sections: Vec<DisplaySection>,
    current_region: Option<&str>,
    title: &str,
) -> Vec<DisplaySection> {
    let Some(code) = current_region.filter(|c| !c.is_empty()) else {
        return sections;
    };

    let item = DisplayItem::with_id(current_item_id(code), code);
    let pinned = DisplaySection::with_fixed_title(Some(CURRENT_SECTION_ID), title, vec![item]);
    sections.insert(0, pinned);
    sections
}

/// Whether a section is the pinned current-region section.
pub fn is_current_section(section: &DisplaySection) -> bool {
    section.id == CURRENT_SECTION_ID
}

//! The region picker store.
//!
//! [`RegionPicker`] owns the catalog and the picker state (grouping mode,
//! search query, selection) and derives the section list from them. There
//! are exactly two mutators, [`RegionPicker::set_query`] and
//! [`RegionPicker::set_grouping_mode`]. Each one recomputes the whole
//! section list synchronously and then hands a [`PickerUpdate`] to every
//! subscriber.
//!
//! # State Transitions
//!
//! | Query | Sections |
//! |-------|----------|
//! | empty | grouped by the current mode, current region pinned on top |
//! | non-empty | one search section, or nothing if no title matches |
//!
//! Setting the same query or mode again does nothing. Changing the mode
//! while searching is published right away with the search results
//! unchanged, and the new grouping applies once the query is cleared.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::PickerOptions;
use crate::display::{DisplayItem, DisplaySection, Displayable};
use crate::grouping::{group, GroupingMode};
use crate::index::index_titles;
use crate::locale::{CurrentRegionSource, FixedRegion, RegionLocale};
use crate::pin::pin_current_region;
use crate::search::search;

/// Position of an item in the section list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemLocation {
    pub section: usize,
    pub item: usize,
}

impl ItemLocation {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// One entry of the grouping menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupingMenuEntry {
    pub mode: GroupingMode,
    pub label: &'static str,
    pub selected: bool,
}

/// Handle returned by [`RegionPicker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Public state handed to subscribers after every change.
#[derive(Debug, Clone, Copy)]
pub struct PickerUpdate<'a> {
    pub sections: &'a [DisplaySection],
    pub grouping: GroupingMode,
    pub query: Option<&'a str>,
}

type Listener = Box<dyn FnMut(&PickerUpdate<'_>)>;

/// Store for the region picker.
pub struct RegionPicker<L: RegionLocale> {
    catalog: Catalog,
    locale: L,
    current_region: Box<dyn CurrentRegionSource>,
    options: PickerOptions,
    grouping: GroupingMode,
    query: Option<String>,
    selected_region: Option<String>,
    sections: Vec<DisplaySection>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<L: RegionLocale> fmt::Debug for RegionPicker<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionPicker")
            .field("locale", &self.locale.identifier())
            .field("grouping", &self.grouping)
            .field("query", &self.query)
            .field("selected_region", &self.selected_region)
            .field("sections", &self.sections.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<L: RegionLocale> RegionPicker<L> {
    /// Create a picker with default options and no current region.
    pub fn new(catalog: Catalog, locale: L) -> Self {
        Self::with_options(catalog, locale, PickerOptions::default())
    }

    pub fn with_options(catalog: Catalog, locale: L, options: PickerOptions) -> Self {
        let mut picker = Self {
            catalog,
            locale,
            current_region: Box::new(FixedRegion::none()),
            grouping: options.initial_grouping,
            options,
            query: None,
            selected_region: None,
            sections: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        };
        picker.sections = picker.build_sections();
        picker
    }

    /// Use `source` for the current region. It is read on every rebuild.
    #[must_use]
    pub fn with_current_region(mut self, source: impl CurrentRegionSource + 'static) -> Self {
        self.current_region = Box::new(source);
        self.sections = self.build_sections();
        self
    }

    /// Mark a region code as the current selection.
    #[must_use]
    pub fn with_selection(mut self, region_code: impl Into<String>) -> Self {
        self.selected_region = Some(region_code.into());
        self
    }

    // --- Mutators -----------------------------------------------------------

    /// Set the search query. An empty query returns to the grouped view.
    pub fn set_query(&mut self, query: &str) {
        let query = (!query.is_empty()).then(|| query.to_string());
        if query == self.query {
            return;
        }
        self.query = query;
        self.refresh();
    }

    /// Same as `set_query("")`.
    pub fn clear_query(&mut self) {
        self.set_query("");
    }

    /// Switch the grouping mode.
    pub fn set_grouping_mode(&mut self, mode: GroupingMode) {
        if mode == self.grouping {
            return;
        }
        self.grouping = mode;
        if self.is_search_active() {
            debug!("Grouping set to {} during search, keeping results", mode);
            self.notify();
            return;
        }
        self.refresh();
    }

    // --- Observers ----------------------------------------------------------

    /// Register a listener called with the full public state after every
    /// change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&PickerUpdate<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // --- Queries ------------------------------------------------------------

    pub fn sections(&self) -> &[DisplaySection] {
        &self.sections
    }

    pub fn grouping_mode(&self) -> GroupingMode {
        self.grouping
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    #[must_use]
    pub fn is_search_active(&self) -> bool {
        self.query.is_some()
    }

    /// Section headers are hidden while searching.
    #[must_use]
    pub fn shows_section_headers(&self) -> bool {
        !self.is_search_active()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn locale(&self) -> &L {
        &self.locale
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn selected_region(&self) -> Option<&str> {
        self.selected_region.as_deref()
    }

    pub fn current_region_code(&self) -> Option<String> {
        self.current_region.current_region_code()
    }

    /// Title of an item or section in the picker's locale.
    pub fn title_of<T: Displayable>(&self, entry: &T) -> Option<String> {
        entry.title(&self.locale)
    }

    /// First occurrence of the selected region in the current sections.
    pub fn selected_item_location(&self) -> Option<ItemLocation> {
        let selected = self.selected_region.as_deref()?;
        self.sections
            .iter()
            .enumerate()
            .find_map(|(section_index, section)| {
                section
                    .items
                    .iter()
                    .position(|item| item.region_code == selected)
                    .map(|item_index| ItemLocation::new(section_index, item_index))
            })
    }

    /// Where to scroll after the sections change.
    ///
    /// `None` means scroll to the top, which also covers a selection in the
    /// first section.
    pub fn scroll_target(&self) -> Option<ItemLocation> {
        self.selected_item_location()
            .filter(|location| location.section != 0)
    }

    /// Whether `item` stands for the selected region. True for the pinned
    /// duplicate as well.
    #[must_use]
    pub fn is_current_selection(&self, item: &DisplayItem) -> bool {
        self.selected_region.as_deref() == Some(item.region_code.as_str())
    }

    pub fn item_at(&self, location: ItemLocation) -> Option<&DisplayItem> {
        self.sections
            .get(location.section)?
            .items
            .get(location.item)
    }

    /// Section index titles; see [`crate::index`].
    pub fn index_titles(&self) -> Option<Vec<String>> {
        index_titles(
            &self.sections,
            self.grouping,
            self.is_search_active(),
            &self.options.current_index_marker,
            &self.locale,
        )
    }

    /// Where tapping the index title at `index` should jump to.
    ///
    /// Index titles line up with sections one to one, since the pinned
    /// section is both the first section and the first title.
    pub fn index_title_target(&self, index: usize) -> Option<ItemLocation> {
        let section = self.sections.get(index)?;
        (!section.items.is_empty()).then(|| ItemLocation::new(index, 0))
    }

    pub fn grouping_menu(&self) -> Vec<GroupingMenuEntry> {
        GroupingMode::ALL
            .iter()
            .map(|&mode| GroupingMenuEntry {
                mode,
                label: mode.label(),
                selected: mode == self.grouping,
            })
            .collect()
    }

    // --- Internals ----------------------------------------------------------

    fn build_sections(&self) -> Vec<DisplaySection> {
        if let Some(query) = self.query.as_deref() {
            return search(&self.catalog, query, &self.locale)
                .filter(|section| !section.is_empty())
                .into_iter()
                .collect();
        }

        let grouped = group(&self.catalog, self.grouping, &self.locale);
        if !self.options.pin_current_region {
            return grouped;
        }

        // No provider data means nothing to show, pinned or not.
        if self.catalog.is_empty() {
            return grouped;
        }
        let current = self.current_region.current_region_code();
        pin_current_region(
            grouped,
            current.as_deref(),
            &self.options.current_section_title,
        )
    }

    fn refresh(&mut self) {
        self.sections = self.build_sections();
        debug!(
            "Rebuilt sections: mode={}, query={:?}, sections={}",
            self.grouping,
            self.query,
            self.sections.len()
        );
        self.notify();
    }

    fn notify(&mut self) {
        let update = PickerUpdate {
            sections: &self.sections,
            grouping: self.grouping,
            query: self.query.as_deref(),
        };
        for (_, listener) in &mut self.listeners {
            listener(&update);
        }
    }
}

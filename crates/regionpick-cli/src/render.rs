//! Text and JSON output.
//!
//! Text output is meant for people: section headers, one country per line,
//! `^` markers under search matches. JSON output resolves every title so
//! consumers don't need the title table.

use std::fmt::Write as _;

use regionpick_core::catalog::Catalog;
use regionpick_core::display::{DisplayItem, DisplaySection};
use regionpick_core::grouping::GroupingMode;
use regionpick_core::locale::RegionLocale;
use regionpick_core::picker::{ItemLocation, RegionPicker};
use regionpick_core::text::MatchRange;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::args::Mode;

const ITEM_INDENT: &str = "  ";
const SELECTED_MARK: &str = " *";
const UNTITLED: &str = "(untitled)";

#[derive(Debug, Serialize)]
pub struct ItemView {
    pub id: String,
    pub region_code: String,
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_range: Option<MatchRange>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct SectionView {
    pub id: String,
    pub title: Option<String>,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Serialize)]
pub struct SectionsView {
    pub mode: GroupingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub show_headers: bool,
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Serialize)]
pub struct IndexView {
    pub mode: GroupingMode,
    pub titles: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct LocateView {
    pub code: String,
    pub title: Option<String>,
    pub location: Option<ItemLocation>,
    pub scroll_to: Option<ItemLocation>,
}

#[derive(Debug, Serialize)]
pub struct ModeView {
    pub mode: GroupingMode,
    pub flag: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct SubregionView {
    pub code: String,
    pub title: Option<String>,
    pub countries: Vec<ItemView>,
}

#[derive(Debug, Serialize)]
pub struct ContinentView {
    pub code: String,
    pub title: Option<String>,
    pub subregions: Vec<SubregionView>,
}

#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub locale: String,
    pub country_count: usize,
    pub continents: Vec<ContinentView>,
}

// --- Views ------------------------------------------------------------------

fn item_view<L: RegionLocale>(picker: &RegionPicker<L>, item: &DisplayItem) -> ItemView {
    ItemView {
        id: item.id.clone(),
        region_code: item.region_code.clone(),
        title: picker.title_of(item),
        match_range: item.search_match_range,
        selected: picker.is_current_selection(item),
    }
}

fn section_view<L: RegionLocale>(picker: &RegionPicker<L>, section: &DisplaySection) -> SectionView {
    SectionView {
        id: section.id.clone(),
        title: picker.title_of(section),
        items: section
            .items
            .iter()
            .map(|item| item_view(picker, item))
            .collect(),
    }
}

pub fn sections_view<L: RegionLocale>(picker: &RegionPicker<L>) -> SectionsView {
    SectionsView {
        mode: picker.grouping_mode(),
        query: picker.query().map(String::from),
        show_headers: picker.shows_section_headers(),
        sections: picker
            .sections()
            .iter()
            .map(|section| section_view(picker, section))
            .collect(),
    }
}

pub fn index_view<L: RegionLocale>(picker: &RegionPicker<L>) -> IndexView {
    IndexView {
        mode: picker.grouping_mode(),
        titles: picker.index_titles(),
    }
}

pub fn locate_view<L: RegionLocale>(picker: &RegionPicker<L>, code: &str) -> LocateView {
    LocateView {
        code: code.to_string(),
        title: picker.locale().resolve_title(code),
        location: picker.selected_item_location(),
        scroll_to: picker.scroll_target(),
    }
}

pub fn modes_view<L: RegionLocale>(picker: &RegionPicker<L>) -> Vec<ModeView> {
    picker
        .grouping_menu()
        .into_iter()
        .map(|entry| ModeView {
            mode: entry.mode,
            flag: Mode::from(entry.mode).flag_value(),
            label: entry.label,
            selected: entry.selected,
        })
        .collect()
}

pub fn catalog_view<L: RegionLocale>(catalog: &Catalog, locale: &L) -> CatalogView {
    let continents = catalog
        .continents()
        .iter()
        .map(|continent| ContinentView {
            code: continent.code.clone(),
            title: locale.resolve_title(&continent.code),
            subregions: continent
                .subregions
                .iter()
                .map(|subregion| SubregionView {
                    code: subregion.code.clone(),
                    title: locale.resolve_title(&subregion.code),
                    countries: subregion
                        .countries
                        .iter()
                        .map(|code| ItemView {
                            id: code.clone(),
                            region_code: code.clone(),
                            title: locale.resolve_title(code),
                            match_range: None,
                            selected: false,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    CatalogView {
        locale: locale.identifier().to_string(),
        country_count: catalog.country_count(),
        continents,
    }
}

// --- Text -------------------------------------------------------------------

/// Markers under the matched part of `title`, aligned by display width.
pub fn underline(title: &str, range: MatchRange) -> Option<String> {
    let (before, matched, _) = range.split(title)?;
    Some(format!(
        "{}{}",
        " ".repeat(before.width()),
        "^".repeat(matched.width().max(1))
    ))
}

fn write_item(out: &mut String, item: &ItemView, indent: &str) {
    let title = item.title.as_deref().unwrap_or(UNTITLED);
    let mark = if item.selected { SELECTED_MARK } else { "" };
    let _ = writeln!(out, "{}{} ({}){}", indent, title, item.region_code, mark);

    if let (Some(title), Some(range)) = (item.title.as_deref(), item.match_range) {
        if let Some(markers) = underline(title, range) {
            let _ = writeln!(out, "{}{}", indent, markers);
        }
    }
}

pub fn sections_text(view: &SectionsView) -> String {
    let mut out = String::new();
    if view.sections.is_empty() {
        match &view.query {
            Some(query) => {
                let _ = writeln!(out, "No countries match '{}'", query);
            }
            None => out.push_str("No countries\n"),
        }
        return out;
    }

    for section in &view.sections {
        if view.show_headers {
            let title = section.title.as_deref().unwrap_or(UNTITLED);
            let _ = writeln!(out, "== {} ==", title);
        }
        for item in &section.items {
            write_item(&mut out, item, ITEM_INDENT);
        }
    }
    out
}

pub fn index_text(view: &IndexView) -> String {
    match &view.titles {
        Some(titles) => format!("{}\n", titles.join(" ")),
        None => format!("No index for mode {}\n", view.mode),
    }
}

pub fn locate_text(view: &LocateView) -> String {
    let name = view.title.as_deref().unwrap_or(UNTITLED);
    match view.location {
        Some(location) => {
            let scroll = match view.scroll_to {
                Some(_) => "scroll to item",
                None => "scroll to top",
            };
            format!(
                "{} ({}): section {}, item {} ({})\n",
                name, view.code, location.section, location.item, scroll
            )
        }
        None => format!("{} ({}) is not shown\n", name, view.code),
    }
}

pub fn modes_text(modes: &[ModeView]) -> String {
    let mut out = String::new();
    for mode in modes {
        let mark = if mode.selected { "*" } else { " " };
        let _ = writeln!(out, "{} {:<10} {}", mark, mode.flag, mode.label);
    }
    out
}

pub fn catalog_text(view: &CatalogView) -> String {
    let mut out = String::new();
    for continent in &view.continents {
        let title = continent.title.as_deref().unwrap_or(UNTITLED);
        let _ = writeln!(out, "{} ({})", title, continent.code);
        for subregion in &continent.subregions {
            let title = subregion.title.as_deref().unwrap_or(UNTITLED);
            let _ = writeln!(out, "  {} ({})", title, subregion.code);
            for country in &subregion.countries {
                write_item(&mut out, country, "    ");
            }
        }
    }
    let _ = writeln!(
        out,
        "{} countries in {} continents",
        view.country_count,
        view.continents.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use regionpick_core::locale::{FixedRegion, TitleTable};
    use regionpick_core::provider::RegionRecord;

    use super::*;

    fn picker() -> RegionPicker<TitleTable> {
        let catalog = Catalog::from_records(&[
            RegionRecord::continent("150", &["155"]),
            RegionRecord::within("155", "150", &["FR", "DE"]),
        ]);
        let titles = TitleTable::new("en")
            .with_title("150", "Europe")
            .with_title("155", "Western Europe")
            .with_title("FR", "France")
            .with_title("DE", "Germany");
        RegionPicker::new(catalog, titles).with_current_region(FixedRegion::new("FR"))
    }

    #[test]
    fn test_underline_ascii() {
        assert_eq!(underline("Germany", MatchRange::new(0, 3)).as_deref(), Some("^^^"));
        assert_eq!(underline("Germany", MatchRange::new(4, 2)).as_deref(), Some("    ^^"));
    }

    #[test]
    fn test_underline_uses_display_width() {
        // Precomposed accents are one column wide
        assert_eq!(
            underline("Îles Åland", MatchRange::new(5, 5)).as_deref(),
            Some("     ^^^^^")
        );
        // CJK characters take two columns each
        assert_eq!(underline("日本", MatchRange::new(1, 1)).as_deref(), Some("  ^^"));
    }

    #[test]
    fn test_underline_out_of_range() {
        assert_eq!(underline("France", MatchRange::new(4, 9)), None);
    }

    #[test]
    fn test_sections_text_with_pin_and_headers() {
        let text = sections_text(&sections_view(&picker().with_selection("FR")));
        assert_eq!(
            text,
            "== Device Current ==\n  France (FR) *\n== F ==\n  France (FR) *\n== G ==\n  Germany (DE)\n"
        );
    }

    #[test]
    fn test_search_text_underlines_matches() {
        let mut picker = picker();
        picker.set_query("man");
        let text = sections_text(&sections_view(&picker));
        assert_eq!(text, "  Germany (DE)\n     ^^^\n");
    }

    #[test]
    fn test_search_text_without_matches() {
        let mut picker = picker();
        picker.set_query("xyz");
        assert_eq!(sections_text(&sections_view(&picker)), "No countries match 'xyz'\n");
    }

    #[test]
    fn test_sections_json_shape() {
        let mut picker = picker();
        picker.set_query("ger");
        let json = serde_json::to_value(sections_view(&picker)).unwrap();

        assert_eq!(json["mode"], "by_country_initial");
        assert_eq!(json["query"], "ger");
        assert_eq!(json["show_headers"], false);
        let item = &json["sections"][0]["items"][0];
        assert_eq!(item["title"], "Germany");
        assert_eq!(item["match_range"]["start"], 0);
        assert_eq!(item["match_range"]["length"], 3);
        assert!(item.get("selected").is_none());
    }

    #[test]
    fn test_index_text() {
        let mut picker = picker();
        assert_eq!(index_text(&index_view(&picker)), "◆ F G\n");
        picker.set_grouping_mode(GroupingMode::ByContinent);
        assert_eq!(index_text(&index_view(&picker)), "No index for mode by_continent\n");
    }

    #[test]
    fn test_locate_text() {
        let in_letters = picker().with_selection("DE");
        assert_eq!(
            locate_text(&locate_view(&in_letters, "DE")),
            "Germany (DE): section 2, item 0 (scroll to item)\n"
        );

        let pinned = picker().with_selection("FR");
        assert_eq!(
            locate_text(&locate_view(&pinned, "FR")),
            "France (FR): section 0, item 0 (scroll to top)\n"
        );

        let missing = picker().with_selection("JP");
        assert_eq!(locate_text(&locate_view(&missing, "JP")), "(untitled) (JP) is not shown\n");
    }

    #[test]
    fn test_modes_text_marks_selection() {
        let text = modes_text(&modes_view(&picker()));
        assert_eq!(
            text,
            "* initial    Country name\n  continent  Continents\n  subregion  Subregions\n"
        );
    }

    #[test]
    fn test_catalog_text() {
        let picker = picker();
        let text = catalog_text(&catalog_view(picker.catalog(), picker.locale()));
        assert_eq!(
            text,
            "Europe (150)\n  Western Europe (155)\n    France (FR)\n    Germany (DE)\n2 countries in 1 continents\n"
        );
    }
}

//! CLI argument parsing with clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use regionpick_core::grouping::GroupingMode;

const MODE_HELP: &str = "Grouping mode [default: from config, else initial]";

/// Browse and search a region catalog.
///
/// Loads region relationships and localized titles, groups countries by
/// initial, continent or subregion, and searches titles ignoring case and
/// diacritics. Output is plain text or JSON for scripting.
#[derive(Debug, Parser)]
#[command(name = "regionpick", version)]
pub struct Cli {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where data and settings come from. Flags win over environment variables.
#[derive(Debug, Default, clap::Args)]
pub struct DataArgs {
    /// Directory holding regions.json and titles-<locale>.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Locale of the title table to load (e.g. en, fr)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Region code to pin as the device's current region
    #[arg(long, global = true, value_name = "CODE")]
    pub current_region: Option<String>,

    /// JSON file with picker options
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the continent / subregion / country tree
    Catalog,

    /// Print the grouped sections
    #[command(after_help = "\
Examples:
  regionpick sections                         # Countries by initial letter
  regionpick sections --mode continent        # One section per continent
  regionpick sections --current-region FR     # Pin France on top
  regionpick sections --no-pin --format json  # Machine-readable, no pinning")]
    Sections(SectionsArgs),

    /// Search country titles, ignoring case and diacritics
    #[command(after_help = "\
Examples:
  regionpick search ger                       # Germany, Algeria, Niger...
  regionpick search aland --locale fr         # Matches \"Îles Åland\"
  regionpick search an --format json          # Hits with match ranges")]
    Search(SearchArgs),

    /// Print the section index titles
    Index(IndexArgs),

    /// Find where a region code is shown
    #[command(after_help = "\
Examples:
  regionpick locate DE                        # Location in the initial view
  regionpick locate DE --mode subregion       # Location in the subregion view
  regionpick locate DE --query ger            # Location among search hits")]
    Locate(LocateArgs),

    /// List the grouping modes
    Modes,
}

#[derive(Debug, clap::Args)]
pub struct SectionsArgs {
    #[arg(short, long, value_enum, help = MODE_HELP)]
    pub mode: Option<Mode>,

    /// Don't pin the current region
    #[arg(long)]
    pub no_pin: bool,
}

#[derive(Debug, clap::Args)]
pub struct SearchArgs {
    /// Text to look for in country titles
    pub query: String,
}

#[derive(Debug, clap::Args)]
pub struct IndexArgs {
    #[arg(short, long, value_enum, help = MODE_HELP)]
    pub mode: Option<Mode>,
}

#[derive(Debug, clap::Args)]
pub struct LocateArgs {
    /// Region code to look up (case-insensitive)
    pub code: String,

    #[arg(short, long, value_enum, help = MODE_HELP)]
    pub mode: Option<Mode>,

    /// Search query to apply first
    #[arg(short, long)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// By first letter of the country name
    Initial,
    /// By continent
    Continent,
    /// By subregion
    Subregion,
}

impl From<Mode> for GroupingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Initial => GroupingMode::ByCountryInitial,
            Mode::Continent => GroupingMode::ByContinent,
            Mode::Subregion => GroupingMode::BySubregion,
        }
    }
}

impl From<GroupingMode> for Mode {
    fn from(mode: GroupingMode) -> Self {
        match mode {
            GroupingMode::ByCountryInitial => Mode::Initial,
            GroupingMode::ByContinent => Mode::Continent,
            GroupingMode::BySubregion => Mode::Subregion,
        }
    }
}

impl Mode {
    /// Name accepted by `--mode`.
    pub fn flag_value(self) -> &'static str {
        match self {
            Mode::Initial => "initial",
            Mode::Continent => "continent",
            Mode::Subregion => "subregion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "regionpick",
            "sections",
            "--mode",
            "continent",
            "--locale",
            "fr",
            "--format",
            "json",
        ]);

        assert_eq!(cli.data.locale.as_deref(), Some("fr"));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Sections(args) => {
                assert_eq!(args.mode, Some(Mode::Continent));
                assert!(!args.no_pin);
            }
            _ => panic!("Expected sections command"),
        }
    }

    #[test]
    fn test_locate_with_query() {
        let cli = Cli::parse_from(["regionpick", "locate", "de", "-q", "ger"]);

        match cli.command {
            Commands::Locate(args) => {
                assert_eq!(args.code, "de");
                assert_eq!(args.query.as_deref(), Some("ger"));
                assert_eq!(args.mode, None);
            }
            _ => panic!("Expected locate command"),
        }
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_mode_maps_both_ways() {
        for mode in GroupingMode::ALL {
            assert_eq!(GroupingMode::from(Mode::from(mode)), mode);
        }
        assert_eq!(Mode::from(GroupingMode::BySubregion).flag_value(), "subregion");
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

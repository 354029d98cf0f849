//! Data and settings resolution.
//!
//! Priority for each setting, highest first:
//! 1. Command-line flag
//! 2. Environment variable (`REGIONPICK_DATA_DIR`, `REGIONPICK_LOCALE`,
//!    `REGIONPICK_CURRENT_REGION`, `REGIONPICK_CONFIG`), ignoring empty values
//! 3. `{data_dir}/regionpick` when it holds a `regions.json`
//! 4. The sample data compiled into the binary
//!
//! The current region falls back to the POSIX locale (`LC_ALL`,
//! `LC_MESSAGES`, `LANG`).

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use regionpick_core::config::PickerOptions;
use regionpick_core::error::DataError;
use regionpick_core::locale::{CurrentRegionSource, PosixLocaleRegion, TitleTable};
use regionpick_core::provider::StaticRegions;
use tracing::debug;

use crate::args::DataArgs;

const DEFAULT_LOCALE: &str = "en";
const REGIONS_FILE: &str = "regions.json";

const BUNDLED_REGIONS: &str = include_str!("../data/regions.json");
const BUNDLED_TITLES: &[(&str, &str)] = &[
    ("en", include_str!("../data/titles-en.json")),
    ("fr", include_str!("../data/titles-fr.json")),
];

/// Read an env var, treating empty as unset.
fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Get the data directory, or `None` for the bundled sample data.
pub fn get_data_dir(flag: Option<&Path>) -> Option<PathBuf> {
    // 1. Flag
    if let Some(dir) = flag {
        return Some(dir.to_path_buf());
    }

    // 2. Explicit override (ignore empty)
    if let Some(dir) = env_value("REGIONPICK_DATA_DIR") {
        return Some(PathBuf::from(dir));
    }

    // 3. Platform data dir, only if populated
    dirs::data_dir()
        .map(|dir| dir.join("regionpick"))
        .filter(|dir| dir.join(REGIONS_FILE).is_file())
}

/// Get the title locale.
pub fn get_locale(flag: Option<&str>) -> String {
    flag.filter(|locale| !locale.is_empty())
        .map(String::from)
        .or_else(|| env_value("REGIONPICK_LOCALE"))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Get the options file, if any.
pub fn get_config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| env_value("REGIONPICK_CONFIG").map(PathBuf::from))
}

/// Where the device's current region comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentRegion {
    /// Set explicitly by flag or environment.
    Fixed(String),
    /// Read from the POSIX locale on every rebuild.
    Posix,
}

impl CurrentRegion {
    pub fn resolve(flag: Option<&str>) -> Self {
        flag.filter(|code| !code.is_empty())
            .map(String::from)
            .or_else(|| env_value("REGIONPICK_CURRENT_REGION"))
            .map(|code| CurrentRegion::Fixed(code.to_ascii_uppercase()))
            .unwrap_or(CurrentRegion::Posix)
    }
}

impl CurrentRegionSource for CurrentRegion {
    fn current_region_code(&self) -> Option<String> {
        match self {
            CurrentRegion::Fixed(code) => Some(code.clone()),
            CurrentRegion::Posix => PosixLocaleRegion.current_region_code(),
        }
    }
}

/// Everything the picker needs, resolved from flags and environment.
#[derive(Debug)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub locale: String,
    pub config: Option<PathBuf>,
    pub current_region: CurrentRegion,
}

impl Settings {
    pub fn resolve(args: &DataArgs) -> Self {
        let settings = Self {
            data_dir: get_data_dir(args.data_dir.as_deref()),
            locale: get_locale(args.locale.as_deref()),
            config: get_config_path(args.config.as_deref()),
            current_region: CurrentRegion::resolve(args.current_region.as_deref()),
        };
        debug!("Resolved settings: {:?}", settings);
        settings
    }

    /// Load region records and the title table.
    pub fn load_data(&self) -> anyhow::Result<(StaticRegions, TitleTable)> {
        match &self.data_dir {
            Some(dir) => load_dir(dir, &self.locale),
            None => load_bundled(&self.locale),
        }
    }

    /// Load picker options, or the defaults when no file is configured.
    pub fn load_options(&self) -> anyhow::Result<PickerOptions> {
        let Some(path) = &self.config else {
            return Ok(PickerOptions::default());
        };
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        PickerOptions::from_json_reader(BufReader::new(file))
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Attach the source name and the fix-it hint to a data error.
fn with_hint(error: DataError, source: &str) -> anyhow::Error {
    let hint = error.suggestion();
    anyhow::Error::new(error).context(format!("Failed to load {} ({})", source, hint))
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn load_dir(dir: &Path, locale: &str) -> anyhow::Result<(StaticRegions, TitleTable)> {
    let regions_path = dir.join(REGIONS_FILE);
    let titles_path = dir.join(format!("titles-{}.json", locale));
    debug!(
        "Loading {} and {}",
        regions_path.display(),
        titles_path.display()
    );

    let regions = StaticRegions::from_json_reader(open(&regions_path)?)
        .map_err(|e| with_hint(e, &regions_path.display().to_string()))?;
    let titles = TitleTable::from_json_reader(open(&titles_path)?)
        .map_err(|e| with_hint(e, &titles_path.display().to_string()))?;
    Ok((regions, titles))
}

fn load_bundled(locale: &str) -> anyhow::Result<(StaticRegions, TitleTable)> {
    debug!("Loading bundled sample data for locale {}", locale);
    let Some((_, titles_json)) = BUNDLED_TITLES.iter().find(|(id, _)| *id == locale) else {
        let known: Vec<&str> = BUNDLED_TITLES.iter().map(|(id, _)| *id).collect();
        bail!(
            "No bundled titles for locale '{}' (bundled: {}). Use --data-dir to load your own.",
            locale,
            known.join(", ")
        );
    };

    let regions = StaticRegions::from_json_str(BUNDLED_REGIONS)
        .map_err(|e| with_hint(e, "bundled regions"))?;
    let titles = TitleTable::from_json_str(titles_json)
        .map_err(|e| with_hint(e, "bundled titles"))?;
    if titles.is_empty() {
        return Err(anyhow!("Bundled titles for '{}' are empty", locale));
    }
    Ok((regions, titles))
}

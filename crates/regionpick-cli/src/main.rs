//! regionpick CLI entry point.

mod args;
mod data;
mod render;

use clap::Parser;
use regionpick_core::catalog::Catalog;
use regionpick_core::locale::TitleTable;
use regionpick_core::picker::RegionPicker;
use serde::Serialize;
use tracing::{debug, error};

use crate::args::{Cli, Commands, OutputFormat};
use crate::data::Settings;

fn main() {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Print a view as text or pretty JSON.
fn emit<V: Serialize>(format: OutputFormat, view: &V, text: impl Fn(&V) -> String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text(view)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::resolve(&cli.data);
    let (regions, titles) = settings.load_data()?;
    let mut options = settings.load_options()?;

    let catalog = Catalog::build(&regions);
    debug!(
        "Catalog has {} countries in {} continents",
        catalog.country_count(),
        catalog.continents().len()
    );

    if let Commands::Catalog = cli.command {
        let view = render::catalog_view(&catalog, &titles);
        return emit(cli.format, &view, render::catalog_text);
    }

    if let Commands::Sections(args) = &cli.command {
        if args.no_pin {
            options = options.with_pinning(false);
        }
    }

    let mut picker: RegionPicker<TitleTable> = RegionPicker::with_options(catalog, titles, options)
        .with_current_region(settings.current_region.clone());

    match cli.command {
        Commands::Catalog => Ok(()),
        Commands::Sections(args) => {
            if let Some(mode) = args.mode {
                picker.set_grouping_mode(mode.into());
            }
            emit(cli.format, &render::sections_view(&picker), render::sections_text)
        }
        Commands::Search(args) => {
            picker.set_query(&args.query);
            emit(cli.format, &render::sections_view(&picker), render::sections_text)
        }
        Commands::Index(args) => {
            if let Some(mode) = args.mode {
                picker.set_grouping_mode(mode.into());
            }
            emit(cli.format, &render::index_view(&picker), render::index_text)
        }
        Commands::Locate(args) => {
            let code = args.code.to_ascii_uppercase();
            picker = picker.with_selection(code.as_str());
            if let Some(mode) = args.mode {
                picker.set_grouping_mode(mode.into());
            }
            if let Some(query) = &args.query {
                picker.set_query(query);
            }
            emit(cli.format, &render::locate_view(&picker, &code), render::locate_text)
        }
        Commands::Modes => emit(cli.format, &render::modes_view(&picker), |modes| {
            render::modes_text(modes)
        }),
    }
}

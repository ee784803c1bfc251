use beernoter::{
    cli::commands::{
        annotate::{ClearCommand, NoteCommand, RateCommand, StarCommand},
        beer::BeerCommand,
        brewery::BreweryCommand,
        export::ExportCommand,
        filter::{CriteriaChange, FilterCommand},
        list::{ListCommand, ShowCommand},
        top::TopCommand,
        visibility::{ExpandCommand, HideCommand, UnhideCommand},
        CommandHandler,
    },
    cli::{Cli, Commands, FilterAction, TopBy},
    config::{Settings, SettingsLoader},
    io::BeerNoterPaths,
    view::TopKind,
    Notebook, Result,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize tracing; RUST_LOG wins over -v
fn initialize_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_settings(cli: &Cli) -> Result<(Settings, BeerNoterPaths)> {
    let paths = match &cli.data_dir {
        Some(dir) => BeerNoterPaths::for_dir(dir),
        None => BeerNoterPaths::default(),
    };

    let mut settings = SettingsLoader::new().load(&paths, cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = Some(dir.clone());
    }
    if let Some(catalog) = &cli.catalog {
        settings.catalog = Some(catalog.clone());
    }
    Ok((settings, paths))
}

fn handler(command: Commands, settings: &Settings) -> Box<dyn CommandHandler> {
    match command {
        Commands::List { all } => Box::new(ListCommand::new(all)),
        Commands::Show { brewery, beer } => Box::new(ShowCommand::new(brewery, beer)),
        Commands::Filter { action } => Box::new(match action {
            FilterAction::Show => FilterCommand::Show,
            FilterAction::Set {
                query,
                favorites,
                min_rating,
                unrated,
                rated,
                sort,
            } => FilterCommand::Set(CriteriaChange {
                query,
                favorites,
                min_rating,
                unrated,
                rated,
                sort,
            }),
            FilterAction::Clear => FilterCommand::Clear,
        }),
        Commands::Expand { brewery } => Box::new(ExpandCommand::new(brewery)),
        Commands::Hide { brewery, yes } => Box::new(HideCommand::new(brewery, yes)),
        Commands::Unhide { brewery } => Box::new(UnhideCommand::new(brewery)),
        Commands::Rate {
            brewery,
            beer,
            rating,
        } => Box::new(RateCommand::new(brewery, beer, rating)),
        Commands::Note {
            brewery,
            beer,
            notes,
        } => Box::new(NoteCommand::new(brewery, beer, notes)),
        Commands::Star { brewery, beer } => Box::new(StarCommand::new(brewery, beer)),
        Commands::Clear { brewery, beer, yes } => Box::new(ClearCommand::new(brewery, beer, yes)),
        Commands::Top { by, limit, pages } => {
            let kind = match by {
                TopBy::Untappd => TopKind::External,
                TopBy::User => TopKind::User,
            };
            let page_size = limit.unwrap_or(settings.top_list_size);
            Box::new(TopCommand::new(kind, page_size, pages))
        }
        Commands::Brewery { action } => Box::new(BreweryCommand::new(action)),
        Commands::Beer { action } => Box::new(BeerCommand::new(action)),
        Commands::Export { format, output } => {
            let dir = output
                .or_else(|| settings.export_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            Box::new(ExportCommand::new(format, dir))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    let (settings, paths) = resolve_settings(&cli)?;
    let mut notebook = Notebook::from_settings(&settings, &paths)?;

    debug!(
        command = cli.command.name(),
        modifies_data = cli.command.modifies_data(),
        "Running command"
    );
    let command = handler(cli.command, &settings);
    command.execute(&mut notebook)
}

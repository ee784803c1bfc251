use crate::export::ExportFormat;
use crate::view::SortMode;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// BeerNoter: rate beers and keep tasting notes
#[derive(Parser)]
#[command(name = "beernoter")]
#[command(version = "0.1.0")]
#[command(about = "Rate beers and keep tasting notes")]
#[command(
    long_about = "BeerNoter keeps your ratings, notes and favorites for a catalog of breweries and beers, with search, filters, top lists and export."
)]
pub struct Cli {
    /// Directory for saved ratings and notes
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Catalog file to use instead of the bundled one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List breweries and beers using the session's filters
    List {
        /// List beers of collapsed breweries too
        #[arg(short, long)]
        all: bool,
    },

    /// Show one beer with your rating and notes
    Show { brewery: u64, beer: u64 },

    /// Show or change the session's search, filter and sort settings
    Filter {
        #[command(subcommand)]
        action: FilterAction,
    },

    /// Expand or collapse a brewery in listings
    Expand { brewery: u64 },

    /// Hide a brewery from listings and top lists
    Hide {
        brewery: u64,

        /// Skip interactive confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Unhide a brewery, or list hidden breweries
    Unhide { brewery: Option<u64> },

    /// Rate a beer (an empty rating clears it)
    Rate {
        brewery: u64,
        beer: u64,
        rating: String,
    },

    /// Write notes for a beer (empty notes clear them)
    Note {
        brewery: u64,
        beer: u64,
        notes: String,
    },

    /// Star or unstar a beer
    Star { brewery: u64, beer: u64 },

    /// Clear rating, notes and star of a beer
    Clear {
        brewery: u64,
        beer: u64,

        /// Skip interactive confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the best-rated beers
    Top {
        /// Rank by Untappd rating or by your own rating
        #[arg(value_enum)]
        by: TopBy,

        /// Entries per page
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Number of pages to show
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Add or rename breweries
    Brewery {
        #[command(subcommand)]
        action: BreweryAction,
    },

    /// Add, edit or remove beers
    Beer {
        #[command(subcommand)]
        action: BeerAction,
    },

    /// Export rated and annotated beers (txt or md)
    Export {
        format: ExportFormat,

        /// Directory to write the export to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum FilterAction {
    /// Print the current settings
    Show,

    /// Change some settings, keeping the rest
    Set {
        /// Text to search for
        #[arg(short, long)]
        query: Option<String>,

        /// Only starred beers
        #[arg(long)]
        favorites: Option<bool>,

        /// Minimum Untappd rating (0 to unset)
        #[arg(long)]
        min_rating: Option<f64>,

        /// Only beers without an Untappd rating
        #[arg(long)]
        unrated: Option<bool>,

        /// Only beers you rated
        #[arg(long)]
        rated: Option<bool>,

        /// Sort order: default, untappd or user
        #[arg(short, long)]
        sort: Option<SortMode>,
    },

    /// Reset every setting
    Clear,
}

#[derive(Subcommand)]
pub enum BreweryAction {
    /// Add a brewery of your own
    Add { name: String },

    /// Rename a brewery
    Rename { brewery: u64, name: String },
}

#[derive(Subcommand)]
pub enum BeerAction {
    /// Add a beer to a brewery
    Add {
        brewery: u64,
        name: String,

        #[arg(long)]
        style: Option<String>,

        #[arg(long)]
        details: Option<String>,
    },

    /// Change a beer's name, style or details
    Edit {
        brewery: u64,
        beer: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        style: Option<String>,

        #[arg(long)]
        details: Option<String>,
    },

    /// Remove a beer you added
    Remove {
        brewery: u64,
        beer: u64,

        /// Skip interactive confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopBy {
    Untappd,
    User,
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::List { .. } => "list",
            Commands::Show { .. } => "show",
            Commands::Filter { .. } => "filter",
            Commands::Expand { .. } => "expand",
            Commands::Hide { .. } => "hide",
            Commands::Unhide { .. } => "unhide",
            Commands::Rate { .. } => "rate",
            Commands::Note { .. } => "note",
            Commands::Star { .. } => "star",
            Commands::Clear { .. } => "clear",
            Commands::Top { .. } => "top",
            Commands::Brewery { .. } => "brewery",
            Commands::Beer { .. } => "beer",
            Commands::Export { .. } => "export",
        }
    }

    /// Check if this command changes saved data
    pub fn modifies_data(&self) -> bool {
        !matches!(
            self,
            Commands::List { .. }
                | Commands::Show { .. }
                | Commands::Top { .. }
                | Commands::Export { .. }
                | Commands::Filter {
                    action: FilterAction::Show
                }
                | Commands::Unhide { brewery: None }
        )
    }
}

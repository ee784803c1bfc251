pub mod app;
pub mod commands;
pub mod prompt;

pub use app::{BeerAction, BreweryAction, Cli, Commands, FilterAction, TopBy};

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod io;
pub mod notebook;
pub mod state;
pub mod view;

pub use error::{BeerNoterError, Result};
pub use notebook::{Confirm, Notebook};

use super::CommandHandler;
use crate::cli::BreweryAction;
use crate::{BeerNoterError, Notebook, Result};

pub struct BreweryCommand {
    action: BreweryAction,
}

impl CommandHandler for BreweryCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        match &self.action {
            BreweryAction::Add { name } => {
                let name = required_name(name)?;
                let id = notebook.add_group(name);
                println!("Added {} [{}]", name, id);
            }
            BreweryAction::Rename { brewery, name } => {
                let name = required_name(name)?;
                let old = notebook.group(*brewery)?.name.clone();
                notebook.rename_group(*brewery, name)?;
                println!("Renamed {} to {}", old, name);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "brewery"
    }
}

impl BreweryCommand {
    pub fn new(action: BreweryAction) -> Self {
        Self { action }
    }
}

pub(super) fn required_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BeerNoterError::Cli("name cannot be empty".to_string()));
    }
    Ok(name)
}

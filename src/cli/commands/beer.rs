use super::brewery::required_name;
use super::CommandHandler;
use crate::catalog::{EntryKey, EntryPatch};
use crate::cli::prompt::confirmation;
use crate::cli::BeerAction;
use crate::{BeerNoterError, Notebook, Result};

pub struct BeerCommand {
    action: BeerAction,
}

impl CommandHandler for BeerCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        match &self.action {
            BeerAction::Add {
                brewery,
                name,
                style,
                details,
            } => {
                let draft = EntryPatch {
                    name: Some(required_name(name)?.to_string()),
                    style: style.clone(),
                    details: details.clone(),
                };
                let id = notebook.add_entry(*brewery, &draft)?;
                println!(
                    "Added {} [{}] to {}",
                    name.trim(),
                    id,
                    notebook.group(*brewery)?.name
                );
            }
            BeerAction::Edit {
                brewery,
                beer,
                name,
                style,
                details,
            } => {
                let patch = EntryPatch {
                    name: name.as_deref().map(required_name).transpose()?.map(String::from),
                    style: style.clone(),
                    details: details.clone(),
                };
                if patch.is_empty() {
                    return Err(BeerNoterError::Cli(
                        "nothing to change, pass --name, --style or --details".to_string(),
                    ));
                }
                let key = EntryKey::new(*brewery, *beer);
                notebook.edit_entry(key, &patch)?;
                println!("Updated {}", notebook.entry(key)?.1.name);
            }
            BeerAction::Remove { brewery, beer, yes } => {
                let key = EntryKey::new(*brewery, *beer);
                let name = notebook.entry(key)?.1.name.clone();
                if notebook.remove_entry(key, confirmation(*yes).as_ref())? {
                    println!("Removed {}", name);
                } else {
                    println!("Nothing changed");
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "beer"
    }
}

impl BeerCommand {
    pub fn new(action: BeerAction) -> Self {
        Self { action }
    }
}

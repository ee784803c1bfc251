use super::CommandHandler;
use crate::cli::prompt::confirmation;
use crate::{Notebook, Result};

/// Handler for the `expand` command
pub struct ExpandCommand {
    pub brewery: u64,
}

impl CommandHandler for ExpandCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        let expanded = notebook.toggle_expanded(self.brewery)?;
        let name = &notebook.group(self.brewery)?.name;
        if expanded {
            println!("Expanded {}", name);
        } else {
            println!("Collapsed {}", name);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "expand"
    }
}

impl ExpandCommand {
    pub fn new(brewery: u64) -> Self {
        Self { brewery }
    }
}

/// Handler for the `hide` command
pub struct HideCommand {
    pub brewery: u64,
    pub yes: bool,
}

impl CommandHandler for HideCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        let confirm = confirmation(self.yes);
        if notebook.hide_group(self.brewery, confirm.as_ref())? {
            println!(
                "Hid {}; `beernoter unhide {}` brings it back",
                notebook.group(self.brewery)?.name,
                self.brewery
            );
        } else {
            println!("Nothing changed");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "hide"
    }
}

impl HideCommand {
    pub fn new(brewery: u64, yes: bool) -> Self {
        Self { brewery, yes }
    }
}

/// Handler for the `unhide` command
pub struct UnhideCommand {
    pub brewery: Option<u64>,
}

impl CommandHandler for UnhideCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        match self.brewery {
            Some(brewery) => {
                notebook.unhide_group(brewery)?;
                println!("Unhid {}", notebook.group(brewery)?.name);
            }
            None => {
                let hidden = notebook.hidden_groups();
                if hidden.is_empty() {
                    println!("No hidden breweries");
                }
                for group in hidden {
                    println!("{} [{}]", group.name, group.id);
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "unhide"
    }
}

impl UnhideCommand {
    pub fn new(brewery: Option<u64>) -> Self {
        Self { brewery }
    }
}

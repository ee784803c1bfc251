use super::CommandHandler;
use crate::catalog::EntryKey;
use crate::cli::prompt::confirmation;
use crate::{Confirm, Notebook, Result};

/// Handler for the `rate` command
pub struct RateCommand {
    pub key: EntryKey,
    pub rating: String,
}

impl CommandHandler for RateCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        notebook.set_user_rating(self.key, &self.rating)?;
        let (_, entry) = notebook.entry(self.key)?;
        match notebook
            .annotation(self.key)
            .and_then(|a| a.user_rating.as_ref())
        {
            Some(rating) if rating.value().is_none() => println!(
                "Rated {} as '{}' (not a number, it will rank as 0)",
                entry.name,
                rating.as_str()
            ),
            Some(rating) => println!("Rated {} {}", entry.name, rating.as_str()),
            None => println!("Cleared rating of {}", entry.name),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "rate"
    }
}

impl RateCommand {
    pub fn new(brewery: u64, beer: u64, rating: String) -> Self {
        Self {
            key: EntryKey::new(brewery, beer),
            rating,
        }
    }
}

/// Handler for the `note` command
pub struct NoteCommand {
    pub key: EntryKey,
    pub notes: String,
}

impl CommandHandler for NoteCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        notebook.set_notes(self.key, &self.notes)?;
        let (_, entry) = notebook.entry(self.key)?;
        if notebook.annotation(self.key).and_then(|a| a.notes()).is_some() {
            println!("Saved notes for {}", entry.name);
        } else {
            println!("Cleared notes of {}", entry.name);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "note"
    }
}

impl NoteCommand {
    pub fn new(brewery: u64, beer: u64, notes: String) -> Self {
        Self {
            key: EntryKey::new(brewery, beer),
            notes,
        }
    }
}

/// Handler for the `star` command
pub struct StarCommand {
    pub key: EntryKey,
}

impl CommandHandler for StarCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        let starred = notebook.toggle_favorite(self.key)?;
        let (_, entry) = notebook.entry(self.key)?;
        if starred {
            println!("★ Starred {}", entry.name);
        } else {
            println!("Unstarred {}", entry.name);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "star"
    }
}

impl StarCommand {
    pub fn new(brewery: u64, beer: u64) -> Self {
        Self {
            key: EntryKey::new(brewery, beer),
        }
    }
}

/// Handler for the `clear` command
pub struct ClearCommand {
    pub key: EntryKey,
    pub yes: bool,
}

impl CommandHandler for ClearCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        let name = notebook.entry(self.key)?.1.name.clone();
        let prompt = format!("Clear rating, notes and star of {}?", name);
        if !confirmation(self.yes).confirm(&prompt) {
            println!("Nothing changed");
            return Ok(());
        }

        notebook.clear_annotation(self.key)?;
        println!("Cleared {}", name);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "clear"
    }
}

impl ClearCommand {
    pub fn new(brewery: u64, beer: u64, yes: bool) -> Self {
        Self {
            key: EntryKey::new(brewery, beer),
            yes,
        }
    }
}

use super::CommandHandler;
use crate::catalog::{Entry, EntryKey, Group};
use crate::state::Annotation;
use crate::{Notebook, Result};
use std::fmt::{self, Write as _};

/// Handler for the `list` command
pub struct ListCommand {
    pub all: bool,
}

impl CommandHandler for ListCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        print!("{}", render_listing(notebook, self.all));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

impl ListCommand {
    pub fn new(all: bool) -> Self {
        Self { all }
    }
}

/// Breweries under the session's criteria, with beers of expanded breweries
pub fn render_listing(notebook: &Notebook, all: bool) -> String {
    let mut out = String::new();
    let written = write_listing(&mut out, notebook, all);
    debug_assert!(written.is_ok(), "writing to a String cannot fail");
    out
}

fn write_listing(out: &mut String, notebook: &Notebook, all: bool) -> fmt::Result {
    let groups = notebook.view();

    if notebook.criteria().is_active() {
        writeln!(out, "Active filters (see `beernoter filter show`)\n")?;
    }

    if groups.is_empty() {
        return writeln!(out, "No beers to show.");
    }

    for group in &groups {
        let count = group.entries.len();
        writeln!(
            out,
            "{} [{}] – {} {}",
            group.group.name,
            group.group.id,
            count,
            if count == 1 { "beer" } else { "beers" }
        )?;

        if all || notebook.shows_entries(group.group.id) {
            for view in &group.entries {
                out.push_str("  ");
                write_entry_line(out, view.entry, view.annotation)?;
                out.push('\n');
            }
        }
    }
    Ok(())
}

/// One-line summary of a beer
pub fn entry_line(entry: &Entry, annotation: Option<&Annotation>) -> String {
    let mut line = String::new();
    let written = write_entry_line(&mut line, entry, annotation);
    debug_assert!(written.is_ok(), "writing to a String cannot fail");
    line
}

fn write_entry_line(out: &mut String, entry: &Entry, annotation: Option<&Annotation>) -> fmt::Result {
    let star = if annotation.is_some_and(|a| a.favorite) {
        '★'
    } else {
        ' '
    };
    write!(out, "{} {} [{}] – {}", star, entry.name, entry.id, entry.style)?;

    if let Some(rating) = &entry.untappd_rating {
        write!(out, " – Untappd {}", rating)?;
    }
    if let Some(rating) = annotation.and_then(|a| a.user_rating.as_ref()) {
        write!(out, " – mine {}", rating.as_str())?;
    }
    Ok(())
}

/// Handler for the `show` command
pub struct ShowCommand {
    pub key: EntryKey,
}

impl CommandHandler for ShowCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        print!("{}", render_entry(notebook, self.key)?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "show"
    }
}

impl ShowCommand {
    pub fn new(brewery: u64, beer: u64) -> Self {
        Self {
            key: EntryKey::new(brewery, beer),
        }
    }
}

/// Every detail of one beer and what the user recorded about it
pub fn render_entry(notebook: &Notebook, key: EntryKey) -> Result<String> {
    let (group, entry) = notebook.entry(key)?;
    let mut out = String::new();
    let written = write_entry(&mut out, group, entry, notebook.annotation(key));
    debug_assert!(written.is_ok(), "writing to a String cannot fail");
    Ok(out)
}

fn write_entry(
    out: &mut String,
    group: &Group,
    entry: &Entry,
    annotation: Option<&Annotation>,
) -> fmt::Result {
    let star = if annotation.is_some_and(|a| a.favorite) {
        " ★"
    } else {
        ""
    };
    writeln!(out, "{}{}", entry.name, star)?;
    writeln!(out, "{}", group.name)?;
    writeln!(out, "{}", entry.style)?;
    if !entry.details.is_empty() {
        writeln!(out, "{}", entry.details)?;
    }
    match &entry.untappd_rating {
        Some(rating) => writeln!(out, "Untappd: {}", rating)?,
        None => writeln!(out, "Untappd: N/A")?,
    }
    if let Some(url) = &entry.untappd_url {
        writeln!(out, "{}", url)?;
    }

    let rating = annotation
        .and_then(|a| a.user_rating.as_ref())
        .map(|r| r.as_str())
        .unwrap_or("-");
    let notes = annotation.and_then(|a| a.notes()).unwrap_or("-");
    writeln!(out, "My rating: {}", rating)?;
    writeln!(out, "Notes: {}", notes)
}

use super::CommandHandler;
use crate::view::{RankedEntry, TopKind, TopList};
use crate::{Notebook, Result};
use std::fmt::{self, Write as _};

/// Handler for the `top` command
pub struct TopCommand {
    pub kind: TopKind,
    pub page_size: usize,
    pub pages: usize,
}

impl CommandHandler for TopCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        print!("{}", render_top(notebook, self.kind, self.page_size, self.pages));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "top"
    }
}

impl TopCommand {
    pub fn new(kind: TopKind, page_size: usize, pages: usize) -> Self {
        Self {
            kind,
            page_size,
            pages,
        }
    }
}

pub fn render_top(notebook: &Notebook, kind: TopKind, page_size: usize, pages: usize) -> String {
    let mut list = TopList::new(kind, page_size.max(1));
    for _ in 1..pages {
        list.show_more();
    }

    let mut out = String::new();
    let written = write_top(&mut out, notebook, &list, pages);
    debug_assert!(written.is_ok(), "writing to a String cannot fail");
    out
}

fn write_top(out: &mut String, notebook: &Notebook, list: &TopList, pages: usize) -> fmt::Result {
    let (entries, more) = notebook.top_list(list);
    let kind = list.kind();

    let title = match kind {
        TopKind::External => "Top Untappd ratings",
        TopKind::User => "Top rated by me",
    };
    writeln!(out, "{}", title)?;

    if entries.is_empty() {
        return writeln!(out, "Nothing rated yet.");
    }

    for (position, ranked) in entries.iter().enumerate() {
        writeln!(out, "{:>3}. {}", position + 1, ranked_line(ranked, kind))?;
    }
    if more {
        writeln!(out, "More with --pages {}", pages.max(1) + 1)?;
    }
    Ok(())
}

fn ranked_line(ranked: &RankedEntry<'_>, kind: TopKind) -> String {
    let rating = ranked
        .rating(kind)
        .map(|r| match kind {
            TopKind::External => r.to_string(),
            TopKind::User => r.as_str().to_string(),
        })
        .unwrap_or_default();
    format!(
        "{} – {} ({}) [{}]",
        rating,
        ranked.entry.name,
        ranked.group_name,
        ranked.key()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BaseCatalog, EntryKey};
    use crate::state::MemoryStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn notebook() -> Notebook {
        Notebook::open(
            BaseCatalog::bundled().unwrap(),
            MemoryStore::new(),
            MemoryStore::new(),
            Duration::minutes(60),
        )
    }

    #[test]
    fn test_external_top_first_page() {
        let notebook = notebook();
        let text = render_top(&notebook, TopKind::External, 2, 1);

        assert_eq!(
            text,
            "Top Untappd ratings\n  \
             1. 4.02 – Tiramisu Imperial Stout (Sori Brewing) [2-4921105]\n  \
             2. 3.84 – Testi (Panimo Hiisi) [1-7155171]\n\
             More with --pages 2\n"
        );
    }

    #[test]
    fn test_user_top_without_ratings() {
        let notebook = notebook();
        let text = render_top(&notebook, TopKind::User, 10, 1);
        assert_eq!(text, "Top rated by me\nNothing rated yet.\n");
    }

    #[test]
    fn test_user_top_keeps_typed_rating() {
        let mut notebook = notebook();
        notebook
            .set_user_rating(EntryKey::new(4, 1877301), "4,25")
            .unwrap();
        let text = render_top(&notebook, TopKind::User, 10, 1);

        assert!(text.contains("1. 4.25 – Mustanaamio (Maistila) [4-1877301]"));
        assert!(!text.contains("More with"));
    }
}

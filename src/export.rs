//! Exporting ratings and notes as a text document.

use anyhow::Context;
use crate::catalog::{Entry, EntryKey, Group};
use crate::state::annotations::{Annotation, AnnotationMap};
use crate::Result;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

const BANNER: &str = r"
 @@@@@ @@@@@ @@@@@ @@@@@@ @@@@@   @@@@ @@    @@@@@ @@@@@ 
 @@@@@ @@@@@ @@@@@ @@@@@@ @@@@@ @@@@@@ @@@@@ @@@@@ @@@@@ 
 @@ @@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@@ @@    @@ @@ @@ @@ 
 @@ @@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@ @@ 
 @@ @@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@ @@ 
 @@ @@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@ @@ 
 @@ @@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@ @@ 
 @@@@  @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@@ @@ @@ @@ @@ @@ @@ 
 @@@@@ @@    @@    @@@ @@ @@ @@ @@ @@@ @@ @@ @@    @@ @@ 
 @@ @@ @@@@@ @@@@@ @@@@@  @@ @@ @@ @@@ @@ @@ @@@@@ @@@@  
 @@ @@ @@    @@    @@@ @@ @@ @@ @@ @@@ @@ @@ @@    @@ @@ 
 @@@@  @@@@@ @@@@@ @@@ @@ @@ @@ @@@@@  @@@@@ @@@@@ @@ @@ 
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Md,
}

impl ExportFormat {
    /// Fixed file name the export is saved under
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "beernoter.txt",
            ExportFormat::Md => "beernoter.md",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "txt" => Ok(ExportFormat::Txt),
            "md" | "markdown" => Ok(ExportFormat::Md),
            other => Err(format!("unknown export format '{}', expected txt or md", other)),
        }
    }
}

/// Whether any beer has a rating or notes to export
pub fn has_exportable_content(annotations: &AnnotationMap) -> bool {
    annotations.values().any(Annotation::has_content)
}

/// Render every rated or annotated beer, in catalog order
pub fn render(groups: &[Group], annotations: &AnnotationMap, format: ExportFormat) -> String {
    let mut content = String::new();

    for group in groups {
        for entry in &group.beers {
            let Some(annotation) = annotations.get(&EntryKey::new(group.id, entry.id)) else {
                continue;
            };
            if !annotation.has_content() {
                continue;
            }

            let record = Record {
                group,
                entry,
                rating: annotation.user_rating.as_ref().map(|r| r.as_str()),
                notes: annotation.notes(),
            };
            let written = match format {
                ExportFormat::Txt => record.write_txt(&mut content),
                ExportFormat::Md => record.write_md(&mut content),
            };
            debug_assert!(written.is_ok(), "writing to a String cannot fail");
        }
    }

    content.push_str(BANNER);
    content.push('\n');
    content
}

struct Record<'a> {
    group: &'a Group,
    entry: &'a Entry,
    rating: Option<&'a str>,
    notes: Option<&'a str>,
}

impl Record<'_> {
    fn untappd(&self) -> &str {
        self.entry
            .untappd_rating
            .as_ref()
            .map(|r| r.as_str())
            .unwrap_or("N/A")
    }

    fn write_txt(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "{} – {}", self.entry.name, self.rating.unwrap_or("N/A"))?;
        writeln!(out, "{}", self.group.name)?;
        writeln!(out, "{}", self.entry.style)?;
        writeln!(out, "{}", self.entry.details)?;
        writeln!(out, "Untappd: {}\n", self.untappd())?;
        if let Some(notes) = self.notes {
            writeln!(out, "Notes: {}", notes)?;
        }
        write!(out, "\n------------------\n\n")
    }

    fn write_md(&self, out: &mut String) -> std::fmt::Result {
        match self.rating {
            Some(rating) => writeln!(out, "### {} – **{}**", self.entry.name, rating)?,
            None => writeln!(out, "### {} – N/A", self.entry.name)?,
        }
        writeln!(out, "{}\\", self.group.name)?;
        writeln!(out, "{}\\", self.entry.style)?;
        writeln!(out, "{}\\", self.entry.details)?;
        writeln!(out, "Untappd: {}\n", self.untappd())?;
        if let Some(notes) = self.notes {
            writeln!(out, "**Notes:** {}", notes)?;
        }
        write!(out, "\n---\n\n")
    }
}

/// Write an export into `dir` under the format's file name
pub fn write_export(dir: &Path, format: ExportFormat, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(format.file_name());
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write export {}", path.display()))?;
    info!(path = %path.display(), "Exported ratings and notes");
    Ok(path)
}

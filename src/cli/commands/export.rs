use super::CommandHandler;
use crate::export::{write_export, ExportFormat};
use crate::{Notebook, Result};
use std::path::PathBuf;

/// Handler for the `export` command
pub struct ExportCommand {
    pub format: ExportFormat,
    pub output_dir: PathBuf,
}

impl CommandHandler for ExportCommand {
    fn execute(&self, notebook: &mut Notebook) -> Result<()> {
        let Some(content) = notebook.export(self.format) else {
            println!("Nothing to export yet: rate a beer or write some notes first.");
            return Ok(());
        };

        let path = write_export(&self.output_dir, self.format, &content)?;
        println!("Exported to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "export"
    }
}

impl ExportCommand {
    pub fn new(format: ExportFormat, output_dir: PathBuf) -> Self {
        Self { format, output_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BaseCatalog, EntryKey};
    use crate::state::MemoryStore;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_file_only_with_content() {
        let temp_dir = TempDir::new().unwrap();
        let mut notebook = Notebook::open(
            BaseCatalog::bundled().unwrap(),
            MemoryStore::new(),
            MemoryStore::new(),
            Duration::minutes(60),
        );
        let command = ExportCommand::new(ExportFormat::Md, temp_dir.path().to_path_buf());

        command.execute(&mut notebook).unwrap();
        assert!(!temp_dir.path().join("beernoter.md").exists());

        notebook
            .set_notes(EntryKey::new(1, 7155171), "nice")
            .unwrap();
        command.execute(&mut notebook).unwrap();

        let written = std::fs::read_to_string(temp_dir.path().join("beernoter.md")).unwrap();
        assert!(written.contains("**Notes:** nice"));
    }
}

pub mod annotate;
pub mod beer;
pub mod brewery;
pub mod export;
pub mod filter;
pub mod list;
pub mod top;
pub mod visibility;

use crate::{Notebook, Result};

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Execute the command against the user's notebook
    fn execute(&self, notebook: &mut Notebook) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

//! Read-only projections of the merged catalog: filtered listings and top lists.

pub mod criteria;
pub mod filter;
pub mod top;

pub use criteria::{FilterCriteria, SortMode};
pub use filter::{view, EntryView, GroupView};
pub use top::{top_by_external, top_by_user, RankedEntry, TopKind, TopList};

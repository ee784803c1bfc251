//! The brewery catalog
//!
//! The bundled catalog is read-only for the whole process. Users add
//! breweries and beers of their own, or edit bundled beers, through
//! [`UserCatalog`]; [`merge`] layers those records over the bundled
//! catalog to produce the catalog everything else works on.
//!
//! ```text
//! data/catalog.json ──► BaseCatalog ──┐
//!                                     ├─► merge() ──► Vec<Group>
//! userBreweries     ──► UserCatalog ──┘
//! ```

mod bundle;
mod merge;
pub mod rating;
mod types;
mod user;

pub use bundle::BaseCatalog;
pub use merge::merge;
pub use rating::Rating;
pub use types::{
    is_user_authored, Entry, EntryKey, EntryPatch, Group, UserEntry, UserGroup, USER_ID_BASE,
};
pub use user::{UserCatalog, USER_CATALOG_KEY};

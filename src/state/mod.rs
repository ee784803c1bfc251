pub mod annotations;
pub mod session;
pub mod store;
pub mod visibility;

pub use annotations::{Annotation, AnnotationMap, AnnotationStore};
pub use session::SessionState;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use visibility::{GroupFlags, HiddenGroups};

//! Typed view model of the portal page and the per-view façade over it.
pub mod document;
pub mod header;
pub mod page;
pub mod translate;

pub use document::{Binding, Document, Element, ElementKind};
pub use page::{spawn_storage_listener, Page};
pub use translate::apply_all;

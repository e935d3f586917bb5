//! Day-definition content: document model, structural validation, and
//! the object-storage client that fetches it.
//!
//! - [`DayDefinition`] — the per-day prompts document, decoded and
//!   validated independently of the transport.
//! - [`ContentStore`] — authenticated HTTP reads against the storage
//!   service.

pub mod daydef;
pub mod store;

pub use daydef::{DayDefinition, Prompt};
pub use store::{ContentError, ContentStore};

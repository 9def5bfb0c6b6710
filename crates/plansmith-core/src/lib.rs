//! Core domain logic for plansmith.
//!
//! The one piece of original logic lives in [`sectionize`]: turning an
//! unstructured completion into named, cleaned sections aligned to a fixed
//! outline. Everything else here is plumbing around it -- the completion
//! client seam, prompt construction, rendering, the persistence service,
//! and the built-in lesson catalog.

pub mod catalog;
pub mod completion;
pub mod format;
pub mod outline;
pub mod plan;
pub mod sectionize;

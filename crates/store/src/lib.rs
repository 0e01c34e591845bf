//! Typed store facade, constraint registry, and reference backend.
//!
//! This crate composes the codec layer over a [`KvBackend`](tagdb_core::KvBackend):
//! - [`TypedStore`]: the public typed wrapper (put/get/delete/iterate)
//! - [`Schema`] and [`ConstraintRegistry`]: per-key target kinds, coerced
//!   on write
//! - [`MemoryBackend`]: in-memory reference collaborator

#![warn(missing_docs)]
#![warn(clippy::all)]

mod memory;
mod registry;
mod schema;
mod store;

pub use memory::MemoryBackend;
pub use registry::ConstraintRegistry;
pub use schema::Schema;
pub use store::{Entries, TypedStore};

//! Verdict schemas - system assembly for the constraint-evaluation engine
//!
//! This crate wires the engine's collaborators into a usable whole:
//!
//! - **Authorities** ([`authority`]): resolvers mapping schema
//!   identifiers to schema text, consulted in order.
//! - **Cache** ([`cache`]): opaque get/put storage of resolved schemas.
//! - **Document model** ([`document`]): the handle that materializes
//!   schema text into data-model elements.
//! - **System** ([`system`]): the builder that stages collaborators and
//!   freezes them into an immutable [`SchemaSystem`], plus schema
//!   loading and the deferred warning sink.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use verdict_schemas::{MapAuthority, SchemaSystem};
//!
//! # fn main() -> verdict_schemas::Result<()> {
//! let mut builder = SchemaSystem::builder();
//! builder
//!     .add_authority(Arc::new(
//!         MapAuthority::new().with_schema("events", "{precision: day}"),
//!     ))
//!     .with_warning_callback(|message| eprintln!("warning: {}", message));
//! let system = builder.build();
//!
//! let schema = system.load_schema("events")?;
//! assert_eq!(schema.id(), "events");
//! # Ok(())
//! # }
//! ```
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

pub mod authority;
pub mod cache;
pub mod document;
pub mod error;
pub mod system;

pub use authority::{Authority, FileSystemAuthority, MapAuthority};
pub use cache::{InMemorySchemaCache, SchemaCache};
pub use document::{DocumentModel, TextDocumentModel};
pub use error::{Result, SystemError};
pub use system::{Schema, SchemaSystem, SchemaSystemBuilder, WarningCallback};

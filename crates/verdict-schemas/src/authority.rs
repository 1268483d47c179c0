//! Schema authorities
//!
//! An authority maps a schema identifier to its textual content. The
//! system consults its configured authorities in order and takes the
//! first success; `Ok(None)` means "not mine, try the next one" while
//! `Err` reports a resolver failure (the system skips it with a warning).
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SystemError};
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Resolves schema identifiers to schema text
pub trait Authority: fmt::Debug + Send + Sync {
    /// `Ok(Some(text))` on success, `Ok(None)` when this authority does
    /// not know the identifier, `Err` on a resolution failure
    fn resolve(&self, schema_id: &str) -> Result<Option<String>>;
}

/// An in-memory authority backed by an id-to-text map
#[derive(Debug, Clone, Default)]
pub struct MapAuthority {
    schemas: HashMap<String, String>,
}

impl MapAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema document under an identifier
    pub fn with_schema<I, T>(mut self, schema_id: I, text: T) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        self.schemas.insert(schema_id.into(), text.into());
        self
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Authority for MapAuthority {
    fn resolve(&self, schema_id: &str) -> Result<Option<String>> {
        Ok(self.schemas.get(schema_id).cloned())
    }
}

/// An authority that resolves identifiers as file paths under a base
/// directory.
///
/// Identifiers that would escape the base directory (absolute paths or
/// `..` components) are treated as not-found rather than read.
#[derive(Debug, Clone)]
pub struct FileSystemAuthority {
    base_dir: PathBuf,
}

impl FileSystemAuthority {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn is_confined(schema_id: &str) -> bool {
        Path::new(schema_id)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}

impl Authority for FileSystemAuthority {
    fn resolve(&self, schema_id: &str) -> Result<Option<String>> {
        if !Self::is_confined(schema_id) {
            return Ok(None);
        }
        let path = self.base_dir.join(schema_id);
        if !path.is_file() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| SystemError::io(path, source))
    }
}

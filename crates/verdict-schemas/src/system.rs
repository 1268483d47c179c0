//! Schema-system assembly
//!
//! A [`SchemaSystemBuilder`] stages collaborators - authorities, a
//! document model, a cache, a constraint factory, named parameters, and
//! an optional warning sink - and [`SchemaSystemBuilder::build`] freezes
//! them into an immutable [`SchemaSystem`]. Build copies the staged
//! state, so mutating the builder afterwards never affects systems it
//! already produced.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::authority::Authority;
use crate::cache::{InMemorySchemaCache, SchemaCache};
use crate::document::{DocumentModel, TextDocumentModel};
use crate::error::{Result, SystemError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use verdict_core::{Constraint, ConstraintFactory, CoreConstraintFactory, Element};

/// A resolved schema document.
///
/// Its elements are raw data-model values; interpreting them as type
/// definitions is outside this crate.
#[derive(Debug, Clone)]
pub struct Schema {
    id: String,
    elements: Vec<Element>,
}

impl Schema {
    pub fn new<I: Into<String>>(id: I, elements: Vec<Element>) -> Self {
        Self {
            id: id.into(),
            elements,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// The unified warning-sink representation: a consumer of a deferred
/// message producer. The producer runs only if a sink is installed.
pub type WarningCallback = Arc<dyn Fn(&dyn Fn() -> String) + Send + Sync>;

/// Staged, mutable configuration for a [`SchemaSystem`].
///
/// Every mutator returns `&mut Self` for chaining; `build` may be called
/// any number of times, and each call yields an independent system.
#[derive(Clone, Default)]
pub struct SchemaSystemBuilder {
    authorities: Vec<Arc<dyn Authority>>,
    document_model: Option<Arc<dyn DocumentModel>>,
    schema_cache: Option<Arc<dyn SchemaCache>>,
    constraint_factory: Option<Arc<dyn ConstraintFactory>>,
    params: HashMap<String, serde_json::Value>,
    allow_anonymous_top_level_types: bool,
    allow_transitive_imports: Option<bool>,
    warning_callback: Option<WarningCallback>,
}

impl SchemaSystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one authority; existing authorities are kept
    pub fn add_authority(&mut self, authority: Arc<dyn Authority>) -> &mut Self {
        self.authorities.push(authority);
        self
    }

    /// Replace all staged authorities with this one
    pub fn with_authority(&mut self, authority: Arc<dyn Authority>) -> &mut Self {
        self.authorities = vec![authority];
        self
    }

    /// Replace all staged authorities with this list
    pub fn with_authorities<I>(&mut self, authorities: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn Authority>>,
    {
        self.authorities = authorities.into_iter().collect();
        self
    }

    /// Override the document model (defaults to [`TextDocumentModel`])
    pub fn with_document_model(&mut self, model: Arc<dyn DocumentModel>) -> &mut Self {
        self.document_model = Some(model);
        self
    }

    /// Override the schema cache (defaults to [`InMemorySchemaCache`])
    pub fn with_schema_cache(&mut self, cache: Arc<dyn SchemaCache>) -> &mut Self {
        self.schema_cache = Some(cache);
        self
    }

    /// Override the constraint factory (defaults to
    /// [`CoreConstraintFactory`])
    pub fn with_constraint_factory(&mut self, factory: Arc<dyn ConstraintFactory>) -> &mut Self {
        self.constraint_factory = Some(factory);
        self
    }

    /// Set a named optional parameter
    pub fn with_param<K: Into<String>>(&mut self, key: K, value: serde_json::Value) -> &mut Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Permit anonymous top-level type definitions.
    ///
    /// Compatibility escape hatch for old schema documents; building a
    /// system with this set emits a warning through its sink.
    #[deprecated(note = "anonymous top-level types exist for compatibility only")]
    pub fn allow_anonymous_top_level_types(&mut self, allow: bool) -> &mut Self {
        self.allow_anonymous_top_level_types = allow;
        self
    }

    /// Control transitive-import handling (default: permissive)
    pub fn allow_transitive_imports(&mut self, allow: bool) -> &mut Self {
        self.allow_transitive_imports = Some(allow);
        self
    }

    /// Install a warning sink that receives the final message string
    pub fn with_warning_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.warning_callback = Some(Arc::new(move |produce: &dyn Fn() -> String| {
            callback(&produce())
        }));
        self
    }

    /// Install a warning sink that receives the message producer itself,
    /// deciding whether to evaluate it
    pub fn with_deferred_warning_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&dyn Fn() -> String) + Send + Sync + 'static,
    {
        self.warning_callback = Some(Arc::new(callback));
        self
    }

    /// Freeze the staged configuration into an immutable system.
    ///
    /// The staged state is copied; later builder mutations do not reach
    /// systems built earlier.
    pub fn build(&self) -> SchemaSystem {
        let system = SchemaSystem {
            authorities: self.authorities.clone(),
            document_model: self
                .document_model
                .clone()
                .unwrap_or_else(|| Arc::new(TextDocumentModel)),
            schema_cache: self
                .schema_cache
                .clone()
                .unwrap_or_else(|| Arc::new(InMemorySchemaCache::new())),
            constraint_factory: self
                .constraint_factory
                .clone()
                .unwrap_or_else(|| Arc::new(CoreConstraintFactory)),
            params: self.params.clone(),
            allow_anonymous_top_level_types: self.allow_anonymous_top_level_types,
            allow_transitive_imports: self.allow_transitive_imports.unwrap_or(true),
            warning_callback: self.warning_callback.clone(),
        };
        if system.allow_anonymous_top_level_types {
            system.warn(|| {
                "anonymous top-level types are deprecated and will be removed".to_string()
            });
        }
        system
    }
}

impl fmt::Debug for SchemaSystemBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSystemBuilder")
            .field("authorities", &self.authorities)
            .field("document_model", &self.document_model)
            .field("schema_cache", &self.schema_cache)
            .field("constraint_factory", &self.constraint_factory)
            .field("params", &self.params)
            .field(
                "allow_anonymous_top_level_types",
                &self.allow_anonymous_top_level_types,
            )
            .field("allow_transitive_imports", &self.allow_transitive_imports)
            .field("warning_callback", &self.warning_callback.is_some())
            .finish()
    }
}

/// An immutable, assembled schema system.
///
/// Safe to share across threads; the same obligation is passed through
/// to the externally supplied authorities and cache.
pub struct SchemaSystem {
    authorities: Vec<Arc<dyn Authority>>,
    document_model: Arc<dyn DocumentModel>,
    schema_cache: Arc<dyn SchemaCache>,
    constraint_factory: Arc<dyn ConstraintFactory>,
    params: HashMap<String, serde_json::Value>,
    allow_anonymous_top_level_types: bool,
    allow_transitive_imports: bool,
    warning_callback: Option<WarningCallback>,
}

impl SchemaSystem {
    /// Start configuring a new system
    pub fn builder() -> SchemaSystemBuilder {
        SchemaSystemBuilder::new()
    }

    /// Resolve a schema by identifier.
    ///
    /// Checks the cache first, then consults the authorities in order
    /// and takes the first success. An authority failure is skipped with
    /// a warning; only exhausting the list is an error. The resolved
    /// schema is cached before it is returned.
    pub fn load_schema(&self, schema_id: &str) -> Result<Arc<Schema>> {
        if let Some(schema) = self.schema_cache.get(schema_id) {
            log::debug!("schema cache hit for '{}'", schema_id);
            return Ok(schema);
        }
        log::debug!("schema cache miss for '{}'", schema_id);
        for authority in &self.authorities {
            match authority.resolve(schema_id) {
                Ok(Some(text)) => {
                    let elements = self
                        .document_model
                        .read_document(&text)
                        .map_err(SystemError::from)?;
                    let schema = Arc::new(Schema::new(schema_id, elements));
                    self.schema_cache.put(schema_id, Arc::clone(&schema));
                    return Ok(schema);
                }
                Ok(None) => continue,
                Err(error) => {
                    log::warn!(
                        "authority failed while resolving '{}': {}",
                        schema_id,
                        error
                    );
                    self.warn(|| {
                        format!("authority failed while resolving '{}': {}", schema_id, error)
                    });
                }
            }
        }
        Err(SystemError::unresolvable(schema_id, self.authorities.len()))
    }

    /// Build a constraint through the configured factory
    pub fn build_constraint(
        &self,
        field_name: &str,
        value: &Element,
    ) -> Result<Box<dyn Constraint>> {
        Ok(self.constraint_factory.constraint_for(field_name, value)?)
    }

    /// Deliver a warning through the installed sink.
    ///
    /// With no sink installed this is a no-op and `produce` never runs.
    pub fn warn<F: Fn() -> String>(&self, produce: F) {
        if let Some(callback) = &self.warning_callback {
            callback(&produce);
        }
    }

    pub fn authorities(&self) -> &[Arc<dyn Authority>] {
        &self.authorities
    }

    pub fn document_model(&self) -> &Arc<dyn DocumentModel> {
        &self.document_model
    }

    pub fn schema_cache(&self) -> &Arc<dyn SchemaCache> {
        &self.schema_cache
    }

    pub fn constraint_factory(&self) -> &Arc<dyn ConstraintFactory> {
        &self.constraint_factory
    }

    /// A named optional parameter, if set
    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.params.get(key)
    }

    pub fn params(&self) -> &HashMap<String, serde_json::Value> {
        &self.params
    }

    pub fn anonymous_top_level_types_allowed(&self) -> bool {
        self.allow_anonymous_top_level_types
    }

    pub fn transitive_imports_allowed(&self) -> bool {
        self.allow_transitive_imports
    }
}

impl fmt::Debug for SchemaSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSystem")
            .field("authorities", &self.authorities)
            .field("document_model", &self.document_model)
            .field("schema_cache", &self.schema_cache)
            .field("constraint_factory", &self.constraint_factory)
            .field("params", &self.params)
            .field(
                "allow_anonymous_top_level_types",
                &self.allow_anonymous_top_level_types,
            )
            .field("allow_transitive_imports", &self.allow_transitive_imports)
            .field("warning_callback", &self.warning_callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::MapAuthority;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_defaults() {
        let system = SchemaSystem::builder().build();
        assert!(system.authorities().is_empty());
        assert!(system.transitive_imports_allowed());
        assert!(!system.anonymous_top_level_types_allowed());
        assert!(system.params().is_empty());
    }

    #[test]
    fn test_authority_mutators() {
        let a: Arc<dyn Authority> = Arc::new(MapAuthority::new().with_schema("a", "1"));
        let b: Arc<dyn Authority> = Arc::new(MapAuthority::new().with_schema("b", "2"));
        let c: Arc<dyn Authority> = Arc::new(MapAuthority::new().with_schema("c", "3"));

        let mut builder = SchemaSystem::builder();
        builder.add_authority(Arc::clone(&a)).add_authority(Arc::clone(&b));
        assert_eq!(builder.build().authorities().len(), 2);

        builder.with_authority(Arc::clone(&c));
        assert_eq!(builder.build().authorities().len(), 1);

        builder.with_authorities([a, b, c]);
        assert_eq!(builder.build().authorities().len(), 3);
    }

    #[test]
    fn test_built_systems_are_independent_of_later_mutation() {
        let mut builder = SchemaSystem::builder();
        builder.add_authority(Arc::new(MapAuthority::new().with_schema("a", "1")));
        let first = builder.build();

        builder.add_authority(Arc::new(MapAuthority::new().with_schema("b", "2")));
        let second = builder.build();

        assert_eq!(first.authorities().len(), 1);
        assert_eq!(second.authorities().len(), 2);
    }

    #[test]
    fn test_warn_without_sink_never_runs_the_producer() {
        let system = SchemaSystem::builder().build();
        let evaluations = AtomicUsize::new(0);
        system.warn(|| {
            evaluations.fetch_add(1, Ordering::SeqCst);
            "never delivered".to_string()
        });
        assert_eq!(evaluations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_plain_and_deferred_sinks_are_equivalent() {
        let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&messages);
        let mut builder = SchemaSystem::builder();
        builder.with_warning_callback(move |message| {
            sink.lock().expect("lock should not poison").push(message.to_string());
        });
        builder.build().warn(|| "plain".to_string());

        let sink = Arc::clone(&messages);
        builder.with_deferred_warning_callback(move |produce| {
            sink.lock().expect("lock should not poison").push(produce());
        });
        builder.build().warn(|| "deferred".to_string());

        assert_eq!(
            *messages.lock().expect("lock should not poison"),
            ["plain", "deferred"]
        );
    }

    #[test]
    fn test_deprecated_flag_warns_at_build() {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        let mut builder = SchemaSystem::builder();
        builder.with_warning_callback(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        #[allow(deprecated)]
        builder.allow_anonymous_top_level_types(true);
        let system = builder.build();
        assert!(system.anonymous_top_level_types_allowed());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_params_are_frozen_per_build() {
        let mut builder = SchemaSystem::builder();
        builder.with_param("limit", serde_json::json!(10));
        let first = builder.build();
        builder.with_param("limit", serde_json::json!(20));
        assert_eq!(first.param("limit"), Some(&serde_json::json!(10)));
        assert_eq!(first.param("missing"), None);
    }
}

//! End-to-end schema-system tests
//!
//! Assembles systems from real collaborators and checks resolution
//! order, caching, warning delivery, and constraint construction through
//! the configured factory.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use verdict_core::violation::codes;
use verdict_core::Violations;
use verdict_schemas::{
    Authority, FileSystemAuthority, MapAuthority, Result, SchemaSystem, SystemError,
};

/// An authority that counts resolutions, for cache assertions
#[derive(Debug, Default)]
struct CountingAuthority {
    inner: MapAuthority,
    resolutions: AtomicUsize,
}

impl CountingAuthority {
    fn new(inner: MapAuthority) -> Self {
        Self {
            inner,
            resolutions: AtomicUsize::new(0),
        }
    }
}

impl Authority for CountingAuthority {
    fn resolve(&self, schema_id: &str) -> Result<Option<String>> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(schema_id)
    }
}

/// An authority that always fails, for skip-with-warning assertions
#[derive(Debug)]
struct BrokenAuthority;

impl Authority for BrokenAuthority {
    fn resolve(&self, _schema_id: &str) -> Result<Option<String>> {
        Err(SystemError::io(
            "broken",
            std::io::Error::new(std::io::ErrorKind::Other, "backend down"),
        ))
    }
}

#[test]
fn first_resolving_authority_wins() {
    let mut builder = SchemaSystem::builder();
    builder
        .add_authority(Arc::new(
            MapAuthority::new().with_schema("shared", "first::1"),
        ))
        .add_authority(Arc::new(
            MapAuthority::new()
                .with_schema("shared", "second::2")
                .with_schema("only_second", "day"),
        ));
    let system = builder.build();

    let schema = system.load_schema("shared").expect("schema should load");
    assert!(schema.elements()[0].has_annotation("first"));

    let schema = system
        .load_schema("only_second")
        .expect("schema should load");
    assert_eq!(schema.elements().len(), 1);
}

#[test]
fn unresolvable_schema_is_an_error() {
    let mut builder = SchemaSystem::builder();
    builder.add_authority(Arc::new(MapAuthority::new()));
    let err = builder
        .build()
        .load_schema("missing")
        .expect_err("missing schema must not load");
    assert!(matches!(
        err,
        SystemError::UnresolvableSchema {
            authorities_consulted: 1,
            ..
        }
    ));
}

#[test]
fn resolved_schemas_are_cached() {
    let authority = Arc::new(CountingAuthority::new(
        MapAuthority::new().with_schema("sample", "1 2 3"),
    ));
    let mut builder = SchemaSystem::builder();
    builder.add_authority(Arc::clone(&authority) as Arc<dyn Authority>);
    let system = builder.build();

    let first = system.load_schema("sample").expect("schema should load");
    let second = system.load_schema("sample").expect("schema should load");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(authority.resolutions.load(Ordering::SeqCst), 1);
}

#[test]
fn failing_authority_is_skipped_with_a_warning() {
    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);

    let mut builder = SchemaSystem::builder();
    builder
        .add_authority(Arc::new(BrokenAuthority))
        .add_authority(Arc::new(MapAuthority::new().with_schema("sample", "day")))
        .with_warning_callback(move |message| {
            sink.lock().expect("lock should not poison").push(message.to_string());
        });
    let system = builder.build();

    let schema = system.load_schema("sample").expect("schema should load");
    assert_eq!(schema.id(), "sample");

    let messages = messages.lock().expect("lock should not poison");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("backend down"));
}

#[test]
fn unreadable_documents_fail_loading() {
    let mut builder = SchemaSystem::builder();
    builder.add_authority(Arc::new(
        MapAuthority::new().with_schema("broken", "[1, 2"),
    ));
    let err = builder
        .build()
        .load_schema("broken")
        .expect_err("malformed documents must not load");
    assert!(matches!(err, SystemError::Core(_)));
}

#[test]
fn filesystem_authority_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir should create");
    let mut file =
        std::fs::File::create(dir.path().join("events.vdl")).expect("file should create");
    write!(file, "// events schema\n{{timestamp_precision: day}}").expect("file should write");

    let mut builder = SchemaSystem::builder();
    builder.add_authority(Arc::new(FileSystemAuthority::new(dir.path())));
    let system = builder.build();

    let schema = system.load_schema("events.vdl").expect("schema should load");
    assert_eq!(schema.elements().len(), 1);
}

#[test]
fn constraints_built_through_the_system_validate() {
    let mut builder = SchemaSystem::builder();
    builder.add_authority(Arc::new(
        MapAuthority::new().with_schema("events", "{timestamp_precision: day}"),
    ));
    let system = builder.build();

    let schema = system.load_schema("events").expect("schema should load");
    let fragment = match schema.elements()[0].value() {
        verdict_core::Value::Struct(fields) => fields
            .get("timestamp_precision")
            .expect("field should be present"),
        other => panic!("expected a struct, got {:?}", other),
    };
    let constraint = system
        .build_constraint("timestamp_precision", fragment)
        .expect("constraint should build");

    let candidate = verdict_core::value::reader::read_document("2020-01-01T10:00Z")
        .expect("candidate should read")
        .remove(0);
    let mut issues = Violations::new();
    constraint.validate(&candidate, &mut issues);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].code(), codes::INVALID_TIMESTAMP_PRECISION);
}

#[test]
fn unknown_constraint_names_surface_the_factory_signal() {
    let system = SchemaSystem::builder().build();
    let fragment = verdict_core::value::reader::read_document("day")
        .expect("fragment should read")
        .remove(0);
    let err = system
        .build_constraint("regex", &fragment)
        .expect_err("unknown names must not build");
    assert!(matches!(
        err,
        SystemError::Core(verdict_core::Error::UnrecognizedConstraint { .. })
    ));
}

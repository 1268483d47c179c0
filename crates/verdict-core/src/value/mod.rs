//! The structured-value data model
//!
//! Everything the engine validates is an [`Element`]: a [`Value`] plus its
//! ordered list of type annotations. Scalars cover booleans, integers,
//! exact decimals, floats, precision-carrying timestamps, text, and binary;
//! containers cover ordered lists, unordered bags, and structs whose field
//! names may repeat.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

pub mod decimal;
pub mod reader;
pub mod timestamp;

pub use decimal::Decimal;
pub use timestamp::{Precision, PrecisionClass, Timestamp, TimestampBuilder};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fmt;

/// Run-time domain-type tag of a [`Value`], used by constraint type guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Decimal,
    Float,
    Timestamp,
    String,
    Symbol,
    Blob,
    Clob,
    List,
    Bag,
    Struct,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Decimal => "decimal",
            ValueType::Float => "float",
            ValueType::Timestamp => "timestamp",
            ValueType::String => "string",
            ValueType::Symbol => "symbol",
            ValueType::Blob => "blob",
            ValueType::Clob => "clob",
            ValueType::List => "list",
            ValueType::Bag => "bag",
            ValueType::Struct => "struct",
        };
        write!(f, "{}", name)
    }
}

/// A single structured value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i128),
    Decimal(Decimal),
    Float(f64),
    Timestamp(Timestamp),
    String(String),
    Symbol(String),
    Blob(Vec<u8>),
    Clob(Vec<u8>),
    /// Ordered sequence
    List(Vec<Element>),
    /// Unordered collection; the stored order is incidental
    Bag(Vec<Element>),
    Struct(Struct),
}

impl Value {
    /// The run-time domain-type tag of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Decimal(_) => ValueType::Decimal,
            Value::Float(_) => ValueType::Float,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::String(_) => ValueType::String,
            Value::Symbol(_) => ValueType::Symbol,
            Value::Blob(_) => ValueType::Blob,
            Value::Clob(_) => ValueType::Clob,
            Value::List(_) => ValueType::List,
            Value::Bag(_) => ValueType::Bag,
            Value::Struct(_) => ValueType::Struct,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Float(x) => write!(f, "{:e}", x),
            Value::Timestamp(t) => write!(f, "{}", t),
            Value::String(s) => write_quoted(f, s),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Blob(bytes) => write!(f, "{{{{{}}}}}", BASE64.encode(bytes)),
            Value::Clob(bytes) => {
                write!(f, "{{{{")?;
                write_quoted(f, &String::from_utf8_lossy(bytes))?;
                write!(f, "}}}}")
            }
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Bag(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::Struct(fields) => write!(f, "{}", fields),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in text.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

/// A [`Value`] together with its ordered type annotations.
///
/// Annotations are opaque labels; the engine only ever asks whether a
/// specific annotation (such as `exclusive` on a range bound) is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    value: Value,
    annotations: Vec<String>,
}

impl Element {
    /// Wrap a value with no annotations
    pub fn new(value: Value) -> Self {
        Self {
            value,
            annotations: Vec::new(),
        }
    }

    /// Wrap a value with the given annotations, in order
    pub fn with_annotations<I, S>(value: Value, annotations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value,
            annotations: annotations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    /// True when the given annotation appears on this element
    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.iter().any(|a| a == annotation)
    }
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        Element::new(value)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            write!(f, "{}::", annotation)?;
        }
        write!(f, "{}", self.value)
    }
}

/// An ordered collection of named fields; names may repeat
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Struct {
    fields: Vec<(String, Element)>,
}

impl Struct {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; an existing field with the same name is kept
    pub fn push<N: Into<String>>(&mut self, name: N, element: Element) {
        self.fields.push((name.into(), element));
    }

    /// The first field with the given name
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, element)| element)
    }

    /// Every field with the given name, in order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.fields
            .iter()
            .filter(move |(field, _)| field == name)
            .map(|(_, element)| element)
    }

    pub fn fields(&self) -> &[(String, Element)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Element)> for Struct {
    fn from_iter<I: IntoIterator<Item = (String, Element)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, element)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, element)?;
        }
        write!(f, "}}")
    }
}

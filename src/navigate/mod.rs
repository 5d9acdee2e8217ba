// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Classification of raw values and lookups over the classified shapes.
//!
//! Every lookup result is passed through [`classify`] again, so lookups chain
//! uniformly regardless of the shape the previous step produced.

mod lazy;
mod mapping;
mod record;
mod sequence;

use core::fmt;
use std::iter;
use std::rc::Rc;

use log::trace;

use crate::error::{LookupError, LookupResult};
use crate::path::{Key, Step};
use crate::record::Record;
use crate::stream::Stream;
use crate::value::{Map, Value};

pub use lazy::LazySource;
pub use sequence::{Sequence, Shape};

/// A value wrapped according to its shape.
#[derive(Debug)]
pub enum Navigable {
    /// Value with no structure. Lookups on it fail.
    Scalar(Value),
    Mapping(Rc<Map>),
    Sequence(Sequence),
    Record(Rc<dyn Record>),
    /// One-shot source; lookups derive new sources.
    Lazy(LazySource),
}

/// Wrap a raw value in the navigable matching its shape.
///
/// Never fails. Classifying the value a navigable unwraps to yields a
/// navigable that behaves identically.
pub fn classify(value: impl Into<Value>) -> Navigable {
    match value.into() {
        Value::Stream(stream) => {
            trace!("classified stream as lazy source");
            Navigable::Lazy(LazySource::new(stream))
        }
        Value::Array(items) => Navigable::Sequence(Sequence::new(items)),
        Value::Object(map) => Navigable::Mapping(map),
        Value::Record(record) => Navigable::Record(record),
        scalar => Navigable::Scalar(scalar),
    }
}

impl From<Value> for Navigable {
    fn from(value: Value) -> Self {
        classify(value)
    }
}

impl Navigable {
    pub fn kind(&self) -> &'static str {
        match self {
            Navigable::Scalar(_) => "scalar",
            Navigable::Mapping(_) => "mapping",
            Navigable::Sequence(_) => "sequence",
            Navigable::Record(_) => "record",
            Navigable::Lazy(_) => "lazy source",
        }
    }

    /// Project a named key or field.
    ///
    /// Over sequences and lazy sources the lookup is broadcast to every
    /// element and elements lacking `name` are dropped. On a mapping or
    /// record the name must exist.
    pub fn by_attribute(self, name: &str) -> LookupResult<Navigable> {
        match self {
            Navigable::Scalar(value) => Err(not_navigable(&Step::from(name), &value)),
            Navigable::Mapping(map) => mapping::by_attribute(&map, name),
            Navigable::Sequence(seq) => Ok(seq.by_attribute(name)),
            Navigable::Record(record) => record::by_attribute(&*record, name),
            Navigable::Lazy(source) => Ok(Navigable::Lazy(source.by_attribute(name))),
        }
    }

    /// Project a position or a clamped sub-range.
    pub fn by_index_or_slice(self, key: impl Into<Key>) -> LookupResult<Navigable> {
        let key = key.into();
        match self {
            Navigable::Scalar(value) => Err(not_navigable(&Step::from(key), &value)),
            Navigable::Mapping(map) => mapping::by_index_or_slice(&map, key),
            Navigable::Sequence(seq) => seq.by_index_or_slice(key),
            Navigable::Record(record) => record::by_index_or_slice(&*record, key),
            Navigable::Lazy(source) => Ok(Navigable::Lazy(source.by_index_or_slice(key))),
        }
    }

    pub fn apply(self, step: &Step) -> LookupResult<Navigable> {
        match step {
            Step::Attribute(name) => self.by_attribute(name),
            Step::Index(index) => self.by_index_or_slice(*index),
            Step::Slice(slice) => self.by_index_or_slice(*slice),
        }
    }

    // Lookup on a single element of a lazy source. Absence yields `None`
    // instead of an error and scalars are returned bare.
    pub(crate) fn project(self, step: &Step) -> Option<Navigable> {
        match self {
            Navigable::Scalar(_) => None,
            Navigable::Mapping(map) => match step {
                Step::Attribute(name) => map.get(name.as_str()).cloned().map(classify),
                Step::Index(index) => mapping::entry_at(&map, *index).map(classify),
                Step::Slice(_) => None,
            },
            Navigable::Sequence(seq) => match step {
                Step::Attribute(name) => Some(seq.by_attribute(name)),
                // An empty element has nothing at any position.
                Step::Index(_) if seq.is_empty() => None,
                Step::Index(index) => seq.by_index_or_slice(Key::Index(*index)).ok(),
                Step::Slice(slice) => seq.by_index_or_slice(Key::Slice(*slice)).ok(),
            },
            Navigable::Record(record) => match step {
                Step::Attribute(name) => record.field(name).map(classify),
                Step::Index(index) => record::by_index_or_slice(&*record, Key::Index(*index)).ok(),
                Step::Slice(slice) => record::by_index_or_slice(&*record, Key::Slice(*slice)).ok(),
            },
            Navigable::Lazy(source) => Some(Navigable::Lazy(source.derive(step.clone()))),
        }
    }

    /// Lazily produce the plain values this navigable stands for.
    ///
    /// Sequences yield their elements, lazy sources yield one value per pulled
    /// element, every other shape yields itself once. Draining a navigable
    /// derived from an infinite source does not terminate.
    pub fn values(self) -> Values {
        match self {
            Navigable::Scalar(value) => Values::new(iter::once(value)),
            Navigable::Mapping(map) => Values::new(iter::once(Value::Object(map))),
            Navigable::Sequence(seq) => Values::new(seq.into_values()),
            Navigable::Record(record) => Values::new(iter::once(Value::Record(record))),
            Navigable::Lazy(source) => Values::new(source.map(Navigable::into_value)),
        }
    }

    /// Unwrap back into a raw value without pulling from lazy sources.
    pub fn into_value(self) -> Value {
        match self {
            Navigable::Scalar(value) => value,
            Navigable::Mapping(map) => Value::Object(map),
            Navigable::Sequence(seq) => seq.into_value(),
            Navigable::Record(record) => Value::Record(record),
            Navigable::Lazy(source) => Value::Stream(Stream::new(source.map(Navigable::into_value))),
        }
    }
}

fn not_navigable(step: &Step, value: &Value) -> LookupError {
    LookupError::NotNavigable {
        step: step.to_string(),
        value: serde_json::to_string(value).unwrap_or_else(|_| value.type_name().to_string()),
    }
}

/// Lazy iterator over the values produced by a chain of lookups.
pub struct Values {
    inner: Box<dyn Iterator<Item = Value>>,
}

impl Values {
    fn new(inner: impl Iterator<Item = Value> + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl Iterator for Values {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.inner.next()
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Values(..)")
    }
}

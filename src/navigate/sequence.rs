// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Broadcast lookups over finite sequences.
//!
//! A sequence's [`Shape`] is resolved once, when the sequence is classified,
//! and decides how lookups spread over its elements:
//!
//! | Shape | attribute | index | slice |
//! |-------|-----------|-------|-------|
//! | `Empty` | empty | empty | empty |
//! | `Scalars` | empty | positional | sub-range |
//! | `Mappings` | filter-then-project | positional | sub-range |
//! | `Records` | field of every record | broadcast | sub-range |
//! | `Sequences` | flattened one level per step | broadcast | sub-range |
//! | `Mixed` | filter-then-project | broadcast if led by a sequence or record, else positional | sub-range |
//!
//! Filter-then-project drops elements lacking the key or field instead of
//! failing. A broadcast index is applied to every element that supports
//! positional lookups and silently skips the rest.

use std::rc::Rc;

use log::trace;

use super::{classify, mapping, Navigable};
use crate::error::{LookupError, LookupResult};
use crate::path::{resolve_index, Key};
use crate::record::{is_record_of_records, same_shape};
use crate::value::Value;

/// Element layout of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Empty,
    Scalars,
    Mappings,
    /// Records sharing shape name and field set.
    Records,
    Sequences,
    Mixed,
}

impl Shape {
    pub fn of(items: &[Value]) -> Shape {
        let Some(first) = items.first() else {
            return Shape::Empty;
        };

        let shape = match first {
            Value::Object(_) => Shape::Mappings,
            Value::Array(_) => Shape::Sequences,
            Value::Record(_) => Shape::Records,
            Value::Stream(_) => return Shape::Mixed,
            _ => Shape::Scalars,
        };

        let uniform = items.iter().skip(1).all(|item| match (first, item) {
            (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_)) => true,
            (Value::Record(a), Value::Record(b)) => same_shape(&**a, &**b),
            _ => shape == Shape::Scalars && item.is_scalar(),
        });

        if uniform {
            shape
        } else {
            Shape::Mixed
        }
    }
}

/// Read-only view over a contiguous range of a shared element list.
#[derive(Debug, Clone)]
pub struct Sequence {
    items: Rc<Vec<Value>>,
    start: usize,
    end: usize,
    shape: Shape,
}

impl Sequence {
    pub(crate) fn new(items: Rc<Vec<Value>>) -> Self {
        let end = items.len();
        Self::view(items, 0, end)
    }

    fn view(items: Rc<Vec<Value>>, start: usize, end: usize) -> Self {
        let shape = Shape::of(items.get(start..end).unwrap_or_default());
        Self {
            items,
            start,
            end,
            shape,
        }
    }

    // Lookup results are fresh lists and are classified like any other value.
    fn collect(values: Vec<Value>) -> Navigable {
        classify(Value::from(values))
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_slice(&self) -> &[Value] {
        self.items.get(self.start..self.end).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.as_slice().iter()
    }

    pub fn by_attribute(&self, name: &str) -> Navigable {
        Self::collect(self.attribute_values(name))
    }

    fn attribute_values(&self, name: &str) -> Vec<Value> {
        trace!(
            "broadcast attribute `{name}` over {} elements ({:?})",
            self.len(),
            self.shape
        );
        match self.shape {
            Shape::Empty | Shape::Scalars => vec![],
            Shape::Mappings | Shape::Records | Shape::Mixed => {
                self.iter().filter_map(|item| member(item, name)).collect()
            }
            // One level only: nested sequences inside the inner ones are dropped.
            Shape::Sequences => self
                .iter()
                .flat_map(|item| match item {
                    Value::Array(inner) => inner.as_slice(),
                    _ => &[][..],
                })
                .filter_map(|item| member(item, name))
                .collect(),
        }
    }

    pub fn by_index_or_slice(&self, key: Key) -> LookupResult<Navigable> {
        match key {
            Key::Slice(slice) => {
                let (lo, hi) = slice.resolve(self.len());
                Ok(Navigable::Sequence(Self::view(
                    self.items.clone(),
                    self.start + lo,
                    self.start + hi,
                )))
            }
            Key::Index(index) => match self.shape {
                Shape::Empty => Ok(Self::collect(vec![])),
                _ if !self.broadcasts_index() => resolve_index(index, self.len())
                    .and_then(|i| self.as_slice().get(i))
                    .map(|item| classify(item.clone()))
                    .ok_or(LookupError::IndexOutOfRange {
                        index,
                        len: self.len(),
                    }),
                _ => {
                    trace!(
                        "broadcast index {index} over {} elements ({:?})",
                        self.len(),
                        self.shape
                    );
                    Ok(Self::collect(
                        self.iter()
                            .filter_map(|item| index_member(item, index))
                            .collect(),
                    ))
                }
            },
        }
    }

    // Indexes spread over the elements only when the list is led by something
    // indexable in its own right.
    fn broadcasts_index(&self) -> bool {
        match self.shape {
            Shape::Records | Shape::Sequences => true,
            Shape::Mixed => matches!(
                self.as_slice().first(),
                Some(Value::Array(_) | Value::Record(_))
            ),
            Shape::Empty | Shape::Scalars | Shape::Mappings => false,
        }
    }

    pub(crate) fn into_values(self) -> impl Iterator<Item = Value> + 'static {
        let items = self.items;
        (self.start..self.end).filter_map(move |i| items.get(i).cloned())
    }

    pub(crate) fn into_value(self) -> Value {
        if self.start == 0 && self.end == self.items.len() {
            Value::Array(self.items)
        } else {
            Value::from(self.as_slice().to_vec())
        }
    }
}

// Key of a mapping element or field of a record element.
fn member(item: &Value, name: &str) -> Option<Value> {
    match item {
        Value::Object(map) => map.get(name).cloned(),
        Value::Record(record) => record.field(name),
        _ => None,
    }
}

// Positional lookup on an element that supports it.
fn index_member(item: &Value, index: i64) -> Option<Value> {
    match item {
        Value::Array(inner) => resolve_index(index, inner.len()).and_then(|i| inner.get(i).cloned()),
        Value::Record(record) if is_record_of_records(&**record) => {
            let children = record.children()?;
            resolve_index(index, children.len()).and_then(|i| children.get(i).cloned())
        }
        Value::Object(map) => mapping::entry_at(map, index),
        _ => None,
    }
}

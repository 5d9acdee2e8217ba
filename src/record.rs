// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Opaque records: values exposing a fixed set of named fields.

use core::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::Value;

/// A structured value that is neither a mapping nor a sequence but exposes
/// named fields.
///
/// Implement this for domain types that should be navigable by field name.
/// Two records have the same shape when they report the same [`Record::shape`]
/// and the same field names; sequences of same-shaped records are projected
/// field-wise.
pub trait Record: fmt::Debug {
    /// Name of the record type.
    fn shape(&self) -> &str;

    /// Names of the fields, in declaration order.
    fn field_names(&self) -> Vec<&str>;

    /// Value of the named field, `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<Value>;

    /// Sub-records wrapped by a "record of records".
    ///
    /// Only records returning `Some` here support positional lookups.
    fn children(&self) -> Option<&[Value]> {
        None
    }
}

/// Whether two records share shape name and field set.
pub fn same_shape(a: &dyn Record, b: &dyn Record) -> bool {
    a.shape() == b.shape() && a.field_names() == b.field_names()
}

/// Whether the record wraps a non-empty list of same-shaped sub-records.
pub(crate) fn is_record_of_records(record: &dyn Record) -> bool {
    let Some(children) = record.children() else {
        return false;
    };
    let mut records = children.iter().map(|c| match c {
        Value::Record(r) => Some(r),
        _ => None,
    });
    match records.next() {
        Some(Some(first)) => records.all(|r| r.is_some_and(|r| same_shape(&**first, &**r))),
        _ => false,
    }
}

/// General purpose [`Record`] with named fields and optional sub-records.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    shape: Rc<str>,
    fields: IndexMap<Rc<str>, Value>,
    children: Option<Vec<Value>>,
}

impl FieldRecord {
    pub fn new(shape: &str) -> Self {
        Self {
            shape: shape.into(),
            fields: IndexMap::new(),
            children: None,
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Value>) -> Self {
        self.children = Some(children);
        self
    }
}

impl Record for FieldRecord {
    fn shape(&self) -> &str {
        &self.shape
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|k| k.as_ref()).collect()
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn children(&self) -> Option<&[Value]> {
        self.children.as_deref()
    }
}

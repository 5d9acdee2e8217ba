// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use log::debug;

use super::{classify, Navigable};
use crate::error::{LookupError, LookupResult};
use crate::path::{resolve_index, Key};
use crate::record::{is_record_of_records, Record};
use crate::value::Value;

pub(super) fn by_attribute(record: &dyn Record, name: &str) -> LookupResult<Navigable> {
    match record.field(name) {
        Some(value) => Ok(classify(value)),
        None => {
            debug!("record `{}` has no field `{name}`", record.shape());
            Err(LookupError::FieldNotFound {
                record: record.shape().to_string(),
                field: name.to_string(),
            })
        }
    }
}

/// Positional lookups address the sub-records of a record of records.
pub(super) fn by_index_or_slice(record: &dyn Record, key: Key) -> LookupResult<Navigable> {
    let children = match record.children() {
        Some(children) if is_record_of_records(record) => children,
        _ => {
            return Err(LookupError::NotIndexable {
                kind: "record",
                key: key.to_string(),
            })
        }
    };

    match key {
        Key::Index(index) => resolve_index(index, children.len())
            .and_then(|i| children.get(i))
            .map(|child| classify(child.clone()))
            .ok_or(LookupError::IndexOutOfRange {
                index,
                len: children.len(),
            }),
        Key::Slice(slice) => {
            let (lo, hi) = slice.resolve(children.len());
            let selected = children.get(lo..hi).unwrap_or_default().to_vec();
            Ok(classify(Value::from(selected)))
        }
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use log::debug;

use super::{classify, Navigable};
use crate::error::{LookupError, LookupResult};
use crate::path::Key;
use crate::value::{Map, Value};

/// Value under `name`. Scalars come back as single-element sequences so that
/// terminal values iterate like broadcast results.
pub(super) fn by_attribute(map: &Map, name: &str) -> LookupResult<Navigable> {
    match map.get(name) {
        Some(value) => Ok(terminal(value.clone())),
        None => {
            debug!("mapping has no key `{name}`");
            Err(LookupError::KeyNotFound {
                key: name.to_string(),
            })
        }
    }
}

/// Integer keys select the entry keyed by the integer's decimal text.
/// Mappings have no order to slice by.
pub(super) fn by_index_or_slice(map: &Map, key: Key) -> LookupResult<Navigable> {
    match key {
        Key::Index(index) => entry_at(map, index)
            .map(terminal)
            .ok_or_else(|| LookupError::KeyNotFound {
                key: index.to_string(),
            }),
        Key::Slice(_) => Err(LookupError::NotIndexable {
            kind: "mapping",
            key: key.to_string(),
        }),
    }
}

pub(super) fn entry_at(map: &Map, index: i64) -> Option<Value> {
    map.get(index.to_string().as_str()).cloned()
}

fn terminal(value: Value) -> Navigable {
    if value.is_scalar() {
        classify(Value::from(vec![value]))
    } else {
        classify(value)
    }
}

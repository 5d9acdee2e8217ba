// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Failure of a single lookup issued outside of any broadcast.
///
/// Broadcasts never produce these: elements that would fail are dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Attribute or index lookup on a bare scalar.
    #[error("cannot apply `{step}` to scalar value {value}")]
    NotNavigable { step: String, value: String },

    /// Mapping has no entry for the key.
    #[error("key `{key}` not found in mapping")]
    KeyNotFound { key: String },

    /// Record has no field with the name.
    #[error("record `{record}` has no field `{field}`")]
    FieldNotFound { record: String, field: String },

    /// Positional lookup on a shape that does not support it.
    #[error("{kind} is not indexable by `{key}`")]
    NotIndexable { kind: &'static str, key: String },

    /// Positional lookup past either end of a finite sequence.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: i64, len: usize },
}

pub type LookupResult<T> = core::result::Result<T, LookupError>;

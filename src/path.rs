// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Lookup steps and chains of them.

use core::fmt;
use core::ops::{Range, RangeFrom, RangeFull, RangeTo};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::LookupResult;
use crate::navigate::{classify, Values};
use crate::value::Value;

/// Half-open slice bounds. A missing bound means the start or the end.
///
/// Bounds are clamped to `[0, len)`: negative bounds count as zero and bounds
/// past the end as the end. Slicing never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

impl Slice {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// Clamped `(lo, hi)` bounds for a sequence of `len` elements, `lo <= hi`.
    pub fn resolve(&self, len: usize) -> (usize, usize) {
        let clamp = |bound: i64| usize::try_from(bound).unwrap_or(0).min(len);
        let lo = self.start.map_or(0, clamp);
        let hi = self.end.map_or(len, clamp);
        (lo, hi.max(lo))
    }
}

impl From<Range<i64>> for Slice {
    fn from(r: Range<i64>) -> Self {
        Slice::new(Some(r.start), Some(r.end))
    }
}

impl From<RangeFrom<i64>> for Slice {
    fn from(r: RangeFrom<i64>) -> Self {
        Slice::new(Some(r.start), None)
    }
}

impl From<RangeTo<i64>> for Slice {
    fn from(r: RangeTo<i64>) -> Self {
        Slice::new(None, Some(r.end))
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::default()
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_str(":")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        f.write_str("]")
    }
}

/// Position within a sequence; negative positions count from the end.
pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    } else {
        usize::try_from(index).ok().filter(|i| *i < len)
    }
}

/// Argument of a positional lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Index(i64),
    Slice(Slice),
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(i64::from(index))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<Slice> for Key {
    fn from(slice: Slice) -> Self {
        Key::Slice(slice)
    }
}

impl From<Range<i64>> for Key {
    fn from(r: Range<i64>) -> Self {
        Key::Slice(r.into())
    }
}

impl From<RangeFrom<i64>> for Key {
    fn from(r: RangeFrom<i64>) -> Self {
        Key::Slice(r.into())
    }
}

impl From<RangeTo<i64>> for Key {
    fn from(r: RangeTo<i64>) -> Self {
        Key::Slice(r.into())
    }
}

impl From<RangeFull> for Key {
    fn from(r: RangeFull) -> Self {
        Key::Slice(r.into())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "[{index}]"),
            Key::Slice(slice) => write!(f, "{slice}"),
        }
    }
}

/// One lookup in a chain.
///
/// Deserializes untagged: a string is an attribute, an integer an index and a
/// `{start, end}` map a slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Attribute(String),
    Index(i64),
    Slice(Slice),
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        Step::Attribute(name.to_string())
    }
}

impl From<Key> for Step {
    fn from(key: Key) -> Self {
        match key {
            Key::Index(index) => Step::Index(index),
            Key::Slice(slice) => Step::Slice(slice),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Attribute(name) => f.write_str(name),
            Step::Index(index) => write!(f, "[{index}]"),
            Step::Slice(slice) => write!(f, "{slice}"),
        }
    }
}

/// Ordered chain of lookup steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: &str) -> Self {
        self.steps.push(Step::from(name));
        self
    }

    pub fn index(mut self, index: i64) -> Self {
        self.steps.push(Step::Index(index));
        self
    }

    pub fn slice(mut self, slice: impl Into<Slice>) -> Self {
        self.steps.push(Step::Slice(slice.into()));
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn evaluate(&self, root: impl Into<Value>) -> LookupResult<Values> {
        debug!("evaluating path `{self}`");
        select(root, &self.steps)
    }
}

impl From<Vec<Step>> for Path {
    fn from(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}

impl FromIterator<Step> for Path {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            if idx > 0 && matches!(step, Step::Attribute(_)) {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Classify `root`, apply `steps` in order and return the resulting values.
///
/// Fails on the first lookup that fails outside a broadcast. Nothing is pulled
/// from lazy sources until the returned iterator is advanced.
pub fn select(root: impl Into<Value>, steps: &[Step]) -> LookupResult<Values> {
    let mut current = classify(root);
    for step in steps {
        current = current
            .apply(step)
            .inspect_err(|e| debug!("lookup `{step}` failed: {e}"))?;
    }
    Ok(current.values())
}

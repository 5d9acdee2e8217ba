// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

use super::{classify, Navigable};
use crate::path::{Key, Step};
use crate::stream::Stream;

/// Single-owner, pull-based source of navigables.
///
/// Lookups return a new source that applies the lookup to each element as it
/// is pulled. Nothing is read ahead: pulling `n` results touches the
/// underlying source only as far as needed to produce them. Elements for which
/// the lookup finds nothing are skipped; on an infinite source where no element
/// matches, pulling never returns.
pub struct LazySource {
    inner: Box<dyn Iterator<Item = Navigable>>,
}

impl LazySource {
    pub(crate) fn new(stream: Stream) -> Self {
        Self {
            inner: Box::new(stream.map(classify)),
        }
    }

    pub fn by_attribute(self, name: &str) -> LazySource {
        self.derive(Step::from(name))
    }

    pub fn by_index_or_slice(self, key: impl Into<Key>) -> LazySource {
        self.derive(Step::from(key.into()))
    }

    pub(crate) fn derive(self, step: Step) -> LazySource {
        let inner = self.inner;
        LazySource {
            inner: Box::new(inner.filter_map(move |element| element.project(&step))),
        }
    }
}

impl Iterator for LazySource {
    type Item = Navigable;

    fn next(&mut self) -> Option<Navigable> {
        self.inner.next()
    }
}

impl fmt::Debug for LazySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazySource(..)")
    }
}

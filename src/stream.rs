// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use crate::value::Value;

/// Handle to a one-shot, possibly infinite source of values.
///
/// Clones share a single cursor: pulling through any clone advances the
/// source for all of them. A stream cannot be rewound; re-traversal requires
/// obtaining a fresh source. At most one consumer should pull from a stream.
#[derive(Clone)]
pub struct Stream {
    source: Rc<RefCell<Box<dyn Iterator<Item = Value>>>>,
}

impl Stream {
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Self {
            source: Rc::new(RefCell::new(Box::new(source.into_iter()))),
        }
    }

    /// Pull the next value from the source.
    ///
    /// A pull issued while another pull on the same source is in progress
    /// observes exhaustion.
    pub fn pull(&self) -> Option<Value> {
        self.source.try_borrow_mut().ok()?.next()
    }

    /// Whether both handles share the same cursor.
    pub fn same_source(&self, other: &Stream) -> bool {
        Rc::ptr_eq(&self.source, &other.source)
    }
}

impl Iterator for Stream {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.pull()
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Stream(<one-shot>)")
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod error;
mod navigate;
mod number;
mod path;
mod record;
mod stream;
mod value;

pub use error::{LookupError, LookupResult};
pub use navigate::{classify, LazySource, Navigable, Sequence, Shape, Values};
pub use number::{Number, ParseNumberError};
pub use path::{select, Key, Path, Slice, Step};
pub use record::{same_shape, FieldRecord, Record};
pub use stream::Stream;
pub use value::{Map, Value};

//! Record flattening - turn nested records into named query parameters
//!
//! This module walks a record's visible fields, decides per field whether to
//! skip, rename, recurse or pass through, and composes prefixed names for
//! nested records.

pub mod flattener;
pub mod tag;
pub mod types;
mod visible;
pub mod writer;

pub use flattener::Flattener;
pub use tag::FieldTag;
pub use types::{named, FlattenConfig, NamedArg};
pub use writer::{ArgLayout, ArgWriter};

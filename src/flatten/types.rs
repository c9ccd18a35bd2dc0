use crate::naming::{self, NamingFn};
use crate::value::Value;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A named query parameter: one flattened field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedArg {
    pub name: String,
    pub value: Value,
}

impl NamedArg {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        NamedArg {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Re-emit this parameter under `prefix` + `separator`.
    pub(crate) fn prefixed(mut self, prefix: &str, separator: &str) -> Self {
        self.name = format!("{}{}{}", prefix, separator, self.name);
        self
    }
}

/// Shorthand for [`NamedArg::new`].
pub fn named(name: impl Into<String>, value: impl Into<Value>) -> NamedArg {
    NamedArg::new(name, value)
}

/// Configuration for the flattening process
#[derive(Clone)]
pub struct FlattenConfig {
    /// Separator between a parent name and a nested field name
    pub separator: String,

    /// Applied to every field identifier without an explicit name tag
    pub naming: NamingFn,

    /// Tag key holding per-field overrides, e.g. `db` for `#[tag(db = "...")]`
    pub tag_key: String,

    /// Maximum record nesting, counting embedded members
    pub max_depth: usize,

    /// Fail instead of returning two parameters with the same name
    pub reject_duplicates: bool,
}

impl FlattenConfig {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_naming<F>(mut self, naming: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.naming = Arc::new(naming);
        self
    }

    pub fn with_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = tag_key.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_reject_duplicates(mut self, reject: bool) -> Self {
        self.reject_duplicates = reject;
        self
    }
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            separator: String::from("_"),
            naming: naming::default_naming(),
            tag_key: String::from("db"),
            max_depth: 32,
            reject_duplicates: false,
        }
    }
}

impl fmt::Debug for FlattenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlattenConfig")
            .field("separator", &self.separator)
            .field("naming", &"<fn>")
            .field("tag_key", &self.tag_key)
            .field("max_depth", &self.max_depth)
            .field("reject_duplicates", &self.reject_duplicates)
            .finish()
    }
}

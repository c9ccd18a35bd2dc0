//! Error types for record flattening.

use thiserror::Error;

/// Errors returned by [`Flattener::from_struct`](crate::Flattener::from_struct).
///
/// Errors raised while flattening a nested field are returned unchanged to
/// the top-level caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// The value is neither a record nor a reference to one.
    #[error("expected a record or a reference to a record, got `{type_name}`")]
    InvalidInput { type_name: &'static str },

    /// A null reference to a record was found where its fields were needed.
    #[error("null reference to record type `{type_name}`")]
    NullRecord { type_name: &'static str },

    /// Records are nested deeper than the configured limit.
    #[error("record nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },

    /// Two fields flattened to the same parameter name.
    #[error("duplicate parameter name: '{name}'")]
    DuplicateName { name: String },
}

impl FlattenError {
    pub(crate) fn invalid_input(type_name: &'static str) -> Self {
        Self::InvalidInput { type_name }
    }

    pub(crate) fn null_record(type_name: &'static str) -> Self {
        Self::NullRecord { type_name }
    }
}

/// Result type alias for flattening operations.
pub type FlattenResult<T> = Result<T, FlattenError>;

//! Item collection error types

/// Errors raised when an item collection cannot be keyed.
///
/// The whole collection is rejected; no row is dropped or re-keyed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// An item has no value for the track field.
    #[error("Item at position {position} has no '{track_id}' field")]
    MissingKey { position: usize, track_id: String },

    /// Two items share the same key.
    #[error("Items at positions {first} and {second} share '{track_id}' value '{key}'")]
    DuplicateKey {
        track_id: String,
        key: String,
        first: usize,
        second: usize,
    },
}

impl DataError {
    /// Creates a new missing key error.
    pub fn missing_key(position: usize, track_id: impl Into<String>) -> Self {
        Self::MissingKey {
            position,
            track_id: track_id.into(),
        }
    }

    /// Returns the position of the offending item.
    pub fn position(&self) -> usize {
        match self {
            Self::MissingKey { position, .. } => *position,
            Self::DuplicateKey { second, .. } => *second,
        }
    }
}

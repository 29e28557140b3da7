//! Configuration error types

/// Errors detected while normalizing a table configuration.
///
/// These are raised before any row is rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The config does not name the item field used as row key.
    #[error("trackId must name an item field")]
    MissingTrackId,

    /// A column was declared without an id.
    #[error("Column at position {position} has an empty id")]
    EmptyColumnId { position: usize },

    /// Two columns share the same id.
    #[error("Duplicate column id '{id}'")]
    DuplicateColumn { id: String },

    /// More than one column asks to be the default sort column.
    #[error("Columns '{first}' and '{second}' both set sortDefault")]
    MultipleSortDefaults { first: String, second: String },

    /// A column references a filter name the registry does not know.
    #[error("Column '{column}' uses unknown filter '{filter}'")]
    UnknownFilter { column: String, filter: String },

    /// A preamble span lies outside the 12-unit grid.
    #[error("{field} must be between 1 and 12, got {value}")]
    InvalidSpan { field: &'static str, value: u8 },

    /// A template string could not be compiled.
    #[error("Invalid template: {message}")]
    Template { message: String },

    /// The config could not be parsed.
    #[error("Config parse error: {message}")]
    Parse { message: String },
}

impl ConfigError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(id: impl Into<String>) -> Self {
        Self::DuplicateColumn { id: id.into() }
    }

    /// Creates a new unknown filter error.
    pub fn unknown_filter(column: impl Into<String>, filter: impl Into<String>) -> Self {
        Self::UnknownFilter {
            column: column.into(),
            filter: filter.into(),
        }
    }

    /// Creates a new template error.
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

//! Table configuration.

use serde::Deserialize;

use super::{ColumnSpec, GRID_COLUMNS};
use crate::error::ConfigError;

/// The complete table configuration.
///
/// A config is replaced wholesale, never patched. Every field has a
/// default, so a config file only needs to list what differs:
///
/// | field | default |
/// |-------|---------|
/// | `selectAll` | `true` |
/// | `expand` | `true` |
/// | `trackId` | `"id"` |
/// | `columns` | empty |
/// | `searchColumnSpan` | none |
/// | `actionColumnSpan` | none |
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Show the select-all column and allow row selection.
    pub select_all: bool,

    /// Show the expander column and allow detail rows.
    pub expand: bool,

    /// Item field holding the row key.
    pub track_id: String,

    /// Data columns in display order.
    pub columns: Vec<ColumnSpec>,

    /// Grid columns taken by the search bar (1..=12).
    pub search_column_span: Option<u8>,

    /// Grid columns taken by the action bar (1..=12).
    pub action_column_span: Option<u8>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            select_all: true,
            expand: true,
            track_id: "id".to_string(),
            columns: Vec::new(),
            search_column_span: None,
            action_column_span: None,
        }
    }
}

impl TableConfig {
    /// Create a config with default settings and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable or disable the selection column.
    pub fn select_all(mut self, enabled: bool) -> Self {
        self.select_all = enabled;
        self
    }

    /// Enable or disable detail-row expansion.
    pub fn expand(mut self, enabled: bool) -> Self {
        self.expand = enabled;
        self
    }

    /// Set the item field used as row key.
    pub fn track_id(mut self, field: impl Into<String>) -> Self {
        self.track_id = field.into();
        self
    }

    /// Append a column.
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the search bar span.
    pub fn search_column_span(mut self, span: u8) -> Self {
        self.search_column_span = Some(span);
        self
    }

    /// Set the action bar span.
    pub fn action_column_span(mut self, span: u8) -> Self {
        self.action_column_span = Some(span);
        self
    }

    /// Check the table-level settings.
    ///
    /// Column checks happen during normalization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.track_id.trim().is_empty() {
            return Err(ConfigError::MissingTrackId);
        }
        check_span("searchColumnSpan", self.search_column_span)?;
        check_span("actionColumnSpan", self.action_column_span)?;
        Ok(())
    }
}

fn check_span(field: &'static str, span: Option<u8>) -> Result<(), ConfigError> {
    match span {
        Some(value) if value == 0 || value > GRID_COLUMNS => {
            Err(ConfigError::InvalidSpan { field, value })
        }
        _ => Ok(()),
    }
}

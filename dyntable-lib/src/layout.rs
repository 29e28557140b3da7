//! Preamble layout: how the search bar and the action bar share the grid.

use serde::Serialize;

use crate::config::{GRID_COLUMNS, TableConfig};

/// Grid spans of the preamble bars.
///
/// A span is `None` when its bar is not shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreambleLayout {
    pub search_span: Option<u8>,
    pub action_span: Option<u8>,
}

/// The region above the table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Preamble {
    /// No search facets and no batch actions: the region has no content.
    Empty,
    /// At least one bar is shown.
    Bars(PreambleLayout),
}

impl Preamble {
    /// Returns `true` for the empty variant.
    pub fn is_empty(&self) -> bool {
        matches!(self, Preamble::Empty)
    }

    /// Returns the layout when at least one bar is shown.
    pub fn layout(&self) -> Option<&PreambleLayout> {
        match self {
            Preamble::Empty => None,
            Preamble::Bars(layout) => Some(layout),
        }
    }
}

/// Computes the preamble spans.
///
/// - Each bar defaults to the full grid width.
/// - With both bars shown and only `searchColumnSpan` set, the action bar
///   fills the rest of the row. A search bar spanning the whole row leaves
///   nothing to fill, so the action bar then wraps at full width.
/// - Explicit spans are used as given, even if they do not add up to 12.
pub fn compute_spans(config: &TableConfig, has_search: bool, has_actions: bool) -> Preamble {
    if !has_search && !has_actions {
        return Preamble::Empty;
    }

    let search = config.search_column_span.unwrap_or(GRID_COLUMNS);
    let action = match (config.action_column_span, config.search_column_span) {
        (Some(span), _) => span,
        (None, Some(search)) if has_search && search < GRID_COLUMNS => GRID_COLUMNS - search,
        (None, _) => GRID_COLUMNS,
    };

    Preamble::Bars(PreambleLayout {
        search_span: has_search.then_some(search),
        action_span: has_actions.then_some(action),
    })
}

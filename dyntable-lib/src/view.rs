//! Render model: what the view layer paints.
//!
//! Everything here is derived and rebuilt on every render; none of it has
//! identity beyond the render pass that produced it.

use serde::Serialize;

use crate::action::ActionView;
use crate::layout::Preamble;
use crate::model::RowKey;

// ============================================================================
// HEADER
// ============================================================================

/// What a header cell controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HeaderKind {
    /// The select-all checkbox column.
    SelectAll,
    /// The detail-row expander column.
    Expander,
    /// A data column.
    #[serde(rename_all = "camelCase")]
    Data { column_id: String },
}

/// One cell of the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub kind: HeaderKind,
    pub title: String,
    /// Hidden cells still occupy their slot.
    pub visible: bool,
    /// `rsp-p<priority>` for data columns with a priority.
    pub priority_class: Option<String>,
    pub classes: Option<String>,
    /// Set on the column the table is sorted by.
    pub sort: Option<SortDirection>,
}

impl HeaderCell {
    /// Returns the data column id, if this is a data column.
    pub fn column_id(&self) -> Option<&str> {
        match &self.kind {
            HeaderKind::Data { column_id } => Some(column_id),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// The active sort column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

// ============================================================================
// CELLS
// ============================================================================

/// Display content of a data cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CellContent {
    /// Filtered value, stringified.
    Text(String),
    /// Template output.
    Markup(String),
    /// Fallback for a cell whose filters failed.
    Empty,
}

impl CellContent {
    /// The content as a string; `Empty` is the empty string.
    pub fn as_str(&self) -> &str {
        match self {
            CellContent::Text(s) | CellContent::Markup(s) => s,
            CellContent::Empty => "",
        }
    }

    /// Returns `true` for template output.
    pub fn is_markup(&self) -> bool {
        matches!(self, CellContent::Markup(_))
    }
}

impl std::fmt::Display for CellContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data cell of a primary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCell {
    pub column_id: String,
    pub priority_class: Option<String>,
    pub classes: Option<String>,
    pub content: CellContent,
}

/// One cell of a primary row, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RowCell {
    /// Row checkbox.
    Select { checked: bool, visible: bool },
    /// Detail-row toggle.
    Expander { expanded: bool, visible: bool },
    /// Data column value.
    Data(ResolvedCell),
}

impl RowCell {
    /// Returns the data cell, if this is one.
    pub fn as_data(&self) -> Option<&ResolvedCell> {
        match self {
            RowCell::Data(cell) => Some(cell),
            _ => None,
        }
    }
}

// ============================================================================
// ROWS
// ============================================================================

/// The primary row for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRow {
    pub key: RowKey,
    pub cells: Vec<RowCell>,
    pub is_selected: bool,
    pub is_expanded: bool,
}

impl RenderRow {
    /// Iterates over the data cells, skipping the control cells.
    pub fn data_cells(&self) -> impl Iterator<Item = &ResolvedCell> {
        self.cells.iter().filter_map(RowCell::as_data)
    }

    /// Looks up the data cell for a column.
    pub fn cell(&self, column_id: &str) -> Option<&ResolvedCell> {
        self.data_cells().find(|c| c.column_id == column_id)
    }
}

/// One label/value pair of a detail row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailField {
    pub column_id: String,
    pub title: String,
    pub content: CellContent,
}

/// Expanded detail for one item: every data column, hidden or not.
///
/// Painted as a single cell spanning `span` header columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    pub key: RowKey,
    pub span: usize,
    pub fields: Vec<DetailField>,
}

/// A row of the table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BodyRow {
    Primary(RenderRow),
    Detail(DetailRow),
}

impl BodyRow {
    /// Number of header columns this row covers.
    pub fn cell_count(&self) -> usize {
        match self {
            BodyRow::Primary(row) => row.cells.len(),
            BodyRow::Detail(detail) => detail.span,
        }
    }

    /// Key of the item this row belongs to.
    pub fn key(&self) -> &RowKey {
        match self {
            BodyRow::Primary(row) => &row.key,
            BodyRow::Detail(detail) => &detail.key,
        }
    }

    pub fn as_primary(&self) -> Option<&RenderRow> {
        match self {
            BodyRow::Primary(row) => Some(row),
            BodyRow::Detail(_) => None,
        }
    }

    pub fn as_detail(&self) -> Option<&DetailRow> {
        match self {
            BodyRow::Detail(detail) => Some(detail),
            BodyRow::Primary(_) => None,
        }
    }
}

// ============================================================================
// RENDER MODEL
// ============================================================================

/// The complete derived table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub header: Vec<HeaderCell>,
    pub body: Vec<BodyRow>,
    pub select_all_state: bool,
    pub sort: Option<SortState>,
    pub preamble: Preamble,
    pub actions: Vec<ActionView>,
}

impl RenderModel {
    /// Number of header cells, hidden ones included.
    pub fn header_cell_count(&self) -> usize {
        self.header.len()
    }

    /// Iterates over the primary rows.
    pub fn rows(&self) -> impl Iterator<Item = &RenderRow> {
        self.body.iter().filter_map(BodyRow::as_primary)
    }

    /// Iterates over the detail rows.
    pub fn detail_rows(&self) -> impl Iterator<Item = &DetailRow> {
        self.body.iter().filter_map(BodyRow::as_detail)
    }

    /// Returns `true` when there are no items; the view shows its empty state.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

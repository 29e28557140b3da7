//! Row model: body rows for an item collection.

use crate::cell;
use crate::columns::NormalizedColumns;
use crate::model::{Item, ItemSet, RowKey};
use crate::selection::{ExpansionState, SelectionState};
use crate::view::{BodyRow, CellContent, DetailField, DetailRow, RenderRow, ResolvedCell, RowCell};

/// Builds the table body.
///
/// One primary row per item, in collection order. When expansion is enabled
/// and an item is expanded, its detail row follows it immediately. Detail
/// rows list every data column, including the ones responsive priority
/// hides on narrow screens.
pub fn build_rows(
    items: &ItemSet,
    columns: &NormalizedColumns,
    expansion: &ExpansionState,
    selection: &SelectionState,
) -> Vec<BodyRow> {
    let mut body = Vec::with_capacity(items.len());

    for (key, item) in items.iter() {
        let is_expanded = columns.expansion_enabled() && expansion.is_expanded(key);
        let row = build_row(key, item, columns, selection.is_selected(key), is_expanded);

        let detail = is_expanded.then(|| build_detail(key, &row, columns));
        body.push(BodyRow::Primary(row));
        if let Some(detail) = detail {
            body.push(BodyRow::Detail(detail));
        }
    }

    body
}

/// Builds the primary row for one item.
pub fn build_row(
    key: &RowKey,
    item: &Item,
    columns: &NormalizedColumns,
    is_selected: bool,
    is_expanded: bool,
) -> RenderRow {
    let mut cells = Vec::with_capacity(columns.header_cell_count());
    cells.push(RowCell::Select {
        checked: is_selected,
        visible: columns.selection_enabled(),
    });
    cells.push(RowCell::Expander {
        expanded: is_expanded,
        visible: columns.expansion_enabled(),
    });
    cells.extend(columns.columns().iter().map(|column| {
        RowCell::Data(ResolvedCell {
            column_id: column.id().to_string(),
            priority_class: column.priority_class().map(str::to_string),
            classes: column.classes().map(str::to_string),
            content: cell::resolve(item, column),
        })
    }));

    RenderRow {
        key: key.clone(),
        cells,
        is_selected,
        is_expanded,
    }
}

fn build_detail(key: &RowKey, row: &RenderRow, columns: &NormalizedColumns) -> DetailRow {
    let fields = columns
        .columns()
        .iter()
        .map(|column| DetailField {
            column_id: column.id().to_string(),
            title: column.title().to_string(),
            content: row
                .cell(column.id())
                .map(|c| c.content.clone())
                .unwrap_or(CellContent::Empty),
        })
        .collect();

    DetailRow {
        key: key.clone(),
        span: columns.header_cell_count(),
        fields,
    }
}

//! Cell resolution: one item, one column, one piece of content.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::columns::Column;
use crate::error::{FilterError, extract_panic_message};
use crate::model::Item;
use crate::template::TemplateScope;
use crate::view::CellContent;

/// Resolves the content of `column` for `item`.
///
/// A template wins over filters: when the column has one, its output is
/// used as-is and the filters are not run. Otherwise the field value goes
/// through the column's filter pipeline and is stringified.
///
/// A failing filter or a panicking template only blanks this cell; the
/// failure is logged and [`CellContent::Empty`] is returned.
pub fn resolve(item: &Item, column: &Column) -> CellContent {
    match try_resolve(item, column) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Cell '{}' rendered empty: {}", column.id(), e);
            CellContent::Empty
        }
    }
}

/// Like [`resolve`], but reports filter and template failures.
pub fn try_resolve(item: &Item, column: &Column) -> Result<CellContent, FilterError> {
    if let Some(template) = column.template() {
        let scope = TemplateScope {
            item,
            column: column.spec(),
        };
        return catch_unwind(AssertUnwindSafe(|| template.render(&scope)))
            .map(CellContent::Markup)
            .map_err(|panic| FilterError::Panicked {
                filter: "template".to_string(),
                message: extract_panic_message(&panic),
            });
    }

    let value = column.pipeline().apply(item.value(column.id()))?;
    Ok(CellContent::Text(value.to_string()))
}

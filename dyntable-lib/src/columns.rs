//! Column model: turns a `TableConfig` into the header structure.
//!
//! Every table has the same leading slots: the selection column, then the
//! expander column. They are emitted even when switched off (hidden rather
//! than omitted), so the header always has `2 + data columns` cells and
//! every body row lines up with it.

use std::collections::HashSet;

use crate::config::{ColumnSpec, TableConfig};
use crate::error::ConfigError;
use crate::filter::{FilterPipeline, FilterRegistry};
use crate::template::Template;
use crate::view::{HeaderCell, HeaderKind, SortDirection, SortState};

/// Number of control columns ahead of the data columns.
pub const LEADING_COLUMNS: usize = 2;

/// A validated data column with its filters resolved.
#[derive(Debug, Clone)]
pub struct Column {
    spec: ColumnSpec,
    pipeline: FilterPipeline,
    priority_class: Option<String>,
}

impl Column {
    fn new(spec: ColumnSpec, registry: &FilterRegistry) -> Result<Self, ConfigError> {
        let pipeline = FilterPipeline::compile(&spec.id, &spec.filters, registry)?;
        let priority_class = spec.priority_class();
        Ok(Self {
            spec,
            pipeline,
            priority_class,
        })
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn title(&self) -> &str {
        &self.spec.title
    }

    pub fn spec(&self) -> &ColumnSpec {
        &self.spec
    }

    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }

    pub fn template(&self) -> Option<&Template> {
        self.spec.template.as_ref()
    }

    /// `rsp-p<priority>`, or None for always-visible columns.
    pub fn priority_class(&self) -> Option<&str> {
        self.priority_class.as_deref()
    }

    pub fn classes(&self) -> Option<&str> {
        self.spec.classes.as_deref()
    }
}

/// The normalized column layout of a table.
#[derive(Debug, Clone)]
pub struct NormalizedColumns {
    columns: Vec<Column>,
    select_all: bool,
    expand: bool,
    sort: Option<SortState>,
}

impl NormalizedColumns {
    /// Data columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a data column by id.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id() == id)
    }

    /// Header cells including the hidden ones. Always `2 + data columns`.
    pub fn header_cell_count(&self) -> usize {
        LEADING_COLUMNS + self.columns.len()
    }

    pub fn selection_enabled(&self) -> bool {
        self.select_all
    }

    pub fn expansion_enabled(&self) -> bool {
        self.expand
    }

    /// The active sort column.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Marks `column_id` as the sort column.
    ///
    /// Sorting the same column again flips the direction. Returns false for
    /// unknown columns.
    pub fn sort_by(&mut self, column_id: &str) -> bool {
        if self.column(column_id).is_none() {
            return false;
        }
        let direction = match &self.sort {
            Some(current) if current.column_id == column_id => match current.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            },
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortState {
            column_id: column_id.to_string(),
            direction,
        });
        true
    }

    /// Builds the header row.
    pub fn header(&self) -> Vec<HeaderCell> {
        let mut header = Vec::with_capacity(self.header_cell_count());
        header.push(HeaderCell {
            kind: HeaderKind::SelectAll,
            title: String::new(),
            visible: self.select_all,
            priority_class: None,
            classes: None,
            sort: None,
        });
        header.push(HeaderCell {
            kind: HeaderKind::Expander,
            title: String::new(),
            visible: self.expand,
            priority_class: None,
            classes: None,
            sort: None,
        });
        header.extend(self.columns.iter().map(|column| HeaderCell {
            kind: HeaderKind::Data {
                column_id: column.id().to_string(),
            },
            title: column.title().to_string(),
            visible: true,
            priority_class: column.priority_class.clone(),
            classes: column.spec.classes.clone(),
            sort: self
                .sort
                .as_ref()
                .filter(|s| s.column_id == column.id())
                .map(|s| s.direction),
        }));
        header
    }
}

/// Validates `config` and resolves every column's filters.
///
/// Fails on the first problem found: a missing track field, an empty or
/// duplicate column id, a second `sortDefault` column, an unknown filter
/// name, or a preamble span outside the grid.
pub fn normalize(
    config: &TableConfig,
    registry: &FilterRegistry,
) -> Result<NormalizedColumns, ConfigError> {
    config.validate()?;

    let mut seen = HashSet::with_capacity(config.columns.len());
    let mut sort_column: Option<&str> = None;
    let mut columns = Vec::with_capacity(config.columns.len());

    for (position, spec) in config.columns.iter().enumerate() {
        if spec.id.is_empty() {
            return Err(ConfigError::EmptyColumnId { position });
        }
        if !seen.insert(spec.id.as_str()) {
            return Err(ConfigError::duplicate_column(&spec.id));
        }
        if spec.sort_default {
            if let Some(first) = sort_column {
                return Err(ConfigError::MultipleSortDefaults {
                    first: first.to_string(),
                    second: spec.id.clone(),
                });
            }
            sort_column = Some(spec.id.as_str());
        }
        columns.push(Column::new(spec.clone(), registry)?);
    }

    log::debug!(
        "Normalized {} columns (selectAll: {}, expand: {}, sort: {:?})",
        columns.len(),
        config.select_all,
        config.expand,
        sort_column
    );

    Ok(NormalizedColumns {
        columns,
        select_all: config.select_all,
        expand: config.expand,
        sort: sort_column.map(|id| SortState {
            column_id: id.to_string(),
            direction: SortDirection::Ascending,
        }),
    })
}

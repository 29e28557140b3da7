//! Column configuration types.

use serde::Deserialize;

use crate::filter::Filter;
use crate::template::{Template, TemplateScope};

/// Declarative description of one data column.
///
/// Columns define what a table shows: the item field they read, the header
/// title, responsive priority, and how the raw value becomes cell content.
///
/// # Examples
///
/// ```
/// use dyntable_lib::config::ColumnSpec;
///
/// let columns = vec![
///     ColumnSpec::new("animal", "Animal").priority(1),
///     ColumnSpec::new("type", "Type").priority(2),
///     ColumnSpec::new("domestic", "Domestic").filter("yesno"),
///     ColumnSpec::new("diet", "Diet").priority(1).sort_default(),
/// ];
/// # let _ = columns;
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Item field this column reads. Unique within a config.
    pub id: String,

    /// Header text, also the label in detail rows.
    #[serde(default)]
    pub title: String,

    /// Responsive priority tier (None = always visible).
    #[serde(default)]
    pub priority: Option<u32>,

    /// Whether the table starts sorted by this column.
    #[serde(default)]
    pub sort_default: bool,

    /// Extra CSS classes for the header and body cells.
    #[serde(default)]
    pub classes: Option<String>,

    /// Custom renderer; wins over `filters` when set.
    #[serde(default)]
    pub template: Option<Template>,

    /// Transforms applied to the raw value, left to right.
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl ColumnSpec {
    /// Create a column reading field `id` with header `title`.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority: None,
            sort_default: false,
            classes: None,
            template: None,
            filters: Vec::new(),
        }
    }

    /// Set the responsive priority.
    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Make this the default sort column.
    pub fn sort_default(mut self) -> Self {
        self.sort_default = true;
        self
    }

    /// Set extra CSS classes.
    pub fn classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
        self
    }

    /// Set the cell template.
    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Render cells with a function instead of the filtered value.
    pub fn render<F>(self, f: F) -> Self
    where
        F: Fn(&TemplateScope<'_>) -> String + Send + Sync + 'static,
    {
        self.template(Template::new(f))
    }

    /// Append a filter.
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Responsive class for this column (`rsp-p<priority>`), if any.
    pub fn priority_class(&self) -> Option<String> {
        self.priority.map(|p| format!("rsp-p{}", p))
    }
}

//! Column templates.
//!
//! A template replaces a column's filtered value with custom markup. It is a
//! typed render function; [`Template::parse`] compiles the interpolation
//! strings found in config files (`<b>{$ item.name $}</b>`) into one.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Deserializer;

use crate::config::ColumnSpec;
use crate::error::ConfigError;
use crate::model::{Item, Value};

const OPEN: &str = "{$";
const CLOSE: &str = "$}";

/// What a template can see while rendering one cell.
#[derive(Debug, Clone, Copy)]
pub struct TemplateScope<'a> {
    /// The row item.
    pub item: &'a Item,
    /// The column being rendered.
    pub column: &'a ColumnSpec,
}

/// Render function behind a [`Template`].
pub type RenderFn = Arc<dyn Fn(&TemplateScope<'_>) -> String + Send + Sync>;

/// A custom cell renderer.
#[derive(Clone)]
pub struct Template {
    render: RenderFn,
    source: Option<String>,
}

impl Template {
    /// Creates a template from a render function.
    ///
    /// # Example
    ///
    /// ```
    /// use dyntable_lib::template::Template;
    ///
    /// let bolt = Template::new(|scope| {
    ///     format!("<span class=\"fa fa-bolt\">{}</span>", scope.item.value("type"))
    /// });
    /// # let _ = bolt;
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&TemplateScope<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(f),
            source: None,
        }
    }

    /// Compiles an interpolation string.
    ///
    /// Placeholders are written `{$ path $}` where `path` is `item.<field>`
    /// (nested map fields separated by dots), `column.id` or `column.title`.
    /// Interpolated values are HTML-escaped; the surrounding text is kept
    /// verbatim.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let segments = Arc::new(parse_segments(source)?);
        let mut template = Self::new(move |scope| render_segments(&segments, scope));
        template.source = Some(source.to_string());
        Ok(template)
    }

    /// Renders the template for one cell.
    pub fn render(&self, scope: &TemplateScope<'_>) -> String {
        (self.render)(scope)
    }

    /// The interpolation string this template was compiled from, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => f.debug_tuple("Template").field(source).finish(),
            None => f.write_str("Template(<fn>)"),
        }
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Template::parse(&source).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Interpolation
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    ItemField(Vec<String>),
    ColumnId,
    ColumnTitle,
}

fn parse_segments(source: &str) -> Result<Vec<Segment>, ConfigError> {
    let mut segments = Vec::new();
    let mut rest = source;

    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            segments.push(Segment::Text(rest[..start].to_string()));
        }
        let after_open = &rest[start + OPEN.len()..];
        let end = after_open
            .find(CLOSE)
            .ok_or_else(|| ConfigError::template(format!("unclosed '{}' in '{}'", OPEN, source)))?;
        segments.push(parse_path(after_open[..end].trim())?);
        rest = &after_open[end + CLOSE.len()..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }
    Ok(segments)
}

fn parse_path(path: &str) -> Result<Segment, ConfigError> {
    let mut parts = path.split('.').map(str::trim);
    match (parts.next(), parts.clone().next()) {
        (Some("item"), Some(field)) if !field.is_empty() => {
            let fields: Vec<String> = parts.map(str::to_string).collect();
            if fields.iter().any(String::is_empty) {
                return Err(ConfigError::template(format!("empty field in '{}'", path)));
            }
            Ok(Segment::ItemField(fields))
        }
        (Some("column"), Some("id")) if path.split('.').count() == 2 => Ok(Segment::ColumnId),
        (Some("column"), Some("title")) if path.split('.').count() == 2 => {
            Ok(Segment::ColumnTitle)
        }
        _ => Err(ConfigError::template(format!(
            "unsupported expression '{}'",
            path
        ))),
    }
}

fn lookup<'a>(item: &'a Item, path: &[String]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter().try_fold(item.get(first)?, |value, key| match value {
        Value::Map(map) => map.get(key),
        _ => None,
    })
}

fn render_segments(segments: &[Segment], scope: &TemplateScope<'_>) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::ItemField(path) => {
                if let Some(value) = lookup(scope.item, path) {
                    escape_into(&mut out, &value.to_string());
                }
            }
            Segment::ColumnId => escape_into(&mut out, &scope.column.id),
            Segment::ColumnTitle => escape_into(&mut out, &scope.column.title),
        }
    }
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column() -> ColumnSpec {
        ColumnSpec::new("type", "Type")
    }

    #[test]
    fn test_parse_segments() {
        let segments = parse_segments("<b>{$ item.type $}</b>").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Text("<b>".to_string()),
                Segment::ItemField(vec!["type".to_string()]),
                Segment::Text("</b>".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_interpolates_item_fields() {
        let template = Template::parse(r#"<span class="fa fa-bolt">{$ item.type $}</span>"#).unwrap();
        let item = Item::new().set("type", "bird");
        let column = column();
        let html = template.render(&TemplateScope {
            item: &item,
            column: &column,
        });
        assert_eq!(html, r#"<span class="fa fa-bolt">bird</span>"#);
    }

    #[test]
    fn test_render_nested_and_column_fields() {
        let template = Template::parse("{$column.title$}: {$ item.owner.name $}").unwrap();
        let item = Item::from(serde_json::json!({"owner": {"name": "Ann"}}));
        let column = column();
        let text = template.render(&TemplateScope {
            item: &item,
            column: &column,
        });
        assert_eq!(text, "Type: Ann");
    }

    #[test]
    fn test_render_escapes_values() {
        let template = Template::parse("{$ item.name $}").unwrap();
        let item = Item::new().set("name", "<script>");
        let column = column();
        let text = template.render(&TemplateScope {
            item: &item,
            column: &column,
        });
        assert_eq!(text, "&lt;script&gt;");
    }

    #[test]
    fn test_missing_field_renders_empty() {
        let template = Template::parse("[{$ item.nope $}]").unwrap();
        let item = Item::new();
        let column = column();
        let text = template.render(&TemplateScope {
            item: &item,
            column: &column,
        });
        assert_eq!(text, "[]");
    }

    #[test]
    fn test_parse_errors() {
        assert!(Template::parse("{$ item.type").is_err());
        assert!(Template::parse("{$ scope.type $}").is_err());
        assert!(Template::parse("{$ item. $}").is_err());
        assert!(Template::parse("{$ column.width $}").is_err());
    }
}

//! The `render` command: load a table definition and items, print the model.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use dyntable_lib::TableController;
use dyntable_lib::config::TableConfig;
use dyntable_lib::filter::FilterRegistry;
use dyntable_lib::model::Item;
use dyntable_lib::view::{BodyRow, HeaderKind, RenderModel, RowCell};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The render model as pretty-printed JSON
    #[default]
    Json,
    /// A plain-text table
    Text,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Table definition (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Items to render (JSON array of objects)
    #[arg(short, long, value_name = "FILE")]
    pub items: PathBuf,

    /// Expand every row before rendering
    #[arg(long)]
    pub expand_all: bool,

    /// Select every row before rendering
    #[arg(long)]
    pub select_all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Runs the command and returns the text to print.
pub fn run(args: &RenderArgs) -> Result<String, CliError> {
    let config = load_config(&args.config)?;
    let items = load_items(&args.items)?;
    log::info!(
        "Rendering {} items with {} columns",
        items.len(),
        config.columns.len()
    );

    let mut table = TableController::new(config, FilterRegistry::with_builtins())
        .map_err(dyntable_lib::Error::from)?;
    table
        .set_items(items)
        .map_err(dyntable_lib::Error::from)?;

    if args.expand_all {
        table.expand_all();
    }
    if args.select_all && !table.select_all_state() {
        table.toggle_select_all();
    }

    let model = table.render();
    match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&model).map_err(CliError::Encode),
        OutputFormat::Text => Ok(format_text(&model)),
    }
}

fn load_config(path: &Path) -> Result<TableConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    let config = TableConfig::from_json(&text).map_err(dyntable_lib::Error::from)?;
    log::debug!("Loaded table definition from {}", path.display());
    Ok(config)
}

fn load_items(path: &Path) -> Result<Vec<Item>, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    serde_json::from_str(&text).map_err(|source| CliError::Items {
        path: path.to_path_buf(),
        source,
    })
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Formats the model as one line per row, visible cells only.
///
/// Detail rows are printed as indented `title: value` lines under their row.
pub fn format_text(model: &RenderModel) -> String {
    let mut out = String::new();

    let header: Vec<&str> = model
        .header
        .iter()
        .filter(|cell| cell.visible)
        .map(|cell| match cell.column_id() {
            Some(_) => cell.title.as_str(),
            None if cell.kind == HeaderKind::SelectAll => {
                checkbox(model.select_all_state)
            }
            None => "",
        })
        .collect();
    let _ = writeln!(out, "{}", header.join(" | "));

    for row in &model.body {
        match row {
            BodyRow::Primary(row) => {
                let cells: Vec<&str> = row
                    .cells
                    .iter()
                    .filter_map(|cell| match cell {
                        RowCell::Select { checked, visible } => {
                            visible.then_some(checkbox(*checked))
                        }
                        RowCell::Expander { expanded, visible } => {
                            visible.then_some(if *expanded { "-" } else { "+" })
                        }
                        RowCell::Data(cell) => Some(cell.content.as_str()),
                    })
                    .collect();
                let _ = writeln!(out, "{}", cells.join(" | "));
            }
            BodyRow::Detail(detail) => {
                for field in &detail.fields {
                    let _ = writeln!(out, "    {}: {}", field.title, field.content);
                }
            }
        }
    }

    if model.is_empty() {
        let _ = writeln!(out, "(no items)");
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const CONFIG: &str = r#"{
        "trackId": "id",
        "columns": [
            {"id": "animal", "title": "Animal", "priority": 1},
            {"id": "type", "title": "Type", "priority": 2},
            {"id": "domestic", "title": "Domestic", "filters": ["yesno"]}
        ]
    }"#;

    const ITEMS: &str = r#"[
        {"id": "1", "animal": "cat", "type": "mammal", "domestic": true},
        {"id": "2", "animal": "snake", "type": "reptile", "domestic": false}
    ]"#;

    fn file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn args(config: &NamedTempFile, items: &NamedTempFile, format: OutputFormat) -> RenderArgs {
        RenderArgs {
            config: config.path().to_path_buf(),
            items: items.path().to_path_buf(),
            expand_all: false,
            select_all: false,
            format,
        }
    }

    #[test]
    fn test_render_json() {
        let config = file(CONFIG);
        let items = file(ITEMS);
        let output = run(&args(&config, &items, OutputFormat::Json)).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["header"].as_array().unwrap().len(), 5);
        assert_eq!(json["body"].as_array().unwrap().len(), 2);
        assert_eq!(json["selectAllState"], false);
        assert_eq!(json["preamble"]["type"], "empty");
    }

    #[test]
    fn test_render_text() {
        let config = file(CONFIG);
        let items = file(ITEMS);
        let output = run(&args(&config, &items, OutputFormat::Text)).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "[ ] |  | Animal | Type | Domestic");
        assert_eq!(lines[1], "[ ] | + | cat | mammal | Yes");
        assert_eq!(lines[2], "[ ] | + | snake | reptile | No");
    }

    #[test]
    fn test_render_text_expanded_and_selected() {
        let config = file(CONFIG);
        let items = file(ITEMS);
        let mut args = args(&config, &items, OutputFormat::Text);
        args.expand_all = true;
        args.select_all = true;
        let output = run(&args).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "[x] |  | Animal | Type | Domestic");
        assert_eq!(lines[1], "[x] | - | cat | mammal | Yes");
        assert_eq!(lines[2], "    Animal: cat");
        assert_eq!(lines[3], "    Type: mammal");
        assert_eq!(lines[4], "    Domestic: Yes");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_render_empty_items() {
        let config = file(CONFIG);
        let items = file("[]");
        let output = run(&args(&config, &items, OutputFormat::Text)).unwrap();
        assert!(output.ends_with("(no items)\n"));
    }

    #[test]
    fn test_missing_file() {
        let items = file(ITEMS);
        let args = RenderArgs {
            config: PathBuf::from("/nonexistent/table.json"),
            items: items.path().to_path_buf(),
            expand_all: false,
            select_all: false,
            format: OutputFormat::Json,
        };
        assert!(matches!(run(&args), Err(CliError::Read { .. })));
    }

    #[test]
    fn test_invalid_items() {
        let config = file(CONFIG);
        let items = file("{\"not\": \"a list\"}");
        let err = run(&args(&config, &items, OutputFormat::Json)).unwrap_err();
        assert!(matches!(err, CliError::Items { .. }));
    }

    #[test]
    fn test_duplicate_keys_fail() {
        let config = file(CONFIG);
        let items = file(r#"[{"id": "1"}, {"id": "1"}]"#);
        let err = run(&args(&config, &items, OutputFormat::Json)).unwrap_err();
        assert!(matches!(err, CliError::Table(dyntable_lib::Error::Data(_))));
    }

    #[test]
    fn test_unknown_filter_fails() {
        let config = file(r#"{"columns": [{"id": "a", "filters": ["nope"]}]}"#);
        let items = file(ITEMS);
        let err = run(&args(&config, &items, OutputFormat::Json)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Column 'a' uses unknown filter 'nope'"
        );
    }
}

use dyntable_lib::TableController;
use dyntable_lib::config::{ColumnSpec, TableConfig};
use dyntable_lib::filter::FilterRegistry;
use dyntable_lib::model::{Item, RowKey};
use dyntable_lib::view::{BodyRow, CellContent, HeaderKind, RowCell, SortDirection};
use serde_json::json;

fn animal_config() -> TableConfig {
    TableConfig::new()
        .select_all(true)
        .expand(true)
        .track_id("id")
        .column(ColumnSpec::new("animal", "Animal").priority(1))
        .column(ColumnSpec::new("type", "Type").priority(2))
        .column(ColumnSpec::new("diet", "Diet").priority(1).sort_default())
}

fn animals() -> Vec<Item> {
    vec![
        Item::from(json!({"id": "1", "animal": "cat", "type": "mammal", "diet": "fish", "domestic": true})),
        Item::from(json!({"id": "2", "animal": "snake", "type": "reptile", "diet": "mice", "domestic": false})),
        Item::from(json!({"id": "3", "animal": "sparrow", "type": "bird", "diet": "worms", "domestic": false})),
    ]
}

fn table(config: TableConfig) -> TableController {
    let mut table = TableController::new(config, FilterRegistry::with_builtins()).unwrap();
    table.set_items(animals()).unwrap();
    table
}

// =============================================================================
// Header
// =============================================================================

#[test]
fn test_header_cell_count() {
    let model = table(animal_config()).render();
    assert_eq!(model.header_cell_count(), 5);
}

#[test]
fn test_header_count_ignores_toggles() {
    for (select_all, expand) in [(true, true), (true, false), (false, true), (false, false)] {
        let config = animal_config().select_all(select_all).expand(expand);
        let model = table(config).render();
        assert_eq!(model.header_cell_count(), 2 + 3, "selectAll={select_all} expand={expand}");
    }
}

#[test]
fn test_select_all_column_visible() {
    let model = table(animal_config()).render();
    assert_eq!(model.header[0].kind, HeaderKind::SelectAll);
    assert!(model.header[0].visible);
}

#[test]
fn test_select_all_column_hidden_when_disabled() {
    let model = table(animal_config().select_all(false)).render();
    assert_eq!(model.header[0].kind, HeaderKind::SelectAll);
    assert!(!model.header[0].visible);
}

#[test]
fn test_expander_column() {
    let model = table(animal_config()).render();
    assert_eq!(model.header[1].kind, HeaderKind::Expander);
    assert!(model.header[1].visible);

    let model = table(animal_config().expand(false)).render();
    assert_eq!(model.header[1].kind, HeaderKind::Expander);
    assert!(!model.header[1].visible);
}

#[test]
fn test_header_priority_classes() {
    let model = table(animal_config()).render();
    let classes: Vec<Option<&str>> = model.header[2..]
        .iter()
        .map(|h| h.priority_class.as_deref())
        .collect();
    assert_eq!(classes, vec![Some("rsp-p1"), Some("rsp-p2"), Some("rsp-p1")]);
}

#[test]
fn test_column_without_priority_has_no_class() {
    let config = animal_config().column(ColumnSpec::new("domestic", "Domestic"));
    let model = table(config).render();
    assert_eq!(model.header[5].priority_class, None);
    for row in model.rows() {
        assert_eq!(row.cell("domestic").unwrap().priority_class, None);
    }
}

#[test]
fn test_sort_default_column() {
    let model = table(animal_config()).render();
    let sort = model.sort.as_ref().unwrap();
    assert_eq!(sort.column_id, "diet");
    assert_eq!(sort.direction, SortDirection::Ascending);
    assert_eq!(model.header[4].sort, Some(SortDirection::Ascending));
    assert_eq!(model.header[2].sort, None);
}

#[test]
fn test_no_sort_default_preserves_order() {
    let config = TableConfig::new()
        .column(ColumnSpec::new("animal", "Animal"))
        .column(ColumnSpec::new("diet", "Diet"));
    let model = table(config).render();
    assert!(model.sort.is_none());
    let keys: Vec<&str> = model.rows().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["1", "2", "3"]);
}

#[test]
fn test_sort_by_flips_direction() {
    let mut table = table(animal_config());
    assert_eq!(table.sort_by("diet").unwrap().direction, SortDirection::Descending);
    assert_eq!(table.sort_by("animal").unwrap().direction, SortDirection::Ascending);
    assert!(table.sort_by("missing").is_none());
    assert_eq!(table.sort().unwrap().column_id, "animal");
}

// =============================================================================
// Body
// =============================================================================

#[test]
fn test_rows_without_expansion() {
    let model = table(animal_config()).render();
    assert_eq!(model.body.len(), 3);
    assert_eq!(model.detail_rows().count(), 0);
}

#[test]
fn test_every_row_matches_header() {
    let mut table = table(animal_config());
    table.expand_all();
    let model = table.render();
    for row in &model.body {
        assert_eq!(row.cell_count(), model.header_cell_count());
    }
}

#[test]
fn test_cell_order_mirrors_header() {
    let model = table(animal_config()).render();
    let row = model.rows().nth(1).unwrap();
    assert!(matches!(row.cells[0], RowCell::Select { checked: false, visible: true }));
    assert!(matches!(row.cells[1], RowCell::Expander { expanded: false, visible: true }));

    let values: Vec<&str> = row.data_cells().map(|c| c.content.as_str()).collect();
    assert_eq!(values, vec!["snake", "reptile", "mice"]);
}

#[test]
fn test_body_priority_classes() {
    let model = table(animal_config()).render();
    let row = model.rows().nth(1).unwrap();
    let classes: Vec<Option<&str>> = row
        .data_cells()
        .map(|c| c.priority_class.as_deref())
        .collect();
    assert_eq!(classes, vec![Some("rsp-p1"), Some("rsp-p2"), Some("rsp-p1")]);
}

#[test]
fn test_expand_all_interleaves_detail_rows() {
    let mut table = table(animal_config());
    table.expand_all();
    let model = table.render();

    assert_eq!(model.body.len(), 6);
    for (i, row) in model.body.iter().enumerate() {
        match row {
            BodyRow::Primary(primary) => {
                assert_eq!(i % 2, 0);
                assert_eq!(primary.cells.len(), 5);
                assert!(primary.is_expanded);
            }
            BodyRow::Detail(detail) => {
                assert_eq!(i % 2, 1);
                assert_eq!(detail.key, *model.body[i - 1].key());
            }
        }
    }
}

#[test]
fn test_detail_row_content() {
    let mut table = table(animal_config());
    assert!(table.toggle_expansion(&RowKey::from("2")));
    let model = table.render();

    assert_eq!(model.body.len(), 4);
    let detail = model.body[2].as_detail().unwrap();
    assert_eq!(detail.key.as_str(), "2");
    assert_eq!(detail.span, 5);

    let pairs: Vec<(&str, &str)> = detail
        .fields
        .iter()
        .map(|f| (f.title.as_str(), f.content.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("Animal", "snake"), ("Type", "reptile"), ("Diet", "mice")]
    );
}

#[test]
fn test_detail_row_includes_hidden_priority_columns() {
    let config = animal_config().column(ColumnSpec::new("domestic", "Domestic").priority(9));
    let mut table = table(config);
    table.toggle_expansion(&RowKey::from("1"));
    let model = table.render();
    let detail = model.detail_rows().next().unwrap();
    assert_eq!(detail.fields.len(), 4);
    assert_eq!(detail.fields[3].content, CellContent::Text("true".to_string()));
}

#[test]
fn test_toggle_expansion_twice_collapses() {
    let mut table = table(animal_config());
    let key = RowKey::from("3");
    table.toggle_expansion(&key);
    table.toggle_expansion(&key);
    assert!(!table.is_expanded(&key));
    assert_eq!(table.render().body.len(), 3);
}

#[test]
fn test_expand_disabled_never_emits_detail_rows() {
    let mut table = table(animal_config().expand(false));
    assert!(!table.toggle_expansion(&RowKey::from("1")));
    table.expand_all();
    let model = table.render();
    assert_eq!(model.body.len(), 3);
    assert_eq!(model.detail_rows().count(), 0);
    assert!(model.rows().all(|r| !r.is_expanded));
}

#[test]
fn test_unknown_key_does_not_expand() {
    let mut table = table(animal_config());
    assert!(!table.toggle_expansion(&RowKey::from("99")));
    assert_eq!(table.render().body.len(), 3);
}

#[test]
fn test_zero_items_still_renders_header() {
    let mut table = TableController::new(animal_config(), FilterRegistry::new()).unwrap();
    table.set_items(Vec::new()).unwrap();
    let model = table.render();
    assert_eq!(model.header_cell_count(), 5);
    assert!(model.is_empty());
    assert!(!model.select_all_state);
}

#[test]
fn test_item_mutation_rerenders() {
    let mut table = table(animal_config());
    let mut items = animals();
    items[0].insert("animal", "lion");
    table.set_items(items).unwrap();
    let model = table.render();
    assert_eq!(
        model.rows().next().unwrap().cell("animal").unwrap().content.as_str(),
        "lion"
    );
}

// =============================================================================
// Config replacement
// =============================================================================

#[test]
fn test_set_config_keeps_state_for_surviving_keys() {
    let mut table = table(animal_config());
    table.toggle_row_selection(&RowKey::from("1"));
    table.toggle_expansion(&RowKey::from("1"));

    let config = animal_config().column(ColumnSpec::new("domestic", "Domestic").filter("yesno"));
    table.set_config(config).unwrap();
    let model = table.render();

    assert_eq!(model.header_cell_count(), 6);
    let first = model.rows().next().unwrap();
    assert!(first.is_selected);
    assert!(first.is_expanded);
    assert_eq!(first.cell("domestic").unwrap().content.as_str(), "Yes");
}

#[test]
fn test_set_config_disabling_expand_drops_detail_rows() {
    let mut table = table(animal_config());
    table.expand_all();
    table.set_config(animal_config().expand(false)).unwrap();
    assert_eq!(table.render().detail_rows().count(), 0);
}

#[test]
fn test_set_config_disabling_select_all_clears_selection() {
    let mut table = table(animal_config());
    table.toggle_select_all();
    table.set_config(animal_config().select_all(false)).unwrap();

    let model = table.render();
    assert!(!model.select_all_state);
    assert!(!model.header[0].visible);
    assert!(model.rows().all(|r| !r.is_selected));
    assert!(table.selected_items().is_empty());
}

#[test]
fn test_set_config_rekeys_items() {
    let mut table = table(animal_config());
    table.set_config(animal_config().track_id("animal")).unwrap();
    let keys: Vec<String> = table.render().rows().map(|r| r.key.to_string()).collect();
    assert_eq!(keys, vec!["cat", "snake", "sparrow"]);
}

#[test]
fn test_set_config_rejects_unkeyable_items() {
    let mut table = table(animal_config());
    let err = table.set_config(animal_config().track_id("domestic")).unwrap_err();
    assert!(matches!(err, dyntable_lib::Error::Data(_)));
    assert_eq!(table.config().track_id, "id");
}

//! Table controller: owns the table state and produces render models.

use crate::action::{ActionBar, AllowedCheck, AllowedOutcome, BatchAction, FilterFacet};
use crate::columns::{self, NormalizedColumns};
use crate::config::TableConfig;
use crate::error::{ConfigError, DataError};
use crate::filter::FilterRegistry;
use crate::layout;
use crate::model::{Item, ItemSet, RowKey};
use crate::rows;
use crate::selection::{ExpansionState, SelectionState};
use crate::view::{RenderModel, SortState};

/// Drives one table.
///
/// The controller is the only owner of selection and expansion state.
/// Configuration and items are replaced wholesale; every mutation leaves the
/// controller ready for a fresh [`TableController::render`].
///
/// # Example
///
/// ```
/// use dyntable_lib::config::{ColumnSpec, TableConfig};
/// use dyntable_lib::filter::FilterRegistry;
/// use dyntable_lib::model::{Item, RowKey};
/// use dyntable_lib::TableController;
///
/// let config = TableConfig::new()
///     .column(ColumnSpec::new("animal", "Animal").priority(1))
///     .column(ColumnSpec::new("domestic", "Domestic").filter("yesno"));
/// let mut table = TableController::new(config, FilterRegistry::with_builtins()).unwrap();
///
/// table
///     .set_items(vec![Item::new().set("id", "1").set("animal", "cat").set("domestic", true)])
///     .unwrap();
/// table.toggle_expansion(&RowKey::from("1"));
///
/// let model = table.render();
/// assert_eq!(model.header_cell_count(), 4);
/// assert_eq!(model.body.len(), 2);
/// ```
#[derive(Debug)]
pub struct TableController {
    config: TableConfig,
    registry: FilterRegistry,
    columns: NormalizedColumns,
    items: ItemSet,
    selection: SelectionState,
    expansion: ExpansionState,
    facets: Vec<FilterFacet>,
    actions: ActionBar,
}

impl TableController {
    /// Creates a controller with no items.
    pub fn new(config: TableConfig, registry: FilterRegistry) -> Result<Self, ConfigError> {
        let columns = columns::normalize(&config, &registry)?;
        Ok(Self {
            config,
            registry,
            columns,
            items: ItemSet::default(),
            selection: SelectionState::new(),
            expansion: ExpansionState::new(),
            facets: Vec::new(),
            actions: ActionBar::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &NormalizedColumns {
        &self.columns
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    /// Replaces the configuration.
    ///
    /// On error the previous config stays in effect. Items are re-keyed when
    /// the track field changes; if they cannot be keyed under the new field
    /// the whole replacement is rejected.
    pub fn set_config(&mut self, config: TableConfig) -> Result<(), crate::Error> {
        let columns = columns::normalize(&config, &self.registry)?;

        if config.track_id != self.config.track_id {
            let items: Vec<Item> = self.items.iter().map(|(_, item)| item.clone()).collect();
            let rekeyed = ItemSet::new(items, &config.track_id)?;
            self.adopt_items(rekeyed);
        }

        self.config = config;
        self.columns = columns;
        if !self.columns.selection_enabled() {
            self.selection.clear();
        }
        if !self.columns.expansion_enabled() {
            self.expansion.clear();
        }
        Ok(())
    }

    /// Replaces the item collection.
    ///
    /// The items are usually the output of the search bar, already filtered
    /// and ordered. A collection with a missing or repeated key is rejected
    /// and the previous items stay in place.
    pub fn set_items(&mut self, items: Vec<Item>) -> Result<(), DataError> {
        let items = ItemSet::new(items, &self.config.track_id)?;
        self.adopt_items(items);
        Ok(())
    }

    fn adopt_items(&mut self, items: ItemSet) {
        self.selection.reconcile(items.keys());
        self.expansion.reconcile(items.keys());
        log::debug!(
            "Items replaced ({} rows, {} selected, {} expanded)",
            items.len(),
            self.selection.count(),
            self.expansion.len()
        );
        self.items = items;
    }

    /// Replaces the search facets handed to the search bar.
    pub fn set_filter_facets(&mut self, facets: Vec<FilterFacet>) {
        self.facets = facets;
    }

    pub fn filter_facets(&self) -> &[FilterFacet] {
        &self.facets
    }

    /// Replaces the batch actions.
    ///
    /// Returns the allowed checks to drive; feed their outcomes back through
    /// [`TableController::apply_allowed`], or use
    /// [`TableController::settle_actions`].
    pub fn set_batch_actions(&mut self, actions: Vec<BatchAction>) -> Vec<AllowedCheck> {
        self.actions.set_actions(actions)
    }

    /// Records a resolved allowed check. Stale outcomes are ignored.
    pub fn apply_allowed(&mut self, outcome: AllowedOutcome) -> bool {
        self.actions.apply(outcome)
    }

    /// Drives allowed checks to completion.
    pub async fn settle_actions(&mut self, checks: Vec<AllowedCheck>) {
        self.actions.settle(checks).await;
    }

    pub fn actions(&self) -> &ActionBar {
        &self.actions
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// True when selection is enabled, there is at least one row and all
    /// rows are selected.
    pub fn select_all_state(&self) -> bool {
        self.columns.selection_enabled() && self.selection.all_selected()
    }

    /// Selects every row, or clears the selection when all are selected.
    ///
    /// No-op when the selection column is disabled.
    pub fn toggle_select_all(&mut self) {
        if !self.columns.selection_enabled() {
            return;
        }
        let target = !self.selection.all_selected();
        self.selection.set_all(target);
    }

    /// Flips one row's selection. Returns false if nothing changed.
    pub fn toggle_row_selection(&mut self, key: &RowKey) -> bool {
        self.columns.selection_enabled() && self.selection.toggle(key)
    }

    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selection.is_selected(key)
    }

    /// Selected keys in item order.
    pub fn selected_keys(&self) -> Vec<&RowKey> {
        self.items
            .keys()
            .filter(|key| self.selection.is_selected(key))
            .collect()
    }

    /// Selected items in item order.
    pub fn selected_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|(key, _)| self.selection.is_selected(key))
            .map(|(_, item)| item)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    /// Flips one row's detail row. Returns false if nothing changed.
    ///
    /// No-op when expansion is disabled or the key is unknown.
    pub fn toggle_expansion(&mut self, key: &RowKey) -> bool {
        if !self.columns.expansion_enabled() || !self.items.contains(key) {
            return false;
        }
        self.expansion.toggle(key);
        true
    }

    /// Expands every row. No-op when expansion is disabled.
    pub fn expand_all(&mut self) {
        if self.columns.expansion_enabled() {
            self.expansion.expand(self.items.keys());
        }
    }

    pub fn collapse_all(&mut self) {
        self.expansion.clear();
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.columns.expansion_enabled() && self.expansion.is_expanded(key)
    }

    // -------------------------------------------------------------------------
    // Sort
    // -------------------------------------------------------------------------

    /// The active sort column. The host applies the sort to the items.
    pub fn sort(&self) -> Option<&SortState> {
        self.columns.sort()
    }

    /// Makes `column_id` the sort column, flipping direction on repeat.
    pub fn sort_by(&mut self, column_id: &str) -> Option<&SortState> {
        if self.columns.sort_by(column_id) {
            self.columns.sort()
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Derives the full render model from the current state.
    pub fn render(&self) -> RenderModel {
        RenderModel {
            header: self.columns.header(),
            body: rows::build_rows(&self.items, &self.columns, &self.expansion, &self.selection),
            select_all_state: self.select_all_state(),
            sort: self.columns.sort().cloned(),
            preamble: layout::compute_spans(
                &self.config,
                !self.facets.is_empty(),
                !self.actions.is_empty(),
            ),
            actions: self.actions.views(),
        }
    }
}

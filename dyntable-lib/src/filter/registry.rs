//! Named filter lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::FilterFn;
use super::builtin;
use crate::error::FilterError;
use crate::model::Value;

/// Maps filter names to transforms.
///
/// The registry is passed explicitly to the table controller; there is no
/// process-wide filter table. Start from [`FilterRegistry::new`] for an
/// empty registry or [`FilterRegistry::with_builtins`] for the stock set.
///
/// # Example
///
/// ```
/// use dyntable_lib::filter::FilterRegistry;
/// use dyntable_lib::model::Value;
///
/// let mut registry = FilterRegistry::with_builtins();
/// registry.register("shout", |v: Value| Value::from(v.to_string().to_uppercase()));
///
/// assert!(registry.contains("yesno"));
/// assert!(registry.contains("shout"));
/// ```
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<String, FilterFn>,
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in filters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::install(&mut registry);
        registry
    }

    /// Registers an infallible filter, replacing any filter of the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.filters
            .insert(name.into(), Arc::new(move |value| Ok(f(value))));
        self
    }

    /// Registers a filter that may fail on some inputs.
    pub fn register_fallible<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(Value) -> Result<Value, FilterError> + Send + Sync + 'static,
    {
        self.filters.insert(name.into(), Arc::new(f));
        self
    }

    /// Looks up a filter by name.
    pub fn get(&self, name: &str) -> Option<&FilterFn> {
        self.filters.get(name)
    }

    /// Returns `true` if a filter with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.names())
            .finish()
    }
}

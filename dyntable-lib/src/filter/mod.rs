//! Cell value filters.
//!
//! A column lists zero or more [`Filter`]s. Named filters are looked up in a
//! [`FilterRegistry`] when the column is normalized; transform filters are
//! called directly. Both are compiled into a [`FilterPipeline`] that runs
//! the stages left to right.

mod builtin;
mod pipeline;
mod registry;

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Deserializer;

use crate::error::FilterError;
use crate::model::Value;

pub use pipeline::FilterPipeline;
pub use registry::FilterRegistry;

/// A single value transform.
pub type FilterFn = Arc<dyn Fn(Value) -> Result<Value, FilterError> + Send + Sync>;

/// Stage name reported for anonymous transform filters.
pub const TRANSFORM_NAME: &str = "<transform>";

/// One entry of a column's filter list.
#[derive(Clone)]
pub enum Filter {
    /// A filter registered under a name.
    Named(String),
    /// A function applied directly to the value.
    Transform(FilterFn),
}

impl Filter {
    /// References a registered filter by name.
    pub fn named(name: impl Into<String>) -> Self {
        Filter::Named(name.into())
    }

    /// Wraps an infallible transform.
    ///
    /// # Example
    ///
    /// ```
    /// use dyntable_lib::filter::Filter;
    /// use dyntable_lib::model::Value;
    ///
    /// let ish = Filter::transform(|v: Value| Value::from(format!("{}-ish", v)));
    /// # let _ = ish;
    /// ```
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Filter::Transform(Arc::new(move |value| Ok(f(value))))
    }

    /// Wraps a transform that may reject its input.
    pub fn try_transform<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Filter::Transform(Arc::new(move |value| {
            f(value).map_err(|message| FilterError::failed("", message))
        }))
    }

    /// Name used in logs and errors for this stage.
    pub fn name(&self) -> &str {
        match self {
            Filter::Named(name) => name,
            Filter::Transform(_) => TRANSFORM_NAME,
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Filter::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

impl From<&str> for Filter {
    fn from(name: &str) -> Self {
        Filter::named(name)
    }
}

impl From<String> for Filter {
    fn from(name: String) -> Self {
        Filter::Named(name)
    }
}

impl<'de> Deserialize<'de> for Filter {
    /// Filters read from config files can only be names.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Filter::Named)
    }
}

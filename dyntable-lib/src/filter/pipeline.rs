//! Compiled filter chains.

use std::panic::{AssertUnwindSafe, catch_unwind};

use super::{Filter, FilterFn, FilterRegistry};
use crate::error::{ConfigError, FilterError};
use crate::model::Value;

#[derive(Clone)]
struct Stage {
    name: String,
    func: FilterFn,
}

/// A column's filters with every name already resolved.
///
/// Building the pipeline is where unknown filter names are caught, so a
/// bad config fails before any row is rendered.
#[derive(Clone, Default)]
pub struct FilterPipeline {
    stages: Vec<Stage>,
}

impl FilterPipeline {
    /// Resolves `filters` for the column `column`.
    pub fn compile(
        column: &str,
        filters: &[Filter],
        registry: &FilterRegistry,
    ) -> Result<Self, ConfigError> {
        let stages = filters
            .iter()
            .map(|filter| match filter {
                Filter::Named(name) => registry
                    .get(name)
                    .map(|func| Stage {
                        name: name.clone(),
                        func: func.clone(),
                    })
                    .ok_or_else(|| ConfigError::unknown_filter(column, name)),
                Filter::Transform(func) => Ok(Stage {
                    name: filter.name().to_string(),
                    func: func.clone(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { stages })
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` when values pass through unchanged.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name.as_str())
    }

    /// Runs `value` through every stage, left to right.
    ///
    /// Stops at the first stage that fails or panics.
    pub fn apply(&self, value: Value) -> Result<Value, FilterError> {
        let mut current = value;
        for stage in &self.stages {
            let func = &stage.func;
            let input = current;
            current = match catch_unwind(AssertUnwindSafe(move || func(input))) {
                Ok(Ok(next)) => next,
                Ok(Err(e)) => return Err(e.with_filter(&stage.name)),
                Err(panic) => return Err(FilterError::panicked(&stage.name, &panic)),
            };
        }
        Ok(current)
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

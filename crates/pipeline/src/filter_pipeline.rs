//! The FilterPipeline chains filters into one query.
//!
//! Stages run in insertion order. Order only affects how many records later
//! stages see, never the result, since every stage is a pure predicate.

use crate::query::QueryContext;
use crate::traits::Filter;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(VisibilityFilter::new(evaluator))
///     .add_filter(ScopeFilter::new(TabScope::Upcoming))
///     .add_filter(TextSearchFilter::new("party"));
///
/// let kept = pipeline.apply(events.iter().collect(), &context);
/// ```
pub struct FilterPipeline<T> {
    filters: Vec<Box<dyn Filter<T>>>,
}

impl<T> FilterPipeline<T> {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter<T> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the stages, in run order
    pub fn stages(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence.
    ///
    /// Each stage logs its name with input and output counts at debug level.
    pub fn apply(&self, items: Vec<T>, context: &QueryContext<'_>) -> Vec<T> {
        let mut current = items;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl<T> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

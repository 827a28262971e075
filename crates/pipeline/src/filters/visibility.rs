//! Filter dropping records the viewer may not see.
//!
//! Always the first stage of a query.

use crate::query::QueryContext;
use crate::traits::{Filter, Listing};
use crate::visibility::VisibilityEvaluator;

/// Keeps records that pass [`VisibilityEvaluator::is_visible`] for the
/// context's viewer.
pub struct VisibilityFilter {
    evaluator: VisibilityEvaluator,
}

impl VisibilityFilter {
    pub fn new(evaluator: VisibilityEvaluator) -> Self {
        Self { evaluator }
    }
}

impl<T: Listing> Filter<T> for VisibilityFilter {
    fn name(&self) -> &str {
        "VisibilityFilter"
    }

    fn apply(&self, items: Vec<T>, context: &QueryContext<'_>) -> Vec<T> {
        items
            .into_iter()
            .filter(|item| self.evaluator.is_visible(item, context.viewer))
            .collect()
    }
}

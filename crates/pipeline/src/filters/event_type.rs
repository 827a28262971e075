//! Filter keeping events of one type.

use crate::query::QueryContext;
use crate::traits::{Filter, Listing};
use catalog::EventType;

/// Exact match on [`Listing::event_type`]. Records without an event type
/// (profiles) pass through.
pub struct EventTypeFilter {
    event_type: EventType,
}

impl EventTypeFilter {
    pub fn new(event_type: EventType) -> Self {
        Self { event_type }
    }
}

impl<T: Listing> Filter<T> for EventTypeFilter {
    fn name(&self) -> &str {
        "EventTypeFilter"
    }

    fn apply(&self, items: Vec<T>, _context: &QueryContext<'_>) -> Vec<T> {
        items
            .into_iter()
            .filter(|item| item.event_type().is_none_or(|t| t == self.event_type))
            .collect()
    }
}

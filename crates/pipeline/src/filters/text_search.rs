//! Free-text search over each record's searchable fields.

use crate::query::QueryContext;
use crate::traits::{Filter, Listing};

/// Case-insensitive substring match against [`Listing::search_fields`].
///
/// Profiles search name, description and category; events search title,
/// description, location and host name.
pub struct TextSearchFilter {
    needle: String,
}

impl TextSearchFilter {
    pub fn new(search: &str) -> Self {
        Self {
            needle: search.to_lowercase(),
        }
    }

    fn matches<T: Listing>(&self, item: &T) -> bool {
        self.needle.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

impl<T: Listing> Filter<T> for TextSearchFilter {
    fn name(&self) -> &str {
        "TextSearchFilter"
    }

    fn apply(&self, items: Vec<T>, _context: &QueryContext<'_>) -> Vec<T> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

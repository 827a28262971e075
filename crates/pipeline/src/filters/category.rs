//! Filter keeping profiles of one category.

use crate::query::QueryContext;
use crate::traits::{Filter, Listing};

/// Exact match on [`Listing::category`]. Records without a category
/// (events) pass through.
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl<T: Listing> Filter<T> for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn apply(&self, items: Vec<T>, _context: &QueryContext<'_>) -> Vec<T> {
        items
            .into_iter()
            .filter(|item| item.category().is_none_or(|c| c == self.category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::fixtures::*;
    use catalog::{PartyKind, Viewer};

    #[test]
    fn test_category_filter_is_exact() {
        let profiles = vec![
            profile(PartyKind::Brand, "1", "Monster Energy", "Beverage"),
            profile(PartyKind::Brand, "2", "Shopify", "Retail Services"),
            profile(PartyKind::Brand, "3", "Target", "Retail"),
        ];
        let viewer = Viewer::anonymous();
        let context = QueryContext::new(&viewer, at(2025, 1, 1, 0, 0));

        let kept =
            CategoryFilter::new("Retail").apply(profiles.iter().collect::<Vec<_>>(), &context);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "3");
    }
}

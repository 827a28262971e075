//! Filter partitioning events into upcoming, past, and the viewer's own.

use crate::query::{QueryContext, TabScope};
use crate::traits::{Filter, Listing};

/// Keeps events in the selected [`TabScope`].
///
/// ## Algorithm
/// - `Upcoming`: timestamp strictly after `context.now`
/// - `Past`: timestamp strictly before `context.now`
/// - `Mine`: host kind and id equal the viewer's role and id
/// - `All`: keeps everything
///
/// An event at exactly `now` is neither upcoming nor past. Records without a
/// timestamp or host (profiles) pass through.
pub struct ScopeFilter {
    scope: TabScope,
}

impl ScopeFilter {
    pub fn new(scope: TabScope) -> Self {
        Self { scope }
    }
}

impl<T: Listing> Filter<T> for ScopeFilter {
    fn name(&self) -> &str {
        "ScopeFilter"
    }

    fn apply(&self, items: Vec<T>, context: &QueryContext<'_>) -> Vec<T> {
        let now = context.now;
        items
            .into_iter()
            .filter(|item| match self.scope {
                TabScope::Upcoming => item.timestamp().is_none_or(|ts| ts > now),
                TabScope::Past => item.timestamp().is_none_or(|ts| ts < now),
                TabScope::Mine => item
                    .host()
                    .is_none_or(|host| context.viewer.owns(host.kind, &host.id)),
                TabScope::All => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::fixtures::*;
    use catalog::{PartyKind, Role, Viewer};

    #[test]
    fn test_upcoming_and_past_exclude_now() {
        let now = at(2025, 3, 1, 12, 0);
        let events = vec![
            event("1", at(2025, 3, 1, 11, 59), PartyKind::Brand, "1"),
            event("2", now, PartyKind::Brand, "1"),
            event("3", at(2025, 3, 1, 12, 1), PartyKind::Brand, "1"),
        ];
        let viewer = Viewer::new("1", Role::Admin);
        let context = QueryContext::new(&viewer, now);

        let upcoming =
            ScopeFilter::new(TabScope::Upcoming).apply(events.iter().collect::<Vec<_>>(), &context);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, "3");

        let past =
            ScopeFilter::new(TabScope::Past).apply(events.iter().collect::<Vec<_>>(), &context);
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].id, "1");

        let all =
            ScopeFilter::new(TabScope::All).apply(events.iter().collect::<Vec<_>>(), &context);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_mine_matches_role_and_id() {
        let events = vec![
            event("1", at(2025, 5, 5, 20, 0), PartyKind::Talent, "3"),
            event("2", at(2025, 5, 5, 20, 0), PartyKind::Brand, "3"),
            event("3", at(2025, 5, 5, 20, 0), PartyKind::Talent, "1"),
        ];
        let viewer = Viewer::new("3", Role::Talent);
        let context = QueryContext::new(&viewer, at(2025, 1, 1, 0, 0));

        let mine =
            ScopeFilter::new(TabScope::Mine).apply(events.iter().collect::<Vec<_>>(), &context);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "1");

        // Admins host nothing
        let admin = Viewer::new("3", Role::Admin);
        let context = QueryContext::new(&admin, at(2025, 1, 1, 0, 0));
        let mine =
            ScopeFilter::new(TabScope::Mine).apply(events.iter().collect::<Vec<_>>(), &context);
        assert!(mine.is_empty());
    }
}

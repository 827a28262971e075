//! Filter keeping events inside a calendar-day range.

use crate::query::{DateRange, QueryContext};
use crate::traits::{Filter, Listing};

/// Keeps events whose timestamp lies in an inclusive [`DateRange`].
///
/// ## Algorithm
/// - only start: timestamp >= start of the start day
/// - only end: timestamp <= end of the end day
/// - both: timestamp within the closed interval
/// - neither: keeps everything
///
/// Records without a timestamp (profiles) pass through.
pub struct DateRangeFilter {
    range: DateRange,
}

impl DateRangeFilter {
    pub fn new(range: DateRange) -> Self {
        Self { range }
    }
}

impl<T: Listing> Filter<T> for DateRangeFilter {
    fn name(&self) -> &str {
        "DateRangeFilter"
    }

    fn apply(&self, items: Vec<T>, _context: &QueryContext<'_>) -> Vec<T> {
        if self.range.is_unbounded() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| item.timestamp().is_none_or(|ts| self.range.contains(ts)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::fixtures::*;
    use catalog::{PartyKind, Viewer};
    use chrono::{NaiveDate, NaiveTime};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_of_day_is_included_with_only_start() {
        let events = vec![
            event("1", at(2025, 5, 5, 0, 0), PartyKind::Talent, "1"),
            event("2", at(2025, 5, 4, 23, 59), PartyKind::Talent, "1"),
        ];
        let viewer = Viewer::anonymous();
        let context = QueryContext::new(&viewer, at(2025, 1, 1, 0, 0));

        let filter = DateRangeFilter::new(DateRange::new(Some(day(2025, 5, 5)), None));
        let kept = filter.apply(events.iter().collect::<Vec<_>>(), &context);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }

    #[test]
    fn test_end_of_day_is_included_with_only_end() {
        let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap();
        let end_of_day = day(2025, 5, 5).and_time(last).and_utc();
        let events = vec![
            event("1", end_of_day, PartyKind::Talent, "1"),
            event("2", at(2025, 5, 6, 0, 0), PartyKind::Talent, "1"),
        ];
        let viewer = Viewer::anonymous();
        let context = QueryContext::new(&viewer, at(2025, 1, 1, 0, 0));

        let filter = DateRangeFilter::new(DateRange::new(None, Some(day(2025, 5, 5))));
        let kept = filter.apply(events.iter().collect::<Vec<_>>(), &context);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }

    #[test]
    fn test_closed_interval() {
        let events = vec![
            event("1", at(2024, 10, 15, 18, 0), PartyKind::Brand, "2"),
            event("2", at(2025, 5, 5, 20, 0), PartyKind::Talent, "1"),
            event("3", at(2025, 7, 1, 9, 0), PartyKind::Talent, "3"),
        ];
        let viewer = Viewer::anonymous();
        let context = QueryContext::new(&viewer, at(2025, 1, 1, 0, 0));

        let filter =
            DateRangeFilter::new(DateRange::new(Some(day(2024, 10, 15)), Some(day(2025, 5, 5))));
        let kept = filter.apply(events.iter().collect::<Vec<_>>(), &context);
        let ids: Vec<&str> = kept.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let open = DateRangeFilter::new(DateRange::default());
        assert_eq!(open.apply(events.iter().collect::<Vec<_>>(), &context).len(), 3);
    }
}

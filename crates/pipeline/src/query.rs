//! Query state and the query entry point.
//!
//! [`QueryFilters`] is the filter state a presentation layer builds from its
//! controls. Raw strings from those controls are normalised here: any value
//! outside the documented options resolves to that option's default, so a
//! query can never fail.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::*;
use crate::traits::Listing;
use crate::visibility::{ALL_CATEGORIES, VisibilityEvaluator};
use catalog::{EventType, Viewer};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;

/// Sentinel disabling the event-type filter
pub const ALL_EVENT_TYPES: &str = "all";

/// Everything a filter may consult besides its own parameters
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'a> {
    pub viewer: &'a Viewer,
    /// Instant separating upcoming from past events
    pub now: DateTime<Utc>,
}

impl<'a> QueryContext<'a> {
    pub fn new(viewer: &'a Viewer, now: DateTime<Utc>) -> Self {
        Self { viewer, now }
    }
}

// =============================================================================
// Scope
// =============================================================================

/// Coarse event partition applied before the finer filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabScope {
    /// Strictly after now
    #[default]
    Upcoming,
    /// Strictly before now
    Past,
    /// Hosted by the viewer
    Mine,
    /// No partition
    All,
}

impl TabScope {
    pub fn as_str(self) -> &'static str {
        match self {
            TabScope::Upcoming => "upcoming",
            TabScope::Past => "past",
            TabScope::Mine => "my-events",
            TabScope::All => "all",
        }
    }
}

impl From<&str> for TabScope {
    /// Unknown scopes fall back to `Upcoming`
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => TabScope::Upcoming,
            "past" => TabScope::Past,
            "mine" | "my-events" | "my_events" => TabScope::Mine,
            "all" => TabScope::All,
            other => {
                debug!("Unknown scope {:?}, using upcoming", other);
                TabScope::Upcoming
            }
        }
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// Inclusive calendar-day bounds, evaluated in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// First instant of the start day
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.start.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// Last representable instant of the end day
    pub fn upper_bound(&self) -> Option<DateTime<Utc>> {
        let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
        self.end.map(|d| d.and_time(last).and_utc())
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let after_start = self.lower_bound().is_none_or(|lo| instant >= lo);
        let before_end = self.upper_bound().is_none_or(|hi| instant <= hi);
        after_start && before_end
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// Filter state for one query.
///
/// The default value filters nothing but visibility and the upcoming scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryFilters {
    /// Case-insensitive substring; empty matches everything
    pub search: String,
    /// Exact category; `None` disables the filter
    pub category: Option<String>,
    pub date_range: DateRange,
    pub scope: TabScope,
    /// Exact event type; `None` disables the filter
    pub event_type: Option<EventType>,
}

impl QueryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Blank and "All Categories" disable the category filter
    pub fn with_category(mut self, category: &str) -> Self {
        let category = category.trim();
        self.category = if category.is_empty() || category == ALL_CATEGORIES {
            None
        } else {
            Some(category.to_string())
        };
        self
    }

    /// "all" and unknown names disable the event-type filter
    pub fn with_event_type(mut self, event_type: &str) -> Self {
        self.event_type = if event_type.trim().eq_ignore_ascii_case(ALL_EVENT_TYPES) {
            None
        } else {
            match event_type.parse() {
                Ok(t) => Some(t),
                Err(_) => {
                    debug!("Unknown event type {:?}, showing all", event_type);
                    None
                }
            }
        };
        self
    }

    pub fn with_scope(mut self, scope: impl Into<TabScope>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_range = DateRange::new(start, end);
        self
    }
}

// =============================================================================
// Query Entry Point
// =============================================================================

/// Compose the pipeline for `filters`.
///
/// Visibility always runs first; every other stage is added only when its
/// component of the filter state is active.
pub fn build_pipeline<T: Listing>(
    filters: &QueryFilters,
    evaluator: &VisibilityEvaluator,
) -> FilterPipeline<T> {
    let mut pipeline = FilterPipeline::new().add_filter(VisibilityFilter::new(evaluator.clone()));

    if filters.scope != TabScope::All {
        pipeline = pipeline.add_filter(ScopeFilter::new(filters.scope));
    }
    if !filters.search.is_empty() {
        pipeline = pipeline.add_filter(TextSearchFilter::new(&filters.search));
    }
    if let Some(category) = &filters.category {
        pipeline = pipeline.add_filter(CategoryFilter::new(category.clone()));
    }
    if let Some(event_type) = filters.event_type {
        pipeline = pipeline.add_filter(EventTypeFilter::new(event_type));
    }
    if !filters.date_range.is_unbounded() {
        pipeline = pipeline.add_filter(DateRangeFilter::new(filters.date_range));
    }
    pipeline
}

/// Visibility-filtered, filtered view of `items`.
///
/// Result order is the input order; callers rank afterwards.
pub fn query<'a, T: Listing>(
    items: &'a [T],
    filters: &QueryFilters,
    context: &QueryContext<'_>,
    evaluator: &VisibilityEvaluator,
) -> Vec<&'a T> {
    build_pipeline(filters, evaluator).apply(items.iter().collect(), context)
}

//! Core traits for the query pipeline.
//!
//! [`Listing`] is what the pipeline needs to know about a record; [`Filter`]
//! is one composable stage of the pipeline.

use crate::query::QueryContext;
use catalog::{Event, EventType, HostRef, PartyKind, Profile};
use chrono::{DateTime, Utc};

/// A record the pipeline can filter and rank.
///
/// Attributes that do not exist for a kind return `None`, and the filter
/// keyed on that attribute lets the record through. This is how one
/// pipeline serves both profiles (no timestamp, no host) and events (no
/// category).
pub trait Listing {
    /// Collection-unique id, also the recency sort key
    fn id(&self) -> &str;

    /// The identity that owns this record, as `(kind, id)`
    fn subject(&self) -> (PartyKind, &str);

    /// Category tags gating cross-role discovery
    fn visible_to(&self) -> &[String];

    /// Fields matched by free-text search
    fn search_fields(&self) -> Vec<&str>;

    /// Derived engagement score used by popularity ranking
    fn popularity(&self) -> usize;

    fn category(&self) -> Option<&str> {
        None
    }

    fn event_type(&self) -> Option<EventType> {
        None
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn host(&self) -> Option<&HostRef> {
        None
    }
}

impl Listing for Profile {
    fn id(&self) -> &str {
        &self.id
    }

    fn subject(&self) -> (PartyKind, &str) {
        (self.kind, self.id.as_str())
    }

    fn visible_to(&self) -> &[String] {
        &self.visible_to
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ]
    }

    /// Talent partners for a brand, brand partners for talent
    fn popularity(&self) -> usize {
        self.partners.len()
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }
}

impl Listing for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn subject(&self) -> (PartyKind, &str) {
        (self.host.kind, self.host.id.as_str())
    }

    fn visible_to(&self) -> &[String] {
        &self.visible_to
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.location.as_str(),
            self.host.name.as_str(),
        ]
    }

    fn popularity(&self) -> usize {
        self.applications.len() + self.rsvps.len()
    }

    fn event_type(&self) -> Option<EventType> {
        Some(self.event_type)
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.date)
    }

    fn host(&self) -> Option<&HostRef> {
        Some(&self.host)
    }
}

/// Queries run over borrowed snapshot records
impl<T: Listing + ?Sized> Listing for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn subject(&self) -> (PartyKind, &str) {
        (**self).subject()
    }

    fn visible_to(&self) -> &[String] {
        (**self).visible_to()
    }

    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }

    fn popularity(&self) -> usize {
        (**self).popularity()
    }

    fn category(&self) -> Option<&str> {
        (**self).category()
    }

    fn event_type(&self) -> Option<EventType> {
        (**self).event_type()
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        (**self).timestamp()
    }

    fn host(&self) -> Option<&HostRef> {
        (**self).host()
    }
}

/// One stage of the query pipeline.
///
/// ## Design Note
/// - `Send + Sync` lets a built pipeline be shared across threads
/// - Filters take ownership of the Vec and return the kept records, so
///   stages chain without cloning
/// - Filters are total: a stage can drop records but never fail
pub trait Filter<T>: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the records that satisfy this stage's predicate
    fn apply(&self, items: Vec<T>, context: &QueryContext<'_>) -> Vec<T>;
}

//! Filter implementations for the query pipeline.
//!
//! Each filter is one predicate of the query conjunction. Filters keyed on
//! an attribute a record kind does not have let that record through.

pub mod category;
pub mod date_range;
pub mod event_type;
pub mod scope;
pub mod text_search;
pub mod visibility;

// Re-export for convenience
pub use category::CategoryFilter;
pub use date_range::DateRangeFilter;
pub use event_type::EventTypeFilter;
pub use scope::ScopeFilter;
pub use text_search::TextSearchFilter;
pub use visibility::VisibilityFilter;

#[cfg(test)]
pub(crate) mod fixtures {
    //! Records shared by the filter tests.

    use catalog::{Event, EventType, HostRef, PartyKind, Profile};
    use chrono::{DateTime, TimeZone, Utc};

    pub fn profile(kind: PartyKind, id: &str, name: &str, category: &str) -> Profile {
        Profile {
            id: id.to_string(),
            kind,
            name: name.to_string(),
            category: category.to_string(),
            description: format!("{} in {}", name, category),
            location: "New York".to_string(),
            image: None,
            past_events: vec![],
            partners: vec![],
            visible_to: vec![category.to_string()],
            premium: false,
        }
    }

    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    pub fn event(id: &str, date: DateTime<Utc>, host_kind: PartyKind, host_id: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            date,
            location: "New York, NY".to_string(),
            description: String::new(),
            image: None,
            host: HostRef {
                kind: host_kind,
                id: host_id.to_string(),
                name: format!("Host {}", host_id),
                image: None,
            },
            applications: vec![],
            rsvps: vec![],
            visible_to: vec!["Music".to_string(), "Entertainment".to_string()],
            event_type: EventType::Party,
        }
    }
}

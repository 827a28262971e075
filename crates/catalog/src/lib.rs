//! # Catalog Crate
//!
//! Read-only snapshot of the directory: brand and talent profiles, events,
//! and the viewer accounts that can sign in.
//!
//! ## Main Components
//!
//! - **types**: Domain types (Profile, Event, Viewer, Role, Catalog)
//! - **parser**: Parse the JSON snapshot files into records
//! - **index**: Build and validate a Catalog from a snapshot directory
//! - **error**: Error types for snapshot loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, PartyKind};
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_dir(Path::new("data/slate"))?;
//! let event = catalog.get_event("1");
//! let talent = catalog.profiles(PartyKind::Talent);
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use error::{CatalogError, Result};
pub use types::{
    // Type aliases
    EventId,
    ProfileId,
    ViewerId,
    // Core types
    Catalog,
    Event,
    HostRef,
    Profile,
    Viewer,
    // Enums
    EventType,
    PartyKind,
    Role,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn brand(id: &str, name: &str) -> Profile {
        Profile {
            id: id.to_string(),
            kind: PartyKind::Brand,
            name: name.to_string(),
            category: "Retail".to_string(),
            description: String::new(),
            location: String::new(),
            image: None,
            past_events: vec![],
            partners: vec![],
            visible_to: vec![],
            premium: false,
        }
    }

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert_eq!(catalog.counts(), (0, 0, 0, 0));
    }

    #[test]
    fn test_insert_profile_routes_by_kind() {
        let mut catalog = Catalog::new();
        catalog.insert_profile(brand("1", "Shopify"));

        assert!(catalog.get_profile(PartyKind::Brand, "1").is_some());
        assert!(catalog.get_profile(PartyKind::Talent, "1").is_none());
        assert_eq!(catalog.profiles(PartyKind::Brand).len(), 1);
    }

    #[test]
    fn test_lookup_resolves_first_duplicate() {
        let mut catalog = Catalog::new();
        catalog.insert_profile(brand("1", "First"));
        catalog.insert_profile(brand("1", "Second"));

        assert_eq!(catalog.get_profile(PartyKind::Brand, "1").unwrap().name, "First");
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_insert_event() {
        let mut catalog = Catalog::new();
        catalog.insert_event(Event {
            id: "7".to_string(),
            title: "Listening Session".to_string(),
            date: Utc.with_ymd_and_hms(2025, 6, 1, 19, 0, 0).unwrap(),
            location: "Brooklyn".to_string(),
            description: String::new(),
            image: None,
            host: HostRef {
                kind: PartyKind::Talent,
                id: "1".to_string(),
                name: "French Montana".to_string(),
                image: None,
            },
            applications: vec![],
            rsvps: vec![],
            visible_to: vec!["Music".to_string()],
            event_type: EventType::Concert,
        });

        assert_eq!(catalog.get_event("7").unwrap().title, "Listening Session");
        assert!(catalog.get_event("8").is_none());
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();
        assert!(catalog.get_event("1").is_none());
        assert!(catalog.get_viewer("1").is_none());
        assert!(catalog.viewer_for_role(Role::Admin).is_none());
        assert!(catalog.profiles(PartyKind::Talent).is_empty());
    }

    #[test]
    fn test_role_and_kind_parsing() {
        assert_eq!("Brand".parse::<Role>().unwrap(), Role::Brand);
        assert!("owner".parse::<Role>().is_err());
        assert_eq!("brands".parse::<PartyKind>().unwrap(), PartyKind::Brand);
        assert_eq!(Role::Talent.party(), Some(PartyKind::Talent));
        assert_eq!(Role::Admin.party(), None);
        assert_eq!(PartyKind::Brand.counterpart(), PartyKind::Talent);
    }

    #[test]
    fn test_event_type_parsing() {
        assert_eq!(
            "product launch".parse::<EventType>().unwrap(),
            EventType::ProductLaunch
        );
        assert_eq!("podcast".parse::<EventType>().unwrap(), EventType::Podcast);
        assert!("rave".parse::<EventType>().is_err());
    }

    #[test]
    fn test_viewer_ownership() {
        let viewer = Viewer::new("2", Role::Brand);
        assert!(viewer.owns(PartyKind::Brand, "2"));
        assert!(!viewer.owns(PartyKind::Talent, "2"));
        assert!(!viewer.owns(PartyKind::Brand, "3"));
        assert_eq!(Viewer::anonymous().role, Role::Public);
    }
}

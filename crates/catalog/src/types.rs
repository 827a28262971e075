//! Core domain types for the directory snapshot.
//!
//! Profiles, events and viewer accounts are supplied by an external data
//! provider and never mutated here. Everything downstream derives filtered
//! or ordered views from these records.

use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a brand or talent profile, unique within its collection
pub type ProfileId = String;

/// Identifier of an event
pub type EventId = String;

/// Identifier of a viewer account
pub type ViewerId = String;

// =============================================================================
// Roles and Parties
// =============================================================================

/// Role a viewer acts under.
///
/// The set is closed: every role-conditioned decision is a `match` on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Brand,
    Talent,
    #[default]
    Public,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Brand, Role::Talent, Role::Public];

    /// The directory side this role belongs to, if any
    pub fn party(self) -> Option<PartyKind> {
        match self {
            Role::Brand => Some(PartyKind::Brand),
            Role::Talent => Some(PartyKind::Talent),
            Role::Admin | Role::Public => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Brand => "brand",
            Role::Talent => "talent",
            Role::Public => "public",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "brand" => Ok(Role::Brand),
            "talent" => Ok(Role::Talent),
            "public" => Ok(Role::Public),
            _ => Err(CatalogError::InvalidValue {
                field: "role".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// One side of the directory: brands or talent.
///
/// Used both as the kind of a profile and as the kind of an event host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Brand,
    #[default]
    Talent,
}

impl PartyKind {
    /// Brands discover talent and talent discovers brands
    pub fn counterpart(self) -> PartyKind {
        match self {
            PartyKind::Brand => PartyKind::Talent,
            PartyKind::Talent => PartyKind::Brand,
        }
    }

    /// The viewer role that owns records of this kind
    pub fn role(self) -> Role {
        match self {
            PartyKind::Brand => Role::Brand,
            PartyKind::Talent => Role::Talent,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartyKind::Brand => "brand",
            PartyKind::Talent => "talent",
        }
    }
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brand" | "brands" => Ok(PartyKind::Brand),
            "talent" => Ok(PartyKind::Talent),
            _ => Err(CatalogError::InvalidValue {
                field: "kind".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Profiles
// =============================================================================

/// A brand or talent profile in the directory.
///
/// `partners` holds talent partners for a brand and brand partners for
/// talent; the snapshot may spell it either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    /// Assigned from the snapshot file the record was read from
    #[serde(default)]
    pub kind: PartyKind,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub past_events: Vec<String>,
    #[serde(default, alias = "talentPartners", alias = "brandPartners")]
    pub partners: Vec<String>,
    /// Category tags gating cross-role discovery. Empty hides the profile
    /// from everyone but its owner and admins.
    #[serde(default)]
    pub visible_to: Vec<String>,
    #[serde(default)]
    pub premium: bool,
}

// =============================================================================
// Events
// =============================================================================

/// Kind of event being hosted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "Product Launch")]
    ProductLaunch,
    Activation,
    Party,
    Concert,
    Podcast,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::ProductLaunch,
        EventType::Activation,
        EventType::Party,
        EventType::Concert,
        EventType::Podcast,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::ProductLaunch => "Product Launch",
            EventType::Activation => "Activation",
            EventType::Party => "Party",
            EventType::Concert => "Concert",
            EventType::Podcast => "Podcast",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CatalogError;

    /// Accepts the display name in any case, with or without the space
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str().replace(' ', "").eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CatalogError::InvalidValue {
                field: "eventType".to_string(),
                value: s.to_string(),
            })
    }
}

/// Reference from an event to the profile hosting it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRef {
    pub kind: PartyKind,
    pub id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// An event hosted by a brand or a talent profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Start instant, RFC 3339 in snapshots
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub host: HostRef,
    /// Viewer ids that applied to take part
    #[serde(default)]
    pub applications: Vec<ViewerId>,
    /// Viewer ids that confirmed attendance
    #[serde(default)]
    pub rsvps: Vec<ViewerId>,
    #[serde(default)]
    pub visible_to: Vec<String>,
    pub event_type: EventType,
}

// =============================================================================
// Viewers
// =============================================================================

/// Identity context a query executes under.
///
/// `name` and `email` are for display only; decisions use `id` and `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub id: ViewerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub favorite_events: Option<BTreeSet<EventId>>,
}

impl Viewer {
    pub fn new(id: impl Into<ViewerId>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            role,
            favorite_events: None,
        }
    }

    /// Signed-out visitor
    pub fn anonymous() -> Self {
        Self::new("", Role::Public)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_favorites<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EventId>,
    {
        self.favorite_events = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// True when this viewer is the identity `(kind, id)` refers to
    pub fn owns(&self, kind: PartyKind, id: &str) -> bool {
        self.role == kind.role() && self.id == id
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

// =============================================================================
// Catalog - The Read-Only Snapshot
// =============================================================================

/// Read-only snapshot of every collection the engine works over.
///
/// Records keep their snapshot order; the id maps give O(1) lookups.
/// Brand and talent profiles are separate collections, so the same id may
/// appear once in each.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) brands: Vec<Profile>,
    pub(crate) talent: Vec<Profile>,
    pub(crate) events: Vec<Event>,
    pub(crate) viewers: Vec<Viewer>,

    pub(crate) brand_ids: HashMap<ProfileId, usize>,
    pub(crate) talent_ids: HashMap<ProfileId, usize>,
    pub(crate) event_ids: HashMap<EventId, usize>,
    pub(crate) viewer_ids: HashMap<ViewerId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All profiles of one kind, in snapshot order
    pub fn profiles(&self, kind: PartyKind) -> &[Profile] {
        match kind {
            PartyKind::Brand => &self.brands,
            PartyKind::Talent => &self.talent,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn viewers(&self) -> &[Viewer] {
        &self.viewers
    }

    pub fn get_profile(&self, kind: PartyKind, id: &str) -> Option<&Profile> {
        let (ids, records) = match kind {
            PartyKind::Brand => (&self.brand_ids, &self.brands),
            PartyKind::Talent => (&self.talent_ids, &self.talent),
        };
        ids.get(id).and_then(|&i| records.get(i))
    }

    pub fn get_event(&self, id: &str) -> Option<&Event> {
        self.event_ids.get(id).and_then(|&i| self.events.get(i))
    }

    pub fn get_viewer(&self, id: &str) -> Option<&Viewer> {
        self.viewer_ids.get(id).and_then(|&i| self.viewers.get(i))
    }

    /// First account registered under `role`
    pub fn viewer_for_role(&self, role: Role) -> Option<&Viewer> {
        self.viewers.iter().find(|v| v.role == role)
    }

    /// Insert a profile into the collection matching its kind.
    ///
    /// Lookups resolve to the first record with a given id; duplicates are
    /// reported by [`Catalog::validate`].
    pub fn insert_profile(&mut self, profile: Profile) {
        let (ids, records) = match profile.kind {
            PartyKind::Brand => (&mut self.brand_ids, &mut self.brands),
            PartyKind::Talent => (&mut self.talent_ids, &mut self.talent),
        };
        ids.entry(profile.id.clone()).or_insert(records.len());
        records.push(profile);
    }

    pub fn insert_event(&mut self, event: Event) {
        self.event_ids
            .entry(event.id.clone())
            .or_insert(self.events.len());
        self.events.push(event);
    }

    pub fn insert_viewer(&mut self, viewer: Viewer) {
        self.viewer_ids
            .entry(viewer.id.clone())
            .or_insert(self.viewers.len());
        self.viewers.push(viewer);
    }

    /// (brands, talent, events, viewers)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.brands.len(),
            self.talent.len(),
            self.events.len(),
            self.viewers.len(),
        )
    }
}

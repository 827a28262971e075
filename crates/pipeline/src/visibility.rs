//! Visibility evaluation.
//!
//! Decides whether one profile or event may be seen by one viewer. This is
//! the first stage of every query and also answers single-record checks
//! such as "may this viewer open this profile".

use crate::traits::Listing;
use catalog::{PartyKind, Role, Viewer};
use serde::{Deserialize, Serialize};

/// Sentinel shown first in category pickers; never a real category
pub const ALL_CATEGORIES: &str = "All Categories";

/// Category labels each side of the directory is organised by.
///
/// A viewer discovers records tagged with a category from the universe of
/// their counterpart side: brands search the talent universe and talent
/// search the brand universe. Public visitors search both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryUniverse {
    pub brand: Vec<String>,
    pub talent: Vec<String>,
}

impl Default for CategoryUniverse {
    fn default() -> Self {
        let owned =
            |labels: &[&str]| -> Vec<String> { labels.iter().map(|s| s.to_string()).collect() };
        Self {
            brand: owned(&[
                "Technology",
                "Fashion",
                "Sports",
                "Entertainment",
                "Food & Beverage",
                "Automotive",
                "Health & Wellness",
                "Finance",
                "Retail",
            ]),
            talent: owned(&[
                "Acting",
                "Music",
                "Sports",
                "Fashion",
                "Influencer",
                "Art",
                "Culinary",
                "Business",
                "Technology",
            ]),
        }
    }
}

impl CategoryUniverse {
    /// Whether a record tagged `tag` is discoverable under `role`
    pub fn admits(&self, role: Role, tag: &str) -> bool {
        let listed = |labels: &[String]| labels.iter().any(|l| l == tag);
        match role {
            Role::Admin => true,
            Role::Brand => listed(&self.talent),
            Role::Talent => listed(&self.brand),
            Role::Public => listed(&self.brand) || listed(&self.talent),
        }
    }

    /// Categories offered by the picker for one side, sentinel first
    pub fn picker(&self, side: PartyKind) -> Vec<&str> {
        let labels = match side {
            PartyKind::Brand => &self.brand,
            PartyKind::Talent => &self.talent,
        };
        std::iter::once(ALL_CATEGORIES)
            .chain(labels.iter().map(String::as_str))
            .filter(|l| !l.is_empty())
            .collect()
    }
}

/// Evaluates visibility of single records against a viewer.
///
/// ## Algorithm
/// 1. Admins see everything
/// 2. The owning identity (same role and id as the record's subject) sees
///    its own record
/// 3. Anyone else needs a non-empty `visible_to` sharing at least one tag
///    with their counterpart category universe
#[derive(Debug, Clone, Default)]
pub struct VisibilityEvaluator {
    universe: CategoryUniverse,
}

impl VisibilityEvaluator {
    pub fn new(universe: CategoryUniverse) -> Self {
        Self { universe }
    }

    pub fn universe(&self) -> &CategoryUniverse {
        &self.universe
    }

    pub fn is_visible<T: Listing + ?Sized>(&self, entity: &T, viewer: &Viewer) -> bool {
        if viewer.role == Role::Admin {
            return true;
        }

        let (kind, id) = entity.subject();
        if viewer.owns(kind, id) {
            return true;
        }

        // Empty tags conceal the record from everyone else
        entity
            .visible_to()
            .iter()
            .any(|tag| self.universe.admits(viewer.role, tag))
    }
}

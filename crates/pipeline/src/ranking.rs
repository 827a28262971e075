//! Ranking of filtered query results.
//!
//! Both strategies use a stable sort, so equal keys keep their incoming
//! order and ranking an already-ranked sequence changes nothing.

use crate::traits::Listing;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

/// Order in which results are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Descending id, which tracks insertion order
    #[default]
    Recent,
    /// Descending popularity score
    Popular,
}

impl SortStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortStrategy::Recent => "recent",
            SortStrategy::Popular => "popular",
        }
    }
}

impl From<&str> for SortStrategy {
    /// Unknown strategies fall back to `Recent`
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" => SortStrategy::Recent,
            "popular" => SortStrategy::Popular,
            other => {
                debug!("Unknown sort strategy {:?}, using recent", other);
                SortStrategy::Recent
            }
        }
    }
}

/// Popularity score of one record.
///
/// - events: applications + RSVPs
/// - brand profiles: talent partners
/// - talent profiles: brand partners
pub fn score_for<T: Listing + ?Sized>(entity: &T) -> usize {
    entity.popularity()
}

/// Order `items` by `strategy`.
///
/// ## Algorithm
/// - `Recent`: descending lexicographic id
/// - `Popular`: descending [`score_for`], ties keep input order
pub fn rank<T: Listing>(mut items: Vec<T>, strategy: SortStrategy) -> Vec<T> {
    match strategy {
        SortStrategy::Recent => items.sort_by(|a, b| b.id().cmp(a.id())),
        SortStrategy::Popular => items.sort_by_key(|item| Reverse(score_for(item))),
    }
    items
}

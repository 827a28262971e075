//! Favorite tracking for events.
//!
//! Each viewer has a set of favorited event ids persisted under
//! `favorites:<viewerId>` as a JSON array. A separate one-time flag records
//! that the "tap the star to favorite" hint has been shown.

use crate::store::{KeyValueStore, ResilientStore};
use catalog::{EventId, Viewer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Prefix of the per-viewer favorites key
pub const FAVORITES_PREFIX: &str = "favorites";

/// Key of the hint flag in shared scope
pub const HINT_KEY: &str = "favorites_hint_shown";

pub fn favorites_key(viewer_id: &str) -> String {
    format!("{}:{}", FAVORITES_PREFIX, viewer_id)
}

/// Whether the hint flag is one key for everyone or one per viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HintScope {
    #[default]
    Shared,
    PerViewer,
}

/// Result of one toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Membership after the toggle
    pub favorited: bool,
    /// This toggle was the first ever performed in the hint's scope
    pub hint_revealed: bool,
}

impl ToggleOutcome {
    pub fn notice(&self) -> &'static str {
        if self.favorited {
            "Added to favorites"
        } else {
            "Removed from favorites"
        }
    }

    pub fn detail(&self) -> &'static str {
        if self.favorited {
            "Event added to your favorites list. View it in My Events."
        } else {
            "Event removed from your favorites list"
        }
    }
}

/// Tracks favorited events per viewer.
///
/// ## Algorithm
/// `toggle_favorite` reads the viewer's current set (seeded from the
/// viewer's own `favorite_events` when nothing is stored yet), flips
/// membership of the event, writes the set back, then sets the hint flag if
/// it was unset. Toggling twice restores the starting set.
pub struct FavoriteTracker<S> {
    store: ResilientStore<S>,
    hint_scope: HintScope,
}

impl<S: KeyValueStore> FavoriteTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: ResilientStore::new(store),
            hint_scope: HintScope::default(),
        }
    }

    pub fn with_hint_scope(mut self, hint_scope: HintScope) -> Self {
        self.hint_scope = hint_scope;
        self
    }

    /// True once a store failure has moved the tracker to in-memory state
    pub fn is_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    /// Current favorite set of `viewer`
    pub fn favorites(&mut self, viewer: &Viewer) -> BTreeSet<EventId> {
        let seed = || viewer.favorite_events.clone().unwrap_or_default();
        let key = favorites_key(&viewer.id);

        match self.store.get(&key) {
            Some(raw) => match serde_json::from_str::<Vec<EventId>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    warn!("Discarding undecodable {}: {}", key, e);
                    seed()
                }
            },
            None => seed(),
        }
    }

    pub fn is_favorite(&mut self, viewer: &Viewer, event_id: &str) -> bool {
        self.favorites(viewer).contains(event_id)
    }

    /// Whether the favorites hint has been shown in `viewer`'s hint scope
    pub fn hint_shown(&mut self, viewer: &Viewer) -> bool {
        let key = self.hint_key(&viewer.id);
        self.store.get(&key).is_some_and(|v| v == "true")
    }

    pub fn toggle_favorite(&mut self, viewer: &Viewer, event_id: &str) -> ToggleOutcome {
        let mut favorites = self.favorites(viewer);
        let favorited = if favorites.remove(event_id) {
            false
        } else {
            favorites.insert(event_id.to_string());
            true
        };
        self.write_favorites(&viewer.id, &favorites);

        let hint_revealed = !self.hint_shown(viewer);
        if hint_revealed {
            let key = self.hint_key(&viewer.id);
            self.store.set(&key, "true");
        }

        debug!(
            "Viewer {:?} toggled event {} -> {} ({} favorites)",
            viewer.id,
            event_id,
            favorited,
            favorites.len()
        );
        ToggleOutcome {
            favorited,
            hint_revealed,
        }
    }

    fn write_favorites(&mut self, viewer_id: &str, favorites: &BTreeSet<EventId>) {
        match serde_json::to_string(favorites) {
            Ok(raw) => self.store.set(&favorites_key(viewer_id), &raw),
            Err(e) => warn!("Could not encode favorites for {:?}: {}", viewer_id, e),
        }
    }

    fn hint_key(&self, viewer_id: &str) -> String {
        match self.hint_scope {
            HintScope::Shared => HINT_KEY.to_string(),
            HintScope::PerViewer => format!("{}:{}", HINT_KEY, viewer_id),
        }
    }
}

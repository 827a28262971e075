//! Persisted identity of the signed-in viewer.
//!
//! The session only stores and restores the viewer. Every query still takes
//! the viewer as an explicit argument.

use crate::store::{KeyValueStore, ResilientStore};
use catalog::{Catalog, Role, Viewer};
use tracing::{info, warn};

/// Key of the JSON current-viewer blob
pub const CURRENT_VIEWER_KEY: &str = "current_viewer";

pub struct SessionContext<S> {
    store: ResilientStore<S>,
}

impl<S: KeyValueStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: ResilientStore::new(store),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    /// Sign in as the first catalog account holding `role`.
    ///
    /// Returns `None`, leaving any existing session untouched, when no
    /// account has that role.
    pub fn login(&mut self, catalog: &Catalog, role: Role) -> Option<Viewer> {
        let Some(viewer) = catalog.viewer_for_role(role) else {
            warn!("No account with role {}", role);
            return None;
        };
        self.login_as(viewer);
        Some(viewer.clone())
    }

    /// Make `viewer` the current viewer
    pub fn login_as(&mut self, viewer: &Viewer) {
        match serde_json::to_string(viewer) {
            Ok(blob) => {
                self.store.set(CURRENT_VIEWER_KEY, &blob);
                info!("Signed in as {} ({})", viewer.display_name(), viewer.role);
            }
            Err(e) => warn!("Could not encode viewer {:?}: {}", viewer.id, e),
        }
    }

    /// The stored viewer. A missing or undecodable blob means nobody.
    pub fn current(&mut self) -> Option<Viewer> {
        let blob = self.store.get(CURRENT_VIEWER_KEY)?;
        match serde_json::from_str(&blob) {
            Ok(viewer) => Some(viewer),
            Err(e) => {
                warn!("Ignoring undecodable {}: {}", CURRENT_VIEWER_KEY, e);
                None
            }
        }
    }

    /// The stored viewer, or an anonymous public viewer
    pub fn current_or_anonymous(&mut self) -> Viewer {
        self.current().unwrap_or_else(Viewer::anonymous)
    }

    /// Sign out, returning who was signed in
    pub fn logout(&mut self) -> Option<Viewer> {
        let previous = self.current();
        self.store.remove(CURRENT_VIEWER_KEY);
        if let Some(viewer) = &previous {
            info!("Signed out {}", viewer.display_name());
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::store::testing::BrokenStore;

    fn create_test_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_viewer(Viewer::new("1", Role::Admin).with_name("Admin User"));
        catalog.insert_viewer(Viewer::new("4", Role::Brand).with_name("Brand User"));
        catalog.insert_viewer(Viewer::new("7", Role::Brand).with_name("Second Brand"));
        catalog
    }

    #[test]
    fn test_login_logout_round_trip() {
        let catalog = create_test_catalog();
        let mut session = SessionContext::new(MemoryStore::new());
        assert_eq!(session.current(), None);

        let viewer = session.login(&catalog, Role::Brand).unwrap();
        assert_eq!(viewer.id, "4");
        assert_eq!(session.current(), Some(viewer.clone()));

        assert_eq!(session.logout(), Some(viewer));
        assert_eq!(session.current(), None);
        assert_eq!(session.current_or_anonymous(), Viewer::anonymous());
    }

    #[test]
    fn test_login_without_account_keeps_session() {
        let catalog = create_test_catalog();
        let mut session = SessionContext::new(MemoryStore::new());
        session.login(&catalog, Role::Admin);

        assert_eq!(session.login(&catalog, Role::Talent), None);
        assert_eq!(session.current().map(|v| v.role), Some(Role::Admin));
    }

    #[test]
    fn test_undecodable_blob_is_nobody() {
        let mut store = MemoryStore::new();
        store.set(CURRENT_VIEWER_KEY, "{broken").unwrap();
        let mut session = SessionContext::new(store);
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_broken_store_keeps_session_in_memory() {
        let catalog = create_test_catalog();
        let mut session = SessionContext::new(BrokenStore);

        session.login(&catalog, Role::Admin);
        assert!(session.is_degraded());
        assert_eq!(session.current().map(|v| v.id), Some("1".to_string()));
        session.logout();
        assert_eq!(session.current(), None);
    }
}

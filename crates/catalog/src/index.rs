//! Catalog building and validation.
//!
//! Turns parsed snapshot files into a [`Catalog`] and checks that ids are
//! unique within each collection.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl Catalog {
    /// Load a snapshot directory.
    ///
    /// Steps:
    /// 1. Parse the four snapshot files in parallel
    /// 2. Insert every record
    /// 3. Validate id uniqueness per collection
    pub fn load_from_dir(snapshot_dir: &Path) -> Result<Self> {
        info!("Loading snapshot from {}", snapshot_dir.display());

        let brands_path = snapshot_dir.join("brands.json");
        let talent_path = snapshot_dir.join("talent.json");
        let events_path = snapshot_dir.join("events.json");
        let users_path = snapshot_dir.join("users.json");

        // Nested joins give four-way parallelism
        let ((brands, talent), (events, viewers)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_profiles(&brands_path, PartyKind::Brand),
                    || parser::parse_profiles(&talent_path, PartyKind::Talent),
                )
            },
            || {
                rayon::join(
                    || parser::parse_events(&events_path),
                    || parser::parse_viewers(&users_path),
                )
            },
        );

        let mut catalog = Catalog::new();
        for profile in brands?.into_iter().chain(talent?) {
            catalog.insert_profile(profile);
        }
        for event in events? {
            catalog.insert_event(event);
        }
        for viewer in viewers? {
            catalog.insert_viewer(viewer);
        }

        catalog.validate()?;

        let (brands, talent, events, viewers) = catalog.counts();
        info!(
            "Loaded {} brands, {} talent, {} events, {} accounts",
            brands, talent, events, viewers
        );
        Ok(catalog)
    }

    /// Check that no collection holds two records with the same id
    pub fn validate(&self) -> Result<()> {
        check_unique("brands", self.brands.iter().map(|p| p.id.as_str()))?;
        check_unique("talent", self.talent.iter().map(|p| p.id.as_str()))?;
        check_unique("events", self.events.iter().map(|e| e.id.as_str()))?;
        check_unique("users", self.viewers.iter().map(|v| v.id.as_str()))?;
        Ok(())
    }
}

fn check_unique<'a>(collection: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

//! # Directory Orchestrator
//!
//! Entry points for the directory and events pages. Each operation runs the
//! same stages:
//! 1. Query the catalog collection through the visibility-first pipeline
//! 2. Rank the survivors by the requested strategy
//! 3. Slice the ranked result into the requested page
//!
//! The viewer and the current instant arrive in a [`QueryContext`]; nothing
//! here reads a session or a clock.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use catalog::{Catalog, Event, EventId, PartyKind, Profile, Viewer};
use pipeline::{
    QueryContext, QueryFilters, SortStrategy, TabScope, VisibilityEvaluator, query, rank,
};
use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::roles::RoleView;

// =============================================================================
// Paging
// =============================================================================

/// Window into a ranked result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    pub offset: usize,
    /// `None` takes everything after `offset`
    pub limit: Option<usize>,
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }

    /// Everything
    pub fn all() -> Self {
        Self::default()
    }

    /// The `number`th page (zero-based) of `size` rows
    pub fn nth(number: usize, size: usize) -> Self {
        Self::new(number.saturating_mul(size), size)
    }

    pub fn slice<T>(&self, items: Vec<T>) -> Paged<T> {
        let total = items.len();
        let items = items
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();
        Paged {
            items,
            total,
            offset: self.offset,
        }
    }
}

/// One page of a ranked result
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// Size of the full result before slicing
    pub total: usize,
    pub offset: usize,
}

impl<T> Paged<T> {
    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }
}

// =============================================================================
// Single-record lookups
// =============================================================================

/// Outcome of opening one record by id
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    /// No record has that id
    NotFound,
    /// The record exists but the viewer may not see it
    Hidden,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Coordinates catalog, visibility, filtering and ranking for every page
#[derive(Clone)]
pub struct DirectoryOrchestrator {
    catalog: Arc<Catalog>,
    evaluator: VisibilityEvaluator,
    config: EngineConfig,
}

impl DirectoryOrchestrator {
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        let evaluator = VisibilityEvaluator::new(config.categories.clone());
        Self {
            catalog,
            evaluator,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn evaluator(&self) -> &VisibilityEvaluator {
        &self.evaluator
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn role_view(&self, viewer: &Viewer) -> &'static RoleView {
        RoleView::for_role(viewer.role)
    }

    /// Visible, filtered, ranked profiles of one kind
    #[instrument(
        skip(self, context, filters),
        fields(viewer = %context.viewer.id, role = %context.viewer.role)
    )]
    pub fn directory(
        &self,
        kind: PartyKind,
        context: &QueryContext<'_>,
        filters: &QueryFilters,
        sort: SortStrategy,
        page: Page,
    ) -> Paged<&Profile> {
        let start_time = Instant::now();

        let matched = query(self.catalog.profiles(kind), filters, context, &self.evaluator);
        let paged = page.slice(rank(matched, sort));

        info!(
            "Directory {}: {} of {} profiles in {:.2?}",
            kind,
            paged.items.len(),
            paged.total,
            start_time.elapsed()
        );
        paged
    }

    /// Visible, filtered, ranked events
    #[instrument(
        skip(self, context, filters),
        fields(
            viewer = %context.viewer.id,
            role = %context.viewer.role,
            scope = filters.scope.as_str()
        )
    )]
    pub fn events(
        &self,
        context: &QueryContext<'_>,
        filters: &QueryFilters,
        sort: SortStrategy,
        page: Page,
    ) -> Paged<&Event> {
        let start_time = Instant::now();

        let matched = query(self.catalog.events(), filters, context, &self.evaluator);
        let paged = page.slice(rank(matched, sort));

        info!(
            "Events: {} of {} in {:.2?}",
            paged.items.len(),
            paged.total,
            start_time.elapsed()
        );
        paged
    }

    pub fn event_detail(&self, viewer: &Viewer, id: &str) -> Lookup<&Event> {
        match self.catalog.get_event(id) {
            None => Lookup::NotFound,
            Some(event) if self.evaluator.is_visible(event, viewer) => Lookup::Found(event),
            Some(_) => {
                debug!("Event {} hidden from {:?}", id, viewer.id);
                Lookup::Hidden
            }
        }
    }

    pub fn profile_detail(&self, viewer: &Viewer, kind: PartyKind, id: &str) -> Lookup<&Profile> {
        match self.catalog.get_profile(kind, id) {
            None => Lookup::NotFound,
            Some(profile) if self.evaluator.is_visible(profile, viewer) => Lookup::Found(profile),
            Some(_) => {
                debug!("{} profile {} hidden from {:?}", kind, id, viewer.id);
                Lookup::Hidden
            }
        }
    }

    /// Most popular visible events across all dates.
    ///
    /// `limit` defaults to the configured rail length.
    #[instrument(skip(self, context), fields(viewer = %context.viewer.id))]
    pub fn popular_events(&self, context: &QueryContext<'_>, limit: Option<usize>) -> Vec<&Event> {
        let limit = limit.unwrap_or(self.config.popular_limit);
        let filters = QueryFilters::new().with_scope(TabScope::All);

        let matched = query(self.catalog.events(), &filters, context, &self.evaluator);
        let mut ranked = rank(matched, SortStrategy::Popular);
        ranked.truncate(limit);

        info!("Selected {} popular events", ranked.len());
        ranked
    }

    /// The profile the viewer owns, whatever its tags.
    ///
    /// Admin and public viewers own no profile.
    pub fn own_profile(&self, viewer: &Viewer) -> Option<&Profile> {
        let kind = viewer.role.party()?;
        self.catalog.get_profile(kind, &viewer.id)
    }

    /// Favorited events the viewer may still see, most recent first.
    ///
    /// Ids that no longer resolve or have become hidden are skipped.
    pub fn watchlist(&self, viewer: &Viewer, favorites: &BTreeSet<EventId>) -> Vec<&Event> {
        let visible: Vec<&Event> = favorites
            .iter()
            .filter_map(|id| self.catalog.get_event(id))
            .filter(|event| self.evaluator.is_visible(*event, viewer))
            .collect();

        if visible.len() < favorites.len() {
            debug!(
                "Watchlist dropped {} unresolved or hidden favorites",
                favorites.len() - visible.len()
            );
        }
        rank(visible, SortStrategy::Recent)
    }
}

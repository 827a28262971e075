//! Query pipeline for directory profiles and events.
//!
//! This crate provides:
//! - VisibilityEvaluator deciding what a viewer may see
//! - Filter trait and implementations for each query predicate
//! - FilterPipeline for composing filters
//! - Ranking by recency or popularity
//!
//! ## Architecture
//! A query runs in stages:
//! 1. Visibility drops records the viewer may not see
//! 2. Scope, search, category, event-type and date-range filters narrow the
//!    remainder
//! 3. Ranking orders what is left
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{query, rank, QueryContext, QueryFilters, SortStrategy, VisibilityEvaluator};
//!
//! let evaluator = VisibilityEvaluator::default();
//! let context = QueryContext::new(&viewer, Utc::now());
//! let filters = QueryFilters::new().with_scope("upcoming").with_search("party");
//!
//! let events = query(catalog.events(), &filters, &context, &evaluator);
//! let events = rank(events, SortStrategy::Popular);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod query;
pub mod ranking;
pub mod traits;
pub mod visibility;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use query::{
    ALL_EVENT_TYPES, DateRange, QueryContext, QueryFilters, TabScope, build_pipeline, query,
};
pub use ranking::{SortStrategy, rank, score_for};
pub use traits::{Filter, Listing};
pub use visibility::{ALL_CATEGORIES, CategoryUniverse, VisibilityEvaluator};

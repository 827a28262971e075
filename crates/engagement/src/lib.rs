//! # Engagement Crate
//!
//! Per-viewer state that outlives a single query: favorited events, the
//! one-time favorites hint, and the signed-in viewer.
//!
//! ## Main Components
//!
//! - **store**: `KeyValueStore` trait with memory and JSON file backends,
//!   plus `ResilientStore` which degrades to memory on failure
//! - **favorites**: `FavoriteTracker` toggling favorites and the hint flag
//! - **session**: `SessionContext` persisting the current viewer
//! - **error**: Store error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use engagement::{FavoriteTracker, FileStore, SessionContext};
//!
//! let mut store = FileStore::open("slate-store.json")?;
//! let viewer = SessionContext::new(&mut store).current_or_anonymous();
//!
//! let mut tracker = FavoriteTracker::new(&mut store);
//! let outcome = tracker.toggle_favorite(&viewer, "1");
//! println!("{}", outcome.notice());
//! ```

pub mod error;
pub mod favorites;
pub mod session;
pub mod store;

pub use error::{Result, StoreError};
pub use favorites::{FavoriteTracker, HintScope, ToggleOutcome, favorites_key};
pub use session::{CURRENT_VIEWER_KEY, SessionContext};
pub use store::{FileStore, KeyValueStore, MemoryStore, ResilientStore};

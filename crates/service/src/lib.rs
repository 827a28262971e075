//! Service crate for the SLATE directory engine.
//!
//! This crate ties the catalog, the query pipeline and engagement state
//! together behind the operations the directory and events pages call.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod roles;

pub use config::EngineConfig;
pub use error::{ConfigError, Result};
pub use orchestrator::{DirectoryOrchestrator, Lookup, Page, Paged};
pub use roles::{Dashboard, RoleView};

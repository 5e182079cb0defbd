//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, save-location helpers, and navigator
//! assembly that can be reused by CLI, UI, or other front-end crates.
pub mod builder;
pub mod config;
pub mod session;

pub use builder::{build_navigator, default_skills};
pub use config::ClientConfig;
pub use session::{default_save_dir, list_actors, resolve_save_dir};

//! Memento: organize photo memories into timestamped static galleries

pub mod engine;
pub mod pipeline;
pub mod scan;
pub mod state;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use pipeline::{save_memory, save_memory_at};
pub use scan::{list_images, scan_directory};
pub use state::StateStore;

/// Result alias used by public memento API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

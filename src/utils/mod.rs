pub mod config;
pub mod env;
pub mod logger;
pub mod memento_toml;
pub mod tempfiles;

pub use config::*;
pub use env::resolve_state_dir;
pub use logger::{Colors, setup_logging};
pub use tempfiles::{rename_temp_to_final, temp_path_for, write_atomically};

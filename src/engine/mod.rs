//! Engine module: CLI surface and shared helpers

pub mod arg_parser;
pub mod cli;
pub mod handlers;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::{Cli, Commands, SaveArgs, parse_note};
pub use cli::handle_run;
pub use tools::{
    has_extension, is_candidate_image_name, is_hidden_name, is_plain_file_name,
    memory_folder_name, strip_html_tags,
};

//! Export pipeline: layout, concurrent copy/thumbnail ops, gallery template, orchestration.

pub mod context;
pub mod error_handler;
pub mod ops;
pub mod orchestrator;
pub mod template;
pub mod thumbnail;

pub use context::{ExportContext, ExportLayout, create_dir_idempotent};
pub use error_handler::FailureLog;
pub use ops::{FileOp, FileOpsResult, plan_file_ops, run_file_ops};
pub use orchestrator::{save_memory, save_memory_at};
pub use template::{GalleryItem, find_element_by_id, gallery_item_html, load_template, render_gallery};
pub use thumbnail::{generate_thumbnail, scaled_height};

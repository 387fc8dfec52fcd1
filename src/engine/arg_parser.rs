use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Organize photo memories: pick folders, scan, export galleries.
#[derive(Clone, Parser)]
#[command(name = "memento")]
#[command(about = "Export selected photos with thumbnails into a timestamped HTML gallery.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// State file. Default: `memento.json` in MEMENTO_HOME or the user data directory.
    #[arg(long, global = true, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Verbose output (debug logs and export progress bar).
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Set the folder images are picked from.
    Source {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
    /// Set the folder memories are exported into.
    Destination {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
    /// List images in DIR (default: the source folder), marking handled ones.
    Scan {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Export images from the source folder as a new memory.
    Save(SaveArgs),
    /// List saved memories.
    Memories,
    /// Show folders, state file and counts.
    Status,
}

#[derive(Clone, Args)]
pub struct SaveArgs {
    /// Image file names inside the source folder.
    #[arg(value_name = "IMAGES")]
    pub images: Vec<String>,

    /// Memory description. HTML is kept in the gallery and stripped in the memory list.
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Caption for one image, as NAME=TEXT. Repeatable.
    #[arg(long = "note", short = 'n', value_name = "NAME=TEXT", value_parser = parse_note)]
    pub notes: Vec<(String, String)>,

    /// Also select every image in the source folder that no memory includes yet.
    #[arg(long, short = 'u')]
    pub unhandled: bool,

    /// Gallery template file (must contain #grid and #description elements).
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Thumbnail width in pixels.
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..=65535))]
    pub thumb_width: Option<u32>,

    /// Thumbnail JPEG quality.
    #[arg(long, short = 'q', value_name = "1-100", value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

/// Parse `NAME=TEXT` (split on the first `=`).
pub fn parse_note(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, text)) if !name.is_empty() => Ok((name.to_string(), text.to_string())),
        _ => Err(format!("expected NAME=TEXT, got `{s}`")),
    }
}

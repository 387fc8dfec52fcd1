//! CLI command dispatch: resolve options and state, then run the subcommand.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::engine::arg_parser::{Cli, Commands};
use crate::engine::handlers::{
    handle_destination, handle_memories, handle_save, handle_scan, handle_source, handle_status,
};
use crate::state::StateStore;
use crate::utils::config::PackagePaths;
use crate::utils::memento_toml::{apply_file_to_opts, load_memento_toml};
use crate::utils::{resolve_state_dir, setup_logging};

/// State file and the directory its config lives in: `--state` wins, else MEMENTO_HOME / data dir.
fn state_location(cli: &Cli) -> Result<(PathBuf, PathBuf)> {
    match &cli.state {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((path.clone(), dir))
        }
        None => {
            let cwd = std::env::current_dir().context("read working directory")?;
            let dir = resolve_state_dir(&cwd);
            Ok((PackagePaths::get().state_path_in(&dir), dir))
        }
    }
}

/// Defaults → `.memento.toml` in the state dir → CLI flags.
fn setup_opts(cli: &Cli, state_path: PathBuf, state_dir: &Path) -> Opts {
    let mut opts = Opts {
        state_path: Some(state_path),
        verbose: cli.verbose,
        ..Default::default()
    };
    if let Some(file) = load_memento_toml(state_dir) {
        apply_file_to_opts(&file, state_dir, &mut opts);
    }
    if let Commands::Save(args) = &cli.command {
        if let Some(t) = &args.template {
            opts.export.template = Some(t.clone());
        }
        if let Some(w) = args.thumb_width {
            opts.export.thumb_width = w;
        }
        if let Some(q) = args.quality {
            opts.export.jpeg_quality = q;
        }
    }
    opts.export.progress = opts.verbose;
    opts
}

/// Run the parsed command line.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose);
    let (state_path, state_dir) = state_location(cli)?;
    let opts = setup_opts(cli, state_path.clone(), &state_dir);
    debug!("{} CONFIG:{:#?}", PackagePaths::get().pkg_name().to_uppercase(), opts);
    let mut store = StateStore::open(&state_path)?;

    match &cli.command {
        Commands::Source { dir } => handle_source(&mut store, dir),
        Commands::Destination { dir } => handle_destination(&mut store, dir),
        Commands::Scan { dir } => handle_scan(&mut store, dir.as_deref()),
        Commands::Save(args) => handle_save(&mut store, args, &opts),
        Commands::Memories => handle_memories(&store),
        Commands::Status => handle_status(&store),
    }
}

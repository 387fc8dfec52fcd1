use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::Level;
use std::io::Write;

pub fn setup_logging(verbose: bool) {
    use log::LevelFilter;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // try_init: tests and embedding programs may already have a logger installed.
    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn) // Default: only warnings from dependencies
        .filter_module(env!("CARGO_PKG_NAME"), level) // Our crate: use requested level
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        Level::Error => "ERROR".red(),
                        _ => unreachable!(),
                    };
                    let path = record.target().to_string().white();
                    format!("[{} {} {}] {}", name.cyan(), level_str, path, record.args())
                }
                _ => format!("[{}] {}", name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .try_init();
}

/// Colours used in CLI summaries.
pub struct Colors;

impl Colors {
    pub const OK: &'static str = "green";
    pub const FAILED: &'static str = "red";
    pub const HANDLED: &'static str = "bright black";
    pub const REFERENCE: &'static str = "cyan";

    pub fn colorize(color: &str, text: &str) -> ColoredString {
        text.color(color)
    }
}

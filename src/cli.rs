use std::path::PathBuf;

use clap::Parser;

/// A live-reloading previewer for local HTML documents.
///
/// htmlwatch displays a root HTML file, watches it along with every CSS, JS
/// and HTML-include file it transitively references, and re-renders the whole
/// document whenever any of them changes.
#[derive(Parser, Debug)]
#[command(name = "htmlwatch", version, about, long_about = None)]
pub struct Cli {
    /// Root HTML file to preview.
    #[arg(default_value = "index.html")]
    pub file: PathBuf,
}

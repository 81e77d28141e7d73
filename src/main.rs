use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;

use htmlwatch::cli::Cli;
use htmlwatch::config::PreviewConfig;
use htmlwatch::render::ConsoleSink;
use htmlwatch::session::WatchSession;
use htmlwatch::watcher::start_watcher;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let root = std::path::absolute(&cli.file)
        .with_context(|| format!("cannot resolve {}", cli.file.display()))?;
    let config = PreviewConfig::load(root.parent().unwrap_or(Path::new(".")));

    let mut session = WatchSession::new(root, config.fallback_title().to_string())
        .context("cannot open preview session")?;
    let (mut watcher, mut events) = start_watcher(config.debounce())
        .context("cannot start file watcher")?;
    let mut sink = ConsoleSink;

    // Initial load. A root that cannot be read at startup is fatal; once the
    // first load succeeds, later failures keep the last loaded content up.
    let reload = session
        .reload(&mut sink)
        .with_context(|| format!("cannot load {}", session.root().display()))?;
    watcher.sync(&reload);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => break,
            event = events.recv() => {
                let Some(path) = event else { break };
                match session.on_path_changed(&path, &mut sink) {
                    Ok(reload) => watcher.sync(&reload),
                    Err(err) => eprintln!("warning: {err}; keeping last loaded content"),
                }
            }
        }
    }

    Ok(())
}

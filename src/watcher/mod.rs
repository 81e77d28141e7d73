use std::path::PathBuf;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use tokio::sync::mpsc as tokio_mpsc;
use tokio::task::JoinHandle;

use crate::session::Reload;

/// Handle to a running watcher. Keeps the debouncer alive (dropping stops
/// watching) and applies watch-set deltas after each reload.
pub struct PathWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    /// The bridge task forwarding events from std channel to tokio channel.
    _bridge_task: JoinHandle<()>,
}

impl PathWatcher {
    /// Re-sync the observed paths with a reload's watch-set delta.
    ///
    /// Adding is idempotent; removing a path that was already deleted from
    /// disk is harmless. Each watched path is a single file, observed
    /// non-recursively.
    pub fn sync(&mut self, reload: &Reload) {
        for path in &reload.removed {
            let _ = self.debouncer.watcher().unwatch(path);
        }
        for path in &reload.added {
            if let Err(err) = self
                .debouncer
                .watcher()
                .watch(path, RecursiveMode::NonRecursive)
            {
                eprintln!("warning: cannot watch {}: {err}", path.display());
            }
        }
    }
}

/// Start a debounced file watcher with no paths observed yet.
///
/// Returns a `PathWatcher` (must be kept alive) and a tokio mpsc receiver
/// yielding the changed paths. Modifications, creations and deletions all
/// surface the same way; every event triggers the same full reload, so no
/// classification is needed.
pub fn start_watcher(
    debounce: Duration,
) -> anyhow::Result<(PathWatcher, tokio_mpsc::Receiver<PathBuf>)> {
    let (std_tx, std_rx) = std::sync::mpsc::channel::<DebounceEventResult>();

    let debouncer = new_debouncer(debounce, move |res| {
        let _ = std_tx.send(res);
    })?;

    let (tokio_tx, tokio_rx) = tokio_mpsc::channel::<PathBuf>(256);

    // Bridge: spawn_blocking to receive from std channel, forward to tokio.
    let bridge_task = tokio::task::spawn_blocking(move || {
        while let Ok(result) = std_rx.recv() {
            match result {
                Ok(events) => {
                    for event in events {
                        if tokio_tx.blocking_send(event.path).is_err() {
                            return; // receiver dropped, shutdown
                        }
                    }
                }
                Err(err) => {
                    eprintln!("warning: watch error: {err:?}");
                }
            }
        }
    });

    Ok((
        PathWatcher {
            debouncer,
            _bridge_task: bridge_task,
        },
        tokio_rx,
    ))
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the user.
///
/// Only root-document reads are reported: a referenced dependency that cannot
/// be read mid-scan is skipped silently, since assets are routinely absent
/// for a moment while an editor saves.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The root document could not be opened or read. Fatal to the reload
    /// attempt, never to the process — the last successfully loaded content
    /// stays up.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::error::PreviewError;
use crate::render::RenderSink;
use crate::scanner::{self, DependencySet};

/// First `<title>...</title>` in the root document, case-insensitive.
const TITLE_PATTERN: &str = r"(?is)<title>(.*?)</title>";

static TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(TITLE_PATTERN).expect("invalid title pattern"))
}

/// Summary of one completed reload.
///
/// `added` and `removed` are the watch-set delta the file-watch collaborator
/// must apply: paths newly referenced by the document, and paths it no
/// longer references. The session owns the watch set; the watcher is only
/// told what to observe.
#[derive(Debug)]
pub struct Reload {
    /// Display title extracted from the root document, or the fallback.
    pub title: String,
    /// Paths that entered the dependency set and must now be watched.
    pub added: Vec<PathBuf>,
    /// Paths that left the dependency set and should no longer be watched.
    pub removed: Vec<PathBuf>,
}

/// One preview session over a single root document.
///
/// Owns the root path (immutable after construction), the current dependency
/// set and the watched-path registry. All mutation happens inside `reload`,
/// which the single event-loop task runs to completion before the next change
/// notification is handled, so no locking is needed.
pub struct WatchSession {
    root: PathBuf,
    file_url: Url,
    fallback_title: String,
    dependencies: DependencySet,
    watched: HashSet<PathBuf>,
}

impl WatchSession {
    /// Create a session for `root` without loading it yet. The path is made
    /// absolute here once; dependency-set identity is the normalized absolute
    /// path.
    pub fn new(root: PathBuf, fallback_title: String) -> io::Result<Self> {
        let root = std::path::absolute(&root)?;
        let file_url = Url::from_file_path(&root).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not representable as a file:// URL", root.display()),
            )
        })?;

        let dependencies = DependencySet::from([root.clone()]);

        Ok(Self {
            root,
            file_url,
            fallback_title,
            dependencies,
            watched: HashSet::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    pub fn watched(&self) -> &HashSet<PathBuf> {
        &self.watched
    }

    /// Run the full scan-and-redisplay sequence.
    ///
    /// Reads the root document, recomputes the dependency set from scratch
    /// (stale references drop out naturally), replaces the watch set with the
    /// fresh dependency set, and signals the rendering collaborator. Returns
    /// the watch-set delta for the file-watch collaborator to apply.
    ///
    /// A root that cannot be read fails the whole attempt with
    /// [`PreviewError::Read`] and leaves the session state untouched.
    pub fn reload(&mut self, sink: &mut dyn RenderSink) -> Result<Reload, PreviewError> {
        let contents = std::fs::read_to_string(&self.root).map_err(|source| PreviewError::Read {
            path: self.root.clone(),
            source,
        })?;

        self.dependencies = scanner::scan(&self.root);

        let added: Vec<PathBuf> = self.dependencies.difference(&self.watched).cloned().collect();
        let removed: Vec<PathBuf> = self.watched.difference(&self.dependencies).cloned().collect();
        self.watched = self.dependencies.clone();

        let title = extract_title(&contents)
            .unwrap_or_else(|| self.fallback_title.clone());

        sink.render(&self.file_url);
        sink.set_title(&title);

        Ok(Reload { title, added, removed })
    }

    /// Change notification for any currently-watched path.
    ///
    /// Which path changed is irrelevant: the whole document re-renders from
    /// the root, never an incremental patch.
    pub fn on_path_changed(
        &mut self,
        _path: &Path,
        sink: &mut dyn RenderSink,
    ) -> Result<Reload, PreviewError> {
        self.reload(sink)
    }
}

/// Extract the display title from a document's text, if any.
fn extract_title(contents: &str) -> Option<String> {
    title_re()
        .captures(contents)
        .map(|capture| capture[1].trim().to_string())
}

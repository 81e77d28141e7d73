//! Live-reloading previewer core for local HTML documents.
//!
//! The crate splits into a testable core and two external collaborators:
//!
//! - [`scanner`] discovers the transitive closure of CSS/JS/HTML-include
//!   files referenced from a root document.
//! - [`session`] owns the root path, the dependency set and the watched-path
//!   registry, and runs the full scan-and-redisplay sequence on every change.
//! - [`render`] is the seam to the rendering collaborator (the actual
//!   browser surface lives outside this crate).
//! - [`watcher`] is the file-watch collaborator: a debounced notify watcher
//!   over the explicit path set, bridged onto the tokio event loop.

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod scanner;
pub mod session;
pub mod watcher;

//! Integration test suite — drives the library end-to-end on tempdir
//! fixtures.
//!
//! The `htmlwatch` binary itself runs an event loop until Ctrl-C, so
//! subprocess coverage via `CARGO_BIN_EXE_htmlwatch` is limited to the
//! startup failure path; everything else exercises the session, scanner and
//! watcher directly, including one test against the real notify backend.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use tempfile::TempDir;
use url::Url;

use htmlwatch::render::RenderSink;
use htmlwatch::scanner;
use htmlwatch::session::WatchSession;
use htmlwatch::watcher::start_watcher;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_htmlwatch"))
}

fn tmp() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[derive(Default)]
struct RecordingSink {
    rendered: Vec<Url>,
    titles: Vec<String>,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, url: &Url) {
        self.rendered.push(url.clone());
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }
}

fn session(root: PathBuf) -> WatchSession {
    WatchSession::new(root, "HTML Renderer".to_string()).expect("session")
}

// ---------------------------------------------------------------------------
// Scan + reload over a realistic document tree
// ---------------------------------------------------------------------------

/// A root page pulling in a stylesheet, a script, and a partial that itself
/// pulls in its own stylesheet from its own directory.
#[test]
fn test_reload_discovers_full_document_tree() {
    let dir = tmp();
    let partials = dir.path().join("partials");
    fs::create_dir(&partials).unwrap();

    let root = dir.path().join("index.html");
    let css = dir.path().join("site.css");
    let js = dir.path().join("app.js");
    let header = partials.join("header.html");
    let header_css = partials.join("header.css");

    fs::write(
        &root,
        r#"<html>
  <head>
    <title>Fixture Site</title>
    <link rel="stylesheet" href="site.css">
    <script defer src="app.js"></script>
  </head>
  <body>
    <div data-include="partials/header.html"></div>
  </body>
</html>"#,
    )
    .unwrap();
    fs::write(&css, "body { margin: 0 }").unwrap();
    fs::write(&js, "console.log('hi')").unwrap();
    fs::write(&header, r#"<link rel="stylesheet" href="header.css"><h1>hi</h1>"#).unwrap();
    fs::write(&header_css, "h1 { color: red }").unwrap();

    let mut session = session(root.clone());
    let mut sink = RecordingSink::default();
    let reload = session.reload(&mut sink).unwrap();

    assert_eq!(reload.title, "Fixture Site");
    assert_eq!(session.dependencies().len(), 5);
    for path in [&root, &css, &js, &header, &header_css] {
        assert!(
            session.dependencies().contains(path),
            "missing {}",
            path.display()
        );
    }
    assert_eq!(session.watched(), session.dependencies());
    assert_eq!(sink.rendered, vec![Url::from_file_path(&root).unwrap()]);
}

/// Editing the document to drop one asset and pick up another must re-sync
/// the watch set: the new asset is watched, the stale one is pruned.
#[test]
fn test_edit_cycle_resyncs_watch_set() {
    let dir = tmp();
    let root = dir.path().join("index.html");
    let b = dir.path().join("b.css");
    let c = dir.path().join("c.css");
    fs::write(&root, r#"<link rel="stylesheet" href="b.css">"#).unwrap();
    fs::write(&b, "").unwrap();
    fs::write(&c, "").unwrap();

    let mut session = session(root.clone());
    let mut sink = RecordingSink::default();
    session.reload(&mut sink).unwrap();
    assert!(session.watched().contains(&b));

    fs::write(&root, r#"<link rel="stylesheet" href="c.css">"#).unwrap();
    let reload = session.reload(&mut sink).unwrap();

    assert_eq!(reload.added, vec![c.clone()]);
    assert_eq!(reload.removed, vec![b.clone()]);
    assert!(session.watched().contains(&c));
    assert!(!session.watched().contains(&b));
}

/// A dependency deleted from disk disappears from the next scan without
/// failing the reload.
#[test]
fn test_deleted_dependency_drops_out_on_next_reload() {
    let dir = tmp();
    let root = dir.path().join("index.html");
    let css = dir.path().join("gone.css");
    fs::write(&root, r#"<link rel="stylesheet" href="gone.css">"#).unwrap();
    fs::write(&css, "").unwrap();

    let mut session = session(root.clone());
    let mut sink = RecordingSink::default();
    session.reload(&mut sink).unwrap();
    assert!(session.watched().contains(&css));

    fs::remove_file(&css).unwrap();
    let reload = session.reload(&mut sink).unwrap();

    assert_eq!(reload.removed, vec![css.clone()]);
    assert!(!session.watched().contains(&css));
    assert_eq!(session.dependencies().len(), 1);
}

/// `scan` is a pure query: running it twice over an unchanged tree yields the
/// same set.
#[test]
fn test_scan_is_stable_over_unchanged_tree() {
    let dir = tmp();
    let root = dir.path().join("index.html");
    let css = dir.path().join("a.css");
    fs::write(&root, r#"<link rel="stylesheet" href="a.css">"#).unwrap();
    fs::write(&css, "").unwrap();

    assert_eq!(scanner::scan(&root), scanner::scan(&root));
}

// ---------------------------------------------------------------------------
// Live watch loop against the real notify backend
// ---------------------------------------------------------------------------

/// Full loop: initial reload, watcher sync, touch a stylesheet, receive the
/// change notification, re-render from the root.
#[tokio::test]
async fn test_stylesheet_change_triggers_full_rerender() {
    let dir = tmp();
    let root = dir.path().join("index.html");
    let css = dir.path().join("a.css");
    fs::write(&root, r#"<title>Live</title><link rel="stylesheet" href="a.css">"#).unwrap();
    fs::write(&css, "body {}").unwrap();

    let mut session = session(root.clone());
    let (mut watcher, mut events) = start_watcher(Duration::from_millis(10)).unwrap();
    let mut sink = RecordingSink::default();

    let reload = session.reload(&mut sink).unwrap();
    watcher.sync(&reload);

    fs::write(&css, "body { margin: 0 }").unwrap();

    let changed = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for change notification")
        .expect("watcher channel closed");
    assert_eq!(changed, css);

    let reload = session.on_path_changed(&changed, &mut sink).unwrap();
    watcher.sync(&reload);

    assert_eq!(sink.rendered.len(), 2);
    assert_eq!(sink.rendered[1], Url::from_file_path(&root).unwrap());
    assert_eq!(sink.titles, vec!["Live".to_string(), "Live".to_string()]);
}

// ---------------------------------------------------------------------------
// Binary surface
// ---------------------------------------------------------------------------

/// A root document that does not exist is fatal at startup with a non-zero
/// exit and a readable error.
#[test]
fn test_missing_root_fails_at_startup() {
    let dir = tmp();
    let out = Command::new(binary())
        .arg(dir.path().join("does-not-exist.html"))
        .output()
        .expect("failed to invoke htmlwatch binary");

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("does-not-exist.html"),
        "stderr should name the missing file\nstderr: {stderr}"
    );
}

use std::collections::{HashSet, VecDeque};
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

/// The transitive closure of local asset paths referenced from a root
/// document, always including the root itself. Set semantics only — callers
/// must not rely on any ordering.
pub type DependencySet = HashSet<PathBuf>;

// ---------------------------------------------------------------------------
// Extraction patterns
// ---------------------------------------------------------------------------

/// `href` value of any `<link ...>` tag, where the value ends in `.css`.
/// Attribute order inside the tag does not matter.
const CSS_LINK_PATTERN: &str = r#"(?i)<link[^>]*?href\s*=\s*["']([^"']+?\.css)["']"#;

/// `src` value of any `<script ...>` tag, where the value ends in `.js`.
const SCRIPT_SRC_PATTERN: &str = r#"(?i)<script[^>]*?src\s*=\s*["']([^"']+?\.js)["']"#;

/// `data-include` value of any element, where the value ends in `.html`.
const HTML_INCLUDE_PATTERN: &str =
    r#"(?i)<\w[^>]*?data-include\s*=\s*["']([^"']+?\.html)["']"#;

static CSS_LINK_RE: OnceLock<Regex> = OnceLock::new();
static SCRIPT_SRC_RE: OnceLock<Regex> = OnceLock::new();
static HTML_INCLUDE_RE: OnceLock<Regex> = OnceLock::new();

fn css_link_re() -> &'static Regex {
    CSS_LINK_RE.get_or_init(|| Regex::new(CSS_LINK_PATTERN).expect("invalid css link pattern"))
}

fn script_src_re() -> &'static Regex {
    SCRIPT_SRC_RE.get_or_init(|| Regex::new(SCRIPT_SRC_PATTERN).expect("invalid script src pattern"))
}

fn html_include_re() -> &'static Regex {
    HTML_INCLUDE_RE
        .get_or_init(|| Regex::new(HTML_INCLUDE_PATTERN).expect("invalid html include pattern"))
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Discover the full dependency set of the document at `root`.
///
/// Starting from the root, every locally referenced CSS, JS and HTML-include
/// file is resolved relative to the directory of the file that references it,
/// added to the set, and scanned in turn for further references. Traversal is
/// an explicit work queue; the visited-set membership check doubles as the
/// cycle guard, so mutually including documents terminate.
///
/// Best-effort by design: a referenced file that does not exist or cannot be
/// read is skipped (its subtree stays undiscovered) — missing assets are
/// common mid-edit and must never abort a scan.
pub fn scan(root: &Path) -> DependencySet {
    let root = normalize(root);

    let mut discovered = DependencySet::new();
    discovered.insert(root.clone());

    let mut queue = VecDeque::from([root]);

    while let Some(current) = queue.pop_front() {
        let contents = match std::fs::read_to_string(&current) {
            Ok(c) => c,
            // Unreadable or vanished between discovery and read — skip.
            Err(_) => continue,
        };

        let base = current.parent().unwrap_or(Path::new("")).to_path_buf();

        for reference in extract_references(&contents) {
            // Scheme-qualified references (http://, https://, ...) are
            // remote assets, not watchable files.
            if reference.contains("://") {
                continue;
            }

            let resolved = normalize(&base.join(&reference));
            if discovered.contains(&resolved) || !resolved.exists() {
                continue;
            }

            discovered.insert(resolved.clone());
            queue.push_back(resolved);
        }
    }

    discovered
}

/// Extract every raw asset reference from a document's text.
///
/// Deliberately permissive pattern matching over the raw bytes rather than an
/// HTML parse: malformed markup degrades to "reference not found", never to
/// an error.
pub fn extract_references(contents: &str) -> Vec<String> {
    let mut references = Vec::new();

    for re in [css_link_re(), script_src_re(), html_include_re()] {
        for capture in re.captures_iter(contents) {
            references.push(capture[1].to_string());
        }
    }

    references
}

/// Lexically normalize a path: fold `.` and `..` components without touching
/// the filesystem. Dependency-set identity is the normalized absolute path,
/// so `dir/../style.css` and `style.css` collapse to one entry.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}

use url::Url;

/// The rendering collaborator seam.
///
/// The actual browser surface is external to this crate; the session only
/// needs "display this file URL" and "update the window title". Keeping the
/// seam as a trait keeps `WatchSession` free of UI handles and testable with
/// a recording double.
pub trait RenderSink {
    /// (Re)display the document at `url`.
    fn render(&mut self, url: &Url);

    /// Update the displayed title.
    fn set_title(&mut self, title: &str);
}

/// Thin presentation adapter that reports render and title events on stdout.
pub struct ConsoleSink;

impl RenderSink for ConsoleSink {
    fn render(&mut self, url: &Url) {
        println!("reload {url}");
    }

    fn set_title(&mut self, title: &str) {
        println!("title {title}");
    }
}

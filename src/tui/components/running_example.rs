//! # RunningExample
//!
//! The live preview. Its element holds a complete HTML document (the
//! iframe's `srcdoc`) built from the playground's css, html and compiled JS.
//!
//! Swapping in a new document reboots the whole page, so updates are
//! throttled:
//!
//! ```text
//! update(previous)
//!   previous.will_render = false            // supersede its pending refresh
//!   if previous.rendered_at is < max_age ago:
//!       after refresh_delay:
//!           if still will_render and document differs: swap content
//!           will_render = false
//!       keep previous.rendered_at
//!   else:
//!       rebuild now, rendered_at = now      // bounds staleness
//! ```
//!
//! Timers are never cancelled; a superseded one finds its flag cleared and
//! does nothing.

use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::{Language, LanguageName};
use crate::tui::black_box::{Element, ElementRef, Node};
use crate::tui::component::{BlackBox, Component, Lifecycle};
use crate::tui::highlight::highlight;

pub const PREVIEW_KEY: &str = "running-example";

/// Re-render hook installed in the preview page. Compiled once at startup
/// and inlined ahead of the user's script, so exceptions raised while
/// rendering land in the error container instead of the console only.
pub const RENDER_PATCH: &str = r#"module Clearwater
  class Application
    def perform_render
      if element.nil?
        raise TypeError, "Cannot render to a non-existent element. Make sure the document ready event has been triggered before invoking the application."
      end

      %x{
        try {
          var rendered = Opal.Clearwater.$const_get('Component').$sanitize_content(self.component.$render());
          self.$virtual_dom().$render(rendered);
        } catch(e) {
          console.error(e);
          console.error(e.stack);
          jsErrorContainer.innerText = [e.name, e.message].$join(' - ');
        }
      }

      @will_render = false
      run_callbacks
      nil
    end
  end
end
"#;

const ERROR_CONTAINER_STYLE: &str = "background-color: darkred; color: #f99; position: absolute; bottom: 0; left: 0; right: 0; overflow: scroll;";

/// The static parts of every preview document.
#[derive(Debug, Clone)]
pub struct DocumentShell {
    pub boilerplate_url: String,
    pub render_patch: String,
}

impl DocumentShell {
    /// Assembles the preview document.
    pub fn srcdoc(&self, html: &Language, css: &Language, js: &Language) -> String {
        format!(
            r#"<!DOCTYPE html>
<style>{css}</style>
{html}
<div id="js-error-container" style='{style}'></div>
<div id="ruby-error-container" style='{style}'></div>
<script src="{boilerplate}"></script>
<script>
  {patch}
  try {{
    var jsErrorContainer = document.getElementById('js-error-container');
    jsErrorContainer.innerText = '';
    {js}
  }} catch(e) {{
    jsErrorContainer.innerText = e.name + ' - ' + e.message;
  }}
</script>
"#,
            css = css.code,
            html = html.code,
            style = ERROR_CONTAINER_STYLE,
            boilerplate = self.boilerplate_url,
            patch = self.render_patch,
            js = js.code,
        )
    }
}

/// How often the preview may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    pub refresh_delay: Duration,
    pub max_age: Duration,
}

impl Default for Throttle {
    fn default() -> Self {
        Self {
            refresh_delay: Duration::from_secs(1),
            max_age: Duration::from_secs(600),
        }
    }
}

/// Mirrors the live preview document to a file, so a browser can show it.
#[derive(Debug)]
pub struct PreviewSink {
    path: PathBuf,
}

impl PreviewSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes next to the target and renames over it, so readers never see
    /// half a document.
    pub fn write(&self, document: &str) {
        if let Err(e) = self.try_write(document) {
            warn!("Failed to write preview to {}: {}", self.path.display(), e);
        }
    }

    fn try_write(&self, document: &str) -> io::Result<()> {
        let tmp = self.path.with_extension("html.tmp");
        fs::write(&tmp, document)?;
        fs::rename(&tmp, &self.path)
    }
}

pub struct RunningExample {
    srcdoc: String,
    rendered_at: Option<Instant>,
    will_render: Rc<Cell<bool>>,
    throttle: Throttle,
    sink: Option<Rc<PreviewSink>>,
}

impl RunningExample {
    pub fn new(srcdoc: String, throttle: Throttle, sink: Option<Rc<PreviewSink>>) -> Self {
        Self {
            srcdoc,
            rendered_at: None,
            will_render: Rc::new(Cell::new(true)),
            throttle,
            sink,
        }
    }

    pub fn srcdoc(&self) -> &str {
        &self.srcdoc
    }

    /// When the current element was last rebuilt from scratch.
    pub fn rendered_at(&self) -> Option<Instant> {
        self.rendered_at
    }

    pub fn will_render(&self) -> bool {
        self.will_render.get()
    }

    fn publish(&self, document: &str) {
        if let Some(sink) = &self.sink {
            sink.write(document);
        }
    }
}

impl BlackBox for RunningExample {
    fn key(&self) -> String {
        PREVIEW_KEY.to_string()
    }

    fn node(&self) -> Node {
        Node::new("iframe", PREVIEW_KEY, &self.srcdoc)
    }

    fn mount(&mut self, _element: &ElementRef, cx: &mut Lifecycle<'_>) {
        self.rendered_at = Some(cx.now);
        self.will_render.set(false);
        self.publish(&self.srcdoc);
    }

    fn update(&mut self, previous: &mut Self, element: &ElementRef, cx: &mut Lifecycle<'_>) {
        previous.will_render.set(false);

        let rendered_at = previous.rendered_at.unwrap_or(cx.now);
        if cx.now.saturating_duration_since(rendered_at) < self.throttle.max_age {
            let will_render = self.will_render.clone();
            let element = element.clone();
            let srcdoc = self.srcdoc.clone();
            let sink = self.sink.clone();
            cx.scheduler.delay(cx.now, self.throttle.refresh_delay, move || {
                // Against what is on screen: a rebuild since scheduling may
                // already show this document, or an older one.
                if will_render.get() && element.borrow().content() != srcdoc {
                    debug!("Refreshing preview ({} bytes)", srcdoc.len());
                    if let Some(sink) = &sink {
                        sink.write(&srcdoc);
                    }
                    element.borrow_mut().set_content(srcdoc);
                }
                will_render.set(false);
            });
            self.rendered_at = Some(rendered_at);
        } else {
            info!("Preview older than {:?}, rebuilding", self.throttle.max_age);
            self.rendered_at = Some(cx.now);
            element.borrow_mut().rebuild(self.node());
            self.publish(&self.srcdoc);
        }
    }
}

/// Paints the preview element: the live document's source, scrollable.
pub struct PreviewPane<'a> {
    pub element: &'a Element,
    /// Time since the element was last rebuilt.
    pub age: Option<Duration>,
    pub focused: bool,
    pub scroll: &'a mut ScrollViewState,
}

impl Component for PreviewPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut title = String::from(" Preview ");
        if let Some(age) = self.age {
            title.push_str(&format!("(built {}s ago, #{}) ", age.as_secs(), self.element.generation));
        }
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = highlight(LanguageName::Html, self.element.content());
        let width = inner.width.saturating_sub(1);
        let height = (lines.len() as u16).max(1);
        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(Paragraph::new(lines), Rect::new(0, 0, width, height));
        frame.render_stateful_widget(scroll_view, inner, self.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{AppState, LanguageName};
    use crate::core::store::Dispatcher;
    use crate::tui::black_box::BlackBoxHost;
    use crate::tui::scheduler::Scheduler;
    use ratatui::layout::Rect;

    const MINUTE: Duration = Duration::from_secs(60);

    struct Harness {
        host: BlackBoxHost<RunningExample>,
        scheduler: Scheduler,
        dispatcher: Dispatcher,
        start: Instant,
    }

    impl Harness {
        fn new() -> Self {
            let (dispatcher, _rx) = Dispatcher::channel();
            Self {
                host: BlackBoxHost::new(),
                scheduler: Scheduler::new(),
                dispatcher,
                start: Instant::now(),
            }
        }

        fn render(&mut self, at: Duration, srcdoc: &str) {
            let mut cx = Lifecycle {
                now: self.start + at,
                scheduler: &mut self.scheduler,
                dispatcher: &self.dispatcher,
            };
            self.host.begin_pass();
            self.host.attach(
                RunningExample::new(srcdoc.to_string(), Throttle::default(), None),
                Rect::new(0, 0, 40, 20),
                &mut cx,
            );
            self.host.end_pass();
        }

        fn tick(&mut self, at: Duration) -> usize {
            self.scheduler.run_due(self.start + at)
        }

        fn content(&self) -> String {
            let element = self.host.element(PREVIEW_KEY).unwrap();
            let content = element.borrow().content().to_string();
            content
        }

        fn generation(&self) -> u32 {
            self.host.element(PREVIEW_KEY).unwrap().borrow().generation
        }
    }

    #[test]
    fn test_mount_renders_immediately() {
        let mut h = Harness::new();
        h.render(Duration::ZERO, "v1");
        assert_eq!(h.content(), "v1");
        let preview = h.host.get(PREVIEW_KEY).unwrap();
        assert_eq!(preview.rendered_at(), Some(h.start));
        assert!(!preview.will_render());
    }

    #[test]
    fn test_recent_frame_defers_refresh() {
        let mut h = Harness::new();
        h.render(Duration::ZERO, "v1");

        h.render(5 * MINUTE, "v2");
        // Deferred, not immediate.
        assert_eq!(h.content(), "v1");
        assert_eq!(h.scheduler.pending_timers(), 1);

        assert_eq!(h.tick(5 * MINUTE + Duration::from_millis(500)), 0);
        assert_eq!(h.content(), "v1");

        assert_eq!(h.tick(5 * MINUTE + Duration::from_secs(1)), 1);
        assert_eq!(h.content(), "v2");
        assert_eq!(h.generation(), 0);
        // The original mount time is carried forward.
        assert_eq!(h.host.get(PREVIEW_KEY).unwrap().rendered_at(), Some(h.start));
    }

    #[test]
    fn test_newer_render_supersedes_pending_refresh() {
        let mut h = Harness::new();
        h.render(Duration::ZERO, "v1");
        h.render(MINUTE, "v2");
        h.render(MINUTE + Duration::from_millis(300), "v3");

        // First timer finds its flag cleared.
        h.tick(MINUTE + Duration::from_secs(1));
        assert_eq!(h.content(), "v1");

        h.tick(MINUTE + Duration::from_millis(1300));
        assert_eq!(h.content(), "v3");
    }

    #[test]
    fn test_old_frame_rebuilds_immediately() {
        let mut h = Harness::new();
        h.render(Duration::ZERO, "v1");

        h.render(11 * MINUTE, "v2");
        assert_eq!(h.content(), "v2");
        assert_eq!(h.generation(), 1);
        assert_eq!(h.scheduler.pending_timers(), 0);
        assert_eq!(
            h.host.get(PREVIEW_KEY).unwrap().rendered_at(),
            Some(h.start + 11 * MINUTE)
        );
    }

    #[test]
    fn test_rebuild_even_when_document_unchanged() {
        let mut h = Harness::new();
        h.render(Duration::ZERO, "same");
        h.render(11 * MINUTE, "same");
        assert_eq!(h.generation(), 1);
    }

    #[test]
    fn test_unchanged_document_is_not_swapped() {
        let mut h = Harness::new();
        h.render(Duration::ZERO, "v1");
        h.render(MINUTE, "v1");
        h.tick(2 * MINUTE);
        assert_eq!(h.content(), "v1");
        assert!(!h.host.get(PREVIEW_KEY).unwrap().will_render());
    }

    #[test]
    fn test_srcdoc_layout() {
        let state = AppState::initial();
        let js = Language::new(LanguageName::Js, "console.log(1);");
        let shell = DocumentShell {
            boilerplate_url: "/playground_boilerplate.js".to_string(),
            render_patch: "/* patch */".to_string(),
        };
        let doc = shell.srcdoc(&state.html, &state.css.with_code("p { color: red }"), &js);

        assert!(doc.starts_with("<!DOCTYPE html>\n<style>p { color: red }</style>\n<div id=\"app\"></div>"));
        assert!(doc.contains(r#"<script src="/playground_boilerplate.js"></script>"#));
        let patch = doc.find("/* patch */").unwrap();
        let user = doc.find("console.log(1);").unwrap();
        let try_at = doc.find("try {").unwrap();
        assert!(patch < try_at && try_at < user);
        assert!(doc.contains("id=\"ruby-error-container\""));
        assert!(doc.contains("jsErrorContainer.innerText = e.name + ' - ' + e.message;"));
    }

    #[test]
    fn test_sink_writes_whole_document() {
        let dir = std::env::temp_dir().join(format!("preview-sink-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let sink = PreviewSink::new(dir.join("preview.html"));

        sink.write("<p>one</p>");
        sink.write("<p>two</p>");
        assert_eq!(std::fs::read_to_string(sink.path()).unwrap(), "<p>two</p>");
        assert!(!dir.join("preview.html.tmp").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

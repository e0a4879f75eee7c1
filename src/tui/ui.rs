//! # Layout
//!
//! Top-level drawing. Every frame routes the current path to a page:
//!
//! ```text
//! playgrounds/:id          → playground (split view)
//! playgrounds/:id/preview  → playground (preview only)
//! playgrounds              → saved playground list
//! anything else            → the unsaved playground
//! ```
//!
//! A frame is either a *render pass* (`reconcile = true`: state or layout
//! changed, black boxes are attached and mount/update runs) or a repaint of
//! what the hosts already hold (timers and frame tasks only touched
//! elements).

use std::time::Instant;

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::action::Action;
use crate::core::state::{AppState, Language, LanguageName};
use crate::core::store::Dispatcher;
use crate::tui::TuiState;
use crate::tui::component::{Component, Lifecycle};
use crate::tui::components::running_example::PREVIEW_KEY;
use crate::tui::components::{
    CodeEditor, ErrorMessages, HEADER_HEIGHT, Header, PlaygroundList, PlaygroundListState,
    PreviewPane, RunningExample,
};
use crate::tui::router::Router;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaygroundView {
    Split,
    PreviewOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Playground {
        id: Option<String>,
        view: PlaygroundView,
    },
    List,
}

/// Resolves `path` to the page to show.
pub fn route(path: &str) -> Page {
    let mut router = Router::new(path, "");
    router.unique_match("playgrounds/:id", |route| Page::Playground {
        id: route.param("id").map(str::to_string),
        view: PlaygroundView::Split,
    });
    router.unique_match("playgrounds", |_| Page::List);
    router.miss(|| Page::Playground {
        id: None,
        view: PlaygroundView::Split,
    });

    let Some(routed) = router.into_first() else {
        return Page::List;
    };

    let mut child = routed.child_router();
    child.unique_match("preview", |_| PlaygroundView::PreviewOnly);
    child.miss(|| PlaygroundView::Split);
    let nested = child.into_first().map(|r| r.content);

    match routed.content {
        Page::Playground { id: Some(id), .. } => Page::Playground {
            id: Some(id),
            view: nested.unwrap_or(PlaygroundView::Split),
        },
        page => page,
    }
}

/// Remembers which playground the page was built for, and fetches a
/// playground whenever that changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundMemo {
    pub id: Option<String>,
}

impl PlaygroundMemo {
    pub fn new(id: Option<String>, dispatcher: &Dispatcher) -> Self {
        if let Some(id) = &id {
            dispatcher.dispatch(Action::FetchPlayground { id: id.clone() });
        }
        Self { id }
    }

    pub fn update(&mut self, id: Option<String>, dispatcher: &Dispatcher) {
        if id == self.id {
            return;
        }
        debug!("Playground page switched {:?} -> {:?}", self.id, id);
        if let Some(id) = &id {
            dispatcher.dispatch(Action::FetchPlayground { id: id.clone() });
        }
        self.id = id;
    }
}

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Editor(LanguageName),
    Preview,
    Errors,
    List,
}

/// Focus targets on `page`, in Tab order.
pub fn focus_order(state: &AppState, page: &Page) -> Vec<Focus> {
    let mut order = Vec::new();
    match page {
        Page::List => order.push(Focus::List),
        Page::Playground { view, .. } => {
            if *view == PlaygroundView::Split {
                order.push(Focus::Name);
                for lang in state.sources() {
                    if lang.is_shown() {
                        order.push(Focus::Editor(lang.name));
                    }
                }
                if state.show_js {
                    order.push(Focus::Editor(LanguageName::Js));
                }
            }
            order.push(Focus::Preview);
        }
    }
    if !state.errors.is_empty() {
        order.push(Focus::Errors);
    }
    order
}

pub fn draw_ui(frame: &mut Frame, state: &AppState, tui: &mut TuiState, reconcile: bool) {
    let now = Instant::now();
    let path = tui.history.borrow().current().to_string();
    let page = route(&path);

    // Keep focus on something that exists.
    let order = focus_order(state, &page);
    if !order.contains(&tui.focus) {
        tui.focus = order.first().copied().unwrap_or(Focus::Name);
    }

    use Constraint::{Length, Min};
    let errors_height = ErrorMessages::height(state.errors.len());
    let [heading_area, errors_area, page_area, help_area] =
        Layout::vertical([Length(1), Length(errors_height), Min(0), Length(1)])
            .areas(frame.area());

    draw_heading(frame, heading_area, &path);
    ErrorMessages {
        errors: &state.errors,
        focused: tui.focus == Focus::Errors,
        state: &mut tui.errors,
    }
    .render(frame, errors_area);

    match &page {
        Page::List => {
            if reconcile {
                unmount_playground(tui);
            }
            let api = tui.api.clone();
            let list = tui
                .list
                .get_or_insert_with(|| PlaygroundListState::load(api));
            PlaygroundList { state: list }.render(frame, page_area);
        }
        Page::Playground { id, view } => {
            if reconcile {
                match &mut tui.playground {
                    Some(memo) => memo.update(id.clone(), &tui.dispatcher),
                    None => {
                        tui.playground = Some(PlaygroundMemo::new(id.clone(), &tui.dispatcher))
                    }
                }
            }
            draw_playground(frame, page_area, state, tui, *view, reconcile, now);
        }
    }

    draw_help(frame, help_area, &page);
}

fn draw_heading(frame: &mut Frame, area: Rect, path: &str) {
    let line = Line::from(vec![
        Span::styled(
            "Clearwater Playground",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", path), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help(frame: &mut Frame, area: Rect, page: &Page) {
    let hints = match page {
        Page::List => "[↑↓] select  [Enter] open  [Esc] back  [^G] home  [^Q] quit",
        Page::Playground { .. } => {
            "[Tab/^O] focus  [^S] save  [^L] list  [^G] home  [F8] dismiss  [F9] clear errors  [^Q] quit"
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

/// Leaving the playground page removes its black boxes.
fn unmount_playground(tui: &mut TuiState) {
    tui.widgets.begin_pass();
    tui.widgets.end_pass();
    tui.preview.begin_pass();
    tui.preview.end_pass();
}

fn draw_playground(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    tui: &mut TuiState,
    view: PlaygroundView,
    reconcile: bool,
    now: Instant,
) {
    let js = state.js(&mut tui.js_cache, tui.compiler.as_ref());

    let (editors_area, preview_area) = match view {
        PlaygroundView::Split => {
            let [header_area, body_area] =
                Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
                    .areas(area);
            Header {
                name: &state.name,
                languages: state.sources(),
                show_js: state.show_js,
                persisted: state.is_persisted(),
                focused: tui.focus == Focus::Name,
                state: &mut tui.name_input,
            }
            .render(frame, header_area);

            let [left, right] = Layout::horizontal([
                Constraint::Percentage(50),
                Constraint::Percentage(50),
            ])
            .areas(body_area);
            (Some(left), right)
        }
        PlaygroundView::PreviewOnly => (None, area),
    };

    let focus = match tui.focus {
        Focus::Editor(lang) => Some(lang),
        _ => None,
    };

    let mut cx = Lifecycle {
        now,
        scheduler: &mut tui.scheduler,
        dispatcher: &tui.dispatcher,
    };

    match editors_area {
        Some(editors_area) => CodeEditor {
            state,
            js: &js,
            mode: tui.editor_mode,
            focus,
            widgets: &mut tui.widgets,
            plain: &mut tui.plain,
            lifecycle: reconcile.then_some(&mut cx),
        }
        .render(frame, editors_area),
        None if reconcile => {
            tui.widgets.begin_pass();
            tui.widgets.end_pass();
        }
        None => {}
    }

    if reconcile {
        let srcdoc = tui.shell.srcdoc(&state.html, &state.css, &js);
        let preview = RunningExample::new(srcdoc, tui.throttle, tui.sink.clone());
        tui.preview.begin_pass();
        tui.preview.attach(preview, preview_area, &mut cx);
        tui.preview.end_pass();
    }

    draw_preview(frame, preview_area, tui, now);
}

fn draw_preview(frame: &mut Frame, area: Rect, tui: &mut TuiState, now: Instant) {
    let Some(element) = tui.preview.element(PREVIEW_KEY) else {
        return;
    };
    let age = tui
        .preview
        .get(PREVIEW_KEY)
        .and_then(RunningExample::rendered_at)
        .map(|at| now.saturating_duration_since(at));
    let element = element.borrow();
    PreviewPane {
        element: &element,
        age,
        focused: tui.focus == Focus::Preview,
        scroll: &mut tui.preview_scroll,
    }
    .render(frame, area);
}

/// The JS pane for `state`, for callers outside a draw.
pub fn js_language(state: &AppState, tui: &mut TuiState) -> Language {
    state.js(&mut tui.js_cache, tui.compiler.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::drain;

    #[test]
    fn test_route_table() {
        assert_eq!(
            route("/playgrounds/42"),
            Page::Playground {
                id: Some("42".to_string()),
                view: PlaygroundView::Split
            }
        );
        assert_eq!(
            route("/playgrounds/42/preview"),
            Page::Playground {
                id: Some("42".to_string()),
                view: PlaygroundView::PreviewOnly
            }
        );
        assert_eq!(route("/playgrounds"), Page::List);
        assert_eq!(
            route("/"),
            Page::Playground {
                id: None,
                view: PlaygroundView::Split
            }
        );
        assert_eq!(
            route("/playgroundsx/42"),
            Page::Playground {
                id: None,
                view: PlaygroundView::Split
            }
        );
    }

    #[test]
    fn test_memo_fetches_on_id_change_only() {
        let (dispatcher, mut rx) = Dispatcher::channel();
        let mut memo = PlaygroundMemo::new(Some("a".to_string()), &dispatcher);
        memo.update(Some("a".to_string()), &dispatcher);
        memo.update(Some("b".to_string()), &dispatcher);
        memo.update(None, &dispatcher);

        assert_eq!(
            drain(&mut rx),
            vec![
                Action::FetchPlayground {
                    id: "a".to_string()
                },
                Action::FetchPlayground {
                    id: "b".to_string()
                },
            ]
        );
        assert_eq!(memo.id, None);
    }

    #[test]
    fn test_unsaved_playground_does_not_fetch() {
        let (dispatcher, mut rx) = Dispatcher::channel();
        PlaygroundMemo::new(None, &dispatcher);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_focus_order_follows_visible_panes() {
        let mut state = AppState::initial();
        state.show_js = true;
        let page = route("/");
        assert_eq!(
            focus_order(&state, &page),
            vec![
                Focus::Name,
                Focus::Editor(LanguageName::Ruby),
                Focus::Editor(LanguageName::Js),
                Focus::Preview
            ]
        );
        assert_eq!(focus_order(&state, &Page::List), vec![Focus::List]);
    }
}

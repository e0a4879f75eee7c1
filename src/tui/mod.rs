//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Render vs. Redraw
//!
//! The event loop distinguishes two kinds of frames:
//!
//! - **Render pass**: the store changed, an event arrived, or the path moved.
//!   The page is rebuilt and black boxes are reconciled (mount/update).
//! - **Redraw**: a frame task or timer touched an element (an editor was
//!   resized, a throttled preview refreshed). The hosts' current elements are
//!   painted again, nothing is reconciled.
//!
//! Timers never cause a render pass, so the throttled preview can't keep
//! itself alive. When idle the loop just sleeps until the next timer or
//! input.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during redraws.

pub mod black_box;
pub mod component;
pub mod components;
pub mod event;
pub mod highlight;
pub mod router;
pub mod scheduler;
pub mod ui;

use log::{debug, info};
use std::io::stdout;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::sync::mpsc::UnboundedReceiver;
use tui_scrollview::ScrollViewState;

use crate::api::{HttpApi, PlaygroundApi};
use crate::core::action::Action;
use crate::core::compile::{JsCache, OpalCommand, RubyCompiler, compile_js};
use crate::core::config::{EditorMode, ResolvedConfig};
use crate::core::effects::{Navigation, NetworkEffects};
use crate::core::history::{History, SharedHistory};
use crate::core::state::{AppState, LanguageName};
use crate::core::store::{Dispatcher, Store};
use crate::tui::black_box::BlackBoxHost;
use crate::tui::component::EventHandler;
use crate::tui::components::running_example::RENDER_PATCH;
use crate::tui::components::{
    CodeWidget, DocumentShell, ErrorListState, ErrorMessages, Header, NameInputState,
    PlainEditor, PlainEditorEvent, PlainEditors, PlaygroundListState, PreviewSink,
    RunningExample, Throttle,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::scheduler::Scheduler;
use crate::tui::ui::{Focus, Page, PlaygroundMemo, focus_order, route};

/// Longest the loop sleeps without checking background replies.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub history: SharedHistory,
    pub focus: Focus,
    // Page memos
    pub playground: Option<PlaygroundMemo>,
    pub list: Option<PlaygroundListState>,
    // Black-box hosts
    pub widgets: BlackBoxHost<CodeWidget>,
    pub preview: BlackBoxHost<RunningExample>,
    // Persistent component states
    pub plain: PlainEditors,
    pub name_input: NameInputState,
    pub errors: ErrorListState,
    pub preview_scroll: ScrollViewState,
    pub scheduler: Scheduler,
    // Preview document inputs
    pub js_cache: JsCache,
    pub compiler: Box<dyn RubyCompiler>,
    pub shell: DocumentShell,
    pub throttle: Throttle,
    pub sink: Option<Rc<PreviewSink>>,
    pub editor_mode: EditorMode,
    pub api: Arc<dyn PlaygroundApi>,
    pub dispatcher: Dispatcher,
}

impl TuiState {
    pub fn new(
        config: &ResolvedConfig,
        history: SharedHistory,
        api: Arc<dyn PlaygroundApi>,
        dispatcher: Dispatcher,
        compiler: Box<dyn RubyCompiler>,
    ) -> Self {
        // Compiled once; every preview document embeds it.
        let render_patch = compile_js(compiler.as_ref(), RENDER_PATCH);
        let sink = config.preview_output.as_ref().map(|path| {
            info!("Mirroring preview to {}", path.display());
            Rc::new(PreviewSink::new(path.clone()))
        });

        Self {
            history,
            focus: Focus::Editor(LanguageName::Ruby),
            playground: None,
            list: None,
            widgets: BlackBoxHost::new(),
            preview: BlackBoxHost::new(),
            plain: PlainEditors::new(),
            name_input: NameInputState::default(),
            errors: ErrorListState::default(),
            preview_scroll: ScrollViewState::default(),
            scheduler: Scheduler::new(),
            js_cache: JsCache::default(),
            compiler,
            shell: DocumentShell {
                boilerplate_url: config.boilerplate_url.clone(),
                render_patch,
            },
            throttle: Throttle {
                refresh_delay: config.refresh_delay,
                max_age: config.max_preview_age,
            },
            sink,
            editor_mode: config.editor_mode,
            api,
            dispatcher,
        }
    }

    fn page(&self) -> Page {
        route(self.history.borrow().current())
    }
}

/// Whether the loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The event left work behind (a queued widget dispatch, a caret move
    /// waiting for a frame). Later input must wait until the loop has
    /// applied it.
    Yield,
    Quit,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol makes BackTab and Ctrl chords unambiguous;
        // terminals that don't support it ignore it.
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Routes one input event. Anything that changes state goes through
/// `store.dispatch` right away, so the next event already sees it, unless
/// the event returns `Flow::Yield`.
pub fn handle_event(store: &mut Store, tui: &mut TuiState, event: TuiEvent) -> Flow {
    let page = tui.page();
    let on_playground = matches!(page, Page::Playground { .. });

    match event {
        TuiEvent::Quit => return Flow::Quit,
        TuiEvent::Resize => {}
        TuiEvent::Save if on_playground => {
            store.dispatch(Action::SavePlayground);
        }
        TuiEvent::ToggleEditor(language) if on_playground => {
            store.dispatch(Action::ToggleEditor { language });
        }
        TuiEvent::ToggleJs if on_playground => {
            store.dispatch(Action::ToggleJs);
        }
        TuiEvent::OpenList => {
            store.dispatch(Action::RedirectTo {
                path: "/playgrounds".to_string(),
            });
        }
        TuiEvent::Home => {
            store.dispatch(Action::RedirectTo {
                path: "/".to_string(),
            });
        }
        TuiEvent::Escape => {
            if tui.history.borrow_mut().back() {
                debug!("Back to {}", tui.history.borrow().current());
            }
        }
        TuiEvent::CycleFocus => cycle_focus(store.state(), tui, &page),
        TuiEvent::DismissError | TuiEvent::ClearErrors => {
            let action = ErrorMessages {
                errors: &store.state().errors,
                focused: true,
                state: &mut tui.errors,
            }
            .handle_event(&event);
            if let Some(action) = action {
                store.dispatch(action);
            }
        }
        event => return handle_focused(store, tui, &page, event),
    }
    Flow::Continue
}

/// Handles `events` in order, stopping at the first one that quits or
/// yields. Unhandled events stay in the iterator.
pub fn handle_events(
    store: &mut Store,
    tui: &mut TuiState,
    events: &mut impl Iterator<Item = TuiEvent>,
) -> Flow {
    for event in events {
        match handle_event(store, tui, event) {
            Flow::Continue => {}
            flow => return flow,
        }
    }
    Flow::Continue
}

/// Applies actions queued on the dispatcher. Returns whether there were any.
pub fn apply_dispatched(store: &mut Store, rx: &mut UnboundedReceiver<Action>) -> bool {
    let mut applied = false;
    while let Ok(action) = rx.try_recv() {
        debug!("Event loop received: {}", action.tag());
        store.dispatch(action);
        applied = true;
    }
    applied
}

fn cycle_focus(state: &AppState, tui: &mut TuiState, page: &Page) {
    let order = focus_order(state, page);
    let next = order
        .iter()
        .position(|focus| *focus == tui.focus)
        .map(|i| (i + 1) % order.len())
        .unwrap_or(0);
    if let Some(focus) = order.get(next) {
        tui.focus = *focus;
    }
}

fn handle_focused(store: &mut Store, tui: &mut TuiState, page: &Page, event: TuiEvent) -> Flow {
    match tui.focus {
        Focus::Name => {
            if event == TuiEvent::Tab {
                cycle_focus(store.state(), tui, page);
                return Flow::Continue;
            }
            let state = store.state();
            let action = Header {
                name: &state.name,
                languages: state.sources(),
                show_js: state.show_js,
                persisted: state.is_persisted(),
                focused: true,
                state: &mut tui.name_input,
            }
            .handle_event(&event);
            if let Some(action) = action {
                store.dispatch(action);
            }
        }
        Focus::Editor(name) => {
            return if tui.editor_mode == EditorMode::Rich && name != LanguageName::Js {
                handle_rich(tui, name, &event)
            } else {
                handle_plain(store, tui, name, &event)
            };
        }
        Focus::Errors => {
            if event == TuiEvent::Tab {
                cycle_focus(store.state(), tui, page);
                return Flow::Continue;
            }
            let action = ErrorMessages {
                errors: &store.state().errors,
                focused: true,
                state: &mut tui.errors,
            }
            .handle_event(&event);
            if let Some(action) = action {
                store.dispatch(action);
            }
        }
        Focus::Preview => match event {
            TuiEvent::Tab => cycle_focus(store.state(), tui, page),
            TuiEvent::CursorUp => tui.preview_scroll.scroll_up(),
            TuiEvent::CursorDown => tui.preview_scroll.scroll_down(),
            TuiEvent::PageUp => tui.preview_scroll.scroll_page_up(),
            TuiEvent::PageDown => tui.preview_scroll.scroll_page_down(),
            TuiEvent::CursorHome => tui.preview_scroll.scroll_to_top(),
            TuiEvent::CursorEnd => tui.preview_scroll.scroll_to_bottom(),
            _ => {}
        },
        Focus::List => {
            let action = tui
                .list
                .as_mut()
                .and_then(|list| list.handle_event(&event));
            if let Some(action) = action {
                store.dispatch(action);
            }
        }
    }
    Flow::Continue
}

/// The rich editor keeps its own buffer; its change listener reports back
/// through the dispatcher. An edit yields so the queued `UpdateCode` lands
/// before anything typed after it.
fn handle_rich(tui: &mut TuiState, name: LanguageName, event: &TuiEvent) -> Flow {
    let Some(editor) = tui.widgets.get(name.as_str()).and_then(CodeWidget::editor) else {
        debug!("No {} editor mounted, dropping {:?}", name, event);
        return Flow::Continue;
    };
    let mut editor = editor.borrow_mut();
    let before = editor.value().to_string();
    if editor.handle(event) && editor.value() != before {
        Flow::Yield
    } else {
        Flow::Continue
    }
}

fn handle_plain(
    store: &mut Store,
    tui: &mut TuiState,
    name: LanguageName,
    event: &TuiEvent,
) -> Flow {
    let language = match store.state().language(name) {
        Some(language) => language.clone(),
        None => ui::js_language(store.state(), tui),
    };
    let state = tui.plain.entry(name).or_default();
    let result = PlainEditor::new(&language, state)
        .read_only(name == LanguageName::Js)
        .handle_event(event);

    match result {
        Some(PlainEditorEvent::Input(action)) => {
            store.dispatch(action);
        }
        Some(PlainEditorEvent::Intercepted { action, caret }) => {
            store.dispatch(action);
            // The new text isn't on screen until the next draw.
            let cell = state.caret.clone();
            tui.scheduler.request_frame(move || cell.set(caret));
            return Flow::Yield;
        }
        None => {}
    }
    Flow::Continue
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    info!(
        "Using API at {} ({:?} editor)",
        config.api_base_url, config.editor_mode
    );
    let api: Arc<dyn PlaygroundApi> = Arc::new(
        HttpApi::new(config.api_base_url.clone(), config.api_timeout)
            .map_err(std::io::Error::other)?,
    );

    // Channel for actions from background tasks and widget listeners
    let (dispatcher, mut rx) = Dispatcher::channel();
    let history = History::shared(config.start_path.clone());

    let mut store = Store::new(AppState::initial());
    store.subscribe(Box::new(NetworkEffects::new(api.clone(), dispatcher.clone())));
    store.subscribe(Box::new(Navigation::new(history.clone())));

    let compiler = Box::new(OpalCommand::new(
        config.compiler_command.clone(),
        config.compiler_args.clone(),
    ));
    let mut tui = TuiState::new(&config, history, api, dispatcher, compiler);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_render = true; // Force first frame
    let mut needs_redraw = false;

    loop {
        // Background replies and widget changes
        if apply_dispatched(&mut store, &mut rx) {
            needs_render = true;
        }
        if let Some(list) = tui.list.as_mut()
            && list.poll(&tui.dispatcher)
        {
            needs_redraw = true;
        }

        if needs_render || needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, store.state(), &mut tui, needs_render))?;
            needs_render = false;
            needs_redraw = false;
        }

        // Frame tasks run once the frame they were queued for is on screen.
        if tui.scheduler.run_frame() > 0 {
            needs_redraw = true;
        }
        if tui.scheduler.run_due(Instant::now()) > 0 {
            needs_redraw = true;
        }
        if needs_redraw {
            continue;
        }

        let timeout = tui
            .scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(IDLE_POLL, |until| until.min(IDLE_POLL));
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain pending events before next draw. A
        // yield leaves the rest in crossterm's queue for the next pass.
        let mut events = first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
            .peekable();
        if events.peek().is_some() {
            needs_render = true;
        }
        if handle_events(&mut store, &mut tui, &mut events) == Flow::Quit {
            break;
        }
    }

    info!("Playground shutting down");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Playground;
    use crate::core::config::{CliOverrides, PlaygroundConfig, resolve};
    use crate::core::state::{AppError, ErrorKind};
    use crate::test_support::{FakeApi, drain, echo_compiler};
    use crate::tui::components::running_example::PREVIEW_KEY;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::cell::RefCell;

    fn setup(mode: EditorMode) -> (Store, TuiState, UnboundedReceiver<Action>) {
        let (dispatcher, rx) = Dispatcher::channel();
        let history = History::shared("/");
        let mut store = Store::new(AppState::initial());
        store.subscribe(Box::new(Navigation::new(history.clone())));

        let mut config = resolve(&PlaygroundConfig::default(), &CliOverrides::default());
        config.editor_mode = mode;
        config.preview_output = None;
        let api = Arc::new(FakeApi::with_playground(Playground::default()));
        let tui = TuiState::new(&config, history, api, dispatcher, Box::new(echo_compiler));
        (store, tui, rx)
    }

    fn draw(store: &Store, tui: &mut TuiState, reconcile: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| ui::draw_ui(f, store.state(), tui, reconcile))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_quit() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Plain);
        assert_eq!(handle_event(&mut store, &mut tui, TuiEvent::Quit), Flow::Quit);
        assert_eq!(
            handle_event(&mut store, &mut tui, TuiEvent::Resize),
            Flow::Continue
        );
    }

    #[test]
    fn test_plain_typing_updates_store_immediately() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Plain);
        tui.focus = Focus::Editor(LanguageName::Css);
        handle_event(&mut store, &mut tui, TuiEvent::InputChar('a'));
        handle_event(&mut store, &mut tui, TuiEvent::InputChar('b'));
        assert_eq!(store.state().css.code, "ab");
    }

    #[test]
    fn test_intercepted_key_moves_caret_after_frame() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Plain);
        tui.focus = Focus::Editor(LanguageName::Css);
        assert_eq!(
            handle_event(&mut store, &mut tui, TuiEvent::Tab),
            Flow::Yield
        );
        assert_eq!(store.state().css.code, "  ");

        let caret = tui.plain[&LanguageName::Css].caret.clone();
        assert_eq!(caret.get(), 0);
        assert_eq!(tui.scheduler.run_frame(), 1);
        assert_eq!(caret.get(), 2);
    }

    #[test]
    fn test_typing_after_tab_waits_for_caret() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Plain);
        tui.focus = Focus::Editor(LanguageName::Css);
        let mut events = vec![TuiEvent::Tab, TuiEvent::InputChar('x')].into_iter();

        assert_eq!(
            handle_events(&mut store, &mut tui, &mut events),
            Flow::Yield
        );
        assert_eq!(events.len(), 1);

        tui.scheduler.run_frame();
        assert_eq!(
            handle_events(&mut store, &mut tui, &mut events),
            Flow::Continue
        );
        assert_eq!(store.state().css.code, "  x");
        assert_eq!(tui.plain[&LanguageName::Css].caret.get(), 3);
    }

    #[test]
    fn test_enter_then_typing_lands_on_new_line() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Plain);
        tui.focus = Focus::Editor(LanguageName::Css);
        let mut events = vec![TuiEvent::Enter, TuiEvent::InputChar('a')].into_iter();

        while handle_events(&mut store, &mut tui, &mut events) == Flow::Yield {
            tui.scheduler.run_frame();
        }
        assert_eq!(store.state().css.code, "\na");
    }

    #[test]
    fn test_js_pane_is_read_only() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Plain);
        tui.focus = Focus::Editor(LanguageName::Js);
        let before = store.state().clone();
        handle_event(&mut store, &mut tui, TuiEvent::InputChar('x'));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_toggles_and_navigation() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Plain);
        handle_event(&mut store, &mut tui, TuiEvent::ToggleEditor(LanguageName::Html));
        handle_event(&mut store, &mut tui, TuiEvent::ToggleJs);
        assert!(store.state().html.show);
        assert!(store.state().show_js);

        handle_event(&mut store, &mut tui, TuiEvent::OpenList);
        assert_eq!(tui.history.borrow().current(), "/playgrounds");

        // Toggles are playground commands.
        handle_event(&mut store, &mut tui, TuiEvent::ToggleJs);
        assert!(store.state().show_js);

        handle_event(&mut store, &mut tui, TuiEvent::Escape);
        assert_eq!(tui.history.borrow().current(), "/");
    }

    #[test]
    fn test_name_input_and_focus_cycle() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Plain);
        tui.focus = Focus::Name;
        handle_event(&mut store, &mut tui, TuiEvent::InputChar('H'));
        handle_event(&mut store, &mut tui, TuiEvent::InputChar('i'));
        assert_eq!(store.state().name, "Hi");

        handle_event(&mut store, &mut tui, TuiEvent::Tab);
        assert_eq!(tui.focus, Focus::Editor(LanguageName::Ruby));
        handle_event(&mut store, &mut tui, TuiEvent::CycleFocus);
        assert_eq!(tui.focus, Focus::Preview);
        handle_event(&mut store, &mut tui, TuiEvent::CycleFocus);
        assert_eq!(tui.focus, Focus::Name);
    }

    #[test]
    fn test_dismiss_and_clear_errors() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Plain);
        for message in ["first", "second"] {
            store.dispatch(Action::SetError {
                error: AppError::new(ErrorKind::Network, message),
            });
        }
        handle_event(&mut store, &mut tui, TuiEvent::DismissError);
        assert_eq!(store.state().errors.len(), 1);
        assert_eq!(store.state().errors[0].message, "second");

        handle_event(&mut store, &mut tui, TuiEvent::ClearErrors);
        assert!(store.state().errors.is_empty());
    }

    #[test]
    fn test_render_pass_mounts_black_boxes() {
        let (store, mut tui, mut rx) = setup(EditorMode::Rich);
        let text = draw(&store, &mut tui, true);

        assert!(text.contains("Clearwater Playground"));
        assert!(text.contains("Name this app"));
        assert!(tui.widgets.is_mounted("ruby"));
        assert!(tui.preview.is_mounted(PREVIEW_KEY));
        // Unsaved playground: nothing to fetch.
        assert!(drain(&mut rx).is_empty());

        // The next render pass updates instead of mounting, and the
        // editor's height check waits for the frame.
        draw(&store, &mut tui, true);
        assert!(tui.scheduler.has_pending_frames());
    }

    #[test]
    fn test_rich_editor_reports_through_dispatcher() {
        let (mut store, mut tui, mut rx) = setup(EditorMode::Rich);
        draw(&store, &mut tui, true);
        tui.focus = Focus::Editor(LanguageName::Ruby);

        handle_event(&mut store, &mut tui, TuiEvent::InputChar('#'));
        let actions = drain(&mut rx);
        assert!(matches!(
            actions.as_slice(),
            [Action::UpdateCode { language: LanguageName::Ruby, code }] if code.starts_with('#')
        ));
    }

    #[test]
    fn test_rich_edit_is_applied_before_a_following_save() {
        let (mut store, mut tui, mut rx) = setup(EditorMode::Rich);
        let saved = Rc::new(RefCell::new(None));
        let seen = saved.clone();
        store.subscribe(Box::new(
            move |_: &AppState, after: &AppState, action: &Action, _: &mut Vec<Action>| {
                if *action == Action::SavePlayground {
                    *seen.borrow_mut() = Some(after.ruby.code.clone());
                }
            },
        ));
        draw(&store, &mut tui, true);
        tui.focus = Focus::Editor(LanguageName::Ruby);

        let mut events = vec![TuiEvent::InputChar('#'), TuiEvent::Save].into_iter();
        assert_eq!(
            handle_events(&mut store, &mut tui, &mut events),
            Flow::Yield
        );
        assert!(saved.borrow().is_none());

        assert!(apply_dispatched(&mut store, &mut rx));
        assert_eq!(
            handle_events(&mut store, &mut tui, &mut events),
            Flow::Continue
        );
        let code = saved.borrow().clone().unwrap();
        assert!(code.starts_with('#'));
    }

    #[test]
    fn test_rich_caret_move_does_not_yield() {
        let (mut store, mut tui, mut rx) = setup(EditorMode::Rich);
        draw(&store, &mut tui, true);
        tui.focus = Focus::Editor(LanguageName::Ruby);
        assert_eq!(
            handle_event(&mut store, &mut tui, TuiEvent::CursorDown),
            Flow::Continue
        );
        assert!(!apply_dispatched(&mut store, &mut rx));
    }

    #[test]
    fn test_redraw_without_reconcile_keeps_hosts() {
        let (mut store, mut tui, _rx) = setup(EditorMode::Rich);
        draw(&store, &mut tui, true);
        store.dispatch(Action::ToggleEditor {
            language: LanguageName::Ruby,
        });
        // A plain redraw doesn't reconcile, so the widget is still there.
        draw(&store, &mut tui, false);
        assert!(tui.widgets.is_mounted("ruby"));
        draw(&store, &mut tui, true);
        assert!(!tui.widgets.is_mounted("ruby"));
    }

    #[test]
    fn test_fetch_on_playground_route() {
        let (mut store, mut tui, mut rx) = setup(EditorMode::Plain);
        store.dispatch(Action::RedirectTo {
            path: "/playgrounds/abc/preview".to_string(),
        });
        let text = draw(&store, &mut tui, true);
        assert_eq!(
            drain(&mut rx),
            vec![Action::FetchPlayground {
                id: "abc".to_string()
            }]
        );
        // Preview-only page has no header.
        assert!(!text.contains("Name this app"));
        assert_eq!(tui.focus, Focus::Preview);
    }
}

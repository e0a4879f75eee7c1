//! The editor behind a `CodeWidget`.
//!
//! `TextEditor` owns its text; the store only ever hears about edits through
//! change listeners. That's what makes the widget a black box: a render pass
//! can't just overwrite the buffer without losing the caret and scroll.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::state::LanguageName;
use crate::tui::components::caret::{
    Viewport, clamp, line_end, line_start, move_vertically, next_char_boundary,
    prev_char_boundary,
};
use crate::tui::components::indent;
use crate::tui::event::TuiEvent;
use crate::tui::highlight::highlight;

type ChangeListener = Box<dyn FnMut(&str)>;

pub struct TextEditor {
    language: LanguageName,
    text: String,
    caret: usize,
    viewport: Viewport,
    listeners: Vec<ChangeListener>,
    /// Highlighted lines for `text`, rebuilt lazily after edits.
    lines: Option<Vec<Line<'static>>>,
    resizes: u32,
}

impl TextEditor {
    pub fn new(language: LanguageName, text: impl Into<String>) -> Self {
        Self {
            language,
            text: text.into(),
            caret: 0,
            viewport: Viewport::default(),
            listeners: Vec::new(),
            lines: None,
            resizes: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Registers a callback that receives the full text after every edit.
    pub fn on_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces the whole document and drops the caret back to the start.
    /// Listeners are not told: the new value came from outside.
    pub fn set_value(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = 0;
        self.viewport.scroll_offset = 0;
        self.lines = None;
    }

    /// Recomputes the viewport for a new outer height.
    pub fn resize(&mut self, height: u16) {
        self.viewport.resize(height);
        self.viewport.follow(&self.text, self.caret);
        self.resizes += 1;
    }

    /// How many times `resize` ran. Lets callers see whether a reconcile
    /// touched the widget.
    pub fn resize_count(&self) -> u32 {
        self.resizes
    }

    /// Applies an editing key. Returns whether the event was consumed.
    pub fn handle(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.splice(self.caret, self.caret, c.encode_utf8(&mut buf));
            }
            TuiEvent::Paste(data) => {
                let data = data.replace("\r\n", "\n").replace('\r', "\n");
                self.splice(self.caret, self.caret, &data);
            }
            TuiEvent::Tab => {
                let edit = indent::insert_tab(&self.text, self.caret);
                self.apply(edit);
            }
            TuiEvent::Enter => {
                let edit = indent::newline_with_indent(&self.text, self.caret);
                self.apply(edit);
            }
            TuiEvent::Backspace => match indent::smart_backspace(&self.text, self.caret) {
                Some(edit) => self.apply(edit),
                None if self.caret > 0 => {
                    let prev = prev_char_boundary(&self.text, self.caret);
                    self.splice(prev, self.caret, "");
                }
                None => return false,
            },
            TuiEvent::Delete => {
                if self.caret >= self.text.len() {
                    return false;
                }
                let next = next_char_boundary(&self.text, self.caret);
                self.splice(self.caret, next, "");
            }
            TuiEvent::CursorLeft if self.caret > 0 => {
                self.move_to(prev_char_boundary(&self.text, self.caret));
            }
            TuiEvent::CursorRight if self.caret < self.text.len() => {
                self.move_to(next_char_boundary(&self.text, self.caret));
            }
            TuiEvent::CursorHome => self.move_to(line_start(&self.text, self.caret)),
            TuiEvent::CursorEnd => self.move_to(line_end(&self.text, self.caret)),
            TuiEvent::CursorUp => return self.move_lines(-1),
            TuiEvent::CursorDown => return self.move_lines(1),
            TuiEvent::PageUp => return self.move_lines(-(self.page() as isize)),
            TuiEvent::PageDown => return self.move_lines(self.page() as isize),
            _ => return false,
        }
        true
    }

    fn page(&self) -> u16 {
        self.viewport.rows.max(1)
    }

    fn move_lines(&mut self, lines: isize) -> bool {
        match move_vertically(&self.text, self.caret, lines) {
            Some(pos) => {
                self.move_to(pos);
                true
            }
            None => false,
        }
    }

    fn move_to(&mut self, pos: usize) {
        self.caret = clamp(&self.text, pos);
        self.viewport.follow(&self.text, self.caret);
    }

    fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        self.text.replace_range(start..end, replacement);
        let caret = start + replacement.len();
        self.changed(caret);
    }

    fn apply(&mut self, edit: indent::Edit) {
        self.text = edit.code;
        self.changed(edit.caret);
    }

    fn changed(&mut self, caret: usize) {
        self.lines = None;
        self.move_to(caret);
        for listener in &mut self.listeners {
            listener(&self.text);
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let language = self.language;
        let lines = self
            .lines
            .get_or_insert_with(|| highlight(language, &self.text));

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(language.as_str());

        let visible: Vec<Line<'static>> = lines
            .iter()
            .skip(self.viewport.scroll_offset as usize)
            .take(area.height as usize)
            .cloned()
            .collect();
        frame.render_widget(
            Paragraph::new(visible).block(block).style(Style::default().bg(Color::Rgb(45, 45, 45))),
            area,
        );

        if focused && let Some(pos) = self.viewport.screen_pos(&self.text, self.caret, area) {
            frame.set_cursor_position(pos);
        }
    }
}

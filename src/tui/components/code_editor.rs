//! # CodeEditor
//!
//! Stacks every visible pane (html, css, ruby, then compiled JS) in one
//! column with equal heights.
//!
//! Source panes are `CodeWidget` black boxes in rich mode and
//! `PlainEditor`s in plain mode. The JS pane is always a read-only
//! `PlainEditor`: it's derived, there is nothing to edit.
//!
//! Black boxes are only reconciled when a `Lifecycle` is passed in (a render
//! pass). Without one, the retained widgets are just painted again.

use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::config::EditorMode;
use crate::core::state::{AppState, Language, LanguageName};
use crate::tui::black_box::BlackBoxHost;
use crate::tui::component::{Component, Lifecycle};
use crate::tui::components::code_widget::CodeWidget;
use crate::tui::components::plain_editor::{PlainEditor, PlainEditorState};

pub type PlainEditors = HashMap<LanguageName, PlainEditorState>;

/// Visible panes in display order.
pub fn visible_panes<'a>(state: &'a AppState, js: &'a Language) -> Vec<&'a Language> {
    state
        .sources()
        .into_iter()
        .chain(std::iter::once(js))
        .filter(|lang| lang.is_shown())
        .collect()
}

/// Splits `area` into `count` rows of equal height.
pub fn pane_areas(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = (0..count).map(|_| Constraint::Ratio(1, count as u32));
    Layout::vertical(constraints).split(area).to_vec()
}

pub struct CodeEditor<'a, 'cx> {
    pub state: &'a AppState,
    pub js: &'a Language,
    pub mode: EditorMode,
    pub focus: Option<LanguageName>,
    pub widgets: &'a mut BlackBoxHost<CodeWidget>,
    pub plain: &'a mut PlainEditors,
    pub lifecycle: Option<&'a mut Lifecycle<'cx>>,
}

impl CodeEditor<'_, '_> {
    fn is_rich(&self, language: LanguageName) -> bool {
        self.mode == EditorMode::Rich && language != LanguageName::Js
    }
}

impl Component for CodeEditor<'_, '_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let panes = visible_panes(self.state, self.js);
        let areas = pane_areas(area, panes.len());

        if let Some(cx) = self.lifecycle.as_deref_mut() {
            self.widgets.begin_pass();
            for (lang, pane) in panes.iter().zip(&areas) {
                if self.mode == EditorMode::Rich && lang.name != LanguageName::Js {
                    let widget = CodeWidget::new(self.state.playground_id.as_deref(), lang);
                    self.widgets.attach(widget, *pane, cx);
                }
            }
            self.widgets.end_pass();
        }

        for (lang, pane) in panes.into_iter().zip(areas) {
            let focused = self.focus == Some(lang.name);
            if self.is_rich(lang.name) {
                if let Some(editor) = self
                    .widgets
                    .get(lang.name.as_str())
                    .and_then(CodeWidget::editor)
                {
                    editor.borrow_mut().render(frame, pane, focused);
                }
            } else {
                let state = self.plain.entry(lang.name).or_default();
                PlainEditor::new(lang, state)
                    .read_only(lang.name == LanguageName::Js)
                    .focused(focused)
                    .render(frame, pane);
            }
        }
    }
}

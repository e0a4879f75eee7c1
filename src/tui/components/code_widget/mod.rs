//! # CodeWidget
//!
//! Black-box wrapper around a [`TextEditor`]. A fresh `CodeWidget` is built
//! from props on every render pass; the editor itself lives on, handed from
//! each instance to the next in `update`.
//!
//! ## Lifecycle
//!
//! - `mount`: create the editor with the language's code, bind one change
//!   listener that dispatches `UpdateCode` with the full text, remember the
//!   element's height.
//! - `update`: take the editor over from the previous instance. If the
//!   playground changed, load the new code into it. After the draw, compare
//!   the element's height with the remembered one and resize on change.

mod editor;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;

pub use editor::TextEditor;

use crate::core::action::Action;
use crate::core::state::{Language, LanguageName};
use crate::tui::black_box::{ElementRef, Node};
use crate::tui::component::{BlackBox, Lifecycle};

pub struct CodeWidget {
    playground_id: Option<String>,
    language: LanguageName,
    code: String,
    editor: Option<Rc<RefCell<TextEditor>>>,
    height: Rc<Cell<u16>>,
}

impl CodeWidget {
    pub fn new(playground_id: Option<&str>, language: &Language) -> Self {
        Self {
            playground_id: playground_id.map(str::to_string),
            language: language.name,
            code: language.code.clone(),
            editor: None,
            height: Rc::new(Cell::new(0)),
        }
    }

    pub fn editor(&self) -> Option<Rc<RefCell<TextEditor>>> {
        self.editor.clone()
    }

    /// Height seen by the last resize check.
    pub fn measured_height(&self) -> u16 {
        self.height.get()
    }

    fn check_height(&self, element: &ElementRef, cx: &mut Lifecycle<'_>) {
        let Some(editor) = self.editor.clone() else {
            return;
        };
        let height = self.height.clone();
        let element = element.clone();
        cx.scheduler.request_frame(move || {
            let current = element.borrow().client_height();
            if height.get() != current {
                height.set(current);
                editor.borrow_mut().resize(current);
            }
        });
    }
}

impl BlackBox for CodeWidget {
    fn key(&self) -> String {
        self.language.as_str().to_string()
    }

    fn node(&self) -> Node {
        Node::new("div", self.language.as_str(), &self.code)
    }

    fn mount(&mut self, element: &ElementRef, cx: &mut Lifecycle<'_>) {
        let mut editor = TextEditor::new(self.language, element.borrow().content());

        let dispatcher = cx.dispatcher.clone();
        let language = self.language;
        editor.on_change(move |text| {
            dispatcher.dispatch(Action::UpdateCode {
                language,
                code: text.to_string(),
            })
        });

        let height = element.borrow().client_height();
        editor.resize(height);
        self.height.set(height);
        self.editor = Some(Rc::new(RefCell::new(editor)));
    }

    fn update(&mut self, previous: &mut Self, element: &ElementRef, cx: &mut Lifecycle<'_>) {
        self.editor = previous.editor.take();
        self.height = previous.height.clone();

        if self.playground_id != previous.playground_id
            && let Some(editor) = &self.editor
        {
            debug!(
                "Playground changed ({:?} -> {:?}), reloading {} editor",
                previous.playground_id, self.playground_id, self.language
            );
            editor.borrow_mut().set_value(self.code.clone());
            element.borrow_mut().set_content(self.code.clone());
        }

        self.check_height(element, cx);
    }
}

//! # Actions
//!
//! Everything that can happen in the playground becomes an `Action`.
//! User types in the Ruby editor? That's `Action::UpdateCode`.
//! The server answers a fetch? That's `Action::LoadPlayground`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the new state. No side effects here. I/O happens in
//! `effects`, which watches the store and dispatches follow-ups.
//!
//! ```text
//! State + Action  →  update()  →  New State
//! ```
//!
//! This makes everything testable: `assert_eq!(update(&state, &action), expected)`.

use crate::api::Playground;
use crate::core::state::{AppError, AppState, LanguageName};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace a language's source with the full editor contents.
    UpdateCode { language: LanguageName, code: String },
    ToggleEditor { language: LanguageName },
    ToggleJs,
    SetPlaygroundName { name: String },
    /// Ask the server for a saved playground. Handled by effects only.
    FetchPlayground { id: String },
    /// A playground arrived from the server.
    LoadPlayground { playground: Playground },
    /// Create or update the current playground. Handled by effects only.
    SavePlayground,
    SetError { error: AppError },
    DeleteError { error: AppError },
    ClearErrors,
    /// Navigate to another path. Handled by the navigation subscriber only.
    RedirectTo { path: String },
}

impl Action {
    /// Short tag for logs, without payloads (code can be large).
    pub fn tag(&self) -> &'static str {
        match self {
            Action::UpdateCode { .. } => "UpdateCode",
            Action::ToggleEditor { .. } => "ToggleEditor",
            Action::ToggleJs => "ToggleJs",
            Action::SetPlaygroundName { .. } => "SetPlaygroundName",
            Action::FetchPlayground { .. } => "FetchPlayground",
            Action::LoadPlayground { .. } => "LoadPlayground",
            Action::SavePlayground => "SavePlayground",
            Action::SetError { .. } => "SetError",
            Action::DeleteError { .. } => "DeleteError",
            Action::ClearErrors => "ClearErrors",
            Action::RedirectTo { .. } => "RedirectTo",
        }
    }
}

/// The reducer. Pure and total: actions that carry no state change return
/// an equal copy of `state`.
pub fn update(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::UpdateCode { language, code } => {
            if let Some(lang) = next.language_mut(*language) {
                lang.code = code.clone();
            }
        }
        Action::SetPlaygroundName { name } => {
            next.name = name.clone();
        }
        Action::ToggleEditor { language } => match next.language_mut(*language) {
            Some(lang) => lang.show = !lang.show,
            None => next.show_js = !next.show_js,
        },
        Action::ToggleJs => {
            next.show_js = !next.show_js;
        }
        Action::LoadPlayground { playground } => {
            // Only code is replaced; editor visibility, showJs and errors stay.
            next.playground_id = Some(playground.id.clone());
            next.name = playground.name.clone();
            next.html.code = playground.html.clone();
            next.css.code = playground.css.clone();
            next.ruby.code = playground.ruby.clone();
        }
        Action::SetError { error } => {
            next.errors.push(error.clone());
        }
        Action::ClearErrors => {
            next.errors.clear();
        }
        Action::DeleteError { error } => {
            if let Some(idx) = next.errors.iter().position(|e| e == error) {
                next.errors.remove(idx);
            }
        }
        Action::FetchPlayground { .. } | Action::SavePlayground | Action::RedirectTo { .. } => {}
    }

    next
}

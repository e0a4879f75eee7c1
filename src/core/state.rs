//! # Application State
//!
//! Everything the playground page shows lives in one immutable `AppState`.
//!
//! ```text
//! AppState
//! ├── playground_id: Option<String>   // None = never saved
//! ├── name: String                    // display name
//! ├── html: Language                  // { name, code, show }
//! ├── css: Language
//! ├── ruby: Language
//! ├── show_js: bool                   // compiled JS pane visible
//! └── errors: Vec<AppError>           // dismissible, in arrival order
//! ```
//!
//! State never changes in place. `update(state, action)` in action.rs
//! builds the next value and the store swaps it in whole.

use std::fmt;

use crate::api::{ApiError, PlaygroundDraft};
use crate::core::compile::{JsCache, RubyCompiler};

/// The languages a playground is made of. `Js` is the compiled output of
/// `Ruby` and is never stored, only derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageName {
    Html,
    Css,
    Ruby,
    Js,
}

impl LanguageName {
    /// The editable source languages, in display order.
    pub const SOURCES: [LanguageName; 3] = [LanguageName::Html, LanguageName::Css, LanguageName::Ruby];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageName::Html => "html",
            LanguageName::Css => "css",
            LanguageName::Ruby => "ruby",
            LanguageName::Js => "js",
        }
    }

    /// File extension syntect uses to pick a grammar.
    pub fn extension(self) -> &'static str {
        match self {
            LanguageName::Html => "html",
            LanguageName::Css => "css",
            LanguageName::Ruby => "rb",
            LanguageName::Js => "js",
        }
    }
}

impl fmt::Display for LanguageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One language's source plus whether its editor is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub name: LanguageName,
    pub code: String,
    pub show: bool,
}

impl Language {
    /// Hidden by default.
    pub fn new(name: LanguageName, code: impl Into<String>) -> Self {
        Self {
            name,
            code: code.into(),
            show: false,
        }
    }

    pub fn shown(mut self) -> Self {
        self.show = true;
        self
    }

    pub fn is_shown(&self) -> bool {
        self.show
    }

    pub fn with_code(&self, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..self.clone()
        }
    }
}

/// What kind of failure an error entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Api { status: u16 },
    Parse,
}

/// A user-visible, dismissible error. Compared structurally, so two
/// identical failures are interchangeable for `DeleteError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        let kind = match &e {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Api { status, .. } => ErrorKind::Api { status: *status },
            ApiError::Parse(_) => ErrorKind::Parse,
        };
        AppError::new(kind, e.to_string())
    }
}

const DEFAULT_HTML: &str = "<div id=\"app\"></div>\n";

const DEFAULT_RUBY: &str = r#"class Layout
  include Clearwater::Component

  def render
    div([
      h1('Hello World!'),
      p('Welcome to Clearwater!'),
    ])
  end
end

app = Clearwater::Application.new(
  component: Layout.new,
  element: Bowser.document['#app'],
)
app.call
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub playground_id: Option<String>,
    pub name: String,
    pub html: Language,
    pub css: Language,
    pub ruby: Language,
    pub show_js: bool,
    pub errors: Vec<AppError>,
}

impl AppState {
    /// The playground every session starts with: an empty mount point and a
    /// hello-world component, with only the Ruby editor open.
    pub fn initial() -> Self {
        Self {
            playground_id: None,
            name: String::new(),
            html: Language::new(LanguageName::Html, DEFAULT_HTML),
            css: Language::new(LanguageName::Css, ""),
            ruby: Language::new(LanguageName::Ruby, DEFAULT_RUBY).shown(),
            show_js: false,
            errors: Vec::new(),
        }
    }

    /// Stored source language by name. `Js` is derived, so it has none.
    pub fn language(&self, name: LanguageName) -> Option<&Language> {
        match name {
            LanguageName::Html => Some(&self.html),
            LanguageName::Css => Some(&self.css),
            LanguageName::Ruby => Some(&self.ruby),
            LanguageName::Js => None,
        }
    }

    pub(crate) fn language_mut(&mut self, name: LanguageName) -> Option<&mut Language> {
        match name {
            LanguageName::Html => Some(&mut self.html),
            LanguageName::Css => Some(&mut self.css),
            LanguageName::Ruby => Some(&mut self.ruby),
            LanguageName::Js => None,
        }
    }

    pub fn sources(&self) -> [&Language; 3] {
        [&self.html, &self.css, &self.ruby]
    }

    pub fn is_persisted(&self) -> bool {
        self.playground_id.is_some()
    }

    /// The compiled-JS pseudo language. Compilation goes through `cache`, so
    /// repeated renders of the same Ruby source compile once.
    pub fn js(&self, cache: &mut JsCache, compiler: &dyn RubyCompiler) -> Language {
        Language {
            name: LanguageName::Js,
            code: cache.get(compiler, &self.ruby.code).to_string(),
            show: self.show_js,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::initial()
    }
}

impl From<&AppState> for PlaygroundDraft {
    fn from(state: &AppState) -> Self {
        PlaygroundDraft {
            name: state.name.clone(),
            html: state.html.code.clone(),
            css: state.css.code.clone(),
            ruby: state.ruby.code.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compile::CompileError;

    #[test]
    fn test_initial_state_defaults() {
        let state = AppState::initial();
        assert!(state.playground_id.is_none());
        assert!(state.name.is_empty());
        assert!(state.html.code.contains("id=\"app\""));
        assert!(state.css.code.is_empty());
        assert!(state.ruby.code.contains("Hello World!"));
        assert!(state.ruby.is_shown());
        assert!(!state.html.is_shown());
        assert!(!state.css.is_shown());
        assert!(!state.show_js);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_language_lookup_has_no_js() {
        let state = AppState::initial();
        assert_eq!(state.language(LanguageName::Css).unwrap().name, LanguageName::Css);
        assert!(state.language(LanguageName::Js).is_none());
    }

    #[test]
    fn test_draft_serializes_code_only() {
        let mut state = AppState::initial();
        state.name = "Demo".to_string();
        state.playground_id = Some("abc".to_string());
        let draft = PlaygroundDraft::from(&state);
        assert_eq!(draft.name, "Demo");
        assert_eq!(draft.html, state.html.code);
        assert_eq!(draft.ruby, state.ruby.code);
    }

    #[test]
    fn test_js_follows_show_js_flag() {
        let compiler = |src: &str| -> Result<String, CompileError> { Ok(format!("// {}", src.len())) };
        let mut cache = JsCache::default();
        let mut state = AppState::initial();
        state.show_js = true;
        let js = state.js(&mut cache, &compiler);
        assert_eq!(js.name, LanguageName::Js);
        assert!(js.is_shown());
        assert!(js.code.starts_with("// "));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let err: AppError = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::Api { status: 500 });
        assert_eq!(err.message, "API error (HTTP 500): boom");
    }
}

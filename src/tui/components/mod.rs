//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Declarative components (props in, events out)
//!
//! Rebuilt from store state on every frame; any state that must survive a
//! frame lives in `TuiState` and is borrowed in:
//! - `Header`: name input and toggle/save buttons
//! - `ErrorMessages`: dismissible error list
//! - `PlaygroundList`: saved playgrounds (memoized, fetched once)
//! - `PlainEditor`: textarea-style pane whose text is the store's
//! - `CodeEditor`: stacks the visible panes
//!
//! ### Black boxes (own their element)
//!
//! Reconciled through `BlackBoxHost` by key, mounted once and updated after:
//! - `CodeWidget`: rich editor with its own buffer
//! - `RunningExample`: throttled live preview
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── caret.rs            (caret movement and scrolling helpers)
//! ├── indent.rs           (Tab / Enter / Backspace rewrites)
//! ├── header.rs
//! ├── error_messages.rs
//! ├── playground_list.rs
//! ├── plain_editor.rs
//! ├── code_editor.rs
//! ├── code_widget/        (CodeWidget black box + TextEditor)
//! └── running_example.rs  (RunningExample black box + PreviewPane)
//! ```

pub mod caret;
pub mod code_editor;
pub mod code_widget;
pub mod error_messages;
pub mod header;
pub mod indent;
pub mod plain_editor;
pub mod playground_list;
pub mod running_example;

pub use code_editor::{CodeEditor, PlainEditors};
pub use code_widget::{CodeWidget, TextEditor};
pub use error_messages::{ErrorListState, ErrorMessages};
pub use header::{HEADER_HEIGHT, Header, NameInputState};
pub use plain_editor::{PlainEditor, PlainEditorEvent, PlainEditorState};
pub use playground_list::{PlaygroundList, PlaygroundListState};
pub use running_example::{DocumentShell, PreviewPane, PreviewSink, RunningExample, Throttle};

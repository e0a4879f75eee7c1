//! Navigation history: the playground's equivalent of the browser location.
//!
//! The router is rebuilt from `current()` on every render, so this is the
//! only routing state that outlives a frame.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the history stack. Single-threaded: the run loop and the
/// navigation subscriber both hold one.
pub type SharedHistory = Rc<RefCell<History>>;

/// Entries kept; the oldest are forgotten past this.
pub const MAX_HISTORY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            entries: vec![normalize(start.into())],
        }
    }

    pub fn shared(start: impl Into<String>) -> SharedHistory {
        Rc::new(RefCell::new(Self::new(start)))
    }

    pub fn current(&self) -> &str {
        self.entries.last().map(String::as_str).unwrap_or("/")
    }

    /// Pushes `path` unless it is already the current location.
    pub fn push(&mut self, path: impl Into<String>) {
        let path = normalize(path.into());
        if path != self.current() {
            self.entries.push(path);
            if self.entries.len() > MAX_HISTORY {
                self.entries.remove(0);
            }
        }
    }

    /// Goes back one entry. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}

fn normalize(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

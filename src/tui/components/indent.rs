//! Indentation-aware edits for code panes.
//!
//! Each helper takes the whole document plus a caret (byte offset) and
//! returns the whole new document plus where the caret should go. Callers
//! decide how to apply that: the plain editor dispatches the text and moves
//! the caret a frame later, the rich widget applies it to its own buffer.

/// Soft tab.
pub const TAB: &str = "  ";

/// A rewritten document and the caret position that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub code: String,
    pub caret: usize,
}

/// Inserts two spaces at the caret.
pub fn insert_tab(code: &str, caret: usize) -> Edit {
    let caret = clamp(code, caret);
    Edit {
        code: format!("{}{}{}", &code[..caret], TAB, &code[caret..]),
        caret: caret + TAB.len(),
    }
}

/// Deletes both spaces when the two characters before the caret are spaces.
/// `None` means an ordinary one-character backspace should happen instead.
pub fn smart_backspace(code: &str, caret: usize) -> Option<Edit> {
    let caret = clamp(code, caret);
    if caret < TAB.len() || &code.as_bytes()[caret - TAB.len()..caret] != TAB.as_bytes() {
        return None;
    }
    let start = caret - TAB.len();
    Some(Edit {
        code: format!("{}{}", &code[..start], &code[caret..]),
        caret: start,
    })
}

/// Breaks the line at the caret and carries the current line's indentation
/// over to the new one.
pub fn newline_with_indent(code: &str, caret: usize) -> Edit {
    let caret = clamp(code, caret);
    let indent = indentation_before(code, caret);
    let inserted = format!("\n{}", " ".repeat(indent));
    Edit {
        code: format!("{}{}{}", &code[..caret], inserted, &code[caret..]),
        caret: caret + inserted.len(),
    }
}

/// Leading spaces of the line containing `caret`, counted no further than
/// the caret itself.
pub fn indentation_before(code: &str, caret: usize) -> usize {
    let caret = clamp(code, caret);
    let line_start = code[..caret].rfind('\n').map(|i| i + 1).unwrap_or(0);
    code[line_start..caret]
        .bytes()
        .take_while(|b| *b == b' ')
        .count()
}

/// Pulls `caret` back onto a char boundary inside `code`.
fn clamp(code: &str, caret: usize) -> usize {
    let mut caret = caret.min(code.len());
    while !code.is_char_boundary(caret) {
        caret -= 1;
    }
    caret
}

//! Caret navigation and scrolling over unwrapped source text.
//!
//! All functions take the document explicitly and work on byte offsets that
//! sit on char boundaries. Code panes never soft-wrap, so a "line" here is
//! always a logical `\n`-separated line.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Border drawn around every code pane.
pub(super) const BORDER_OFFSET: u16 = 1;

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

pub(super) fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

pub(super) fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len())
}

/// Zero-based (line, display column) of `pos`.
pub(super) fn line_col(text: &str, pos: usize) -> (usize, usize) {
    let line = text[..pos].matches('\n').count();
    let start = line_start(text, pos);
    (line, text[start..pos].width())
}

/// Moves `pos` by `lines` rows, keeping the display column where possible.
/// Returns `None` if already at the first/last line.
pub(super) fn move_vertically(text: &str, pos: usize, lines: isize) -> Option<usize> {
    let (line, column) = line_col(text, pos);
    let last_line = text.matches('\n').count();
    let target = line.checked_add_signed(lines)?.min(last_line);
    if target == line {
        return None;
    }

    let start = text
        .split_inclusive('\n')
        .take(target)
        .map(str::len)
        .sum::<usize>();
    let end = line_end(text, start);

    // Walk the target line until the next char would pass `column`.
    let mut offset = start;
    let mut width = 0;
    for (i, c) in text[start..end].char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > column {
            break;
        }
        width += w;
        offset = start + i + c.len_utf8();
    }
    Some(offset)
}

/// Pulls `pos` back onto a char boundary inside `text`.
pub(super) fn clamp(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// First visible line of a pane, kept so the caret stays on screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_offset: u16,
    /// Text rows inside the border, from the last resize.
    pub rows: u16,
}

impl Viewport {
    pub fn resize(&mut self, outer_height: u16) {
        self.rows = outer_height.saturating_sub(2 * BORDER_OFFSET);
    }

    pub fn follow(&mut self, text: &str, pos: usize) {
        let (line, _) = line_col(text, pos);
        let line = line.min(u16::MAX as usize) as u16;
        if self.rows == 0 {
            self.scroll_offset = line;
        } else if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + self.rows {
            self.scroll_offset = line - self.rows + 1;
        }
    }

    /// Terminal cell for the caret, or `None` when it's scrolled out.
    pub fn screen_pos(&self, text: &str, pos: usize, area: Rect) -> Option<(u16, u16)> {
        let (line, column) = line_col(text, pos);
        let row = (line as u16).checked_sub(self.scroll_offset)?;
        if row >= self.rows {
            return None;
        }
        let column = column.min(area.width.saturating_sub(2 * BORDER_OFFSET + 1) as usize);
        Some((
            area.x + BORDER_OFFSET + column as u16,
            area.y + BORDER_OFFSET + row,
        ))
    }
}

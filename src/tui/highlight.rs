//! Syntax highlighting for the code panes (syntect → ratatui spans).

use std::sync::LazyLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::state::LanguageName;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-eighties.dark";

/// Renders `code` as highlighted lines. Tabs are expanded to two spaces
/// (ratatui renders `\t` as zero-width). Falls back to plain lines when no
/// grammar exists for `language`.
pub fn highlight(language: LanguageName, code: &str) -> Vec<Line<'static>> {
    let syntax = SYNTAX_SET.find_syntax_by_extension(language.extension());
    let theme = THEME_SET.themes.get(THEME);

    let (Some(syntax), Some(theme)) = (syntax, theme) else {
        return plain(code);
    };

    let mut hl = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        match hl.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => {
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|(hl_style, frag)| {
                        let content = expand(frag.trim_end_matches(['\n', '\r']));
                        if content.is_empty() {
                            return None;
                        }
                        let fg = Color::Rgb(
                            hl_style.foreground.r,
                            hl_style.foreground.g,
                            hl_style.foreground.b,
                        );
                        Some(Span::styled(content, Style::default().fg(fg)))
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
            Err(_) => lines.push(Line::from(expand(line.trim_end_matches(['\n', '\r'])))),
        }
    }
    if code.is_empty() || code.ends_with('\n') {
        lines.push(Line::default());
    }
    lines
}

/// One unstyled line per source line, same shape as `highlight`.
pub fn plain(code: &str) -> Vec<Line<'static>> {
    code.split('\n').map(|line| Line::from(expand(line))).collect()
}

fn expand(text: &str) -> String {
    text.replace('\t', "  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_line_count_matches_source() {
        let code = "div {\n  color: red;\n}\n";
        let lines = highlight(LanguageName::Css, code);
        assert_eq!(lines.len(), plain(code).len());
        assert_eq!(text(&lines[1]), "  color: red;");
    }

    #[test]
    fn test_ruby_gets_colored() {
        let lines = highlight(LanguageName::Ruby, "def render\nend");
        assert_eq!(lines.len(), 2);
        assert!(
            lines[0]
                .spans
                .iter()
                .any(|s| matches!(s.style.fg, Some(Color::Rgb(..))))
        );
    }

    #[test]
    fn test_tabs_expand() {
        let lines = plain("\tx");
        assert_eq!(text(&lines[0]), "  x");
    }
}

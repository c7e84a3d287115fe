//! Syntax highlighting for code blocks in chat replies.
//!
//! Syntax and theme sets are loaded once on first use. Highlighting happens
//! when a reply arrives, never in the render path; the resulting lines are
//! cached on the chat screen.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";

/// Finds a syntax for a fenced-code language tag.
///
/// The default syntax set has no TypeScript, so TS flavours use JavaScript.
fn syntax_for(language: &str) -> Option<&'static SyntaxReference> {
    let token = match language.to_ascii_lowercase().as_str() {
        "typescript" | "ts" | "tsx" | "jsx" => "js".to_owned(),
        other => other.to_owned(),
    };
    PS.find_syntax_by_token(&token)
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// The background is dropped so code blocks take the panel surface color.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    let fg = style.foreground;
    let mut ratatui_style = Style::default();
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.trim_end_matches(['\n', '\r']).to_owned(), ratatui_style)
}

fn plain(code: &str) -> Vec<Line<'static>> {
    code.lines().map(|l| Line::raw(l.to_owned())).collect()
}

/// Highlights `code` as `language`, one `Line` per source line.
///
/// Unknown languages and highlighter errors fall back to unstyled lines.
pub fn highlight_code(code: &str, language: &str) -> Vec<Line<'static>> {
    let (Some(syntax), Some(theme)) = (syntax_for(language), TS.themes.get(THEME)) else {
        tracing::debug!(language, "no highlighter available, rendering plain");
        return plain(code);
    };
    let mut h = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        match h.highlight_line(line, &PS) {
            Ok(ranges) => {
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .map(|(style, text)| syntect_to_span(style, text))
                    .filter(|span| !span.content.is_empty())
                    .collect();
                lines.push(Line::from(spans));
            }
            Err(e) => {
                tracing::warn!("highlighting failed: {e}");
                return plain(code);
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn keeps_one_line_per_source_line() {
        let code = "const a = 1;\nfunction f() {\n  return a;\n}";
        let lines = highlight_code(code, "typescript");
        assert_eq!(lines.len(), 4);
        assert_eq!(text_of(&lines[1]), "function f() {");
    }

    #[test]
    fn known_languages_get_colors() {
        let lines = highlight_code("let x = 42;", "js");
        assert!(lines[0].spans.iter().any(|s| s.style.fg.is_some()));
    }

    #[test]
    fn unknown_language_falls_back_to_plain() {
        let lines = highlight_code("a\nb", "no-such-language");
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.spans.iter().all(|s| s.style == Style::default())));
    }
}

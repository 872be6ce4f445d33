//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! During streaming, fragments are printed raw as they arrive; when a
//! full response needs re-display (the `/history` command), it is split
//! into prose and fenced-code segments, prose going through `termimad`
//! and code through `syntect`.

use std::io::Write;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

const CODE_THEME: &str = "base16-ocean.dark";

/// One chunk of a markdown response.
#[derive(Debug, PartialEq)]
enum Segment {
    Prose(String),
    Code { lang: String, body: String },
}

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes.remove(CODE_THEME).unwrap_or_default();

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Render a complete markdown response.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        for segment in split_fences(markdown) {
            match segment {
                Segment::Prose(text) => {
                    output.push_str(&self.skin.term_text(&text).to_string());
                }
                Segment::Code { lang, body } => {
                    output.push_str(&self.highlight_code(&lang, &body));
                    output.push('\n');
                }
            }
        }
        output
    }

    /// Print a single streamed fragment (raw, no formatting).
    pub fn print_fragment(&self, fragment: &str) {
        print!("{fragment}");
        let _ = std::io::stdout().flush();
    }

    /// Print the dim stats footer after a response.
    pub fn print_stats_footer(&self, tokens: u32, response_ms: u64, model: &str) {
        let seconds = response_ms as f64 / 1000.0;
        let footer = format!("| {tokens} tokens \u{00b7} {seconds:.1}s \u{00b7} {model}");
        println!("\n  {}", console::style(footer).dim());
    }

    fn highlight_code(&self, lang: &str, body: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let header = if lang.is_empty() {
            "---".to_string()
        } else {
            format!("--- {lang} ---")
        };
        let mut output = format!("  {}\n", console::style(header).dim());

        for line in body.lines() {
            let regions: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            output.push_str("  ");
            output.push_str(&as_24_bit_terminal_escaped(&regions, false));
            output.push_str("\x1b[0m\n");
        }

        output
    }
}

/// Split markdown into prose and fenced-code segments.
///
/// An unclosed fence at the end still yields its accumulated body.
fn split_fences(markdown: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut prose = String::new();
    let mut fence: Option<(String, String)> = None;

    for line in markdown.lines() {
        if line.starts_with("```") {
            match fence.take() {
                Some((lang, body)) => segments.push(Segment::Code { lang, body }),
                None => {
                    if !prose.is_empty() {
                        segments.push(Segment::Prose(std::mem::take(&mut prose)));
                    }
                    let lang = line.trim_start_matches('`').trim().to_string();
                    fence = Some((lang, String::new()));
                }
            }
        } else if let Some((_, body)) = fence.as_mut() {
            body.push_str(line);
            body.push('\n');
        } else {
            prose.push_str(line);
            prose.push('\n');
        }
    }

    if !prose.is_empty() {
        segments.push(Segment::Prose(prose));
    }
    if let Some((lang, body)) = fence {
        if !body.is_empty() {
            segments.push(Segment::Code { lang, body });
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_prose_and_code() {
        let segments = split_fences("intro\n```rust\nfn main() {}\n```\noutro");
        assert_eq!(
            segments,
            vec![
                Segment::Prose("intro\n".to_string()),
                Segment::Code {
                    lang: "rust".to_string(),
                    body: "fn main() {}\n".to_string(),
                },
                Segment::Prose("outro\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_unclosed_fence_keeps_body() {
        let segments = split_fences("```python\nprint('hi')");
        assert_eq!(
            segments,
            vec![Segment::Code {
                lang: "python".to_string(),
                body: "print('hi')\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_split_bare_fence_has_empty_lang() {
        let segments = split_fences("```\nx = 1\n```");
        assert_eq!(
            segments,
            vec![Segment::Code {
                lang: String::new(),
                body: "x = 1\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_render_final_plain_text() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("hello world");
        assert!(out.contains("hello world"));
    }

    #[test]
    fn test_render_final_code_fence() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("```rust\nfn main() {}\n```");
        assert!(out.contains("--- rust ---"));
        assert!(out.contains("main"));
    }

    #[test]
    fn test_render_final_unclosed_fence() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("```python\nprint('hi')");
        assert!(out.contains("print"));
    }
}

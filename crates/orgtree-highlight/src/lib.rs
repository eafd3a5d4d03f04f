//! Terminal styling for orgtree.
//!
//! Configuration files are highlighted with syntect. Chart output uses the plain ANSI
//! helpers: [`branch`] draws the tree, [`matched`] marks search hits.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra},
};

/// Highlights configuration text for the terminal.
pub struct Highlighter {
    /// Bundled language definitions.
    syntaxes: SyntaxSet,
    /// Bundled themes.
    themes: EmbeddedLazyThemeSet,
    /// Theme used for every highlight.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// A highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntaxes: extra_newlines(),
            themes: extra(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights a TOML document, such as a `.orgtree.toml` file.
    pub fn toml(&self, content: &str) -> String {
        self.paint(content, self.syntax("toml"))
    }

    /// Looks up a syntax by file extension, falling back to plain text.
    fn syntax(&self, extension: &str) -> &SyntaxReference {
        self.syntaxes
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    /// Highlights `content` line by line. Lines syntect rejects are kept unstyled.
    fn paint(&self, content: &str, syntax: &SyntaxReference) -> String {
        let mut lines = HighlightLines::new(syntax, self.themes.get(self.theme));
        let mut out = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntaxes)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        out.push_str(colors::RESET);
        out
    }
}

/// ANSI escape codes.
pub mod colors {
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Reverse video.
    pub const REVERSE: &str = "\x1b[7m";
    /// Cyan foreground.
    pub const CYAN: &str = "\x1b[36m";
    /// Green foreground.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow foreground.
    pub const YELLOW: &str = "\x1b[33m";
    /// Faint.
    pub const DIM: &str = "\x1b[2m";
    /// Clears every attribute.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `codes`, resetting afterwards.
fn styled(codes: &[&str], text: &str) -> String {
    let mut out = codes.concat();
    out.push_str(text);
    out.push_str(colors::RESET);
    out
}

/// Bold cyan, for page titles.
pub fn header(text: &str) -> String {
    styled(&[colors::BOLD, colors::CYAN], text)
}

/// Bold, for section titles.
pub fn subheader(text: &str) -> String {
    styled(&[colors::BOLD], text)
}

/// Faint, for identifiers, hints and tree lines.
pub fn dim(text: &str) -> String {
    styled(&[colors::DIM], text)
}

/// Green.
pub fn success(text: &str) -> String {
    styled(&[colors::GREEN], text)
}

/// Yellow.
pub fn warning(text: &str) -> String {
    styled(&[colors::YELLOW], text)
}

/// A search hit: bold yellow in reverse video.
pub fn matched(text: &str) -> String {
    styled(&[colors::BOLD, colors::REVERSE, colors::YELLOW], text)
}

/// The dimmed connector for a child in a tree listing, and the indent that continues
/// below it. The last child of a parent closes its branch.
pub fn branch(last: bool) -> (String, &'static str) {
    if last {
        (dim("└── "), "    ")
    } else {
        (dim("├── "), "│   ")
    }
}

/// A dimmed horizontal line `width` characters wide.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Indents every non-empty line of `content` by two spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

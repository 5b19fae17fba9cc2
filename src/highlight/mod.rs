//! Resolving and running the JSON syntax highlighter.
//!
//! Highlighting is split in three parts that are looked up by name when a
//! handler is built: a [`Lexer`] for JSON, a terminal [`Renderer`], and a
//! color [theme]. A [`Bundle`] holds all three once they resolved.
use crate::error::{CreationError, Error};
use std::fmt;
use syntect::highlighting::Theme;

pub mod lexer;
pub use lexer::{Lexer, Tokens};

pub mod render;
pub use render::Renderer;

pub mod theme;

/// The syntax records are serialized in.
pub const FORMAT: &str = "json";

/// The lexer, renderer, and theme a handler colorizes with.
#[derive(Clone, Copy)]
pub struct Bundle {
    lexer: Lexer,
    renderer: Renderer,
    theme: &'static Theme,
}

impl Bundle {
    /// Resolves the JSON lexer, then the renderer, then the theme.
    ///
    /// # Errors
    ///
    /// Fails on the first lookup that comes back empty.
    ///
    /// # Examples
    /// ```
    /// # use tracing_prettyjson::highlight::Bundle;
    /// assert!(Bundle::resolve("monokai", "terminal256").is_ok());
    ///
    /// let err = Bundle::resolve("no-such-style", "terminal256").unwrap_err();
    /// assert!(err.to_string().contains("no-such-style"));
    /// ```
    pub fn resolve(style: &str, renderer: &str) -> Result<Bundle, CreationError> {
        let lexer = Lexer::get(FORMAT).ok_or(CreationError::MissingLexer(FORMAT))?;
        let renderer = Renderer::get(renderer)
            .ok_or_else(|| CreationError::MissingRenderer(renderer.to_owned()))?;
        let theme =
            theme::get(style).ok_or_else(|| CreationError::UnknownStyle(style.to_owned()))?;

        Ok(Bundle {
            lexer,
            renderer,
            theme,
        })
    }

    /// Tokenizes and renders `text` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns the lexer's error unchanged. Nothing is produced on failure.
    pub fn colorize(&self, text: &str) -> Result<Vec<u8>, Error> {
        let tokens = self.lexer.tokenise(text)?;

        let mut writer = Vec::with_capacity(text.len() * 2);
        self.renderer.format(&mut writer, self.theme, &tokens)?;

        Ok(writer)
    }

    pub fn renderer(&self) -> Renderer {
        self.renderer
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("lexer", &self.lexer)
            .field("renderer", &self.renderer)
            .field("theme", &self.theme.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn lookups_fail_in_order() {
        let err = Bundle::resolve("no-such-style", "no-such-renderer").unwrap_err();
        assert!(matches!(err, CreationError::MissingRenderer(name) if name == "no-such-renderer"));

        let err = Bundle::resolve("no-such-style", "terminal").unwrap_err();
        assert!(matches!(err, CreationError::UnknownStyle(name) if name == "no-such-style"));
    }

    #[test]
    fn colorize_only_adds_escapes() {
        let text = "{\n  \"level\": \"INFO\",\n  \"n\": 42,\n  \"ok\": true\n}\n";

        for renderer in ["terminal", "terminal256", "terminal16m"] {
            let bundle = Bundle::resolve("monokai", renderer).unwrap();
            let colored = String::from_utf8(bundle.colorize(text).unwrap()).unwrap();

            assert!(colored.contains("\x1b["), "{} wrote no escapes", renderer);
            assert_eq!(strip_ansi(&colored), text);
        }
    }

    #[test]
    fn colorize_empty_text() {
        let bundle = Bundle::resolve("monokai", "terminal256").unwrap();
        assert!(bundle.colorize("").unwrap().is_empty());
    }
}

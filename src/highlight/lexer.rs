use once_cell::sync::Lazy;
use std::fmt;
use syntect::parsing::{ParseState, ParsingError, ScopeStackOp, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Splits text into scoped spans for one syntax.
#[derive(Clone, Copy)]
pub struct Lexer {
    syntax: &'static SyntaxReference,
}

/// The output of [`Lexer::tokenise`]: every line with the scope operations
/// that apply to it.
#[derive(Debug)]
pub struct Tokens<'t> {
    lines: Vec<(&'t str, Vec<(usize, ScopeStackOp)>)>,
}

impl Lexer {
    /// Looks up a lexer by syntax name or file extension, ignoring case.
    ///
    /// Returns `None` if no bundled syntax matches.
    pub fn get(name: &str) -> Option<Lexer> {
        Lazy::force(&SYNTAXES)
            .find_syntax_by_token(name)
            .map(|syntax| Lexer { syntax })
    }

    pub fn name(&self) -> &'static str {
        &self.syntax.name
    }

    /// Tokenizes `text` line by line.
    ///
    /// # Errors
    ///
    /// Returns the parser's error if the syntax definition fails on the input.
    pub fn tokenise<'t>(&self, text: &'t str) -> Result<Tokens<'t>, ParsingError> {
        let mut state = ParseState::new(self.syntax);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(text) {
            let ops = state.parse_line(line, &SYNTAXES)?;
            lines.push((line, ops));
        }

        Ok(Tokens { lines })
    }
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lexer").field(&self.syntax.name).finish()
    }
}

impl<'t> Tokens<'t> {
    pub(crate) fn lines(&self) -> &[(&'t str, Vec<(usize, ScopeStackOp)>)] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

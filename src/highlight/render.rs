use crate::highlight::lexer::Tokens;
use console::Color as AnsiColor;
use std::io::{self, Write};
use syntect::highlighting::{
    Color, FontStyle, HighlightIterator, HighlightState, Highlighter, Style, Theme,
};
use syntect::parsing::ScopeStack;
use syntect::util::as_24_bit_terminal_escaped;

// syntect's 24-bit escaper leaves the last color open
const RESET: &str = "\x1b[0m";

// xterm's default 8-color palette
const BASIC: [(AnsiColor, (u8, u8, u8)); 8] = [
    (AnsiColor::Black, (0, 0, 0)),
    (AnsiColor::Red, (205, 0, 0)),
    (AnsiColor::Green, (0, 205, 0)),
    (AnsiColor::Yellow, (205, 205, 0)),
    (AnsiColor::Blue, (0, 0, 238)),
    (AnsiColor::Magenta, (205, 0, 205)),
    (AnsiColor::Cyan, (0, 205, 205)),
    (AnsiColor::White, (229, 229, 229)),
];

/// Turns a token stream and a theme into ANSI-colored bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Renderer {
    /// The 8 standard foreground colors.
    Ansi8,
    /// The xterm 256-color palette.
    Ansi256,
    /// 24-bit color.
    TrueColor,
}

impl Renderer {
    /// Looks up a renderer by name.
    ///
    /// # Examples
    /// ```
    /// # use tracing_prettyjson::highlight::Renderer;
    /// assert_eq!(Renderer::get("terminal"), Some(Renderer::Ansi8));
    /// assert_eq!(Renderer::get("terminal256"), Some(Renderer::Ansi256));
    /// assert_eq!(Renderer::get("terminal16m"), Some(Renderer::TrueColor));
    /// assert_eq!(Renderer::get("html"), None);
    /// ```
    pub fn get(name: &str) -> Option<Renderer> {
        match name {
            "terminal" | "terminal8" => Some(Renderer::Ansi8),
            "terminal256" => Some(Renderer::Ansi256),
            "terminal16m" | "truecolor" => Some(Renderer::TrueColor),
            _ => None,
        }
    }

    /// Renders `tokens` into `writer` with the colors of `theme`.
    ///
    /// Every line is reset before its newline, so colors never leak past the
    /// end of a record.
    pub fn format(&self, writer: &mut Vec<u8>, theme: &Theme, tokens: &Tokens) -> io::Result<()> {
        let highlighter = Highlighter::new(theme);
        let mut state = HighlightState::new(&highlighter, ScopeStack::new());

        for (line, ops) in tokens.lines() {
            let mut spans: Vec<(Style, &str)> =
                HighlightIterator::new(&mut state, &ops[..], line, &highlighter).collect();

            let mut newline = "";
            if let Some((_, text)) = spans.last_mut() {
                let full: &str = *text;
                if let Some(body) = full.strip_suffix('\n') {
                    *text = body;
                    newline = "\n";
                }
            }
            spans.retain(|(_, text)| !text.is_empty());

            match self {
                Renderer::TrueColor if !spans.is_empty() => {
                    writer.write_all(as_24_bit_terminal_escaped(&spans, false).as_bytes())?;
                    writer.write_all(RESET.as_bytes())?;
                }
                Renderer::TrueColor => {}
                Renderer::Ansi8 | Renderer::Ansi256 => self.paint_runs(writer, &spans)?,
            }

            writer.write_all(newline.as_bytes())?;
        }

        Ok(())
    }

    // Neighboring spans with the same style share one escape sequence.
    fn paint_runs(&self, writer: &mut Vec<u8>, spans: &[(Style, &str)]) -> io::Result<()> {
        let mut run: Option<Style> = None;
        let mut text = String::new();

        for &(style, piece) in spans {
            if run != Some(style) {
                if let Some(style) = run {
                    self.paint(writer, style, &text)?;
                }
                text.clear();
                run = Some(style);
            }
            text.push_str(piece);
        }

        match run {
            Some(style) => self.paint(writer, style, &text),
            None => Ok(()),
        }
    }

    fn paint(&self, writer: &mut Vec<u8>, style: Style, text: &str) -> io::Result<()> {
        if text.trim().is_empty() {
            return writer.write_all(text.as_bytes());
        }
        write!(writer, "{}", self.ansi_style(style).apply_to(text))
    }

    fn ansi_style(&self, style: Style) -> console::Style {
        let mut ansi = console::Style::new().force_styling(true);

        let fg = style.foreground;
        if fg.a > 0 {
            ansi = ansi.fg(match self {
                Renderer::Ansi8 => basic(fg),
                Renderer::Ansi256 | Renderer::TrueColor => AnsiColor::Color256(ansi256(fg)),
            });
        }

        if style.font_style.contains(FontStyle::BOLD) {
            ansi = ansi.bold();
        }
        if style.font_style.contains(FontStyle::ITALIC) {
            ansi = ansi.italic();
        }
        if style.font_style.contains(FontStyle::UNDERLINE) {
            ansi = ansi.underlined();
        }

        ansi
    }
}

/// The closest standard color.
fn basic(color: Color) -> AnsiColor {
    let distance = |(r, g, b): (u8, u8, u8)| {
        let dr = i32::from(color.r) - i32::from(r);
        let dg = i32::from(color.g) - i32::from(g);
        let db = i32::from(color.b) - i32::from(b);
        dr * dr + dg * dg + db * db
    };

    BASIC
        .iter()
        .min_by_key(|(_, rgb)| distance(*rgb))
        .map_or(AnsiColor::White, |(ansi, _)| *ansi)
}

/// The closest entry of the xterm 256-color palette.
fn ansi256(color: Color) -> u8 {
    let Color { r, g, b, .. } = color;

    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((u16::from(r) - 8) * 24 / 247) as u8
        }
    } else {
        let scale = |v: u8| (u16::from(v) * 5 / 255) as u8;
        16 + 36 * scale(r) + 6 * scale(g) + scale(b)
    }
}

//! The handler contract and handler construction.
//!
//! See [`Handler`] for more details.
use crate::error::Error;
use crate::highlight::Bundle;
use crate::options::Options;
use crate::record::{Attr, Record};
use crate::sink::Sink;
use std::io::Write;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::Level;

pub mod json;
pub use json::JsonHandler;

pub mod pretty_json;
pub use pretty_json::PrettyJsonHandler;

/// A type that serializes, formats, and writes [`Record`]s.
///
/// Handlers are never mutated once built. Attaching attributes or a group
/// returns a new handler that writes to the same [`Sink`].
///
/// This trait is implemented for [`JsonHandler`] and [`PrettyJsonHandler`].
pub trait Handler: Send + Sync + 'static {
    /// Returns `true` if records at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    /// Formats `record` and writes it to the sink in one piece.
    ///
    /// # Errors
    ///
    /// Serialization, highlighting, and write errors are returned unchanged.
    /// Nothing is written if formatting fails.
    fn handle(&self, record: &Record) -> Result<(), Error>;

    /// Returns a handler that adds `attrs` to every record, inside any groups
    /// already opened.
    ///
    /// This cannot fail. If the new handler can't be built with the same
    /// formatting, a plain JSON handler is returned instead.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn Handler>;

    /// Returns a handler that nests all later attributes under `name`.
    ///
    /// An empty `name` opens no group.
    fn with_group(&self, name: &str) -> Box<dyn Handler>;
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn enabled(&self, level: Level) -> bool {
        self.as_ref().enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<(), Error> {
        self.as_ref().handle(record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn Handler> {
        self.as_ref().with_attrs(attrs)
    }

    fn with_group(&self, name: &str) -> Box<dyn Handler> {
        self.as_ref().with_group(name)
    }
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn enabled(&self, level: Level) -> bool {
        self.as_ref().enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<(), Error> {
        self.as_ref().handle(record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn Handler> {
        self.as_ref().with_attrs(attrs)
    }

    fn with_group(&self, name: &str) -> Box<dyn Handler> {
        self.as_ref().with_group(name)
    }
}

/// Which records get written, and whether they carry their source location.
///
/// This applies to every handler, whether or not it formats its output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Records below this level are dropped.
    pub level: LevelFilter,
    /// Write a `source` object with the module, file, and line.
    pub add_source: bool,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        HandlerOptions {
            level: LevelFilter::INFO,
            add_source: false,
        }
    }
}

impl HandlerOptions {
    pub fn level(mut self, level: impl Into<LevelFilter>) -> Self {
        self.level = level.into();
        self
    }

    pub fn add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        self.level >= level
    }
}

/// Builds a handler that writes to `writer`.
///
/// This is the same as `create(Sink::new(writer), opts, options)`.
///
/// # Errors
///
/// Fails with [`Error::CreationFailed`] if the JSON lexer, the renderer, or
/// the theme named in `options` can't be found.
///
/// # Examples
/// ```
/// # use tracing::Level;
/// # use tracing_prettyjson::handler::{new_handler, Handler, HandlerOptions};
/// # use tracing_prettyjson::options::Options;
/// # use tracing_prettyjson::record::Record;
/// let handler = new_handler(std::io::stdout(), HandlerOptions::default(), Options::new())?;
///
/// handler.handle(&Record::new(Level::INFO, "hello").with_attr("k", "v"))?;
/// # Ok::<(), tracing_prettyjson::Error>(())
/// ```
pub fn new_handler<W>(
    writer: W,
    opts: HandlerOptions,
    options: Options,
) -> Result<Box<dyn Handler>, Error>
where
    W: Write + Send + 'static,
{
    create(Sink::new(writer), opts, options)
}

/// Builds a handler that writes to `sink`.
///
/// If neither indentation nor colors are enabled, no lookups happen and a
/// plain [`JsonHandler`] is returned. Otherwise the JSON lexer, the renderer,
/// and the theme are resolved, in that order, and a [`PrettyJsonHandler`] is
/// returned.
///
/// # Errors
///
/// Fails with [`Error::CreationFailed`] on the first lookup that fails. No
/// handler is returned in that case.
pub fn create(sink: Sink, opts: HandlerOptions, options: Options) -> Result<Box<dyn Handler>, Error> {
    if options.is_plain() {
        return Ok(Box::new(JsonHandler::from_options(sink, opts, &options)));
    }

    let bundle = Bundle::resolve(&options.style, &options.renderer)?;

    Ok(Box::new(PrettyJsonHandler::new(sink, opts, options, bundle)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::testing::Buffer;

    #[test]
    fn level_threshold() {
        let opts = HandlerOptions::default().level(Level::WARN);

        assert!(opts.enabled(Level::ERROR));
        assert!(opts.enabled(Level::WARN));
        assert!(!opts.enabled(Level::INFO));
        assert!(!HandlerOptions::default().level(LevelFilter::OFF).enabled(Level::ERROR));
    }

    #[test]
    fn plain_options_skip_lookups() {
        // A broken style is never looked up without pretty or color.
        let options = Options::new().style("no-such-style").pretty(false).color(false);
        let buffer = Buffer::default();
        let handler = new_handler(buffer.clone(), HandlerOptions::default(), options).unwrap();

        handler.handle(&Record::new(Level::INFO, "plain")).unwrap();
        assert_eq!(buffer.contents(), "{\"level\":\"INFO\",\"msg\":\"plain\"}\n");
    }

    #[test]
    fn unknown_style_fails_creation() {
        let options = Options::new().style("no-such-style");
        let err = new_handler(Buffer::default(), HandlerOptions::default(), options)
            .err()
            .expect("creation should fail");

        assert!(err.is_creation_failed());
        assert!(err.to_string().contains("no-such-style"));
    }

    #[test]
    fn unknown_renderer_fails_creation() {
        let options = Options::new().color(false).renderer("html");
        let err = new_handler(Buffer::default(), HandlerOptions::default(), options)
            .err()
            .expect("creation should fail");

        assert!(err.is_creation_failed());
        assert!(err.to_string().contains("html"));
    }
}

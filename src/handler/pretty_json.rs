//! A [`Handler`] that indents and colorizes JSON records.
//!
//! See [`PrettyJsonHandler`] for more details.
use crate::error::Error;
use crate::fail;
use crate::handler::{create, Handler, HandlerOptions, JsonHandler};
use crate::highlight::Bundle;
use crate::options::Options;
use crate::pretty;
use crate::record::{Attr, Record};
use crate::sink::Sink;
use tracing::Level;

/// Decorates a [`JsonHandler`] with indentation and syntax highlighting.
///
/// Each record is serialized into its own buffer, re-indented if
/// [`Options::pretty`] is set, and colorized if [`Options::color`] is set.
/// Only then is the sink locked, and the finished buffer is written in one
/// call.
///
/// This type is created by [`create`] and [`new_handler`] when indentation or
/// colors are enabled.
///
/// [`new_handler`]: crate::handler::new_handler
#[derive(Clone, Debug)]
pub struct PrettyJsonHandler {
    inner: JsonHandler,
    sink: Sink,
    opts: HandlerOptions,
    options: Options,
    bundle: Bundle,
}

impl PrettyJsonHandler {
    pub(crate) fn new(sink: Sink, opts: HandlerOptions, options: Options, bundle: Bundle) -> Self {
        PrettyJsonHandler {
            inner: JsonHandler::from_options(sink.clone(), opts, &options),
            sink,
            opts,
            options,
            bundle,
        }
    }

    /// Returns the options this handler was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Runs the write path on `record` without writing the result.
    ///
    /// # Errors
    ///
    /// Returns serialization, indentation, and tokenizer errors unchanged.
    pub fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut writer = Vec::with_capacity(256);
        self.inner.serialize(record, &mut writer)?;

        if self.options.pretty {
            writer = pretty::reindent(&writer)?;
        }

        if self.options.color {
            writer = self.bundle.colorize(std::str::from_utf8(&writer)?)?;
        }

        Ok(writer)
    }

    fn derive(&self, options: Options) -> Box<dyn Handler> {
        match create(self.sink.clone(), self.opts, options.clone()) {
            Ok(handler) => handler,
            Err(err) => {
                fail::derive_error(err);
                Box::new(JsonHandler::from_options(self.sink.clone(), self.opts, &options))
            }
        }
    }
}

impl Handler for PrettyJsonHandler {
    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<(), Error> {
        let writer = self.format(record)?;
        self.sink.write_all(&writer)?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn Handler> {
        if attrs.is_empty() {
            return Box::new(self.clone());
        }
        self.derive(self.options.clone().attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Box<dyn Handler> {
        if name.is_empty() {
            return Box::new(self.clone());
        }
        self.derive(self.options.clone().group(name))
    }
}

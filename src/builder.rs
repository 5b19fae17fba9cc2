//! Build the [`PrettyJsonLayer`] and [`Subscriber`] with custom configuration
//! values.
//!
//! To start, call [`builder`] to create a [`LayerBuilder`], which configures
//! the handler and the layer by chaining methods.
//!
//! After the layer is configured, call [`build`] on the [`LayerBuilder`] to
//! get a [`SubscriberBuilder`]. At this point, other [`Layer`]s can be
//! composed onto it by chaining calls to the [`with`] method.
//!
//! Finally, code can be run in the context of the [`Subscriber`] by calling
//! [`on_closure`], or the subscriber can be installed for the whole process
//! with [`init`].
//!
//! # Examples
//! Writing to stderr with the `github` theme, at debug level, with source
//! locations:
//! ```
//! # use tracing::Level;
//! tracing_prettyjson::builder()
//!     .style("github")
//!     .level(Level::DEBUG)
//!     .add_source(true)
//!     .with_writer(std::io::stderr())
//!     .build()?
//!     .on_closure(|| {
//!         tracing::info!(key1 = "value1", key2 = 42, key3 = true, "This is an info message");
//!     });
//! # Ok::<(), tracing_prettyjson::Error>(())
//! ```
//!
//! [`build`]: LayerBuilder::build
//! [`with`]: SubscriberBuilder::with
//! [`on_closure`]: SubscriberBuilder::on_closure
//! [`init`]: SubscriberBuilder::init
use crate::cfg_env_filter;
use crate::error::Error;
use crate::handler::{create, HandlerOptions};
use crate::layer::PrettyJsonLayer;
use crate::options::Options;
use crate::record::Attr;
use crate::sink::Sink;
use std::io::Write;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::fmt::{MakeWriter, TestWriter};
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{Layer, Registry};

cfg_env_filter! {
    use tracing_subscriber::filter::EnvFilter;
}

/// Creates a new [`LayerBuilder`] that writes indented, colorized JSON to
/// stdout.
///
/// See the [module level documentation] for details on using [`builder`].
///
/// [module level documentation]: self
pub fn builder() -> LayerBuilder {
    LayerBuilder {
        options: Options::new(),
        opts: HandlerOptions::default(),
        sink: None,
        group_spans: false,
    }
}

/// A type for configuring [`PrettyJsonLayer`]s.
///
/// See the [module level documentation] for details on using
/// [`LayerBuilder`].
///
/// [module level documentation]: self
#[derive(Debug)]
pub struct LayerBuilder {
    options: Options,
    opts: HandlerOptions,
    sink: Option<Sink>,
    group_spans: bool,
}

impl LayerBuilder {
    /// Sets the color theme. See [`Options::style`].
    pub fn style(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.style(name);
        self
    }

    /// Sets the terminal renderer. See [`Options::renderer`].
    pub fn renderer(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.renderer(name);
        self
    }

    /// Enables or disables indentation.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.options = self.options.pretty(pretty);
        self
    }

    /// Enables or disables ANSI colors.
    pub fn color(mut self, color: bool) -> Self {
        self.options = self.options.color(color);
        self
    }

    /// Attaches attributes to every record.
    pub fn attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.options = self.options.attrs(attrs);
        self
    }

    /// Nests every record's attributes under `name`.
    pub fn group(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.group(name);
        self
    }

    /// Replaces all formatting options at once.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Drops events below `level`.
    pub fn level(mut self, level: impl Into<LevelFilter>) -> Self {
        self.opts = self.opts.level(level);
        self
    }

    /// Writes the module, file, and line of every event.
    pub fn add_source(mut self, add_source: bool) -> Self {
        self.opts = self.opts.add_source(add_source);
        self
    }

    /// Nests fields under the name of the span they were recorded in.
    /// See [`PrettyJsonLayer::group_spans`].
    pub fn group_spans(mut self, group_spans: bool) -> Self {
        self.group_spans = group_spans;
        self
    }

    /// Writes to `writer`.
    ///
    /// # Examples
    /// ```
    /// tracing_prettyjson::builder()
    ///     .with_writer(std::io::stderr())
    ///     .build()?
    ///     .on_closure(|| {
    ///         tracing::info!("Hello, world!");
    ///     });
    /// # Ok::<(), tracing_prettyjson::Error>(())
    /// ```
    pub fn with_writer<W>(self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.with_sink(Sink::new(writer))
    }

    /// Writes to a fresh writer from `make_writer` for every record.
    pub fn with_make_writer<M>(self, make_writer: M) -> Self
    where
        M: for<'a> MakeWriter<'a> + Send + 'static,
    {
        self.with_sink(Sink::from_make_writer(make_writer))
    }

    /// Applies a writer that is suitable for test environments.
    ///
    /// # Examples
    /// ```
    /// tracing_prettyjson::builder()
    ///     .with_test_writer()
    ///     .build()?
    ///     .on_closure(|| {
    ///         tracing::info!("Hello, world!");
    ///     });
    /// # Ok::<(), tracing_prettyjson::Error>(())
    /// ```
    pub fn with_test_writer(self) -> Self {
        self.with_make_writer(TestWriter::new())
    }

    /// Writes to an existing [`Sink`], sharing its lock with every other
    /// handler that writes there.
    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the layer.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CreationFailed`] if the theme or renderer can't be
    /// found.
    pub fn build_layer(self) -> Result<PrettyJsonLayer, Error> {
        let sink = self.sink.unwrap_or_else(Sink::stdout);
        let handler = create(sink, self.opts, self.options)?;

        Ok(PrettyJsonLayer::new(handler).group_spans(self.group_spans))
    }

    /// Builds the layer on top of a [`Registry`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CreationFailed`] if the theme or renderer can't be
    /// found.
    pub fn build(self) -> Result<SubscriberBuilder<Layered<PrettyJsonLayer, Registry>>, Error> {
        let subscriber = self.build_layer()?.with_subscriber(Registry::default());
        Ok(SubscriberBuilder { subscriber })
    }
}

/// A type for building [`Subscriber`]s by composing many [`Layer`]s.
#[derive(Debug)]
pub struct SubscriberBuilder<S> {
    subscriber: S,
}

impl<S> SubscriberBuilder<S>
where
    S: Subscriber,
{
    /// Wraps the inner subscriber with the provided `layer`.
    ///
    /// # Examples
    /// ```
    /// # use tracing_subscriber::filter::LevelFilter;
    /// tracing_prettyjson::builder()
    ///     .build()?
    ///     .with(LevelFilter::WARN)
    ///     .on_closure(|| {
    ///         // do stuff here...
    ///     });
    /// # Ok::<(), tracing_prettyjson::Error>(())
    /// ```
    pub fn with<L>(self, layer: L) -> SubscriberBuilder<Layered<L, S>>
    where
        L: Layer<S>,
    {
        SubscriberBuilder {
            subscriber: layer.with_subscriber(self.subscriber),
        }
    }

    cfg_env_filter! {
        /// Adds an environment filter to this subscriber. This is based on the
        /// [`tracing_subscriber`] [`EnvFilter`] and uses the same `RUST_LOG` syntax.
        ///
        /// If the `RUST_LOG` environment value is not found, this will default to `info`.
        pub fn with_env_filter(self) -> SubscriberBuilder<Layered<EnvFilter, S>> {
            let filter_layer = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"));
            self.with(filter_layer)
        }
    }

    /// Returns the composed subscriber.
    pub fn into_inner(self) -> S {
        self.subscriber
    }
}

impl<S> SubscriberBuilder<S>
where
    S: Subscriber + Send + Sync + 'static,
{
    /// Runs the provided closure with the subscriber as the thread's default.
    pub fn on_closure<R>(self, closure: impl FnOnce() -> R) -> R {
        tracing::subscriber::with_default(self.subscriber, closure)
    }

    /// Installs the subscriber as the default for the whole process.
    ///
    /// # Errors
    ///
    /// Fails if a global default was already set.
    pub fn init(self) -> Result<(), Error> {
        tracing::subscriber::set_global_default(self.subscriber)?;
        Ok(())
    }
}

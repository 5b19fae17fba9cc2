//! Indented, syntax-highlighted JSON logs for [`tracing`].
//!
//! # Overview
//!
//! Structured JSON logs are easy for machines to read and hard for people to
//! read. This crate provides a [`Handler`] that writes every record as JSON,
//! and then optionally re-indents it and colors it with a terminal color
//! theme, so the same logs stay machine-readable while being pleasant to
//! read in a terminal during development.
//!
//! The handler can be used directly with hand-made [`Record`]s, or plugged
//! into [`tracing-subscriber`] through [`PrettyJsonLayer`].
//!
//! [`tracing-subscriber`]: tracing_subscriber
//! [`Record`]: crate::record::Record
//!
//! # Getting started
//!
//! The easiest way to get started is to enable all features. Do this by
//! adding the following to your `Cargo.toml` file:
//! ```toml
//! tracing-prettyjson = { version = "0.1", features = ["full"] }
//! ```
//! Then, install the subscriber at the start of your main function:
//! ```
//! # use tracing::Level;
//! tracing_prettyjson::builder()
//!     .level(Level::DEBUG)
//!     .build()?
//!     .on_closure(|| {
//!         tracing::info!(key1 = "value1", key2 = 42, key3 = true, "This is an info message");
//!     });
//! # Ok::<(), tracing_prettyjson::Error>(())
//! ```
//! ```json
//! {
//!   "time": "2024-01-02T03:04:05.678901+00:00",
//!   "level": "INFO",
//!   "msg": "This is an info message",
//!   "key1": "value1",
//!   "key2": 42,
//!   "key3": true
//! }
//! ```
//! The `time` field is only written with the `chrono` feature. In a
//! terminal, keys, strings, numbers and literals are each drawn in the
//! theme's color for them.
//!
//! # Formatting options
//!
//! Output is controlled by [`Options`]:
//! * `style`: the color theme. Defaults to `monokai`. Every theme that ships
//!   with [`syntect`] is available, along with the aliases `github`,
//!   `solarized-dark` and `solarized-light`.
//! * `renderer`: how colors are written. One of `terminal` (8 colors),
//!   `terminal256` (the default) or `terminal16m` (true color).
//! * `pretty`: indent the JSON. Defaults to `true`.
//! * `color`: color the JSON. Defaults to `true`.
//!
//! Turning both `pretty` and `color` off gives plain single-line JSON, and no
//! theme or renderer is looked up at all.
//!
//! ```
//! # use tracing_prettyjson::{HandlerOptions, Options};
//! let options = Options::new().style("github").renderer("terminal16m");
//! let handler = tracing_prettyjson::new_handler(std::io::stdout(), HandlerOptions::default(), options)?;
//! # Ok::<(), tracing_prettyjson::Error>(())
//! ```
//!
//! # Attributes and groups
//!
//! Like `slog`, a handler can derive new handlers that carry extra
//! attributes, or that nest everything under a named group. Derived handlers
//! share the writer, and the lock around it, with the handler they came
//! from, so records from any of them never interleave.
//! ```
//! # use tracing::Level;
//! # use tracing_prettyjson::{Handler, HandlerOptions, Options};
//! # use tracing_prettyjson::record::{Attr, Record};
//! let handler = tracing_prettyjson::new_handler(std::io::stdout(), HandlerOptions::default(), Options::new())?;
//! let request = handler
//!     .with_attrs(vec![Attr::new("service", "api")])
//!     .with_group("request")
//!     .with_attrs(vec![Attr::new("id", 7)]);
//!
//! request.handle(&Record::new(Level::INFO, "done").with_attr("status", 200))?;
//! # Ok::<(), tracing_prettyjson::Error>(())
//! ```
//! ```json
//! {
//!   "level": "INFO",
//!   "msg": "done",
//!   "service": "api",
//!   "request": {
//!     "id": 7,
//!     "status": 200
//!   }
//! }
//! ```
//!
//! With [`group_spans`], the [`PrettyJsonLayer`] does the same for spans:
//! each span opens a group named after itself.
//!
//! [`group_spans`]: crate::builder::LayerBuilder::group_spans
//!
//! # Feature flags
//!
//! This crate uses feature flags to reduce dependency bloat.
//!
//! * `full`: Enables all features listed below.
//! * `chrono`: Adds an RFC 3339 `time` field to records made by the layer.
//! * `smallvec`: Records store their attributes on the stack when there are
//!   few enough.
//! * `env-filter`: Adds [`with_env_filter`] to the subscriber builder.
//!
//! [`with_env_filter`]: crate::builder::SubscriberBuilder::with_env_filter

pub mod builder;
pub mod error;
pub mod handler;
pub mod highlight;
pub mod layer;
pub mod options;
pub mod pretty;
pub mod record;
pub mod sink;

#[macro_use]
mod cfg;
mod fail;
mod ser;

pub mod prelude;

pub use crate::builder::builder;
pub use crate::error::Error;
pub use crate::handler::{new_handler, Handler, HandlerOptions};
pub use crate::layer::PrettyJsonLayer;
pub use crate::options::Options;
pub use crate::sink::Sink;

/// Installs a global subscriber that writes indented, colorized JSON to
/// stdout at `INFO` and above.
///
/// # Errors
///
/// Fails if a global default subscriber was already set.
pub fn init() -> Result<(), Error> {
    builder().build()?.init()
}

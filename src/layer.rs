//! A [`Layer`] that sends `tracing` events through a [`Handler`].
//!
//! See [`PrettyJsonLayer`] for more details.
use crate::fail;
use crate::handler::Handler;
use crate::record::{Attr, Record, Source, Value};
#[cfg(feature = "chrono")]
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::span::{self, Attributes, Id};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::{LookupSpan, SpanRef};

/// The handler derived for a span, stored in the span's extensions.
struct SpanHandler {
    parent: Arc<dyn Handler>,
    /// The span's fields, one entry per key.
    fields: Vec<Attr>,
    handler: Arc<dyn Handler>,
}

/// A [`Layer`] that turns `tracing` events into [`Record`]s and hands them to
/// a [`Handler`].
///
/// Span fields become attributes: every span derives a handler from its
/// parent's with [`Handler::with_attrs`], and events are handled by the
/// handler of the span they occur in. With [`group_spans`], each span also
/// opens a group named after itself, so its fields and everything logged
/// inside it are nested under the span name.
///
/// Events below the handler's level are disabled. Spans are always enabled
/// so that their fields still reach the events inside them.
///
/// # Examples
/// ```
/// # use tracing_prettyjson::handler::{new_handler, HandlerOptions};
/// # use tracing_prettyjson::layer::PrettyJsonLayer;
/// # use tracing_prettyjson::options::Options;
/// # use tracing_subscriber::{Layer, Registry};
/// let handler = new_handler(std::io::stdout(), HandlerOptions::default(), Options::new())?;
/// let subscriber = PrettyJsonLayer::new(handler).with_subscriber(Registry::default());
///
/// tracing::subscriber::with_default(subscriber, || {
///     tracing::info_span!("request", id = 7).in_scope(|| {
///         tracing::info!(status = 200, "done");
///     });
/// });
/// # Ok::<(), tracing_prettyjson::Error>(())
/// ```
/// ```json
/// {
///   "time": "2024-01-02T03:04:05.678901+00:00",
///   "level": "INFO",
///   "msg": "done",
///   "id": 7,
///   "status": 200
/// }
/// ```
/// The `time` field is only written with the `chrono` feature.
///
/// [`group_spans`]: PrettyJsonLayer::group_spans
#[derive(Clone)]
pub struct PrettyJsonLayer {
    root: Arc<dyn Handler>,
    group_spans: bool,
}

impl PrettyJsonLayer {
    /// Create a new [`PrettyJsonLayer`] that writes with `handler`.
    pub fn new(handler: Box<dyn Handler>) -> Self {
        PrettyJsonLayer {
            root: Arc::from(handler),
            group_spans: false,
        }
    }

    /// Nest span fields, and everything logged inside a span, under the
    /// span's name.
    pub fn group_spans(mut self, group_spans: bool) -> Self {
        self.group_spans = group_spans;
        self
    }

    /// Returns the handler used outside of any span.
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.root
    }

    fn handler_of<S>(&self, span: Option<SpanRef<'_, S>>) -> Arc<dyn Handler>
    where
        S: for<'a> LookupSpan<'a>,
    {
        let mut handler = None;
        if let Some(span) = span {
            handler = span
                .extensions()
                .get::<SpanHandler>()
                .map(|found| Arc::clone(&found.handler));
        }
        handler.unwrap_or_else(|| Arc::clone(&self.root))
    }

    fn derive(&self, parent: &Arc<dyn Handler>, name: &str, fields: &[Attr]) -> Arc<dyn Handler> {
        if self.group_spans {
            Arc::from(parent.with_group(name).with_attrs(fields.to_vec()))
        } else if fields.is_empty() {
            Arc::clone(parent)
        } else {
            Arc::from(parent.with_attrs(fields.to_vec()))
        }
    }
}

impl fmt::Debug for PrettyJsonLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyJsonLayer")
            .field("group_spans", &self.group_spans)
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for PrettyJsonLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        !metadata.is_event() || self.root.enabled(*metadata.level())
    }

    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let span = ctx.span(id).unwrap_or_else(fail::span_not_in_ctx);

        let mut visitor = Visitor::default();
        attrs.record(&mut visitor);
        let fields = visitor.into_attrs();

        let parent = self.handler_of(span.parent());
        let handler = self.derive(&parent, span.name(), &fields);

        span.extensions_mut().insert(SpanHandler {
            parent,
            fields,
            handler,
        });
    }

    fn on_record(&self, id: &Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        let mut visitor = Visitor::default();
        values.record(&mut visitor);
        let fields = visitor.into_attrs();

        if fields.is_empty() {
            return;
        }

        let span = ctx.span(id).unwrap_or_else(fail::span_not_in_ctx);
        let mut extensions = span.extensions_mut();
        let current = extensions
            .get_mut::<SpanHandler>()
            .unwrap_or_else(fail::span_handler_not_in_exts);

        // Recording a field again replaces its value.
        for attr in fields {
            match current.fields.iter_mut().find(|field| field.key() == attr.key()) {
                Some(field) => *field = attr,
                None => current.fields.push(attr),
            }
        }

        current.handler = self.derive(&current.parent, span.name(), &current.fields);
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let handler = self.handler_of(ctx.event_span(event));

        if !handler.enabled(*metadata.level()) {
            return;
        }

        let mut visitor = Visitor::default();
        event.record(&mut visitor);

        let mut record = Record::new(*metadata.level(), visitor.message.unwrap_or_default())
            .with_source(Source::from(metadata));
        record.add_attrs(visitor.attrs);

        #[cfg(feature = "chrono")]
        let record = record.with_time(Utc::now());

        if let Err(err) = handler.handle(&record) {
            fail::handle_error(err);
        }
    }
}

#[derive(Default)]
struct Visitor {
    message: Option<String>,
    attrs: Vec<Attr>,
}

impl Visitor {
    fn push(&mut self, field: &Field, value: impl Into<Value>) {
        self.attrs.push(Attr::new(field.name(), value));
    }

    // Spans don't have a message of their own, so keep it as a field.
    fn into_attrs(mut self) -> Vec<Attr> {
        if let Some(message) = self.message.take() {
            self.attrs.insert(0, Attr::new("message", message));
        }
        self.attrs
    }
}

impl Visit for Visitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" if self.message.is_none() => self.message = Some(value.to_owned()),
            _ => self.push(field, value),
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{:?}", value);
        match field.name() {
            "message" if self.message.is_none() => self.message = Some(value),
            _ => self.push(field, value),
        }
    }
}

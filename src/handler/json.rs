//! A [`Handler`] that writes records as single-line JSON objects.
//!
//! See [`JsonHandler`] for more details.
use crate::error::Error;
use crate::handler::{Handler, HandlerOptions};
use crate::options::Options;
use crate::record::{Attr, Record};
use crate::ser;
use crate::sink::Sink;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::Level;

/// Writes every record as one JSON object per line.
///
/// Built-in keys come first: `time` (if the record has one), `level`,
/// `source` (with [`HandlerOptions::add_source`]), and `msg`. They are followed
/// by the handler's attributes and then the record's, nested under any open
/// groups. Groups that would end up empty are left out.
///
/// # Examples
/// ```
/// # use tracing::Level;
/// # use tracing_prettyjson::handler::{Handler, HandlerOptions, JsonHandler};
/// # use tracing_prettyjson::record::{Attr, Record};
/// # use tracing_prettyjson::sink::Sink;
/// let handler = JsonHandler::new(Sink::stdout(), HandlerOptions::default())
///     .with_attrs(vec![Attr::new("service", "api")])
///     .with_group("request");
///
/// handler.handle(&Record::new(Level::INFO, "done").with_attr("status", 200))?;
/// # Ok::<(), tracing_prettyjson::Error>(())
/// ```
/// ```json
/// {"level":"INFO","msg":"done","service":"api","request":{"status":200}}
/// ```
#[derive(Clone, Debug)]
pub struct JsonHandler {
    sink: Sink,
    opts: HandlerOptions,
    /// Attributes attached before any group was opened.
    root: Vec<Attr>,
    /// Open groups, outermost first.
    groups: Vec<Group>,
}

#[derive(Clone, Debug)]
struct Group {
    name: String,
    attrs: Vec<Attr>,
}

impl JsonHandler {
    /// Create a new [`JsonHandler`] without attributes or groups.
    pub fn new(sink: Sink, opts: HandlerOptions) -> Self {
        JsonHandler {
            sink,
            opts,
            root: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Create a new [`JsonHandler`] with the attributes and groups of
    /// `options` applied in the order they were attached.
    pub fn from_options(sink: Sink, opts: HandlerOptions, options: &Options) -> Self {
        let mut handler = JsonHandler::new(sink, opts);
        let mut attrs = options.attrs.iter().peekable();

        for depth in 0..=options.groups.len() {
            while let Some(scoped) = attrs.next_if(|scoped| scoped.depth <= depth) {
                handler.push_attrs(Some(scoped.attr.clone()));
            }
            if let Some(name) = options.groups.get(depth) {
                handler.open_group(name);
            }
        }

        handler
    }

    /// Serializes `record` onto the end of `writer`, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if a value can't be represented in JSON.
    pub fn serialize(&self, record: &Record, writer: &mut Vec<u8>) -> Result<(), Error> {
        serde_json::to_writer(
            &mut *writer,
            &RecordView {
                handler: self,
                record,
            },
        )?;
        writer.push(b'\n');
        Ok(())
    }

    fn push_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        let target = match self.groups.last_mut() {
            Some(group) => &mut group.attrs,
            None => &mut self.root,
        };
        target.extend(attrs);
    }

    fn open_group(&mut self, name: &str) {
        if !name.is_empty() {
            self.groups.push(Group {
                name: name.to_owned(),
                attrs: Vec::new(),
            });
        }
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        self.opts.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<(), Error> {
        let mut writer = Vec::with_capacity(256);
        self.serialize(record, &mut writer)?;
        self.sink.write_all(&writer)?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn Handler> {
        let mut handler = self.clone();
        handler.push_attrs(attrs);
        Box::new(handler)
    }

    fn with_group(&self, name: &str) -> Box<dyn Handler> {
        let mut handler = self.clone();
        handler.open_group(name);
        Box::new(handler)
    }
}

struct RecordView<'a> {
    handler: &'a JsonHandler,
    record: &'a Record,
}

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let RecordView { handler, record } = self;
        let mut model = serializer.serialize_map(None)?;

        #[cfg(feature = "chrono")]
        if let Some(time) = &record.time {
            model.serialize_entry("time", &time.to_rfc3339())?;
        }

        model.serialize_entry("level", record.level.as_str())?;

        if handler.opts.add_source {
            if let Some(source) = &record.source {
                model.serialize_entry("source", source)?;
            }
        }

        model.serialize_entry("msg", &record.message)?;

        ser::attrs_into(&mut model, &handler.root)?;
        groups_into(&mut model, &handler.groups, &record.attrs)?;

        model.end()
    }
}

/// The open groups below some depth, with the record's attributes innermost.
struct GroupView<'a> {
    groups: &'a [Group],
    attrs: &'a [Attr],
}

impl GroupView<'_> {
    fn is_empty(&self) -> bool {
        self.groups
            .iter()
            .flat_map(|group| group.attrs.iter())
            .chain(self.attrs.iter())
            .all(Attr::is_empty)
    }
}

impl Serialize for GroupView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut model = serializer.serialize_map(None)?;
        if let Some((first, rest)) = self.groups.split_first() {
            ser::attrs_into(&mut model, &first.attrs)?;
            groups_into(&mut model, rest, self.attrs)?;
        }
        model.end()
    }
}

fn groups_into<M: SerializeMap>(model: &mut M, groups: &[Group], attrs: &[Attr]) -> Result<(), M::Error> {
    let first = match groups.first() {
        Some(first) => first,
        None => return ser::attrs_into(model, attrs),
    };

    let view = GroupView { groups, attrs };
    if !view.is_empty() {
        model.serialize_entry(&first.name, &view)?;
    }

    Ok(())
}

//! The structured log event that handlers consume.
//!
//! A [`Record`] is what a [`Handler`] serializes: a level, a message, an
//! optional source location and timestamp, and an ordered list of [`Attr`]s.
//! The [`PrettyJsonLayer`] builds one for every `tracing` event, but records
//! can also be created by hand and passed straight to a handler.
//!
//! [`Handler`]: crate::handler::Handler
//! [`PrettyJsonLayer`]: crate::layer::PrettyJsonLayer
use crate::{cfg_chrono, cfg_smallvec};
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use tracing::{Level, Metadata};

cfg_smallvec! {
    pub(crate) type AttrSet = smallvec::SmallVec<[Attr; 4]>;
}
#[cfg(not(feature = "smallvec"))]
pub(crate) type AttrSet = Vec<Attr>;

/// A key-value pair attached to a record or a handler.
#[derive(Clone, Debug, PartialEq)]
pub struct Attr {
    pub(crate) key: String,
    pub(crate) value: Value,
}

/// The value half of an [`Attr`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    /// Nested attributes, serialized as an object under the attribute's key.
    ///
    /// A group with an empty key is inlined into its parent, and a group with
    /// no attributes is left out entirely.
    Group(Vec<Attr>),
}

impl Attr {
    /// Create a new attribute.
    ///
    /// # Examples
    /// ```
    /// # use tracing_prettyjson::record::Attr;
    /// let attrs = [
    ///     Attr::new("key1", "value1"),
    ///     Attr::new("key2", 42),
    ///     Attr::new("key3", true),
    /// ];
    /// ```
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Attr {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create an attribute holding a group of attributes.
    pub fn group(key: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) -> Self {
        Attr::new(key, Value::Group(attrs.into_iter().collect()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns `true` if serializing this attribute would write nothing.
    pub(crate) fn is_empty(&self) -> bool {
        match &self.value {
            Value::Group(attrs) => attrs.iter().all(Attr::is_empty),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I64(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U64(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value::Group(attrs)
    }
}

/// Where in the program a record was emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Source {
    pub module: Option<&'static str>,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

impl From<&'static Metadata<'static>> for Source {
    fn from(metadata: &'static Metadata<'static>) -> Self {
        Source {
            module: metadata.module_path(),
            file: metadata.file(),
            line: metadata.line(),
        }
    }
}

/// One structured log event.
#[derive(Clone, Debug)]
pub struct Record {
    /// When the event occurred. Left out of the output if unset.
    #[cfg(feature = "chrono")]
    pub(crate) time: Option<DateTime<Utc>>,

    pub(crate) level: Level,

    pub(crate) message: String,

    /// Only written if the handler was built with `add_source`.
    pub(crate) source: Option<Source>,

    pub(crate) attrs: AttrSet,
}

impl Record {
    /// Create a new record without a timestamp, source, or attributes.
    ///
    /// # Examples
    /// ```
    /// # use tracing::Level;
    /// # use tracing_prettyjson::record::Record;
    /// let record = Record::new(Level::INFO, "This is an info message")
    ///     .with_attr("key1", "value1")
    ///     .with_attr("key2", 42);
    ///
    /// assert_eq!(record.attrs().len(), 2);
    /// ```
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Record {
            #[cfg(feature = "chrono")]
            time: None,
            level,
            message: message.into(),
            source: None,
            attrs: AttrSet::default(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push(Attr::new(key, value));
        self
    }

    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    cfg_chrono! {
        pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
            self.time = Some(time);
            self
        }

        /// Returns the [`DateTime`] that the record occurred at, if set.
        pub fn time(&self) -> Option<DateTime<Utc>> {
            self.time
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    /// Returns the record's attributes in the order they were added.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_empty_groups_are_empty() {
        let attr = Attr::group("outer", [Attr::group("inner", [])]);
        assert!(attr.is_empty());

        let attr = Attr::group("outer", [Attr::group("inner", [Attr::new("k", "v")])]);
        assert!(!attr.is_empty());
    }

    #[test]
    fn attrs_keep_insertion_order() {
        let mut record = Record::new(Level::WARN, "msg").with_attr("b", 1);
        record.add_attrs([Attr::new("a", 2), Attr::new("c", 3)]);

        let keys: Vec<&str> = record.attrs().iter().map(Attr::key).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }
}

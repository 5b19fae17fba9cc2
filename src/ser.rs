use crate::record::{Attr, Source, Value};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(value) => serializer.serialize_str(value),
            Value::I64(value) => serializer.serialize_i64(*value),
            Value::U64(value) => serializer.serialize_u64(*value),
            Value::F64(value) => serializer.serialize_f64(*value),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Group(attrs) => {
                let mut model = serializer.serialize_map(None)?;
                attrs_into(&mut model, attrs)?;
                model.end()
            }
        }
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut model = serializer.serialize_map(None)?;
        if let Some(module) = self.module {
            model.serialize_entry("module", module)?;
        }
        if let Some(file) = self.file {
            model.serialize_entry("file", file)?;
        }
        if let Some(line) = self.line {
            model.serialize_entry("line", &line)?;
        }
        model.end()
    }
}

/// Writes `attrs` as entries of an already open map.
pub(crate) fn attrs_into<M: SerializeMap>(model: &mut M, attrs: &[Attr]) -> Result<(), M::Error> {
    for attr in attrs.iter().filter(|attr| !attr.is_empty()) {
        match &attr.value {
            Value::Group(inner) if attr.key.is_empty() => attrs_into(model, inner)?,
            value => model.serialize_entry(&attr.key, value)?,
        }
    }
    Ok(())
}

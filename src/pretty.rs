//! Re-indents serialized JSON records.
use serde::de::IgnoredAny;
use serde_json::{Deserializer, Serializer};

/// Re-indents one or more newline-separated JSON documents with two spaces.
///
/// Documents are streamed token by token, so every key is kept in the order
/// it was written, including keys that appear more than once in an object.
/// Every document ends with a newline.
///
/// # Errors
///
/// Returns an error if `json` is not valid JSON.
///
/// # Examples
/// ```
/// let pretty = tracing_prettyjson::pretty::reindent(br#"{"a":1,"b":[true],"a":2}"#).unwrap();
/// assert_eq!(pretty, b"{\n  \"a\": 1,\n  \"b\": [\n    true\n  ],\n  \"a\": 2\n}\n");
/// ```
pub fn reindent(json: &[u8]) -> serde_json::Result<Vec<u8>> {
    let mut writer = Vec::with_capacity(json.len() * 2);
    let mut documents = Deserializer::from_slice(json).into_iter::<IgnoredAny>();
    let mut start = 0;

    while let Some(document) = documents.next() {
        document?;
        let end = documents.byte_offset();

        let mut reader = Deserializer::from_slice(&json[start..end]);
        serde_transcode::transcode(&mut reader, &mut Serializer::pretty(&mut writer))?;
        writer.push(b'\n');

        start = end;
    }

    Ok(writer)
}

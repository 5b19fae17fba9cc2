use parking_lot::Mutex;
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, field, info, info_span, warn, Level};
use tracing_prettyjson::builder::LayerBuilder;
use tracing_prettyjson::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Layer, Registry};

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn records(&self) -> Vec<Value> {
        let bytes = self.0.lock().clone();
        serde_json::Deserializer::from_slice(&bytes)
            .into_iter::<Value>()
            .collect::<Result<_, _>>()
            .expect("every record is complete json")
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn plain(buffer: &Buffer) -> LayerBuilder {
    tracing_prettyjson::builder()
        .pretty(false)
        .color(false)
        .with_writer(buffer.clone())
}

fn run(builder: LayerBuilder, f: impl FnOnce()) {
    let subscriber = builder
        .build_layer()
        .expect("layer builds")
        .with_subscriber(Registry::default());
    tracing::subscriber::with_default(subscriber, f);
}

#[test]
fn test_event_fields() {
    let buffer = Buffer::default();
    run(plain(&buffer), || {
        info!(key1 = "value1", key2 = 42, key3 = true, "This is an info message");
        info!(count = 3_u64, ratio = 0.5, list = ?vec![1, 2], "x = {}", 3);
    });

    let records = buffer.records();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert!(first["time"].is_string());
    assert_eq!(first["level"], "INFO");
    assert_eq!(first["msg"], "This is an info message");
    assert_eq!(first["key1"], "value1");
    assert_eq!(first["key2"], 42);
    assert_eq!(first["key3"], true);
    assert!(first.get("source").is_none());

    let second = &records[1];
    assert_eq!(second["msg"], "x = 3");
    assert_eq!(second["count"], 3);
    assert_eq!(second["ratio"], 0.5);
    assert_eq!(second["list"], "[1, 2]");
}

#[test]
fn test_time_comes_first() {
    let buffer = Buffer::default();
    run(plain(&buffer), || info!("m"));

    let bytes = buffer.0.lock().clone();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("{\"time\":\""));

    let time = buffer.records()[0]["time"].as_str().unwrap().to_owned();
    assert!(chrono::DateTime::parse_from_rfc3339(&time).is_ok());
}

#[test]
fn test_span_fields_reach_events() {
    let buffer = Buffer::default();
    run(plain(&buffer), || {
        info_span!("request", id = 7).in_scope(|| {
            info_span!("db", table = "users").in_scope(|| {
                info!(rows = 2, "query");
            });
            info!(status = 200, "done");
        });
        info!("outside");
    });

    let records = buffer.records();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["msg"], "query");
    assert_eq!(records[0]["id"], 7);
    assert_eq!(records[0]["table"], "users");
    assert_eq!(records[0]["rows"], 2);

    assert_eq!(records[1]["id"], 7);
    assert!(records[1].get("table").is_none());

    assert!(records[2].get("id").is_none());
}

#[test]
fn test_group_spans() {
    let buffer = Buffer::default();
    run(plain(&buffer).group_spans(true), || {
        info_span!("request", id = 7).in_scope(|| {
            info_span!("db", table = "users").in_scope(|| {
                info!(rows = 2, "query");
            });
        });
    });

    let records = buffer.records();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record["msg"], "query");
    assert!(record.get("id").is_none());
    assert_eq!(record["request"]["id"], 7);
    assert_eq!(record["request"]["db"]["table"], "users");
    assert_eq!(record["request"]["db"]["rows"], 2);
}

#[test]
fn test_recorded_span_fields() {
    let buffer = Buffer::default();
    run(plain(&buffer), || {
        let span = info_span!("job", attempt = field::Empty);
        span.in_scope(|| info!("before"));
        span.record("attempt", 2);
        span.in_scope(|| info!("after"));
    });

    let records = buffer.records();
    assert!(records[0].get("attempt").is_none());
    assert_eq!(records[1]["attempt"], 2);
}

#[test]
fn test_rerecorded_span_field_replaces_value() {
    for pretty in [false, true] {
        let buffer = Buffer::default();
        run(plain(&buffer).pretty(pretty), || {
            let span = info_span!("job", attempt = 1, state = field::Empty);
            span.record("attempt", 2);
            span.record("state", "running");
            span.record("attempt", 3);
            span.in_scope(|| info!("tick"));
        });

        let text = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert_eq!(text.matches("\"attempt\"").count(), 1);

        let record = &buffer.records()[0];
        assert_eq!(record["attempt"], 3);
        assert_eq!(record["state"], "running");
    }
}

#[test]
fn test_rerecorded_span_field_in_group() {
    let buffer = Buffer::default();
    run(plain(&buffer).group_spans(true), || {
        let span = info_span!("job", attempt = 1);
        span.record("attempt", 2);
        span.in_scope(|| info!(n = 1, "tick"));
    });

    let text = String::from_utf8(buffer.0.lock().clone()).unwrap();
    assert_eq!(text.matches("\"attempt\"").count(), 1);
    assert!(text.contains("\"job\":{\"attempt\":2,\"n\":1}"));
}

#[test]
fn test_level_threshold_drops_events() {
    let buffer = Buffer::default();
    run(plain(&buffer).level(Level::WARN), || {
        debug!("dropped");
        info!("dropped");
        warn!("kept");
    });

    let records = buffer.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "WARN");
    assert_eq!(records[0]["msg"], "kept");
}

#[test]
fn test_add_source() {
    let buffer = Buffer::default();
    run(plain(&buffer).add_source(true), || info!("m"));

    let source = &buffer.records()[0]["source"];
    assert_eq!(source["module"], "layer");
    assert!(source["file"].as_str().unwrap().ends_with("layer.rs"));
    assert!(source["line"].is_u64());
}

#[test]
fn test_builder_attrs_and_group() {
    let buffer = Buffer::default();
    let builder = plain(&buffer)
        .attrs([tracing_prettyjson::record::Attr::new("service", "api")])
        .group("app");
    run(builder, || info!(k = "v", "m"));

    let record = &buffer.records()[0];
    assert_eq!(record["service"], "api");
    assert_eq!(record["app"]["k"], "v");
}

#[test]
fn test_pretty_colored_layer() {
    let buffer = Buffer::default();
    let builder = tracing_prettyjson::builder()
        .style("github")
        .with_writer(buffer.clone());
    run(builder, || info!(k = "v", "m"));

    let text = String::from_utf8(buffer.0.lock().clone()).unwrap();
    assert!(text.contains("\x1b["));
    assert!(text.lines().count() > 1);
}

#[test]
fn test_subscriber_builder() {
    let buffer = Buffer::default();
    plain(&buffer)
        .build()
        .expect("layer builds")
        .with(LevelFilter::WARN)
        .on_closure(|| {
            info!("dropped");
            warn!("kept");
        });

    assert_eq!(buffer.records().len(), 1);
}

#[test]
fn test_unknown_style_fails_to_build() {
    let err = tracing_prettyjson::builder()
        .style("no-such-style")
        .build_layer()
        .unwrap_err();

    assert!(matches!(err, Error::CreationFailed(_)));
}

#[test]
fn test_init_only_once() {
    let first = tracing_prettyjson::builder().with_test_writer().build().unwrap().init();
    let second = tracing_prettyjson::builder().with_test_writer().build().unwrap().init();

    assert!(first.is_ok());
    assert!(matches!(second, Err(Error::SetGlobalDefault(_))));
}

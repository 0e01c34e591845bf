//! Warn-channel diagnostics: writing a value with no registered converter
//! is non-fatal and emits exactly one warning naming the type.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::span;
use tracing::{Event, Level, Metadata, Subscriber};

use tagdb::{sym, MemoryBackend, TypedStore, TypedValue};

/// Minimal subscriber collecting the rendered fields of WARN events.
#[derive(Clone, Default)]
struct WarningSink {
    warnings: Arc<Mutex<Vec<String>>>,
}

struct Render(String);

impl Visit for Render {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

impl Subscriber for WarningSink {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(1)
    }

    fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

    fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() == Level::WARN {
            let mut rendered = Render(String::new());
            event.record(&mut rendered);
            self.warnings.lock().unwrap().push(rendered.0);
        }
    }

    fn enter(&self, _span: &span::Id) {}

    fn exit(&self, _span: &span::Id) {}
}

fn capture_warnings(f: impl FnOnce()) -> Vec<String> {
    let sink = WarningSink::default();
    let warnings = sink.warnings.clone();
    tracing::subscriber::with_default(sink, f);
    let collected = warnings.lock().unwrap().clone();
    collected
}

#[test]
fn unconvertible_value_warns_once_and_names_the_type() {
    let g = TypedStore::new(MemoryBackend::new());
    let warnings = capture_warnings(|| {
        g.put(1, TypedValue::opaque("Widget", b"w-17".to_vec())).unwrap();
    });
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Widget"), "warning was: {}", warnings[0]);

    // The entry is still stored and retrievable
    assert_eq!(
        g.get(1).unwrap(),
        Some(TypedValue::opaque("Widget", b"w-17".to_vec()))
    );
}

#[test]
fn unconvertible_key_warns_once_per_operation() {
    let g = TypedStore::new(MemoryBackend::new());
    let obj = TypedValue::opaque("Object", b"#<Object:0x240798>".to_vec());

    let warnings = capture_warnings(|| {
        g.put(obj.clone(), 1).unwrap();
    });
    // The key is encoded exactly once on the write path
    assert_eq!(warnings.len(), 1);

    let warnings = capture_warnings(|| {
        assert_eq!(g.get(obj.clone()).unwrap(), Some(TypedValue::Int(1)));
    });
    assert_eq!(warnings.len(), 1);
}

#[test]
fn unconvertible_key_and_value_warn_once_each() {
    let g = TypedStore::new(MemoryBackend::new());
    let warnings = capture_warnings(|| {
        g.put(
            TypedValue::opaque("Object", b"a".to_vec()),
            TypedValue::opaque("Handle", b"b".to_vec()),
        )
        .unwrap();
    });
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().any(|w| w.contains("Object")));
    assert!(warnings.iter().any(|w| w.contains("Handle")));
}

#[test]
fn builtin_writes_emit_no_warnings() {
    let g = TypedStore::new(MemoryBackend::new());
    let warnings = capture_warnings(|| {
        g.put(sym("abc"), 1.2).unwrap();
        g.put(123, "hi").unwrap();
        g.get(sym("abc")).unwrap();
    });
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn preserving_an_unknown_tag_on_decode_also_warns() {
    use tagdb::KvBackend;

    let g = TypedStore::new(MemoryBackend::new());
    g.backend()
        .put(b"String:k".to_vec(), b"Object:blob".to_vec())
        .unwrap();
    let warnings = capture_warnings(|| {
        g.get("k").unwrap();
    });
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Object"));
}

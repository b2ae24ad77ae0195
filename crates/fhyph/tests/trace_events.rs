//! Structured log events emitted while loading and freezing an engine.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Default, Clone)]
struct Captured {
    message: Option<String>,
    fields: BTreeMap<String, u64>,
}

impl Visit for Captured {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}").trim_matches('"').to_string());
        }
    }
}

#[derive(Default)]
struct TraceState {
    events: Vec<Captured>,
    spans: Vec<String>,
}

struct TraceCapture {
    state: Arc<Mutex<TraceState>>,
}

impl<S> Layer<S> for TraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        self.state
            .lock()
            .expect("trace lock")
            .spans
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut captured = Captured::default();
        event.record(&mut captured);
        self.state.lock().expect("trace lock").events.push(captured);
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, TraceState) {
    let state = Arc::new(Mutex::new(TraceState::default()));
    let subscriber = tracing_subscriber::registry().with(TraceCapture {
        state: Arc::clone(&state),
    });
    let out = tracing::subscriber::with_default(subscriber, f);
    let snapshot = std::mem::take(&mut *state.lock().expect("trace lock"));
    (out, snapshot)
}

fn event<'a>(state: &'a TraceState, name: &str) -> Option<&'a Captured> {
    state
        .events
        .iter()
        .find(|e| e.message.as_deref() == Some(name))
}

#[test]
fn freeze_logs_store_sizes() {
    let (engine, state) = capture(|| {
        let mut builder = fhyph::Hyphenator::builder();
        builder.add_class("aA").unwrap();
        builder.add_class("bB").unwrap();
        builder.add_pattern("ab", "010").unwrap();
        builder.add_pattern("ba", "010").unwrap();
        builder.add_pattern("a", "10").unwrap();
        builder.add_exception("abab", &[2, 2]).unwrap();
        builder.freeze()
    });

    let freeze = event(&state, "hyphenator.freeze").expect("expected hyphenator.freeze event");
    assert_eq!(freeze.fields.get("patterns"), Some(&3));
    // "010" is shared by two patterns.
    assert_eq!(freeze.fields.get("distinct_values"), Some(&2));
    assert_eq!(freeze.fields.get("classes"), Some(&4));
    assert_eq!(freeze.fields.get("exceptions"), Some(&1));
    assert_eq!(
        freeze.fields.get("nodes").copied(),
        Some(engine.stats().pattern_nodes as u64)
    );
}

#[test]
fn source_parse_reports_synthesized_classes() {
    let (result, state) = capture(|| fhyph::parse_declarations(r"\patterns{ a1b }"));
    assert_eq!(result.unwrap().len(), 3);

    let parsed = event(&state, "source.parsed").expect("expected source.parsed event");
    assert_eq!(parsed.fields.get("declarations"), Some(&3));
    assert_eq!(parsed.fields.get("synthesized_classes"), Some(&2));
}

#[test]
fn loading_from_disk_opens_a_span() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mini.tex");
    std::fs::write(&path, r"\patterns{ a1b }").unwrap();

    let (engine, state) = capture(|| fhyph::Hyphenator::from_path(&path));
    assert!(engine.is_ok());
    assert!(
        state.spans.iter().any(|s| s == "source.load"),
        "expected source.load span, got {:?}",
        state.spans
    );
    assert!(event(&state, "hyphenator.freeze").is_some());
}

use serde_derive::{Deserialize, Serialize};
use std::{fmt, io::Write, sync::Mutex};
use tracing::*;

/// Thread safe json logger that writes a `CompileRecord` line for every sentence that a
/// compiler leaves out or drops.
pub struct JsonLogger<W: Write> {
    sink: Mutex<W>,
    spans: Mutex<SpanStack>,
}

#[derive(Default)]
struct SpanStack {
    // the syntax of every span created so far; span ids are indices plus one
    syntaxes: Vec<Option<String>>,
    entered: Vec<u64>,
}

impl SpanStack {
    fn current_syntax(&self) -> Option<String> {
        self.entered
            .last()
            .and_then(|id| self.syntaxes.get(*id as usize - 1))
            .cloned()
            .flatten()
    }
}

impl<W: Write> JsonLogger<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
            spans: Mutex::new(SpanStack::default()),
        }
    }

    /// Consumes the logger and returns its sink.
    pub fn into_inner(self) -> Option<W> {
        self.sink.into_inner().ok()
    }
}

impl<W: Write + Send + 'static> subscriber::Subscriber for JsonLogger<W> {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn new_span(&self, span: &span::Attributes) -> Id {
        let mut record = Recorder::default();
        span.record(&mut record);
        match self.spans.lock() {
            Ok(mut spans) => {
                spans.syntaxes.push(record.syntax);
                Id::from_u64(spans.syntaxes.len() as u64)
            }
            Err(_) => Id::from_u64(u64::MAX),
        }
    }

    fn record(&self, _span: &Id, _values: &span::Record) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event) {
        let mut recorder = Recorder::default();
        event.record(&mut recorder);

        match recorder.event.as_deref() {
            Some(super::UNTRANSLATABLE) | Some(super::DROP_RULE) => {}
            _ => return,
        }
        if recorder.syntax.is_none() {
            recorder.syntax = self
                .spans
                .lock()
                .ok()
                .and_then(|spans| spans.current_syntax());
        }

        if let Some(record) = CompileRecord::try_from(recorder) {
            if let (Ok(line), Ok(mut sink)) = (serde_json::to_string(&record), self.sink.lock()) {
                let _ = writeln!(sink, "{}", line);
            }
        }
    }

    fn enter(&self, span: &Id) {
        if let Ok(mut spans) = self.spans.lock() {
            spans.entered.push(span.into_u64());
        }
    }

    fn exit(&self, _span: &Id) {
        if let Ok(mut spans) = self.spans.lock() {
            spans.entered.pop();
        }
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

/// A record of a sentence that a compiler could not render or a rule it dropped.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct CompileRecord {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge: Option<String>,
}

impl CompileRecord {
    fn try_from(value: Recorder) -> Option<Self> {
        Some(CompileRecord {
            event: value.event?,
            syntax: value.syntax,
            sentence: value.sentence,
            reason: value.reason,
            rule: value.rule,
            edge: value.edge,
        })
    }
}

/// Generic trace visitor to collect as many fields as it can.
#[derive(Default)]
struct Recorder {
    event: Option<String>,
    syntax: Option<String>,
    sentence: Option<String>,
    reason: Option<String>,
    rule: Option<String>,
    edge: Option<String>,
}

impl field::Visit for Recorder {
    fn record_str(&mut self, field: &field::Field, value: &str) {
        match field.name() {
            super::EVENT_FIELD => self.event = Some(value.to_owned()),
            super::SYNTAX_FIELD => self.syntax = Some(value.to_owned()),
            _ => self.record_debug(field, &value),
        }
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn fmt::Debug) {
        let value = Some(format!("{:?}", value));
        match field.name() {
            super::SENTENCE_FIELD => self.sentence = value,
            super::REASON_FIELD => self.reason = value,
            super::RULE_FIELD => self.rule = value,
            super::EDGE_FIELD => self.edge = value,
            _ => (),
        }
    }
}

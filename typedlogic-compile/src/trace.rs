//! Defines the names of the spans, events and fields that compilers log with `tracing`.
pub mod subscriber;

// log record fields:
pub const EVENT_FIELD: &str = "event";
pub const SYNTAX_FIELD: &str = "syntax";
pub const SENTENCE_FIELD: &str = "sentence";
pub const REASON_FIELD: &str = "reason";
pub const RULE_FIELD: &str = "rule";
pub const EDGE_FIELD: &str = "edge";

// log span types:
/// Inside the compilation of a theory.
pub const COMPILE: &str = "@compile";

// log event types:
/// A sentence is outside the profile of the target and is left out.
pub const UNTRANSLATABLE: &str = "@untranslatable";

/// A rule is dropped to make a program stratified.
pub const DROP_RULE: &str = "@drop_rule";

/// A theory is compiled.
pub const COMPILED: &str = "@compiled";

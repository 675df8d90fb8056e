/*! Defines an abstract syntax tree (AST) for typed first-order sentences and the theories
that contain them. */

mod macros;
mod object;
mod sentence;
mod sexpr;
mod term;
mod theory;
mod variable;

pub use object::{AsObject, FromObject, Object};
pub use sentence::{
    And, ExactlyOne, Exists, Extension, ExtensionSentence, Forall, Iff, Implied, Implies,
    NegationAsFailure, Not, Or, Sentence, Xor,
};
pub use sexpr::{AsSExpr, SExpr};
pub use term::{Bindings, Term, TermBag, Value};
pub use theory::{
    GroupType, PredicateDefinition, SentenceGroup, Theory, TypeDefinition, SENTENCES_GROUP,
};
pub use variable::Variable;

use thiserror::Error;

/// Is the type of errors arising from malformed theories, terms and structural objects.
#[derive(Error, Debug)]
pub enum Error {
    /// Is returned when a type name cannot be resolved against a theory.
    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    /// Is returned when a type is defined in terms of itself.
    #[error("type `{name}` is defined in terms of itself")]
    CyclicType { name: String },

    /// Is returned by passes that need predicate definitions when a theory has none.
    #[error("no predicate definitions found in theory")]
    MissingPredicateDefinitions,

    /// Is returned by a strict removal that did not remove exactly one sentence.
    #[error("expected to remove exactly one sentence, removed {removed}")]
    MissingSentence { removed: usize },

    /// Is returned when keyword bindings disagree with the predicate definition.
    #[error("argument `{argument}` is not declared by predicate `{predicate}`")]
    BindingMismatch { predicate: String, argument: String },

    /// Is returned when a structural object does not describe a model instance.
    #[error("invalid object: {reason}")]
    InvalidObject { reason: String },
}

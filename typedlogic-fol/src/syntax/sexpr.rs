/*! Reflects model values as S-expressions. */

use super::{
    PredicateDefinition, Sentence, SentenceGroup, Term, Theory, TypeDefinition, Value, Variable,
};
use serde_json::Number;

/// Is an S-expression: either an atom, holding a JSON scalar, or a list.
#[derive(Clone, PartialEq, Debug)]
pub enum SExpr {
    Atom(serde_json::Value),
    List(Vec<SExpr>),
}

impl SExpr {
    pub fn atom<V: Into<serde_json::Value>>(value: V) -> Self {
        Self::Atom(value.into())
    }

    /// Returns a two-element list pairing `key` with `value`.
    fn pair(key: &str, value: SExpr) -> Self {
        Self::List(vec![Self::atom(key), value])
    }

    fn optional(value: &Option<String>) -> Self {
        match value {
            Some(v) => Self::atom(v.as_str()),
            None => Self::Atom(serde_json::Value::Null),
        }
    }

    fn dict(items: Vec<(String, SExpr)>) -> Self {
        Self::List(vec![
            Self::atom("dict"),
            Self::List(
                items
                    .into_iter()
                    .map(|(k, v)| Self::List(vec![Self::atom(k), v]))
                    .collect(),
            ),
        ])
    }
}

/// Is the trait of model values that can be reflected as an [`SExpr`].
pub trait AsSExpr {
    fn as_sexpr(&self) -> SExpr;
}

impl<T: AsSExpr> AsSExpr for [T] {
    fn as_sexpr(&self) -> SExpr {
        SExpr::List(self.iter().map(AsSExpr::as_sexpr).collect())
    }
}

impl AsSExpr for Variable {
    fn as_sexpr(&self) -> SExpr {
        let mut items = vec![SExpr::atom("Variable"), SExpr::atom(self.name())];
        if let Some(domain) = self.domain() {
            items.push(SExpr::atom(domain));
        }
        SExpr::List(items)
    }
}

impl AsSExpr for Value {
    fn as_sexpr(&self) -> SExpr {
        match self {
            Self::Var(v) => v.as_sexpr(),
            Self::Term(t) => t.as_sexpr(),
            Self::Str(s) => SExpr::atom(s.as_str()),
            Self::Int(i) => SExpr::atom(*i),
            Self::Float(f) => SExpr::Atom(
                Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            ),
            Self::Bool(b) => SExpr::atom(*b),
            Self::Null => SExpr::Atom(serde_json::Value::Null),
        }
    }
}

impl AsSExpr for Term {
    fn as_sexpr(&self) -> SExpr {
        let mut items = vec![SExpr::atom(self.predicate())];
        items.extend(self.values().into_iter().map(AsSExpr::as_sexpr));
        SExpr::List(items)
    }
}

impl AsSExpr for Sentence {
    fn as_sexpr(&self) -> SExpr {
        let head = SExpr::atom(self.kind());
        match self {
            Self::Term(this) => this.as_sexpr(),
            Self::Forall(this) => SExpr::List(vec![
                head,
                this.variables().as_sexpr(),
                this.sentence().as_sexpr(),
            ]),
            Self::Exists(this) => SExpr::List(vec![
                head,
                this.variables().as_sexpr(),
                this.sentence().as_sexpr(),
            ]),
            Self::Extension(this) => this.to_model_object().as_sexpr(),
            _ => {
                let mut items = vec![head];
                items.extend(self.operands().into_iter().map(AsSExpr::as_sexpr));
                SExpr::List(items)
            }
        }
    }
}

impl AsSExpr for TypeDefinition {
    fn as_sexpr(&self) -> SExpr {
        match self {
            Self::Alias(name) => SExpr::atom(name.as_str()),
            Self::Union(types) => types.as_slice().as_sexpr(),
        }
    }
}

impl AsSExpr for PredicateDefinition {
    fn as_sexpr(&self) -> SExpr {
        let arguments = self
            .arguments
            .iter()
            .map(|(k, v)| (k.clone(), SExpr::atom(v.as_str())))
            .collect();
        let metadata = match &self.metadata {
            Some(metadata) => SExpr::dict(
                metadata
                    .iter()
                    .map(|(k, v)| (k.clone(), SExpr::Atom(v.clone())))
                    .collect(),
            ),
            None => SExpr::Atom(serde_json::Value::Null),
        };
        let parents = match &self.parents {
            Some(parents) => {
                SExpr::List(parents.iter().map(|p| SExpr::atom(p.as_str())).collect())
            }
            None => SExpr::Atom(serde_json::Value::Null),
        };
        SExpr::List(vec![
            SExpr::atom("PredicateDefinition"),
            SExpr::pair("predicate", SExpr::atom(self.predicate.as_str())),
            SExpr::pair("arguments", SExpr::dict(arguments)),
            SExpr::pair("description", SExpr::optional(&self.description)),
            SExpr::pair("metadata", metadata),
            SExpr::pair("parents", parents),
        ])
    }
}

impl AsSExpr for SentenceGroup {
    fn as_sexpr(&self) -> SExpr {
        let group_type = self.group_type.map(|t| t.as_str().to_string());
        SExpr::List(vec![
            SExpr::atom("SentenceGroup"),
            SExpr::pair("name", SExpr::atom(self.name.as_str())),
            SExpr::pair("group_type", SExpr::optional(&group_type)),
            SExpr::pair("docstring", SExpr::optional(&self.docstring)),
            SExpr::pair("sentences", self.sentences.as_slice().as_sexpr()),
        ])
    }
}

impl AsSExpr for Theory {
    fn as_sexpr(&self) -> SExpr {
        let constants = self
            .constants
            .iter()
            .map(|(k, v)| (k.clone(), v.as_sexpr()))
            .collect();
        let type_definitions = self
            .type_definitions
            .iter()
            .map(|(k, v)| (k.clone(), v.as_sexpr()))
            .collect();
        SExpr::List(vec![
            SExpr::atom("Theory"),
            SExpr::pair("name", SExpr::optional(&self.name)),
            SExpr::pair("constants", SExpr::dict(constants)),
            SExpr::pair("type_definitions", SExpr::dict(type_definitions)),
            SExpr::pair(
                "predicate_definitions",
                self.predicate_definitions.as_slice().as_sexpr(),
            ),
            SExpr::pair("sentence_groups", self.sentence_groups.as_slice().as_sexpr()),
            SExpr::pair("ground_terms", self.ground_terms.as_slice().as_sexpr()),
        ])
    }
}

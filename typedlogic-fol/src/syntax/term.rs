/*! Defines terms, the atomic sentences of the language, and the values they bind. */

use super::{Error, PredicateDefinition, Variable};
use indexmap::IndexMap;
use itertools::Itertools;
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Is a value bound to an argument of a [`Term`].
#[derive(Clone)]
pub enum Value {
    /// Is a logical variable.
    Var(Variable),

    Str(String),

    Int(i64),

    /// Is a floating point number.
    ///
    /// **Note**: floats are compared and hashed by their bit pattern.
    Float(f64),

    Bool(bool),

    /// Is an absent value.
    Null,

    /// Is a nested term, used as a function application (e.g. a Skolem function).
    Term(Box<Term>),
}

impl Value {
    /// Returns the variable wrapped in the receiver if it is a variable.
    pub fn as_var(&self) -> Option<&Variable> {
        match self {
            Self::Var(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the term wrapped in the receiver if it is a function term.
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Self::Term(t) => Some(t),
            _ => None,
        }
    }

    /// Returns all variables that occur in the receiver, including those nested in
    /// function terms.
    pub fn variables(&self) -> Vec<&Variable> {
        match self {
            Self::Var(v) => vec![v],
            Self::Term(t) => t.variables(),
            _ => Vec::new(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Var(l), Self::Var(r)) => l == r,
            (Self::Str(l), Self::Str(r)) => l == r,
            (Self::Int(l), Self::Int(r)) => l == r,
            (Self::Float(l), Self::Float(r)) => l.to_bits() == r.to_bits(),
            (Self::Bool(l), Self::Bool(r)) => l == r,
            (Self::Null, Self::Null) => true,
            (Self::Term(l), Self::Term(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Var(v) => v.hash(state),
            Self::Str(s) => s.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::Bool(b) => b.hash(state),
            Self::Null => {}
            Self::Term(t) => t.hash(state),
        }
    }
}

impl From<Variable> for Value {
    fn from(value: Variable) -> Self {
        Self::Var(value)
    }
}

impl From<&Variable> for Value {
    fn from(value: &Variable) -> Self {
        Self::Var(value.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Term> for Value {
    fn from(value: Term) -> Self {
        Self::Term(Box::new(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(v) => write!(f, "{}", v),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Null => write!(f, "null"),
            Self::Term(t) => write!(f, "{}", t),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Is the binding set of a [`Term`].
///
/// A term binds either positional or keyword arguments, never a mix of the two.
#[derive(Clone, PartialEq, Debug)]
pub enum Bindings {
    /// Is the binding set of a term with no arguments.
    Unbound,

    Positional(Vec<Value>),

    /// Maps argument names to values, in the order of the predicate's arguments.
    Keyword(IndexMap<String, Value>),
}

/// Represents an atomic sentence, obtained by applying a predicate to a set of bindings.
///
/// **Note**: terms are compared and hashed by predicate and values; the binding mode
/// (positional or keyword) does not contribute to their identity.
#[derive(Clone)]
pub struct Term {
    predicate: String,
    bindings: Bindings,
}

impl Term {
    /// Creates a term with positional bindings.
    pub fn new<S: Into<String>>(predicate: S, values: Vec<Value>) -> Self {
        let bindings = if values.is_empty() {
            Bindings::Unbound
        } else {
            Bindings::Positional(values)
        };
        Self {
            predicate: predicate.into(),
            bindings,
        }
    }

    /// Creates a zero-argument term.
    pub fn proposition<S: Into<String>>(predicate: S) -> Self {
        Self::new(predicate, Vec::new())
    }

    /// Creates a term with keyword bindings, in the order given.
    pub fn keyword<S: Into<String>>(predicate: S, bindings: IndexMap<String, Value>) -> Self {
        let bindings = if bindings.is_empty() {
            Bindings::Unbound
        } else {
            Bindings::Keyword(bindings)
        };
        Self {
            predicate: predicate.into(),
            bindings,
        }
    }

    /// Creates a keyword term for `definition`, reindexing `bindings` to the order of the
    /// definition's arguments. Arguments missing from `bindings` are bound to [`Value::Null`].
    ///
    /// **Example**:
    /// ```rust
    /// use typedlogic_fol::syntax::{PredicateDefinition, Term, Value};
    /// use indexmap::IndexMap;
    ///
    /// let def = PredicateDefinition::new("FriendOf", vec![("about", "str"), ("friend", "str")]);
    /// let mut bindings = IndexMap::new();
    /// bindings.insert("friend".to_string(), Value::from("Bob"));
    /// bindings.insert("about".to_string(), Value::from("Alice"));
    ///
    /// let term = Term::with_definition(&def, bindings).unwrap();
    /// assert_eq!(r#"FriendOf("Alice", "Bob")"#, term.to_string());
    /// ```
    pub fn with_definition(
        definition: &PredicateDefinition,
        mut bindings: IndexMap<String, Value>,
    ) -> Result<Self, Error> {
        if let Some(argument) = bindings
            .keys()
            .find(|k| !definition.arguments.contains_key(k.as_str()))
        {
            return Err(Error::BindingMismatch {
                predicate: definition.predicate.clone(),
                argument: argument.clone(),
            });
        }

        let ordered = definition
            .arguments
            .keys()
            .map(|k| {
                let value = bindings.swap_remove(k).unwrap_or(Value::Null);
                (k.clone(), value)
            })
            .collect();
        Ok(Self::keyword(definition.predicate.clone(), ordered))
    }

    #[inline(always)]
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    #[inline(always)]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Returns the values bound by the receiver, in argument order.
    pub fn values(&self) -> Vec<&Value> {
        match &self.bindings {
            Bindings::Unbound => Vec::new(),
            Bindings::Positional(values) => values.iter().collect(),
            Bindings::Keyword(map) => map.values().collect(),
        }
    }

    pub fn arity(&self) -> usize {
        match &self.bindings {
            Bindings::Unbound => 0,
            Bindings::Positional(values) => values.len(),
            Bindings::Keyword(map) => map.len(),
        }
    }

    /// Returns true if the receiver binds keyword arguments.
    pub fn is_keyword(&self) -> bool {
        matches!(self.bindings, Bindings::Keyword(_))
    }

    /// Returns true if no variable occurs in the receiver.
    pub fn is_ground(&self) -> bool {
        self.variables().is_empty()
    }

    /// Returns true if the receiver has no arguments.
    pub fn is_constant(&self) -> bool {
        self.arity() == 0
    }

    /// Returns the variables of the receiver, including those inside function terms, in
    /// order of first occurrence and without duplicates.
    pub fn variables(&self) -> Vec<&Variable> {
        self.values()
            .into_iter()
            .flat_map(|v| v.variables())
            .unique()
            .collect()
    }

    pub fn variable_names(&self) -> Vec<&str> {
        self.variables().into_iter().map(|v| v.name()).collect()
    }

    /// Returns a copy of the receiver where every value is replaced by `f`; the binding
    /// mode is preserved.
    pub fn map_values<F: FnMut(&Value) -> Value>(&self, mut f: F) -> Self {
        let bindings = match &self.bindings {
            Bindings::Unbound => Bindings::Unbound,
            Bindings::Positional(values) => Bindings::Positional(values.iter().map(f).collect()),
            Bindings::Keyword(map) => {
                Bindings::Keyword(map.iter().map(|(k, v)| (k.clone(), f(v))).collect())
            }
        };
        Self {
            predicate: self.predicate.clone(),
            bindings,
        }
    }

    /// Drops the argument names of a keyword term.
    pub fn make_positional(&self) -> Self {
        Self::new(
            self.predicate.clone(),
            self.values().into_iter().cloned().collect(),
        )
    }

    /// Renames the predicate of the receiver.
    pub fn with_predicate<S: Into<String>>(&self, predicate: S) -> Self {
        Self {
            predicate: predicate.into(),
            bindings: self.bindings.clone(),
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.predicate == other.predicate && self.values() == other.values()
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.predicate.hash(state);
        self.values().hash(state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_constant() {
            write!(f, "{}", self.predicate)
        } else {
            write!(f, "{}({})", self.predicate, self.values().iter().join(", "))
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Is a compact, column-wise collection of ground facts over a single predicate.
///
/// Each column holds the values of one argument; the i-th term is built from the i-th
/// value of every column. Columns of unequal length are truncated to the shortest.
#[derive(Clone, PartialEq, Debug)]
pub struct TermBag {
    predicate: String,
    columns: Vec<Vec<Value>>,
}

impl TermBag {
    pub fn new<S: Into<String>>(predicate: S, columns: Vec<Vec<Value>>) -> Self {
        Self {
            predicate: predicate.into(),
            columns,
        }
    }

    /// Expands the receiver into its terms.
    pub fn terms(&self) -> Vec<Term> {
        let rows = self.columns.iter().map(|c| c.len()).min().unwrap_or(0);
        (0..rows)
            .map(|i| {
                let values = self.columns.iter().map(|c| c[i].clone()).collect();
                Term::new(self.predicate.clone(), values)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{term, v};

    #[test]
    fn term_properties() {
        {
            let t = Term::new("FriendOf", vec!["Alice".into(), "Bob".into()]);
            assert!(t.is_ground());
            assert!(!t.is_constant());
            assert_eq!(2, t.arity());
            assert_eq!(r#"FriendOf("Alice", "Bob")"#, t.to_string());
        }
        {
            let t = term!(P);
            assert!(t.is_ground());
            assert!(t.is_constant());
            assert_eq!(&Bindings::Unbound, t.bindings());
            assert_eq!("P", t.to_string());
        }
        {
            let t = term!(P(x, y, x));
            assert!(!t.is_ground());
            assert_eq!(vec!["x", "y"], t.variable_names());
            assert_eq!("P(?x, ?y, ?x)", t.to_string());
        }
        {
            let inner = Term::new("sk__1", vec![v!(x).into()]);
            let t = Term::new("P", vec![inner.into(), 1.into(), 1.5.into(), Value::Null]);
            assert_eq!(vec!["x"], t.variable_names());
            assert_eq!("P(sk__1(?x), 1, 1.5, null)", t.to_string());
        }
    }

    #[test]
    fn term_identity_ignores_binding_mode() {
        let mut bindings = IndexMap::new();
        bindings.insert("about".to_string(), Value::from("Alice"));
        bindings.insert("friend".to_string(), Value::from("Bob"));
        let keyword = Term::keyword("FriendOf", bindings);
        let positional = Term::new("FriendOf", vec!["Alice".into(), "Bob".into()]);

        assert!(keyword.is_keyword());
        assert!(!positional.is_keyword());
        assert_eq!(keyword, positional);
        assert_eq!(positional, keyword.make_positional());
        assert!(!keyword.make_positional().is_keyword());
        assert_ne!(positional, positional.with_predicate("Knows"));
    }

    #[test]
    fn term_with_definition() {
        let def = PredicateDefinition::new("P", vec![("a", "str"), ("b", "int"), ("c", "str")]);
        {
            let mut bindings = IndexMap::new();
            bindings.insert("c".to_string(), Value::from("z"));
            bindings.insert("a".to_string(), Value::from("x"));
            let t = Term::with_definition(&def, bindings).unwrap();
            assert_eq!(r#"P("x", null, "z")"#, t.to_string());
            match t.bindings() {
                Bindings::Keyword(map) => {
                    assert_eq!(vec!["a", "b", "c"], map.keys().collect::<Vec<_>>())
                }
                _ => panic!("expected keyword bindings"),
            }
        }
        {
            let mut bindings = IndexMap::new();
            bindings.insert("d".to_string(), Value::from(1));
            assert!(Term::with_definition(&def, bindings).is_err());
        }
    }

    #[test]
    fn float_values_compare_by_bits() {
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(0.0), Value::from(-0.0));
        assert_ne!(Value::from(1), Value::from(1.0));
    }

    #[test]
    fn term_bag_terms() {
        let bag = TermBag::new(
            "Person",
            vec![
                vec!["Fred".into(), "Jie".into()],
                vec![30.into(), 41.into(), 50.into()],
            ],
        );
        assert_eq!(
            vec![
                Term::new("Person", vec!["Fred".into(), 30.into()]),
                Term::new("Person", vec!["Jie".into(), 41.into()]),
            ],
            bag.terms()
        );
        assert!(TermBag::new("Empty", vec![]).terms().is_empty());
    }
}

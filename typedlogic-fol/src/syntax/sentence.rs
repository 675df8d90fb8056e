/*! Defines sentences: terms combined with boolean connectives and quantifiers.

Every connective is represented by its own type, wrapped by a variant of [`Sentence`]. All
sentences are immutable values; transformations construct new trees. */

use super::{Term, Variable};
use itertools::Itertools;
use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Represents the conjunction of zero or more sentences. The empty conjunction is true.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct And {
    operands: Vec<Sentence>,
}

impl And {
    pub fn new(operands: Vec<Sentence>) -> Self {
        Self { operands }
    }

    #[inline(always)]
    pub fn operands(&self) -> &[Sentence] {
        &self.operands
    }

    pub fn into_operands(self) -> Vec<Sentence> {
        self.operands
    }
}

/// Represents the disjunction of zero or more sentences. The empty disjunction is false.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Or {
    operands: Vec<Sentence>,
}

impl Or {
    pub fn new(operands: Vec<Sentence>) -> Self {
        Self { operands }
    }

    #[inline(always)]
    pub fn operands(&self) -> &[Sentence] {
        &self.operands
    }

    pub fn into_operands(self) -> Vec<Sentence> {
        self.operands
    }
}

/// Represents the exclusive disjunction of its operands.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Xor {
    operands: Vec<Sentence>,
}

impl Xor {
    pub fn new(operands: Vec<Sentence>) -> Self {
        Self { operands }
    }

    #[inline(always)]
    pub fn operands(&self) -> &[Sentence] {
        &self.operands
    }
}

/// Is true when exactly one of its operands is true.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ExactlyOne {
    operands: Vec<Sentence>,
}

impl ExactlyOne {
    pub fn new(operands: Vec<Sentence>) -> Self {
        Self { operands }
    }

    #[inline(always)]
    pub fn operands(&self) -> &[Sentence] {
        &self.operands
    }
}

/// Represents the classical negation of a sentence.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Not {
    sentence: Sentence,
}

impl Not {
    pub fn new(sentence: Sentence) -> Self {
        Self { sentence }
    }

    /// Returns the negated sentence.
    #[inline(always)]
    pub fn negated(&self) -> &Sentence {
        &self.sentence
    }
}

/// Represents negation as failure: the sentence cannot be proven.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NegationAsFailure {
    sentence: Sentence,
}

impl NegationAsFailure {
    pub fn new(sentence: Sentence) -> Self {
        Self { sentence }
    }

    #[inline(always)]
    pub fn negated(&self) -> &Sentence {
        &self.sentence
    }
}

/// Represents an implication from an antecedent to a consequent.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Implies {
    antecedent: Sentence,
    consequent: Sentence,
}

impl Implies {
    pub fn new(antecedent: Sentence, consequent: Sentence) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    #[inline(always)]
    pub fn antecedent(&self) -> &Sentence {
        &self.antecedent
    }

    #[inline(always)]
    pub fn consequent(&self) -> &Sentence {
        &self.consequent
    }
}

/// Represents a reverse implication: the consequent is written first.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Implied {
    consequent: Sentence,
    antecedent: Sentence,
}

impl Implied {
    pub fn new(consequent: Sentence, antecedent: Sentence) -> Self {
        Self {
            consequent,
            antecedent,
        }
    }

    #[inline(always)]
    pub fn consequent(&self) -> &Sentence {
        &self.consequent
    }

    #[inline(always)]
    pub fn antecedent(&self) -> &Sentence {
        &self.antecedent
    }
}

/// Represents a bi-implication.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Iff {
    left: Sentence,
    right: Sentence,
}

impl Iff {
    pub fn new(left: Sentence, right: Sentence) -> Self {
        Self { left, right }
    }

    #[inline(always)]
    pub fn left(&self) -> &Sentence {
        &self.left
    }

    #[inline(always)]
    pub fn right(&self) -> &Sentence {
        &self.right
    }
}

/// Represents a universally quantified sentence.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Forall {
    variables: Vec<Variable>,
    sentence: Sentence,
}

impl Forall {
    pub fn new(variables: Vec<Variable>, sentence: Sentence) -> Self {
        Self {
            variables,
            sentence,
        }
    }

    #[inline(always)]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[inline(always)]
    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }
}

/// Represents an existentially quantified sentence.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Exists {
    variables: Vec<Variable>,
    sentence: Sentence,
}

impl Exists {
    pub fn new(variables: Vec<Variable>, sentence: Sentence) -> Self {
        Self {
            variables,
            sentence,
        }
    }

    #[inline(always)]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[inline(always)]
    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }
}

/// Is the trait of foreign sentence types that are defined outside of the core syntax
/// but can be expressed in it.
pub trait Extension: fmt::Debug + Send + Sync {
    /// Returns the core sentence that the receiver stands for.
    fn to_model_object(&self) -> Sentence;
}

/// Wraps a shared [`Extension`]. Extension sentences are compared and hashed by
/// their model object.
#[derive(Clone)]
pub struct ExtensionSentence(Arc<dyn Extension>);

impl ExtensionSentence {
    pub fn new<E: Extension + 'static>(extension: E) -> Self {
        Self(Arc::new(extension))
    }

    pub fn to_model_object(&self) -> Sentence {
        self.0.to_model_object()
    }
}

impl PartialEq for ExtensionSentence {
    fn eq(&self, other: &Self) -> bool {
        self.to_model_object() == other.to_model_object()
    }
}

impl Eq for ExtensionSentence {}

impl Hash for ExtensionSentence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_model_object().hash(state)
    }
}

impl fmt::Debug for ExtensionSentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Is an abstract syntax tree (AST) for typed first-order sentences.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Sentence {
    /// Is an atomic sentence, wrapping a [`Term`].
    Term(Term),

    /// Is a conjunction, wrapping an [`And`].
    And(And),

    /// Is a disjunction, wrapping an [`Or`].
    Or(Or),

    /// Is a negation, wrapping a [`Not`].
    Not(Box<Not>),

    /// Is an exclusive disjunction, wrapping a [`Xor`].
    Xor(Xor),

    /// Is an exactly-one constraint, wrapping an [`ExactlyOne`].
    ExactlyOne(ExactlyOne),

    /// Is an implication, wrapping an [`Implies`].
    Implies(Box<Implies>),

    /// Is a reverse implication, wrapping an [`Implied`].
    Implied(Box<Implied>),

    /// Is a bi-implication, wrapping an [`Iff`].
    Iff(Box<Iff>),

    /// Is negation as failure, wrapping a [`NegationAsFailure`].
    NegationAsFailure(Box<NegationAsFailure>),

    /// Is a universally quantified sentence, wrapping a [`Forall`].
    Forall(Box<Forall>),

    /// Is an existentially quantified sentence, wrapping an [`Exists`].
    Exists(Box<Exists>),

    /// Is a foreign sentence, wrapping an [`ExtensionSentence`].
    Extension(ExtensionSentence),
}

impl From<Term> for Sentence {
    fn from(value: Term) -> Self {
        Self::Term(value)
    }
}

impl From<And> for Sentence {
    fn from(value: And) -> Self {
        Self::And(value)
    }
}

impl From<Or> for Sentence {
    fn from(value: Or) -> Self {
        Self::Or(value)
    }
}

impl From<Not> for Sentence {
    fn from(value: Not) -> Self {
        Self::Not(Box::new(value))
    }
}

impl From<Xor> for Sentence {
    fn from(value: Xor) -> Self {
        Self::Xor(value)
    }
}

impl From<ExactlyOne> for Sentence {
    fn from(value: ExactlyOne) -> Self {
        Self::ExactlyOne(value)
    }
}

impl From<Implies> for Sentence {
    fn from(value: Implies) -> Self {
        Self::Implies(Box::new(value))
    }
}

impl From<Implied> for Sentence {
    fn from(value: Implied) -> Self {
        Self::Implied(Box::new(value))
    }
}

impl From<Iff> for Sentence {
    fn from(value: Iff) -> Self {
        Self::Iff(Box::new(value))
    }
}

impl From<NegationAsFailure> for Sentence {
    fn from(value: NegationAsFailure) -> Self {
        Self::NegationAsFailure(Box::new(value))
    }
}

impl From<Forall> for Sentence {
    fn from(value: Forall) -> Self {
        Self::Forall(Box::new(value))
    }
}

impl From<Exists> for Sentence {
    fn from(value: Exists) -> Self {
        Self::Exists(Box::new(value))
    }
}

impl From<ExtensionSentence> for Sentence {
    fn from(value: ExtensionSentence) -> Self {
        Self::Extension(value)
    }
}

impl Sentence {
    /// Returns the always-true sentence, the empty conjunction.
    #[inline(always)]
    pub fn top() -> Self {
        And::new(Vec::new()).into()
    }

    /// Returns the always-false sentence, the empty disjunction.
    #[inline(always)]
    pub fn bottom() -> Self {
        Or::new(Vec::new()).into()
    }

    /// Returns the negation of `sentence`.
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn not(sentence: Self) -> Self {
        Not::new(sentence).into()
    }

    #[inline(always)]
    pub fn naf(sentence: Self) -> Self {
        NegationAsFailure::new(sentence).into()
    }

    #[inline(always)]
    pub fn all(operands: Vec<Self>) -> Self {
        And::new(operands).into()
    }

    #[inline(always)]
    pub fn any(operands: Vec<Self>) -> Self {
        Or::new(operands).into()
    }

    #[inline(always)]
    pub fn exactly_one(operands: Vec<Self>) -> Self {
        ExactlyOne::new(operands).into()
    }

    #[inline(always)]
    pub fn forall(variables: Vec<Variable>, sentence: Self) -> Self {
        Forall::new(variables, sentence).into()
    }

    #[inline(always)]
    pub fn exists(variables: Vec<Variable>, sentence: Self) -> Self {
        Exists::new(variables, sentence).into()
    }

    /// Returns the binary conjunction of the receiver and `other`.
    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        Self::all(vec![self, other])
    }

    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        Self::any(vec![self, other])
    }

    #[inline(always)]
    pub fn xor(self, other: Self) -> Self {
        Xor::new(vec![self, other]).into()
    }

    /// Returns an implication from the receiver to `consequent`.
    #[inline(always)]
    pub fn implies(self, consequent: Self) -> Self {
        Implies::new(self, consequent).into()
    }

    /// Returns a reverse implication: the receiver is implied by `antecedent`.
    #[inline(always)]
    pub fn implied_by(self, antecedent: Self) -> Self {
        Implied::new(self, antecedent).into()
    }

    #[inline(always)]
    pub fn iff(self, other: Self) -> Self {
        Iff::new(self, other).into()
    }

    /// Returns the name of the receiver's connective, e.g. `"And"` or `"Forall"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Term(_) => "Term",
            Self::And(_) => "And",
            Self::Or(_) => "Or",
            Self::Not(_) => "Not",
            Self::Xor(_) => "Xor",
            Self::ExactlyOne(_) => "ExactlyOne",
            Self::Implies(_) => "Implies",
            Self::Implied(_) => "Implied",
            Self::Iff(_) => "Iff",
            Self::NegationAsFailure(_) => "NegationAsFailure",
            Self::Forall(_) => "Forall",
            Self::Exists(_) => "Exists",
            Self::Extension(_) => "Extension",
        }
    }

    /// Returns the receiver with extension sentences, at every depth, replaced by their
    /// model object. The receiver is borrowed when it contains no extension.
    pub fn canonical(&self) -> Cow<'_, Sentence> {
        match self {
            Self::Extension(this) => Cow::Owned(this.to_model_object().canonical().into_owned()),
            _ if self.has_extension() => {
                Cow::Owned(self.map_children(|c| c.canonical().into_owned()))
            }
            _ => Cow::Borrowed(self),
        }
    }

    fn has_extension(&self) -> bool {
        match self {
            Self::Extension(_) => true,
            Self::Term(_) => false,
            Self::Forall(this) => this.sentence.has_extension(),
            Self::Exists(this) => this.sentence.has_extension(),
            _ => self.operands().into_iter().any(Sentence::has_extension),
        }
    }

    /// Returns the operands of a boolean connective in argument order; quantifiers and
    /// terms have none.
    pub fn operands(&self) -> Vec<&Sentence> {
        match self {
            Self::And(this) => this.operands.iter().collect(),
            Self::Or(this) => this.operands.iter().collect(),
            Self::Xor(this) => this.operands.iter().collect(),
            Self::ExactlyOne(this) => this.operands.iter().collect(),
            Self::Not(this) => vec![&this.sentence],
            Self::NegationAsFailure(this) => vec![&this.sentence],
            Self::Implies(this) => vec![&this.antecedent, &this.consequent],
            Self::Implied(this) => vec![&this.consequent, &this.antecedent],
            Self::Iff(this) => vec![&this.left, &this.right],
            Self::Term(_) | Self::Forall(_) | Self::Exists(_) | Self::Extension(_) => Vec::new(),
        }
    }

    /// Rebuilds the receiver with every immediate sub-sentence replaced by `f`. Quantifiers
    /// keep their variables, terms are returned unchanged and extensions are canonicalized
    /// first.
    pub fn map_children<F: FnMut(&Sentence) -> Sentence>(&self, mut f: F) -> Self {
        match self {
            Self::Term(_) => self.clone(),
            Self::And(this) => Self::all(this.operands.iter().map(f).collect()),
            Self::Or(this) => Self::any(this.operands.iter().map(f).collect()),
            Self::Xor(this) => Xor::new(this.operands.iter().map(f).collect()).into(),
            Self::ExactlyOne(this) => Self::exactly_one(this.operands.iter().map(f).collect()),
            Self::Not(this) => Self::not(f(&this.sentence)),
            Self::NegationAsFailure(this) => Self::naf(f(&this.sentence)),
            Self::Implies(this) => f(&this.antecedent).implies(f(&this.consequent)),
            Self::Implied(this) => {
                let consequent = f(&this.consequent);
                consequent.implied_by(f(&this.antecedent))
            }
            Self::Iff(this) => f(&this.left).iff(f(&this.right)),
            Self::Forall(this) => Self::forall(this.variables.clone(), f(&this.sentence)),
            Self::Exists(this) => Self::exists(this.variables.clone(), f(&this.sentence)),
            Self::Extension(this) => this.to_model_object().map_children(f),
        }
    }

    /// Returns the wrapped term if the receiver is atomic.
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Self::Term(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the terms of the canonical form of the receiver in depth-first order.
    pub fn terms(&self) -> Vec<Term> {
        fn collect<'a>(sentence: &'a Sentence, acc: &mut Vec<&'a Term>) {
            match sentence {
                Sentence::Term(t) => acc.push(t),
                Sentence::Forall(this) => collect(&this.sentence, acc),
                Sentence::Exists(this) => collect(&this.sentence, acc),
                _ => sentence.operands().into_iter().for_each(|s| collect(s, acc)),
            }
        }

        let canonical = self.canonical();
        let mut acc = Vec::new();
        collect(&canonical, &mut acc);
        acc.into_iter().cloned().collect()
    }

    /// Returns the variables of the canonical form of the receiver that are not bound by an
    /// enclosing quantifier, in order of first occurrence.
    pub fn free_variables(&self) -> Vec<Variable> {
        fn collect<'a>(
            sentence: &'a Sentence,
            bound: &mut Vec<&'a Variable>,
            acc: &mut Vec<&'a Variable>,
        ) {
            let (variables, body) = match sentence {
                Sentence::Term(t) => {
                    for v in t.variables() {
                        if !bound.contains(&v) && !acc.contains(&v) {
                            acc.push(v);
                        }
                    }
                    return;
                }
                Sentence::Forall(this) => (&this.variables, &this.sentence),
                Sentence::Exists(this) => (&this.variables, &this.sentence),
                _ => {
                    sentence
                        .operands()
                        .into_iter()
                        .for_each(|s| collect(s, bound, acc));
                    return;
                }
            };
            let scope = bound.len();
            bound.extend(variables.iter());
            collect(body, bound, acc);
            bound.truncate(scope);
        }

        let canonical = self.canonical();
        let mut acc = Vec::new();
        collect(&canonical, &mut Vec::new(), &mut acc);
        acc.into_iter().cloned().collect()
    }
}

// Operands are wrapped in parentheses unless atomic.
fn parens(sentence: &Sentence) -> String {
    match sentence {
        Sentence::Term(_) => sentence.to_string(),
        _ => format!("({})", sentence),
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        fn join(operands: &[Sentence], symbol: &str) -> String {
            operands.iter().map(parens).join(symbol)
        }

        match self {
            Self::Term(this) => this.fmt(f),
            Self::And(this) if this.operands.is_empty() => write!(f, "⊤"),
            Self::And(this) => write!(f, "{}", join(&this.operands, " ∧ ")),
            Self::Or(this) if this.operands.is_empty() => write!(f, "⟘"),
            Self::Or(this) => write!(f, "{}", join(&this.operands, " ∨ ")),
            Self::Xor(this) => write!(f, "{}", join(&this.operands, " ⊕ ")),
            Self::ExactlyOne(this) => write!(f, "∃!{{{}}}", this.operands.iter().join(", ")),
            Self::Not(this) => write!(f, "¬{}", parens(&this.sentence)),
            Self::NegationAsFailure(this) => write!(f, "not {}", parens(&this.sentence)),
            Self::Implies(this) => write!(
                f,
                "{} → {}",
                parens(&this.antecedent),
                parens(&this.consequent)
            ),
            Self::Implied(this) => write!(
                f,
                "{} ← {}",
                parens(&this.consequent),
                parens(&this.antecedent)
            ),
            Self::Iff(this) => write!(f, "{} ⇔ {}", parens(&this.left), parens(&this.right)),
            Self::Forall(this) => write!(
                f,
                "∀ {}. {}",
                this.variables.iter().join(", "),
                parens(&this.sentence)
            ),
            Self::Exists(this) => write!(
                f,
                "∃ {}. {}",
                this.variables.iter().join(", "),
                parens(&this.sentence)
            ),
            Self::Extension(this) => this.to_model_object().fmt(f),
        }
    }
}

impl fmt::Debug for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Term(this) => this.fmt(f),
            Self::Forall(this) => write!(f, "Forall({:?}, {:?})", this.variables, this.sentence),
            Self::Exists(this) => write!(f, "Exists({:?}, {:?})", this.variables, this.sentence),
            Self::Extension(this) => this.fmt(f),
            _ => write!(
                f,
                "{}({})",
                self.kind(),
                self.operands().iter().map(|s| format!("{:?}", s)).join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_debug_string, term, v};

    #[derive(Debug)]
    struct Fact(&'static str);

    impl Extension for Fact {
        fn to_model_object(&self) -> Sentence {
            Term::proposition(self.0).into()
        }
    }

    #[test]
    fn sentence_to_debug() {
        let p: Sentence = term!(P).into();
        let q: Sentence = term!(Q(x)).into();
        assert_debug_string!("And()", Sentence::top());
        assert_debug_string!("Or()", Sentence::bottom());
        assert_debug_string!("And(P, Q(?x))", p.clone().and(q.clone()));
        assert_debug_string!("Not(Or(P, Q(?x)))", Sentence::not(p.clone().or(q.clone())));
        assert_debug_string!("Implies(P, Q(?x))", p.clone().implies(q.clone()));
        assert_debug_string!("Implied(P, Q(?x))", p.clone().implied_by(q.clone()));
        assert_debug_string!(
            "Forall([?x: str], Exists([?y], Iff(P, Q(?x))))",
            Sentence::forall(
                vec![v!(x: str)],
                Sentence::exists(vec![v!(y)], p.clone().iff(q.clone()))
            )
        );
        assert_debug_string!("Xor(P, Q(?x))", p.xor(q));
    }

    #[test]
    fn sentence_to_string() {
        let p: Sentence = term!(P(x)).into();
        let q: Sentence = term!(Q(x)).into();
        assert_eq!("⊤", Sentence::top().to_string());
        assert_eq!("⟘", Sentence::bottom().to_string());
        assert_eq!(
            "∀ ?x. (P(?x) → (¬Q(?x)))",
            Sentence::forall(vec![v!(x)], p.clone().implies(Sentence::not(q.clone())))
                .to_string()
        );
        assert_eq!("P(?x) ∧ (Q(?x) ∨ P(?x))", p.clone().and(q.or(p)).to_string());
    }

    #[test]
    fn implied_operands_put_consequent_first() {
        let p: Sentence = term!(P).into();
        let q: Sentence = term!(Q).into();
        let implied = p.clone().implied_by(q.clone());
        assert_eq!(vec![&p, &q], implied.operands());
        match implied {
            Sentence::Implied(this) => {
                assert_eq!(&q, this.antecedent());
                assert_eq!(&p, this.consequent());
            }
            _ => panic!("expected Implied"),
        }
    }

    #[test]
    fn map_children_preserves_shape() {
        let s = Sentence::forall(
            vec![v!(x)],
            Sentence::from(term!(P(x))).implied_by(term!(Q(x)).into()),
        );
        assert_eq!(s, s.map_children(|c| c.clone()));

        let renamed = Sentence::not(term!(P).into()).map_children(|_| term!(R).into());
        assert_debug_string!("Not(R)", renamed);
    }

    #[test]
    fn extension_canonical() {
        let ext: Sentence = ExtensionSentence::new(Fact("P")).into();
        assert_eq!("Extension", ext.kind());
        assert_eq!(Sentence::from(term!(P)), ext.canonical().into_owned());
        assert_eq!(ext, Sentence::from(ExtensionSentence::new(Fact("P"))));

        let wrapped = Sentence::not(ext);
        assert_debug_string!("Not(P)", wrapped.map_children(|c| c.canonical().into_owned()));
    }

    #[test]
    fn sentence_terms() {
        let s = Sentence::forall(
            vec![v!(x)],
            Sentence::from(term!(P(x)))
                .and(term!(Q(x)).into())
                .implies(Sentence::not(term!(R(x)).into())),
        );
        assert_eq!(
            vec!["P", "Q", "R"],
            s.terms().iter().map(|t| t.predicate()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn sentence_free_variables() {
        let s = Sentence::forall(
            vec![v!(x)],
            Sentence::from(term!(P(x, y)))
                .and(Sentence::exists(vec![v!(z)], term!(Q(z, w, y)).into())),
        );
        let names = |s: &Sentence| -> Vec<String> {
            s.free_variables().iter().map(|v| v.name().to_string()).collect()
        };
        assert_eq!(vec!["y", "w"], names(&s));
        assert_eq!(vec!["x"], names(&term!(P(x, x)).into()));
        assert!(names(&Sentence::exists(vec![v!(x)], term!(P(x)).into())).is_empty());
    }

    #[derive(Debug)]
    struct Open;

    impl Extension for Open {
        fn to_model_object(&self) -> Sentence {
            term!(P(x)).into()
        }
    }

    #[test]
    fn nested_extension_traversal() {
        let ext: Sentence = ExtensionSentence::new(Open).into();
        let s = Sentence::not(ext.and(term!(Q(y)).into()));
        assert_debug_string!("Not(And(P(?x), Q(?y)))", s.canonical());
        assert_eq!(
            vec!["P", "Q"],
            s.terms().iter().map(|t| t.predicate()).collect::<Vec<_>>()
        );
        assert_eq!(vec![v!(x), v!(y)], s.free_variables());

        let closed = Sentence::forall(vec![v!(x)], s);
        assert_eq!(vec![v!(y)], closed.free_variables());

        let plain: Sentence = term!(R).into();
        assert!(matches!(plain.canonical(), Cow::Borrowed(_)));
    }
}

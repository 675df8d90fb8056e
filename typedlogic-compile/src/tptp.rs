//! Implements the compiler to the first-order form (`fof`) of the TPTP problem language.
//!
//! Every formula is closed: the free variables of a sentence are bound by an outer universal
//! quantifier. Variables are capitalized and predicates lower cased, as TPTP requires.
use crate::{
    prolog::{capitalize, quote},
    trace, Compiler, Error, Profile, ProfileSet, Violation,
};
use itertools::Itertools;
use tracing::{info, span, Level};
use typedlogic_fol::{
    syntax::{Sentence, Term, Theory, Value, Variable},
    transform::{expand_exactly_one, expand_xor},
};

fn variable(v: &Variable) -> String {
    capitalize(v.name())
}

fn value(value: &Value) -> String {
    match value {
        Value::Var(v) => variable(v),
        Value::Str(s) => quote(s),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{:?}", f),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".into(),
        Value::Term(t) => term(t),
    }
}

fn term(term: &Term) -> String {
    let predicate = term.predicate().to_lowercase();
    let values = term.values();
    if values.is_empty() {
        predicate
    } else {
        format!("{}({})", predicate, values.into_iter().map(value).join(", "))
    }
}

fn join(operands: &[Sentence], separator: &str) -> Result<String, Error> {
    Ok(operands
        .iter()
        .map(formula)
        .collect::<Result<Vec<_>, _>>()?
        .join(separator))
}

fn quantified(quantifier: &str, variables: &[Variable], body: &Sentence) -> Result<String, Error> {
    Ok(format!(
        "{} [{}] : {}",
        quantifier,
        variables.iter().map(variable).join(", "),
        formula(body)?
    ))
}

fn formula(sentence: &Sentence) -> Result<String, Error> {
    let text = match sentence {
        Sentence::Term(this) => term(this),
        Sentence::Forall(this) => quantified("!", this.variables(), this.sentence())?,
        Sentence::Exists(this) => quantified("?", this.variables(), this.sentence())?,
        Sentence::And(this) if this.operands().is_empty() => "$true".into(),
        Sentence::And(this) => format!("({})", join(this.operands(), " & ")?),
        Sentence::Or(this) if this.operands().is_empty() => "$false".into(),
        Sentence::Or(this) => format!("({})", join(this.operands(), " | ")?),
        Sentence::Not(this) => format!("~{}", formula(this.negated())?),
        Sentence::Implies(this) => format!(
            "({} => {})",
            formula(this.antecedent())?,
            formula(this.consequent())?
        ),
        Sentence::Implied(this) => format!(
            "({} <= {})",
            formula(this.consequent())?,
            formula(this.antecedent())?
        ),
        Sentence::Iff(this) => {
            format!("({} <=> {})", formula(this.left())?, formula(this.right())?)
        }
        Sentence::Xor(_) => formula(&expand_xor(sentence).unwrap_or_else(Sentence::bottom))?,
        Sentence::ExactlyOne(_) => {
            formula(&expand_exactly_one(sentence).unwrap_or_else(Sentence::bottom))?
        }
        Sentence::Extension(this) => formula(&this.to_model_object())?,
        Sentence::NegationAsFailure(_) => {
            return Err(Violation::UnsupportedSentence {
                kind: sentence.kind(),
                syntax: "tptp",
            }
            .into())
        }
    };
    Ok(text)
}

/// Renders `sentence` as a closed TPTP formula.
///
/// **Example**:
/// ```rust
/// use typedlogic_compile::tptp::as_tptp;
/// use typedlogic_fol::syntax::{Sentence, Term, Variable};
///
/// let x = Variable::new("X");
/// let p: Sentence = Term::new("P", vec![x.clone().into()]).into();
/// let q: Sentence = Term::new("Q", vec![x.into()]).into();
///
/// assert_eq!("! [X] : (p(X) => q(X))", as_tptp(&p.implies(q)).unwrap());
/// ```
pub fn as_tptp(sentence: &Sentence) -> Result<String, Error> {
    let sentence = sentence.canonical();
    let free = sentence.free_variables();
    let body = formula(&sentence)?;
    if free.is_empty() {
        Ok(body)
    } else {
        Ok(format!(
            "! [{}] : {}",
            free.iter().map(variable).join(", "),
            body
        ))
    }
}

fn header(theory: &Theory) -> String {
    format!("% Problem: {}", theory.name.as_deref().unwrap_or("unnamed"))
}

/// Renders every sentence of `theory` as an axiom followed by `conjecture`, if any.
pub fn tptp_problem(theory: &Theory, conjecture: Option<&Sentence>) -> Result<String, Error> {
    let mut lines = vec![header(theory)];
    for (i, sentence) in theory.sentences().into_iter().enumerate() {
        lines.push(format!("fof(axiom{}, axiom, {}).", i + 1, as_tptp(sentence)?));
    }
    if let Some(conjecture) = conjecture {
        lines.push(format!("fof(conjecture, conjecture, {}).", as_tptp(conjecture)?));
    }
    Ok(lines.join("\n"))
}

/// Compiles theories to TPTP problems. Sentences of goal groups are conjectures.
#[derive(Clone, Copy, Default, Debug)]
pub struct TptpCompiler {
    /// Fails on untranslatable sentences instead of commenting them out.
    pub strict: bool,
}

impl TptpCompiler {
    fn formula(&self, sentence: &Sentence) -> Result<Result<String, String>, Error> {
        match as_tptp(sentence) {
            Ok(text) => Ok(Ok(text)),
            Err(e) if e.is_not_in_profile() && !self.strict => {
                let fol = crate::fol::as_fol(sentence)?;
                info!(event = trace::UNTRANSLATABLE, sentence = %fol, reason = %e);
                Ok(Err(format!("% UNTRANSLATABLE: {}", fol)))
            }
            Err(e) => Err(e),
        }
    }
}

impl Compiler for TptpCompiler {
    fn compile(&self, theory: &Theory) -> Result<String, Error> {
        let compile_span = span!(Level::INFO, trace::COMPILE, syntax = "tptp");
        let _enter = compile_span.enter();

        let mut lines = vec![header(theory)];
        let (mut axioms, mut conjectures) = (0, 0);
        let ground_terms = theory.ground_terms.iter().cloned().map(Sentence::from).collect_vec();
        let sentences = theory
            .sentence_groups
            .iter()
            .flat_map(|g| g.sentences.iter().map(move |s| (g.is_goal(), s)))
            .chain(ground_terms.iter().map(|s| (false, s)));
        for (is_goal, sentence) in sentences {
            match self.formula(sentence)? {
                Ok(text) if is_goal => {
                    conjectures += 1;
                    lines.push(format!("fof(conjecture{}, conjecture, {}).", conjectures, text));
                }
                Ok(text) => {
                    axioms += 1;
                    lines.push(format!("fof(axiom{}, axiom, {}).", axioms, text));
                }
                Err(comment) => lines.push(comment),
            }
        }

        info!(event = trace::COMPILED, sentences = axioms + conjectures);
        Ok(lines.join("\n"))
    }

    fn suffix(&self) -> &'static str {
        "tptp"
    }

    fn profile(&self) -> ProfileSet {
        ProfileSet::new(vec![Profile::Unrestricted, Profile::OpenWorld])
    }
}

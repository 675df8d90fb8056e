//! Implements the compiler to the input language of the Prover9 theorem prover.
//!
//! Prover9 has no strings nor floating point numbers. Strings become constants prefixed with
//! `s_` and floats become exact terms `rational(n,d)`.
use crate::{trace, Compiler, Error, Profile, ProfileSet, Violation};
use itertools::Itertools;
use tracing::{info, span, Level};
use typedlogic_fol::{
    syntax::{Sentence, Term, Theory, Value, Variable},
    transform::{expand_exactly_one, expand_xor},
};

/// Is the largest denominator of the fractions that floats are rendered as.
pub const MAX_DENOMINATOR: i128 = 1_000_000;

/// Returns the closest fraction to `n / d` with a denominator of at most `max`, for positive
/// `n` and `d`, walking the convergents of its continued fraction expansion.
fn limit_denominator(n: i128, d: i128, max: i128) -> (i128, i128) {
    if d <= max {
        return (n, d);
    }
    let (mut p0, mut q0, mut p1, mut q1) = (0, 1, 1, 0);
    let (mut n1, mut d1) = (n, d);
    while d1 != 0 {
        let a = n1 / d1;
        let q2 = match a.checked_mul(q1).and_then(|q| q.checked_add(q0)) {
            Some(q2) if q2 <= max => q2,
            _ => break,
        };
        let p2 = p0 + a * p1;
        p0 = p1;
        q0 = q1;
        p1 = p2;
        q1 = q2;
        let r = n1 - a * d1;
        n1 = d1;
        d1 = r;
    }

    let k = (max - q0) / q1;
    let semiconvergent = (p0 + k * p1, q0 + k * q1);
    let convergent = (p1, q1);
    let target = n as f64 / d as f64;
    let error = |(p, q): (i128, i128)| (p as f64 / q as f64 - target).abs();
    if error(convergent) <= error(semiconvergent) {
        convergent
    } else {
        semiconvergent
    }
}

/// Returns the best rational approximation of `value` with a denominator of at most
/// [`MAX_DENOMINATOR`]; the approximation is exact when the binary fraction of `value` fits.
///
/// **Example**:
/// ```rust
/// use typedlogic_compile::prover9::rational;
///
/// assert_eq!((1, 4), rational(0.25).unwrap());
/// assert_eq!((-5, 2), rational(-2.5).unwrap());
/// assert_eq!((355, 113), rational(355.0 / 113.0).unwrap());
/// assert_eq!((1, 3), rational(1.0 / 3.0).unwrap());
/// ```
pub fn rational(value: f64) -> Result<(i128, i128), Error> {
    let unsupported = |reason: &str| Error::UnsupportedValue {
        value: value.to_string(),
        reason: reason.to_string(),
    };
    if !value.is_finite() {
        return Err(unsupported("not a finite number"));
    }

    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1 << 52) - 1);
    let (mut mantissa, mut exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased - 1075)
    };
    if mantissa == 0 {
        return Ok((0, 1));
    }
    let zeros = mantissa.trailing_zeros();
    mantissa >>= zeros;
    exponent += zeros as i32;

    let (n, d) = if exponent >= 0 {
        if exponent > 64 {
            return Err(unsupported("too large for a rational term"));
        }
        ((mantissa as i128) << exponent, 1)
    } else if exponent < -120 {
        // far below 1 / (2 * MAX_DENOMINATOR)
        return Ok((0, 1));
    } else {
        (mantissa as i128, 1i128 << -exponent)
    };
    let (p, q) = limit_denominator(n, d, MAX_DENOMINATOR);
    Ok((if negative { -p } else { p }, q))
}

fn variable(v: &Variable) -> String {
    v.name().to_lowercase()
}

// Distinct strings map to distinct constants: `_` is doubled and any other character
// outside `[A-Za-z0-9]` becomes `_<hex code point>_`.
fn string_constant(s: &str) -> String {
    let mut constant = String::from("s_");
    for c in s.chars() {
        match c {
            '_' => constant.push_str("__"),
            c if c.is_ascii_alphanumeric() => constant.push(c),
            c => constant.push_str(&format!("_{:x}_", c as u32)),
        }
    }
    constant
}

fn value(value: &Value) -> Result<String, Error> {
    let text = match value {
        Value::Var(v) => variable(v),
        Value::Str(s) => string_constant(s),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => {
            let (n, d) = rational(*f)?;
            format!("rational({},{})", n, d)
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".into(),
        Value::Term(t) => term(t)?,
    };
    Ok(text)
}

fn term(term: &Term) -> Result<String, Error> {
    let values = term.values();
    if values.is_empty() {
        return Ok(term.predicate().to_string());
    }
    let arguments = values
        .into_iter()
        .map(value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{}({})", term.predicate(), arguments.join(", ")))
}

fn join(operands: &[Sentence], separator: &str) -> Result<String, Error> {
    Ok(format!(
        "({})",
        operands
            .iter()
            .map(as_prover9)
            .collect::<Result<Vec<_>, _>>()?
            .join(separator)
    ))
}

/// Renders `sentence` as a Prover9 formula.
///
/// **Example**:
/// ```rust
/// use typedlogic_compile::prover9::as_prover9;
/// use typedlogic_fol::syntax::{Sentence, Term, Variable};
///
/// let (x, y) = (Variable::typed("X", "str"), Variable::typed("Y", "str"));
/// let p: Sentence = Term::new("P", vec![x.clone().into()]).into();
/// let q: Sentence = Term::new("Q", vec![x.clone().into(), y.clone().into()]).into();
/// let r: Sentence = Term::new("R", vec![y.clone().into()]).into();
///
/// let rule = Sentence::forall(vec![x], p.clone().implies(q));
/// assert_eq!("all x ((P(x) -> Q(x, y)))", as_prover9(&rule).unwrap());
/// assert_eq!("(P(x) | - ( R(y) ))", as_prover9(&p.or(Sentence::not(r))).unwrap());
/// assert_eq!("S(s_hello)", as_prover9(&Term::new("S", vec!["hello".into()]).into()).unwrap());
/// ```
pub fn as_prover9(sentence: &Sentence) -> Result<String, Error> {
    let text = match sentence {
        Sentence::Term(this) => term(this)?,
        Sentence::Forall(this) => format!(
            "all {} ({})",
            this.variables().iter().map(variable).join(" "),
            as_prover9(this.sentence())?
        ),
        Sentence::Exists(this) => format!(
            "exists {} ({})",
            this.variables().iter().map(variable).join(" "),
            as_prover9(this.sentence())?
        ),
        Sentence::And(this) if this.operands().is_empty() => "true".into(),
        Sentence::And(this) => join(this.operands(), " & ")?,
        Sentence::Or(this) if this.operands().is_empty() => "false".into(),
        Sentence::Or(this) => join(this.operands(), " | ")?,
        Sentence::Not(this) => format!("- ( {} )", as_prover9(this.negated())?),
        Sentence::Implies(this) => format!(
            "({} -> {})",
            as_prover9(this.antecedent())?,
            as_prover9(this.consequent())?
        ),
        Sentence::Implied(this) => format!(
            "({} <- {})",
            as_prover9(this.consequent())?,
            as_prover9(this.antecedent())?
        ),
        Sentence::Iff(this) => format!(
            "({} <-> {})",
            as_prover9(this.left())?,
            as_prover9(this.right())?
        ),
        Sentence::Xor(_) => as_prover9(&expand_xor(sentence).unwrap_or_else(Sentence::bottom))?,
        Sentence::ExactlyOne(_) => {
            as_prover9(&expand_exactly_one(sentence).unwrap_or_else(Sentence::bottom))?
        }
        Sentence::Extension(this) => as_prover9(&this.to_model_object())?,
        Sentence::NegationAsFailure(_) => {
            return Err(Violation::UnsupportedSentence {
                kind: sentence.kind(),
                syntax: "prover9",
            }
            .into())
        }
    };
    Ok(text)
}

fn formulas(list: &str, lines: &mut Vec<String>, formulas: Vec<String>) {
    lines.push(format!("formulas({}).", list));
    lines.extend(formulas.into_iter().map(|f| format!("    {}", f)));
    lines.push("end_of_list.".into());
}

/// Renders every sentence of `theory` as an assumption and `conjecture`, if any, as a goal.
pub fn prover9_problem(theory: &Theory, conjecture: Option<&Sentence>) -> Result<String, Error> {
    let mut lines = Vec::new();
    let assumptions = theory
        .sentences()
        .into_iter()
        .map(|s| Ok(format!("{}.", as_prover9(s)?)))
        .collect::<Result<Vec<_>, Error>>()?;
    formulas("assumptions", &mut lines, assumptions);
    lines.push(String::new());
    if let Some(conjecture) = conjecture {
        formulas("goals", &mut lines, vec![format!("{}.", as_prover9(conjecture)?)]);
    }
    Ok(lines.join("\n"))
}

/// Compiles theories to Prover9 problems. Sentences of goal groups, followed by `goals`, are
/// the goals of the problem.
#[derive(Clone, Default, Debug)]
pub struct Prover9Compiler {
    /// Fails on untranslatable sentences instead of commenting them out.
    pub strict: bool,

    pub goals: Vec<Sentence>,
}

impl Prover9Compiler {
    fn formula(&self, sentence: &Sentence) -> Result<String, Error> {
        match as_prover9(sentence) {
            Ok(text) => Ok(format!("{}.", text)),
            Err(e) if e.is_not_in_profile() && !self.strict => {
                let fol = crate::fol::as_fol(sentence)?;
                info!(event = trace::UNTRANSLATABLE, sentence = %fol, reason = %e);
                Ok(format!("% UNTRANSLATABLE: {}", fol))
            }
            Err(e) => Err(e),
        }
    }
}

impl Compiler for Prover9Compiler {
    fn compile(&self, theory: &Theory) -> Result<String, Error> {
        let compile_span = span!(Level::INFO, trace::COMPILE, syntax = "prover9");
        let _enter = compile_span.enter();

        let mut assumptions = Vec::new();
        let mut goals = Vec::new();
        for group in &theory.sentence_groups {
            let list = if group.is_goal() {
                &mut goals
            } else {
                &mut assumptions
            };
            for sentence in &group.sentences {
                list.push(self.formula(sentence)?);
            }
        }
        for term in &theory.ground_terms {
            assumptions.push(self.formula(&term.clone().into())?);
        }
        for goal in &self.goals {
            goals.push(self.formula(goal)?);
        }
        let count = assumptions.len() + goals.len();

        let mut lines = vec![format!(
            "% Problem: {}",
            theory.name.as_deref().unwrap_or("unnamed")
        )];
        formulas("assumptions", &mut lines, assumptions);
        lines.push(String::new());
        formulas("goals", &mut lines, goals);

        info!(event = trace::COMPILED, sentences = count);
        Ok(lines.join("\n"))
    }

    fn suffix(&self) -> &'static str {
        "prover9"
    }

    fn profile(&self) -> ProfileSet {
        ProfileSet::new(vec![Profile::Unrestricted, Profile::OpenWorld])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use typedlogic_fol::{
        syntax::{GroupType, PredicateDefinition, SentenceGroup},
        term, v,
    };

    fn prover9(sentence: &Sentence) -> String {
        as_prover9(sentence).unwrap()
    }

    #[test]
    fn test_rational() {
        assert_eq!((0, 1), rational(0.0).unwrap());
        assert_eq!((3, 1), rational(3.0).unwrap());
        assert_eq!((1, 10), rational(0.1).unwrap());
        assert_eq!((-1, 3), rational(-1.0 / 3.0).unwrap());
        assert_eq!((3_141_593, 1_000_000), rational(3.141593).unwrap());
        assert_eq!((0, 1), rational(1e-300).unwrap());
        assert_eq!((1, 1_000_000), rational(1e-6).unwrap());
        assert!(rational(f64::NAN).is_err());
        assert!(rational(f64::INFINITY).is_err());
        assert!(rational(1e300).is_err());
    }

    #[test]
    fn test_as_prover9() {
        let (x, y) = (v!(X: str), v!(Y: str));
        let p: Sentence = term!(P(X)).into();
        let q: Sentence = term!(Q(X, Y)).into();
        assert_eq!(
            "exists x y ((P(x) & Q(x, y)))",
            prover9(&Sentence::exists(vec![x, y], p.clone().and(q.clone())))
        );
        assert_eq!("(Q(x, y) <- P(x))", prover9(&q.clone().implied_by(p.clone())));
        assert_eq!("(P(x) <-> Q(x, y))", prover9(&p.clone().iff(q.clone())));
        assert_eq!("true", prover9(&Sentence::top()));
        assert_eq!("false", prover9(&Sentence::bottom()));
        assert_eq!(
            "((A | B) & - ( (A & B) ))",
            prover9(&atom("A").xor(atom("B")))
        );
        assert!(as_prover9(&Sentence::naf(p)).unwrap_err().is_not_in_profile());
    }

    #[test]
    fn test_as_prover9_values() {
        assert_eq!(
            "S(s_hello_20_world_21_, 3, rational(1,4), true, null, f(s_a))",
            prover9(&fact(
                "S",
                vec![
                    "hello world!".into(),
                    3.into(),
                    0.25.into(),
                    true.into(),
                    Value::Null,
                    Term::new("f", vec!["a".into()]).into(),
                ]
            ))
        );
        assert!(as_prover9(&fact("S", vec![f64::NAN.into()])).is_err());

        let constants = vec!["a-b", "a b", "a_b", "a_2d_b", "ab"]
            .into_iter()
            .map(string_constant)
            .collect::<Vec<_>>();
        assert_eq!(vec!["s_a_2d_b", "s_a_20_b", "s_a__b", "s_a__2d__b", "s_ab"], constants);
        assert_eq!("s_caf_e9_", string_constant("café"));
    }

    #[test]
    fn test_prover9_problem() {
        let (x, y) = (v!(X: str), v!(Y: str));
        let mut theory = Theory::named("example");
        theory.predicate_definitions = vec![
            PredicateDefinition::new("P", vec![("x", "str")]),
            PredicateDefinition::new("Q", vec![("x", "str"), ("y", "str")]),
        ];
        theory.sentence_groups = vec![SentenceGroup::new(
            "axioms",
            vec![Sentence::forall(
                vec![x.clone()],
                Sentence::from(term!(P(X))).implies(term!(Q(X, Y)).into()),
            )],
        )];
        let conjecture = Sentence::forall(
            vec![x, y],
            Sentence::from(term!(P(X))).implies(term!(Q(X, Y)).into()),
        );
        assert_eq!(
            "formulas(assumptions).\n    \
             all x ((P(x) -> Q(x, y))).\n\
             end_of_list.\n\
             \n\
             formulas(goals).\n    \
             all x y ((P(x) -> Q(x, y))).\n\
             end_of_list.",
            prover9_problem(&theory, Some(&conjecture)).unwrap()
        );
    }

    #[test]
    fn test_prover9_compiler() {
        let mut theory = Theory::named("pets");
        theory.add(fact("Person", vec!["Fred".into()]));
        theory.add(Sentence::naf(atom("A")));
        theory.sentence_groups.push(
            SentenceGroup::new("goals", vec![fact("Person", vec!["Jie".into()])])
                .with_type(GroupType::Goal),
        );
        theory.ground_terms.push(term!(Person("Ann")));
        let compiler = Prover9Compiler {
            strict: false,
            goals: vec![atom("Done")],
        };
        assert_eq!(
            "% Problem: pets\n\
             formulas(assumptions).\n    \
             Person(s_Fred).\n    \
             % UNTRANSLATABLE: not A\n    \
             Person(s_Ann).\n\
             end_of_list.\n\
             \n\
             formulas(goals).\n    \
             Person(s_Jie).\n    \
             Done.\n\
             end_of_list.",
            compiler.compile(&theory).unwrap()
        );
        assert!(Prover9Compiler {
            strict: true,
            goals: Vec::new()
        }
        .compile(&theory)
        .is_err());
    }
}

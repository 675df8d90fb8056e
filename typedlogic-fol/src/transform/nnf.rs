/*! Implements the rules that push negation inward. */

use super::rewrite;
use crate::syntax::Sentence;

/// Applies De Morgan's laws: `Not(And(a, b))` becomes `Or(Not(a), Not(b))` and
/// `Not(Or(a, b))` becomes `And(Not(a), Not(b))`.
pub fn apply_demorgans(sentence: &Sentence) -> Option<Sentence> {
    let negated = match sentence {
        Sentence::Not(this) => this.negated(),
        _ => return None,
    };
    let negate_all = |operands: &[Sentence]| -> Vec<Sentence> {
        operands.iter().cloned().map(Sentence::not).collect()
    };
    match negated {
        Sentence::And(this) => Some(Sentence::any(negate_all(this.operands()))),
        Sentence::Or(this) => Some(Sentence::all(negate_all(this.operands()))),
        _ => None,
    }
}

/// Moves negation across quantifiers: `¬∀x. φ` becomes `∃x. ¬φ` and `¬∃x. φ` becomes
/// `∀x. ¬φ`.
pub fn apply_quantifier_negation(sentence: &Sentence) -> Option<Sentence> {
    let negated = match sentence {
        Sentence::Not(this) => this.negated(),
        _ => return None,
    };
    match negated {
        Sentence::Forall(this) => Some(Sentence::exists(
            this.variables().to_vec(),
            Sentence::not(this.sentence().clone()),
        )),
        Sentence::Exists(this) => Some(Sentence::forall(
            this.variables().to_vec(),
            Sentence::not(this.sentence().clone()),
        )),
        _ => None,
    }
}

/// Replaces `Not(Not(a))` with `a`.
pub fn eliminate_double_negation(sentence: &Sentence) -> Option<Sentence> {
    match sentence {
        Sentence::Not(this) => match this.negated() {
            Sentence::Not(inner) => Some(inner.negated().clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Pushes classical negation down to the terms of an implication-free `sentence`, in a
/// single top-down pass.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{Sentence, Term, Variable};
/// use typedlogic_fol::transform::to_nnf;
///
/// let p: Sentence = Term::new("P", vec![Variable::new("x").into()]).into();
/// let q: Sentence = Term::proposition("Q").into();
///
/// let sentence = Sentence::not(Sentence::forall(vec![Variable::new("x")], p.and(q)));
/// assert_eq!(
///     "Exists([?x], Or(Not(P(?x)), Not(Q)))",
///     format!("{:?}", to_nnf(&sentence)),
/// );
/// ```
pub fn to_nnf(sentence: &Sentence) -> Sentence {
    rewrite(sentence, &|s: &Sentence| {
        apply_demorgans(s)
            .or_else(|| apply_quantifier_negation(s))
            .or_else(|| eliminate_double_negation(s))
    })
}

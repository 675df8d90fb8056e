/*! Implements the rules that expand exclusive connectives and eliminate implications.

None of the rules recurse; they are meant to be driven by [`rewrite`].

[`rewrite`]: crate::transform::rewrite() */

use super::rewrite_chained;
use crate::syntax::Sentence;

/// Replaces `Xor(a, b, …)` with `And(Or(a, b, …), Not(And(a, b, …)))`: at least one
/// operand holds but not all of them. A single operand stands for itself.
pub fn expand_xor(sentence: &Sentence) -> Option<Sentence> {
    match sentence {
        Sentence::Xor(this) => Some(some_but_not_all(this.operands())),
        _ => None,
    }
}

/// Expands `ExactlyOne`. With two operands it coincides with [`expand_xor`]; with more it
/// becomes a disjunction that picks each operand in turn and denies all the others.
pub fn expand_exactly_one(sentence: &Sentence) -> Option<Sentence> {
    let operands = match sentence {
        Sentence::ExactlyOne(this) => this.operands(),
        _ => return None,
    };

    if operands.len() <= 2 && !operands.is_empty() {
        return Some(some_but_not_all(operands));
    }

    let disjuncts = (0..operands.len())
        .map(|i| {
            let others = operands
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, s)| s.clone())
                .collect();
            operands[i]
                .clone()
                .and(Sentence::not(Sentence::any(others)))
        })
        .collect();
    Some(Sentence::any(disjuncts))
}

fn some_but_not_all(operands: &[Sentence]) -> Sentence {
    if operands.len() == 1 {
        return operands[0].clone();
    }
    Sentence::any(operands.to_vec()).and(Sentence::not(Sentence::all(operands.to_vec())))
}

/// Replaces `Iff(a, b)` with `And(Implies(a, b), Implies(b, a))`.
pub fn eliminate_iff(sentence: &Sentence) -> Option<Sentence> {
    match sentence {
        Sentence::Iff(this) => {
            let forward = this.left().clone().implies(this.right().clone());
            let backward = this.right().clone().implies(this.left().clone());
            Some(forward.and(backward))
        }
        _ => None,
    }
}

/// Turns a reverse implication around: `Implied(a, b)` becomes `Implies(b, a)`.
pub fn eliminate_implied(sentence: &Sentence) -> Option<Sentence> {
    match sentence {
        Sentence::Implied(this) => {
            Some(this.antecedent().clone().implies(this.consequent().clone()))
        }
        _ => None,
    }
}

/// Replaces `Implies(a, b)` with `Or(Not(a), b)`.
pub fn eliminate_implies(sentence: &Sentence) -> Option<Sentence> {
    match sentence {
        Sentence::Implies(this) => {
            Some(Sentence::not(this.antecedent().clone()).or(this.consequent().clone()))
        }
        _ => None,
    }
}

/// Eliminates every bi-implication, reverse implication and implication in `sentence`,
/// in that order.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{Sentence, Term};
/// use typedlogic_fol::transform::eliminate_implications;
///
/// let p: Sentence = Term::proposition("P").into();
/// let q: Sentence = Term::proposition("Q").into();
///
/// assert_eq!(
///     "And(Or(Not(P), Q), Or(Not(Q), P))",
///     format!("{:?}", eliminate_implications(&p.iff(q))),
/// );
/// ```
pub fn eliminate_implications(sentence: &Sentence) -> Sentence {
    rewrite_chained(
        sentence,
        &[&eliminate_iff, &eliminate_implied, &eliminate_implies],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_debug_string, term, test_prelude::*, transform::rewrite, v};

    #[test]
    fn test_expand_xor() {
        assert!(expand_xor(&P().and(Q())).is_none());
        assert_debug_string!("And(Or(P, Q), Not(And(P, Q)))", expand_xor(&P().xor(Q())).unwrap());
        assert_debug_string!(
            "P",
            expand_xor(&crate::syntax::Xor::new(vec![P()]).into()).unwrap()
        );
        assert_debug_string!(
            "And(Or(P, Q, R), Not(And(P, Q, R)))",
            expand_xor(&crate::syntax::Xor::new(vec![P(), Q(), R()]).into()).unwrap()
        );
    }

    #[test]
    fn test_expand_exactly_one() {
        assert_debug_string!("P", expand_exactly_one(&Sentence::exactly_one(vec![P()])).unwrap());
        assert_debug_string!(
            "And(Or(P, Q), Not(And(P, Q)))",
            expand_exactly_one(&Sentence::exactly_one(vec![P(), Q()])).unwrap()
        );
        assert_debug_string!(
            "Or(And(P, Not(Or(Q, R))), And(Q, Not(Or(P, R))), And(R, Not(Or(P, Q))))",
            expand_exactly_one(&Sentence::exactly_one(vec![P(), Q(), R()])).unwrap()
        );
        assert_debug_string!(
            "Or()",
            expand_exactly_one(&Sentence::exactly_one(vec![])).unwrap()
        );
    }

    #[test]
    fn test_eliminate_implications() {
        let q: Sentence = term!(Q(x)).into();
        let r: Sentence = term!(R(y)).into();
        assert_debug_string!(
            "And(Implies(Q(?x), R(?y)), Implies(R(?y), Q(?x)))",
            eliminate_iff(&q.clone().iff(r.clone())).unwrap()
        );
        assert_debug_string!(
            "Implies(R(?y), Q(?x))",
            eliminate_implied(&q.clone().implied_by(r.clone())).unwrap()
        );
        assert_debug_string!(
            "Or(Not(Q(?x)), R(?y))",
            eliminate_implies(&q.clone().implies(r.clone())).unwrap()
        );
        assert!(eliminate_iff(&Sentence::forall(vec![v!(x)], q.clone().iff(r.clone()))).is_none());
        assert_debug_string!(
            "Forall([?x], And(Implies(Q(?x), R(?y)), Implies(R(?y), Q(?x))))",
            rewrite(&Sentence::forall(vec![v!(x)], q.iff(r)), &eliminate_iff)
        );
        assert_debug_string!(
            "And(P, Or(Not(Q), R))",
            eliminate_implications(&P().and(Q().implies(R())))
        );
        assert_debug_string!(
            "Or(Not(Q), P)",
            eliminate_implications(&P().implied_by(Q()))
        );
    }
}

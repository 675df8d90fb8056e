/*! Implements syntactic simplification of sentences. */

use crate::syntax::{Exists, Forall, Sentence, Variable};

/// Flattens nested conjunctions and disjunctions, collapses single-operand conjunctions
/// and disjunctions, merges directly nested quantifiers of the same kind and removes
/// double negation, at every depth of `sentence`.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{Sentence, Term};
/// use typedlogic_fol::transform::simplify;
///
/// let a: Sentence = Term::proposition("A").into();
/// let b: Sentence = Term::proposition("B").into();
/// let c: Sentence = Term::proposition("C").into();
///
/// let nested = a.and(b.and(Sentence::all(vec![c])));
/// assert_eq!("And(A, B, C)", format!("{:?}", simplify(&nested)));
/// ```
pub fn simplify(sentence: &Sentence) -> Sentence {
    match sentence {
        Sentence::And(this) => {
            let operands = flatten(this.operands(), |s| match s {
                Sentence::And(inner) => Some(inner.operands()),
                _ => None,
            });
            singleton_or(operands, Sentence::all)
        }
        Sentence::Or(this) => {
            let operands = flatten(this.operands(), |s| match s {
                Sentence::Or(inner) => Some(inner.operands()),
                _ => None,
            });
            singleton_or(operands, Sentence::any)
        }
        Sentence::Not(this) => match simplify(this.negated()) {
            Sentence::Not(inner) => inner.negated().clone(),
            negated => Sentence::not(negated),
        },
        Sentence::Forall(this) => {
            let body = simplify(this.sentence());
            if let Sentence::Forall(inner) = &body {
                if let Some(vs) = merge_variables(this.variables(), inner.variables()) {
                    return Forall::new(vs, inner.sentence().clone()).into();
                }
            }
            Sentence::forall(this.variables().to_vec(), body)
        }
        Sentence::Exists(this) => {
            let body = simplify(this.sentence());
            if let Sentence::Exists(inner) = &body {
                if let Some(vs) = merge_variables(this.variables(), inner.variables()) {
                    return Exists::new(vs, inner.sentence().clone()).into();
                }
            }
            Sentence::exists(this.variables().to_vec(), body)
        }
        _ => sentence.map_children(simplify),
    }
}

/// Replaces a conjunction or disjunction of exactly one operand with that operand. It does
/// not recurse; use it as a rule for [`rewrite`].
///
/// [`rewrite`]: crate::transform::rewrite()
pub fn reduce_singleton(sentence: &Sentence) -> Option<Sentence> {
    match sentence {
        Sentence::And(this) if this.operands().len() == 1 => Some(this.operands()[0].clone()),
        Sentence::Or(this) if this.operands().len() == 1 => Some(this.operands()[0].clone()),
        _ => None,
    }
}

// Simplifies `operands`, splicing the operands of those that `nested` recognizes.
fn flatten<F>(operands: &[Sentence], nested: F) -> Vec<Sentence>
where
    F: Fn(&Sentence) -> Option<&[Sentence]>,
{
    let mut result = Vec::new();
    for operand in operands.iter().map(simplify) {
        match nested(&operand) {
            Some(inner) => result.extend(inner.iter().cloned()),
            None => result.push(operand),
        }
    }
    result
}

fn singleton_or<F: Fn(Vec<Sentence>) -> Sentence>(mut operands: Vec<Sentence>, f: F) -> Sentence {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        f(operands)
    }
}

// Inner variables are appended to the outer ones; the merge is skipped when an inner
// variable shadows an outer one.
fn merge_variables(outer: &[Variable], inner: &[Variable]) -> Option<Vec<Variable>> {
    if inner.iter().any(|v| outer.contains(v)) {
        return None;
    }
    Some(outer.iter().chain(inner.iter()).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_debug_string, test_prelude::*, v};

    #[test]
    fn test_simplify() {
        assert_debug_string!("P", simplify(&P()));
        assert_debug_string!("And(P, Q, R, S)", simplify(&P().and(Q().and(R().and(S())))));
        assert_debug_string!("P", simplify(&Sentence::all(vec![Sentence::all(vec![P()])])));
        assert_debug_string!("Or(P, Q, R)", simplify(&P().or(Sentence::any(vec![Q(), R()]))));
        assert_debug_string!("And(Or(P, Q), R)", simplify(&P().or(Q()).and(R())));
        assert_debug_string!("P", simplify(&not(not(P()))));
        assert_debug_string!("Not(P)", simplify(&not(not(not(P())))));
        assert_debug_string!("And()", simplify(&Sentence::top()));
        assert_debug_string!("Q", simplify(&Sentence::top().and(Q())));
        assert_debug_string!(
            "Implies(And(P, Q, R), P)",
            simplify(&P().and(Q().and(R())).implies(Sentence::any(vec![P()])))
        );
    }

    #[test]
    fn simplify_quantifiers() {
        assert_debug_string!(
            "Forall([?x, ?y], And(P, Q))",
            simplify(&Sentence::forall(
                vec![v!(x)],
                Sentence::forall(vec![v!(y)], P().and(Sentence::all(vec![Q()])))
            ))
        );
        assert_debug_string!(
            "Exists([?x], Forall([?y], P))",
            simplify(&Sentence::exists(
                vec![v!(x)],
                Sentence::forall(vec![v!(y)], P())
            ))
        );
        assert_debug_string!(
            "Forall([?x], Forall([?x], P))",
            simplify(&Sentence::forall(
                vec![v!(x)],
                Sentence::forall(vec![v!(x)], P())
            ))
        );
    }

    #[test]
    fn test_reduce_singleton() {
        assert!(reduce_singleton(&P().and(Q())).is_none());
        assert_debug_string!("P", reduce_singleton(&Sentence::all(vec![P()])).unwrap());
        assert_debug_string!("P", reduce_singleton(&Sentence::any(vec![P()])).unwrap());
        assert_debug_string!(
            "And(P, Q, R)",
            crate::transform::rewrite(
                &Sentence::all(vec![P(), Sentence::any(vec![Q()]), R()]),
                &reduce_singleton
            )
        );
    }
}

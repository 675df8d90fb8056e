/*! Implements the conversion of sentences to Conjunctive Normal Form (CNF). */

use super::{
    eliminate_implications, expand_exactly_one, expand_xor, rewrite, rewrite_chained, simplify,
    to_nnf, Skolemizer,
};
use crate::syntax::Sentence;

/// Distributes conjunction over disjunction at the root of `sentence`:
/// `A ∨ (B₁ ∧ … ∧ Bₙ)` becomes `(B₁ ∨ A) ∧ … ∧ (Bₙ ∨ A)`. Only disjunctions are
/// affected; drive it with [`rewrite`] to distribute at every depth.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{Sentence, Term};
/// use typedlogic_fol::transform::distribute_and_over_or;
///
/// let a: Sentence = Term::proposition("A").into();
/// let b: Sentence = Term::proposition("B").into();
/// let c: Sentence = Term::proposition("C").into();
///
/// let distributed = distribute_and_over_or(&a.or(b.and(c))).unwrap();
/// assert_eq!("And(Or(B, A), Or(C, A))", format!("{:?}", distributed));
/// ```
///
/// [`rewrite`]: crate::transform::rewrite()
pub fn distribute_and_over_or(sentence: &Sentence) -> Option<Sentence> {
    match sentence {
        Sentence::Or(_) => Some(distribute(sentence)),
        _ => None,
    }
}

fn distribute(sentence: &Sentence) -> Sentence {
    let sentence = simplify(sentence);
    match &sentence {
        Sentence::Or(this) => {
            let position = this
                .operands()
                .iter()
                .position(|s| matches!(s, Sentence::And(_)));
            let (index, conjunction) = match position {
                Some(i) => match &this.operands()[i] {
                    Sentence::And(conjunction) => (i, conjunction),
                    _ => return sentence.clone(),
                },
                None => return sentence.clone(),
            };

            let rest: Vec<Sentence> = this
                .operands()
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != index)
                .map(|(_, s)| s.clone())
                .collect();
            let factors = conjunction
                .operands()
                .iter()
                .map(|c| distribute(&c.clone().or(Sentence::any(rest.clone()))))
                .collect();
            simplify(&Sentence::all(factors))
        }
        Sentence::And(this) => {
            let mut factors: Vec<Sentence> = this.operands().iter().map(distribute).collect();
            if factors.len() == 1 {
                factors.remove(0)
            } else {
                simplify(&Sentence::all(factors))
            }
        }
        _ => sentence.clone(),
    }
}

/// Drops a universal quantifier, leaving its variables free (and implicitly universal).
pub fn drop_universals(sentence: &Sentence) -> Option<Sentence> {
    match sentence {
        Sentence::Forall(this) => Some(this.sentence().clone()),
        _ => None,
    }
}

/// Converts `sentence` to CNF.
///
/// Exclusive connectives are expanded, implications eliminated and negation pushed to the
/// terms. Unless `skip_skolemization` is set, existential variables are Skolemized with
/// `skolemizer`. Universal quantifiers are then dropped and conjunction is distributed over
/// disjunction.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{Sentence, Term};
/// use typedlogic_fol::transform::{to_cnf, Skolemizer};
///
/// let p: Sentence = Term::proposition("P").into();
/// let q: Sentence = Term::proposition("Q").into();
/// let r: Sentence = Term::proposition("R").into();
///
/// let cnf = to_cnf(&Sentence::not(p.or(q)).or(r), false, &mut Skolemizer::new());
/// assert_eq!("And(Or(Not(P), R), Or(Not(Q), R))", format!("{:?}", cnf));
/// ```
pub fn to_cnf(
    sentence: &Sentence,
    skip_skolemization: bool,
    skolemizer: &mut Skolemizer,
) -> Sentence {
    let sentence = rewrite_chained(sentence, &[&expand_xor, &expand_exactly_one]);
    let sentence = eliminate_implications(&sentence);
    let sentence = to_nnf(&sentence);
    let sentence = if skip_skolemization {
        sentence
    } else {
        skolemizer.skolemize(&sentence)
    };
    let sentence = rewrite(&sentence, &drop_universals);
    rewrite(&sentence, &distribute_and_over_or)
}

/// Converts `sentence` to a list of clauses, each a list of literals, without
/// Skolemization. The outer list is a conjunction and every inner list a disjunction.
pub fn to_cnf_lol(sentence: &Sentence) -> Vec<Vec<Sentence>> {
    let cnf = simplify(&to_cnf(sentence, true, &mut Skolemizer::new()));
    let clauses = match cnf {
        Sentence::And(this) => this.into_operands(),
        _ => vec![cnf],
    };
    clauses
        .into_iter()
        .map(|clause| match clause {
            Sentence::Or(this) => this.into_operands(),
            _ => vec![clause],
        })
        .collect()
}

/// Is the trait of values that can be converted to CNF.
pub trait ToCnf {
    /// Converts the receiver to CNF, Skolemizing existential variables with a fresh
    /// [`Skolemizer`].
    fn cnf(&self) -> Sentence;

    /// Converts the receiver to a list of clauses; see [`to_cnf_lol`].
    fn cnf_clauses(&self) -> Vec<Vec<Sentence>>;
}

impl ToCnf for Sentence {
    fn cnf(&self) -> Sentence {
        to_cnf(self, false, &mut Skolemizer::new())
    }

    fn cnf_clauses(&self) -> Vec<Vec<Sentence>> {
        to_cnf_lol(self)
    }
}

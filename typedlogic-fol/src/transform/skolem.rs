/*! Implements Skolemization: existential variables are replaced by Skolem terms over the
universally quantified variables in scope. */

use crate::syntax::{Sentence, Term, Value, Variable};
use std::collections::HashMap;
use tracing::trace;

/// Is the prefix of the function symbols minted by a [`Skolemizer`].
pub const SKOLEM_PREFIX: &str = "sk__";

/// Replaces existentially quantified variables with fresh Skolem terms.
///
/// A Skolemizer owns the counter used to name Skolem functions; reusing one instance across
/// sentences keeps the names unique among all of them.
#[derive(Default, Debug)]
pub struct Skolemizer {
    counter: usize,
}

impl Skolemizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Skolemizer whose first Skolem function is numbered `seed + 1`.
    pub fn seeded(seed: usize) -> Self {
        Self { counter: seed }
    }

    /// Returns the number of the last Skolem function minted so far.
    #[inline(always)]
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Skolemizes `sentence`. `Exists` wrappers are dropped; universal quantifiers are
    /// preserved.
    ///
    /// **Example**:
    /// ```rust
    /// use typedlogic_fol::syntax::{Sentence, Term, Variable};
    /// use typedlogic_fol::transform::Skolemizer;
    ///
    /// let (x, y, z) = (Variable::new("x"), Variable::new("y"), Variable::new("z"));
    /// let p = Term::new("P", vec![x.clone().into(), y.clone().into(), z.clone().into()]);
    /// let sentence = Sentence::forall(vec![x], Sentence::exists(vec![y, z], p.into()));
    ///
    /// let mut skolemizer = Skolemizer::new();
    /// assert_eq!(
    ///     "Forall([?x], P(?x, sk__1(?x), sk__2(?x)))",
    ///     format!("{:?}", skolemizer.skolemize(&sentence)),
    /// );
    /// assert_eq!(2, skolemizer.counter());
    /// ```
    pub fn skolemize(&mut self, sentence: &Sentence) -> Sentence {
        self.visit(sentence, &[], &HashMap::new())
    }

    fn visit(
        &mut self,
        sentence: &Sentence,
        universals: &[Variable],
        substitution: &HashMap<String, Value>,
    ) -> Sentence {
        match sentence {
            Sentence::Forall(this) => {
                let mut universals = universals.to_vec();
                universals.extend(this.variables().iter().cloned());

                // rebound variables shadow existing substitutions
                let substitution = substitution
                    .iter()
                    .filter(|(k, _)| !this.variables().iter().any(|v| v.name() == k.as_str()))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();

                let body = self.visit(this.sentence(), &universals, &substitution);
                Sentence::forall(this.variables().to_vec(), body)
            }
            Sentence::Exists(this) => {
                let mut substitution = substitution.clone();
                for v in this.variables().iter().filter(|v| !universals.contains(v)) {
                    let skolem_term = self.mint(universals);
                    trace!(variable = %v, skolem_term = %skolem_term);
                    substitution.insert(v.name().to_string(), skolem_term.into());
                }
                self.visit(this.sentence(), universals, &substitution)
            }
            Sentence::Term(this) => substitute(this, substitution).into(),
            Sentence::Extension(this) => {
                self.visit(&this.to_model_object(), universals, substitution)
            }
            _ => sentence.map_children(|s| self.visit(s, universals, substitution)),
        }
    }

    fn mint(&mut self, universals: &[Variable]) -> Term {
        self.counter += 1;
        Term::new(
            format!("{}{}", SKOLEM_PREFIX, self.counter),
            universals.iter().map(Value::from).collect(),
        )
    }
}

// Substitutes variables at any depth of `term`, including inside function terms.
fn substitute(term: &Term, substitution: &HashMap<String, Value>) -> Term {
    if substitution.is_empty() {
        return term.clone();
    }
    term.map_values(|value| match value {
        Value::Var(v) => substitution
            .get(v.name())
            .cloned()
            .unwrap_or_else(|| value.clone()),
        Value::Term(t) => substitute(t, substitution).into(),
        _ => value.clone(),
    })
}

/// Skolemizes `sentence` with a fresh [`Skolemizer`].
pub fn skolemize(sentence: &Sentence) -> Sentence {
    Skolemizer::new().skolemize(sentence)
}

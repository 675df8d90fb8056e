/*! Implements the extraction of Horn rules from arbitrary sentences. */

use super::{simplify, to_cnf_lol};
use crate::syntax::Sentence;
use serde_derive::{Deserialize, Serialize};

/// Controls how clauses that are not strictly Horn are turned into rules.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HornOptions {
    /// Keeps clauses with several positive literals as rules with a disjunctive head.
    pub allow_disjunctions_in_head: bool,

    /// Keeps clauses with no positive literal as integrity constraints, rules whose head is
    /// the empty disjunction. Defaults to `allow_disjunctions_in_head` when unset.
    pub allow_goal_clauses: Option<bool>,
}

impl HornOptions {
    pub fn disjunctive() -> Self {
        Self {
            allow_disjunctions_in_head: true,
            allow_goal_clauses: None,
        }
    }

    fn goal_clauses(&self) -> bool {
        self.allow_goal_clauses
            .unwrap_or(self.allow_disjunctions_in_head)
    }
}

/// Converts `sentence` into a list of rules `Implies(body, head)`.
///
/// The sentence is converted to clauses, free variables implicitly universal. Each clause
/// is split into its positive literals (the head) and the terms of its negative literals
/// (the body):
/// * a clause with no literals becomes the false sentence `Or()`;
/// * a clause with no positive literal becomes `Implies(body, Or())` when goal clauses are
///   allowed and is dropped otherwise;
/// * a clause with one positive literal becomes `Implies(body, head)`;
/// * a clause with several positive literals becomes `Implies(body, Or(heads))` when
///   disjunctive heads are allowed; otherwise the **last** positive literal is the head and
///   the negation of every other positive literal joins the body.
///
/// The last policy is lossy: the extracted rules are weaker than the clause.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{Sentence, Term};
/// use typedlogic_fol::transform::{to_horn_rules, HornOptions};
///
/// let p: Sentence = Term::proposition("P").into();
/// let q: Sentence = Term::proposition("Q").into();
/// let r: Sentence = Term::proposition("R").into();
///
/// let rules = to_horn_rules(&r.implies(q.and(p)), &HornOptions::default());
/// assert_eq!("[Implies(R, Q), Implies(R, P)]", format!("{:?}", rules));
/// ```
pub fn to_horn_rules(sentence: &Sentence, options: &HornOptions) -> Vec<Sentence> {
    let sentence = simplify(&sentence.canonical());
    let mut rules = Vec::new();
    for clause in to_cnf_lol(&sentence) {
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        for literal in clause {
            match literal {
                Sentence::Not(this) => negative.push(this.negated().clone()),
                _ => positive.push(literal),
            }
        }

        if positive.is_empty() && negative.is_empty() {
            rules.push(Sentence::bottom());
            continue;
        }

        if positive.len() > 1 && !options.allow_disjunctions_in_head {
            // the last positive literal is the head; keeps the order of the input
            if let Some(head) = positive.pop() {
                negative.extend(positive.into_iter().map(Sentence::not));
                rules.push(Sentence::all(negative).implies(head));
            }
            continue;
        }

        let body = if negative.len() == 1 {
            negative.remove(0)
        } else {
            Sentence::all(negative)
        };
        match positive.len() {
            0 if options.goal_clauses() => rules.push(body.implies(Sentence::bottom())),
            0 => {}
            1 => rules.push(body.implies(positive.remove(0))),
            _ => rules.push(body.implies(Sentence::any(positive))),
        }
    }
    rules
}

/*! Implements the recursive rewrite combinator that drives every pass. */

use crate::syntax::Sentence;

/// Is the type of rewrite rules: a rule returns the replacement of a node, or `None` to
/// leave the node as it is.
pub type Rule<'r> = &'r dyn Fn(&Sentence) -> Option<Sentence>;

/// Rewrites `sentence` top-down with `rule`.
///
/// The rule is first applied to the current node; when it produces a different node, that
/// node is rewritten again from the top. Otherwise, the node is rebuilt with every child
/// rewritten. Quantifiers keep their variables and terms are leaves. Extension sentences
/// are replaced by their model object before the rule sees them.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{Sentence, Term};
/// use typedlogic_fol::transform::rewrite;
///
/// let p: Sentence = Term::proposition("P").into();
/// let q: Sentence = Term::proposition("Q").into();
///
/// let negate_conjunctions = |s: &Sentence| match s {
///     Sentence::And(this) => Some(Sentence::any(
///         this.operands().iter().cloned().map(Sentence::not).collect(),
///     )),
///     _ => None,
/// };
/// let rewritten = rewrite(&p.clone().or(p.and(q)), &negate_conjunctions);
/// assert_eq!("Or(P, Or(Not(P), Not(Q)))", format!("{:?}", rewritten));
/// ```
pub fn rewrite<R>(sentence: &Sentence, rule: &R) -> Sentence
where
    R: Fn(&Sentence) -> Option<Sentence> + ?Sized,
{
    if let Sentence::Extension(this) = sentence {
        return rewrite(&this.to_model_object(), rule);
    }

    match rule(sentence) {
        Some(replaced) if &replaced != sentence => rewrite(&replaced, rule),
        _ => sentence.map_children(|s| rewrite(s, rule)),
    }
}

/// Rewrites `sentence` with each of `rules` in turn; every rule runs over the whole
/// output of the previous one.
pub fn rewrite_chained(sentence: &Sentence, rules: &[Rule]) -> Sentence {
    rules
        .iter()
        .fold(sentence.clone(), |acc, rule| rewrite(&acc, *rule))
}

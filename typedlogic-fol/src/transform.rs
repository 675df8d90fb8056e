/*! Implements the rewrite passes that normalize sentences.

Every pass is a *rule*, a function that either replaces a node or leaves it alone, driven
over the whole tree by [`rewrite`]. The passes compose into [`to_cnf`] and
[`to_horn_rules`], the entry points used by the compilers. */
mod cnf;
mod constants;
mod expand;
mod hierarchy;
mod horn;
mod nnf;
mod rewrite;
mod simplify;
mod skolem;

pub use cnf::{distribute_and_over_or, drop_universals, to_cnf, to_cnf_lol, ToCnf};
pub use constants::{ensure_terms_positional, replace_constants};
pub use expand::{
    eliminate_iff, eliminate_implications, eliminate_implied, eliminate_implies,
    expand_exactly_one, expand_xor,
};
pub use hierarchy::{implies_from_parents, sentences_from_predicate_hierarchy, INFERRED_GROUP};
pub use horn::{to_horn_rules, HornOptions};
pub use nnf::{apply_demorgans, apply_quantifier_negation, eliminate_double_negation, to_nnf};
pub use rewrite::{rewrite, rewrite_chained, Rule};
pub use simplify::{reduce_singleton, simplify};
pub use skolem::{skolemize, Skolemizer, SKOLEM_PREFIX};

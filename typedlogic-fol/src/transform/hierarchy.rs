/*! Derives implications from the predicate hierarchy of a theory. */

use crate::syntax::{Error, Sentence, SentenceGroup, Term, Theory, Value, Variable};

/// Is the name of the group that [`implies_from_parents`] adds to a theory.
pub const INFERRED_GROUP: &str = "Inferred";

/// Returns one sentence `∀ args. Parent(args) → Child(args)` for every parent of every
/// predicate definition of `theory`. The quantified variables are named and typed after the
/// child's arguments. Sentences already present in the theory are skipped.
///
/// It fails when the theory has no predicate definitions.
pub fn sentences_from_predicate_hierarchy(theory: &Theory) -> Result<Vec<Sentence>, Error> {
    if theory.predicate_definitions.is_empty() {
        return Err(Error::MissingPredicateDefinitions);
    }

    let existing = theory.sentences();
    let mut result = Vec::new();
    for definition in &theory.predicate_definitions {
        let parents = match &definition.parents {
            Some(parents) => parents,
            None => continue,
        };
        let variables: Vec<Variable> = definition
            .arguments
            .iter()
            .map(|(name, typ)| Variable::typed(name.as_str(), typ.as_str()))
            .collect();
        let arguments = || -> Vec<Value> { variables.iter().map(Value::from).collect() };

        for parent in parents {
            let sentence = Sentence::forall(
                variables.clone(),
                Sentence::from(Term::new(parent.as_str(), arguments()))
                    .implies(Term::new(definition.predicate.as_str(), arguments()).into()),
            );
            if !existing.contains(&&sentence) && !result.contains(&sentence) {
                result.push(sentence);
            }
        }
    }
    Ok(result)
}

/// Returns a copy of `theory` with an extra group, named [`INFERRED_GROUP`], holding the
/// sentences of [`sentences_from_predicate_hierarchy`].
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{PredicateDefinition, Theory};
/// use typedlogic_fol::transform::implies_from_parents;
///
/// let theory = Theory {
///     predicate_definitions: vec![
///         PredicateDefinition::new("Person", vec![("name", "str")]).with_parents(vec!["Thing"]),
///         PredicateDefinition::new("Thing", vec![("name", "str")]),
///     ],
///     ..Default::default()
/// };
///
/// let inferred = implies_from_parents(&theory).unwrap();
/// assert_eq!(
///     "[Forall([?name: str], Implies(Thing(?name), Person(?name)))]",
///     format!("{:?}", inferred.sentence_groups[0].sentences),
/// );
/// ```
pub fn implies_from_parents(theory: &Theory) -> Result<Theory, Error> {
    let sentences = sentences_from_predicate_hierarchy(theory)?;
    let mut result = theory.clone();
    result
        .sentence_groups
        .push(SentenceGroup::new(INFERRED_GROUP, sentences));
    Ok(result)
}

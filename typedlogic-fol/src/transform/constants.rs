/*! Implements passes over the terms of sentences and theories. */

use super::rewrite;
use crate::syntax::{Bindings, Error, Sentence, Term, Theory, Value};
use indexmap::IndexMap;

/// Replaces every variable whose name is a key of `constants` with the corresponding value,
/// at every depth of `sentence`, including inside function terms.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{Sentence, Term, Value, Variable};
/// use typedlogic_fol::transform::replace_constants;
/// use indexmap::IndexMap;
///
/// let a: Sentence = Term::new("A", vec![Variable::new("X").into()]).into();
/// let b: Sentence = Term::new("B", vec![Variable::new("Y").into()]).into();
///
/// let mut constants = IndexMap::new();
/// constants.insert("X".to_string(), Value::from("foo"));
/// assert_eq!(
///     r#"And(A("foo"), B(?Y))"#,
///     format!("{:?}", replace_constants(&a.and(b), &constants)),
/// );
/// ```
pub fn replace_constants(sentence: &Sentence, constants: &IndexMap<String, Value>) -> Sentence {
    if constants.is_empty() {
        return sentence.canonical().into_owned();
    }
    rewrite(sentence, &|s: &Sentence| match s {
        Sentence::Term(this) => Some(replace_in_term(this, constants).into()),
        _ => None,
    })
}

fn replace_in_term(term: &Term, constants: &IndexMap<String, Value>) -> Term {
    term.map_values(|value| match value {
        Value::Var(v) => constants
            .get(v.name())
            .cloned()
            .unwrap_or_else(|| value.clone()),
        Value::Term(t) => replace_in_term(t, constants).into(),
        _ => value.clone(),
    })
}

/// Returns a copy of `theory` where every keyword term, in sentences and ground terms, is
/// made positional. Keyword bindings are first reindexed to the argument order of the
/// predicate's definition; arguments missing from the bindings become [`Value::Null`].
/// A term without bindings is treated as a keyword term that binds nothing, so every
/// argument of its definition becomes [`Value::Null`]. Terms of undefined predicates keep
/// the order of their bindings.
///
/// It fails when a keyword term binds an argument that its definition does not declare.
pub fn ensure_terms_positional(theory: &Theory) -> Result<Theory, Error> {
    let mut result = theory.clone();
    let definitions = theory.predicate_definition_map();
    let positional = |term: &Term| -> Result<Term, Error> {
        let bindings = match term.bindings() {
            Bindings::Keyword(map) => map.clone(),
            Bindings::Unbound => IndexMap::new(),
            Bindings::Positional(_) => return Ok(term.clone()),
        };
        match definitions.get(term.predicate()) {
            Some(definition) => Ok(Term::with_definition(definition, bindings)?.make_positional()),
            None => Ok(term.make_positional()),
        }
    };

    for group in result.sentence_groups.iter_mut() {
        let mut sentences = Vec::with_capacity(group.sentences.len());
        for sentence in &group.sentences {
            sentences.push(positional_sentence(sentence, &positional)?);
        }
        group.sentences = sentences;
    }
    result.ground_terms = theory
        .ground_terms
        .iter()
        .map(|t| positional(t))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(result)
}

fn positional_sentence<F>(sentence: &Sentence, positional: &F) -> Result<Sentence, Error>
where
    F: Fn(&Term) -> Result<Term, Error>,
{
    match sentence {
        Sentence::Term(this) => Ok(positional(this)?.into()),
        Sentence::Extension(this) => positional_sentence(&this.to_model_object(), positional),
        _ => {
            // the first failure is kept and reported once the tree is rebuilt
            let mut failure = None;
            let rebuilt = sentence.map_children(|s| match positional_sentence(s, positional) {
                Ok(s) => s,
                Err(e) => {
                    failure.get_or_insert(e);
                    s.clone()
                }
            });
            match failure {
                Some(e) => Err(e),
                None => Ok(rebuilt),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assert_debug_string, assert_debug_strings,
        syntax::{PredicateDefinition, Variable},
        term, v,
    };

    fn keyword(predicate: &str, bindings: Vec<(&str, Value)>) -> Term {
        Term::keyword(
            predicate,
            bindings
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_replace_constants() {
        let mut constants = IndexMap::new();
        constants.insert("x".to_string(), Value::from("foo"));
        constants.insert("y".to_string(), Value::from(5));
        {
            let sentence = Sentence::forall(
                vec![v!(z)],
                Sentence::from(term!(P(x, z))).implies(term!(Q(y)).into()),
            );
            assert_debug_string!(
                r#"Forall([?z], Implies(P("foo", ?z), Q(5)))"#,
                replace_constants(&sentence, &constants)
            );
        }
        {
            let f = Term::new("f", vec![Variable::new("y").into()]);
            let sentence: Sentence = Term::new("P", vec![f.into()]).into();
            assert_debug_string!("P(f(5))", replace_constants(&sentence, &constants));
        }
        assert_debug_string!("P(?x)", replace_constants(&term!(P(x)).into(), &IndexMap::new()));
    }

    #[test]
    fn test_ensure_terms_positional() {
        let mut theory = Theory {
            predicate_definitions: vec![PredicateDefinition::new(
                "P",
                vec![("x", "str"), ("y", "str")],
            )],
            ..Default::default()
        };
        theory.add(term!(P(x, y)).into());
        theory.add(keyword("P", vec![("x", v!(x).into()), ("y", v!(y).into())]).into());
        theory.add(keyword("P", vec![("y", v!(y).into()), ("x", v!(x).into())]).into());
        theory.add(Sentence::not(keyword("P", vec![("y", v!(y).into())]).into()));
        theory.add(keyword("Q", vec![("b", 1.into()), ("a", 2.into())]).into());
        theory.ground_terms.push(keyword("P", vec![("y", "b".into())]));

        let positional = ensure_terms_positional(&theory).unwrap();
        assert_debug_strings!(
            "P(?x, ?y)\nP(?x, ?y)\nP(?x, ?y)\nNot(P(null, ?y))\nQ(1, 2)",
            positional.sentences()
        );
        assert!(positional
            .sentences()
            .iter()
            .flat_map(|s| s.terms())
            .all(|t| !t.is_keyword()));
        assert_debug_strings!(r#"P(null, "b")"#, positional.ground_terms);
    }

    #[test]
    fn ensure_terms_positional_fills_unbound_terms() {
        let (x, y) = (v!(x), v!(y));
        let mut theory = Theory {
            predicate_definitions: vec![
                PredicateDefinition::new("P", vec![("x", "str"), ("y", "str")]),
                PredicateDefinition::new("Flag", Vec::<(&str, &str)>::new()),
            ],
            ..Default::default()
        };
        theory.add(term!(P(x, y)).into());
        theory.add(keyword("P", vec![("x", x.clone().into()), ("y", y.clone().into())]).into());
        theory.add(keyword("P", vec![("y", y.clone().into()), ("x", x.into())]).into());
        theory.add(keyword("P", vec![("y", y.into())]).into());
        theory.add(Term::keyword("P", IndexMap::new()).into());
        theory.add(term!(Flag).into());
        theory.add(term!(Undefined).into());

        let positional = ensure_terms_positional(&theory).unwrap();
        assert_debug_strings!(
            "P(?x, ?y)\n\
             P(?x, ?y)\n\
             P(?x, ?y)\n\
             P(null, ?y)\n\
             P(null, null)\n\
             Flag\n\
             Undefined",
            positional.sentences()
        );
    }

    #[test]
    fn ensure_terms_positional_rejects_undeclared_arguments() {
        let mut theory = Theory {
            predicate_definitions: vec![PredicateDefinition::new("P", vec![("x", "str")])],
            ..Default::default()
        };
        theory.add(Sentence::not(keyword("P", vec![("z", 1.into())]).into()));
        assert!(ensure_terms_positional(&theory).is_err());
    }
}

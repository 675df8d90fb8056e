use typedlogic_fol::{
    syntax::{PredicateDefinition, Sentence, SentenceGroup, Term, Theory, Value, Variable},
    term, v,
};

pub fn atom(predicate: &str) -> Sentence {
    Term::proposition(predicate).into()
}

pub fn fact(predicate: &str, values: Vec<Value>) -> Sentence {
    Term::new(predicate, values).into()
}

pub fn x() -> Variable {
    v!(x)
}

/// Returns a small theory of pets and their preferences.
pub fn animals() -> Theory {
    let thing = |name: &str| Variable::typed(name, "Thing");
    let pets = |sentence: Sentence| Sentence::forall(vec![thing("x"), thing("species")], sentence);

    let mut theory = Theory::named("animals");
    theory.type_definitions.insert("Thing".into(), "str".into());
    theory.predicate_definitions = vec![
        PredicateDefinition::new("Likes", vec![("subject", "str"), ("object", "str")]),
        PredicateDefinition::new("Person", vec![("name", "str")]),
        PredicateDefinition::new("Animal", vec![("name", "str"), ("species", "str")]),
    ];
    theory.sentence_groups = vec![
        SentenceGroup::new(
            "persons",
            vec![
                fact("Person", vec!["Fred".into()]),
                fact("Person", vec!["Jie".into()]),
            ],
        ),
        SentenceGroup::new(
            "animals",
            vec![
                fact("Animal", vec!["corky".into(), "cat".into()]),
                fact("Animal", vec!["fido".into(), "dog".into()]),
            ],
        ),
        SentenceGroup::new(
            "animal_preferences",
            vec![
                pets(
                    Sentence::from(term!(Animal(x, species)))
                        .implies(term!(Likes(x, "Fred")).into()),
                ),
                pets(
                    Sentence::from(term!(Animal(x, "cat")))
                        .implies(term!(Likes(x, "Jie")).into()),
                ),
                pets(
                    Sentence::from(term!(Animal(x, "dog")))
                        .implies(Sentence::not(term!(Likes("Fred", x)).into())),
                ),
            ],
        ),
    ];
    theory
}

/*! Defines theories: predicate definitions, typed declarations and groups of sentences. */

use super::{Error, Sentence, Term, TermBag};
use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Is the name of the group that [`Theory::add`] appends sentences to.
pub const SENTENCES_GROUP: &str = "Sentences";

/// Declares a predicate together with the names and types of its arguments.
#[derive(Clone, PartialEq, Debug)]
pub struct PredicateDefinition {
    pub predicate: String,

    /// Maps argument names to type names, in argument order.
    pub arguments: IndexMap<String, String>,

    pub description: Option<String>,

    pub metadata: Option<IndexMap<String, serde_json::Value>>,

    /// Names the predicates that subsume this one; every fact of this predicate is also
    /// a fact of each parent.
    pub parents: Option<Vec<String>>,
}

impl PredicateDefinition {
    pub fn new<S, A, T>(predicate: S, arguments: Vec<(A, T)>) -> Self
    where
        S: Into<String>,
        A: Into<String>,
        T: Into<String>,
    {
        Self {
            predicate: predicate.into(),
            arguments: arguments
                .into_iter()
                .map(|(a, t)| (a.into(), t.into()))
                .collect(),
            description: None,
            metadata: None,
            parents: None,
        }
    }

    pub fn with_parents<S: Into<String>>(self, parents: Vec<S>) -> Self {
        Self {
            parents: Some(parents.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    pub fn with_description<S: Into<String>>(self, description: S) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn with_metadata(self, metadata: IndexMap<String, serde_json::Value>) -> Self {
        Self {
            metadata: Some(metadata),
            ..self
        }
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

impl fmt::Display for PredicateDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let args: Vec<String> = self
            .arguments
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{}({})", self.predicate, args.join(", "))
    }
}

/// Is the role of the sentences in a [`SentenceGroup`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Axiom,
    Goal,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Axiom => "axiom",
            Self::Goal => "goal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "axiom" => Some(Self::Axiom),
            "goal" => Some(Self::Goal),
            _ => None,
        }
    }
}

/// Is a named, ordered collection of sentences.
#[derive(Clone, PartialEq, Debug)]
pub struct SentenceGroup {
    pub name: String,
    pub group_type: Option<GroupType>,
    pub docstring: Option<String>,
    pub sentences: Vec<Sentence>,
}

impl SentenceGroup {
    pub fn new<S: Into<String>>(name: S, sentences: Vec<Sentence>) -> Self {
        Self {
            name: name.into(),
            group_type: None,
            docstring: None,
            sentences,
        }
    }

    pub fn with_type(self, group_type: GroupType) -> Self {
        Self {
            group_type: Some(group_type),
            ..self
        }
    }

    pub fn with_docstring<S: Into<String>>(self, docstring: S) -> Self {
        Self {
            docstring: Some(docstring.into()),
            ..self
        }
    }

    /// Returns true if the receiver holds goals.
    pub fn is_goal(&self) -> bool {
        self.group_type == Some(GroupType::Goal)
    }
}

/// Defines a type, either as an alias of another type or as a union of types.
#[derive(Clone, PartialEq, Debug)]
pub enum TypeDefinition {
    Alias(String),
    Union(Vec<TypeDefinition>),
}

impl From<&str> for TypeDefinition {
    fn from(value: &str) -> Self {
        Self::Alias(value.to_string())
    }
}

impl<T: Into<TypeDefinition>> From<Vec<T>> for TypeDefinition {
    fn from(value: Vec<T>) -> Self {
        Self::Union(value.into_iter().map(Into::into).collect())
    }
}

/// Is a typed first-order theory.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Theory {
    pub name: Option<String>,
    pub constants: IndexMap<String, super::Value>,
    pub type_definitions: IndexMap<String, TypeDefinition>,
    pub predicate_definitions: Vec<PredicateDefinition>,
    pub sentence_groups: Vec<SentenceGroup>,
    pub ground_terms: Vec<Term>,
}

impl Theory {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Returns the sentences of all groups, in group order then sentence order.
    pub fn sentences(&self) -> Vec<&Sentence> {
        self.sentence_groups
            .iter()
            .flat_map(|g| g.sentences.iter())
            .collect()
    }

    /// Returns the sentences of goal groups.
    pub fn goals(&self) -> Vec<&Sentence> {
        self.sentence_groups
            .iter()
            .filter(|g| g.is_goal())
            .flat_map(|g| g.sentences.iter())
            .collect()
    }

    /// Adds `sentence` to the receiver's [`SENTENCES_GROUP`], creating the group if the last
    /// group has a different name. Extension sentences are added in canonical form.
    pub fn add(&mut self, sentence: Sentence) {
        let sentence = match sentence {
            Sentence::Extension(this) => this.to_model_object(),
            _ => sentence,
        };
        match self.sentence_groups.last_mut() {
            Some(group) if group.name == SENTENCES_GROUP => group.sentences.push(sentence),
            _ => self
                .sentence_groups
                .push(SentenceGroup::new(SENTENCES_GROUP, vec![sentence])),
        }
    }

    /// Adds every term of `bag` as a sentence.
    pub fn add_bag(&mut self, bag: &TermBag) {
        self.extend(bag.terms().into_iter().map(Sentence::from))
    }

    pub fn extend<I: IntoIterator<Item = Sentence>>(&mut self, sentences: I) {
        sentences.into_iter().for_each(|s| self.add(s))
    }

    /// Removes `sentence` from every group that contains it. In `strict` mode it fails
    /// unless exactly one group contained the sentence.
    pub fn remove(&mut self, sentence: &Sentence, strict: bool) -> Result<(), Error> {
        let sentence = sentence.canonical();
        let mut removed = 0;
        for group in self.sentence_groups.iter_mut() {
            if let Some(index) = group.sentences.iter().position(|s| s == sentence.as_ref()) {
                group.sentences.remove(index);
                removed += 1;
            }
        }

        if strict && removed != 1 {
            Err(Error::MissingSentence { removed })
        } else {
            Ok(())
        }
    }

    /// Expands the type named `name` into the base types it stands for. Names without a
    /// definition are base types.
    ///
    /// **Example**:
    /// ```rust
    /// use typedlogic_fol::syntax::{Theory, TypeDefinition};
    ///
    /// let mut theory = Theory::default();
    /// theory.type_definitions.insert("Id".into(), "str".into());
    /// theory.type_definitions.insert("Key".into(), vec!["Id", "int"].into());
    ///
    /// assert_eq!(vec!["str", "int"], theory.unroll_type("Key").unwrap());
    /// assert_eq!(vec!["float"], theory.unroll_type("float").unwrap());
    /// ```
    pub fn unroll_type(&self, name: &str) -> Result<Vec<String>, Error> {
        let mut visiting = Vec::new();
        self.unroll(&TypeDefinition::Alias(name.to_string()), &mut visiting)
    }

    fn unroll(
        &self,
        typ: &TypeDefinition,
        visiting: &mut Vec<String>,
    ) -> Result<Vec<String>, Error> {
        match typ {
            TypeDefinition::Alias(name) => match self.type_definitions.get(name) {
                Some(definition) => {
                    if visiting.contains(name) {
                        return Err(Error::CyclicType { name: name.clone() });
                    }
                    visiting.push(name.clone());
                    let result = self.unroll(definition, visiting);
                    visiting.pop();
                    result
                }
                None => Ok(vec![name.clone()]),
            },
            TypeDefinition::Union(types) => {
                let mut result = Vec::new();
                for t in types {
                    result.extend(self.unroll(t, visiting)?);
                }
                Ok(result)
            }
        }
    }

    pub fn predicate_definition(&self, predicate: &str) -> Option<&PredicateDefinition> {
        self.predicate_definitions
            .iter()
            .find(|pd| pd.predicate == predicate)
    }

    /// Returns the predicate definitions of the receiver, keyed by predicate.
    pub fn predicate_definition_map(&self) -> IndexMap<&str, &PredicateDefinition> {
        self.predicate_definitions
            .iter()
            .map(|pd| (pd.predicate.as_str(), pd))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_debug_strings, term};

    #[test]
    fn theory_sentences_and_goals() {
        let theory = Theory {
            sentence_groups: vec![
                SentenceGroup::new("axioms", vec![term!(P).into(), term!(Q).into()]),
                SentenceGroup::new("goals", vec![term!(R).into()]).with_type(GroupType::Goal),
                SentenceGroup::new("more", vec![term!(S).into()]).with_type(GroupType::Axiom),
            ],
            ..Default::default()
        };
        assert_debug_strings!("P\nQ\nR\nS", theory.sentences());
        assert_debug_strings!("R", theory.goals());
    }

    #[test]
    fn theory_add_and_remove() {
        {
            let mut theory = Theory::named("test");
            theory.add(term!(P).into());
            theory.extend(vec![term!(Q).into(), term!(P).into()]);
            assert_eq!(1, theory.sentence_groups.len());
            assert_eq!(SENTENCES_GROUP, theory.sentence_groups[0].name);
            assert_debug_strings!("P\nQ\nP", theory.sentences());

            theory.remove(&term!(P).into(), true).unwrap();
            assert_debug_strings!("Q\nP", theory.sentences());
            assert!(theory.remove(&term!(R).into(), true).is_err());
            assert!(theory.remove(&term!(R).into(), false).is_ok());
        }
        {
            let mut theory = Theory::default();
            theory.sentence_groups.push(SentenceGroup::new("facts", vec![]));
            theory.add(term!(P).into());
            assert_eq!(2, theory.sentence_groups.len());
            theory.add_bag(&TermBag::new("Q", vec![vec!["a".into(), "b".into()]]));
            assert_debug_strings!("P\nQ(\"a\")\nQ(\"b\")", theory.sentences());
        }
    }

    #[test]
    fn theory_unroll_type() {
        let mut theory = Theory::default();
        theory.type_definitions.insert("Id".into(), "str".into());
        theory
            .type_definitions
            .insert("Thing".into(), vec!["Id", "int"].into());
        theory.type_definitions.insert(
            "Any".into(),
            TypeDefinition::Union(vec!["Thing".into(), "float".into()]),
        );
        assert_eq!(vec!["str", "int", "float"], theory.unroll_type("Any").unwrap());

        theory.type_definitions.insert("A".into(), "B".into());
        theory.type_definitions.insert("B".into(), "A".into());
        assert!(theory.unroll_type("A").is_err());
    }

    #[test]
    fn predicate_definitions() {
        let theory = Theory {
            predicate_definitions: vec![
                PredicateDefinition::new("Person", vec![("name", "str")]),
                PredicateDefinition::new("Likes", vec![("subject", "str"), ("object", "str")])
                    .with_description("affinity"),
            ],
            ..Default::default()
        };
        let map = theory.predicate_definition_map();
        assert_eq!(vec!["Person", "Likes"], map.keys().cloned().collect::<Vec<_>>());
        assert_eq!(2, theory.predicate_definition("Likes").unwrap().arity());
        assert_eq!(
            "Likes(subject: str, object: str)",
            map["Likes"].to_string()
        );
        assert!(theory.predicate_definition("Animal").is_none());
    }
}

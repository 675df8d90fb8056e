//! Implements the compiler to YAML documents and its inverse, [`load_yaml`].
//!
//! Theories are dumped in their generic structural form (see [`AsObject`]), so that a dump
//! loads back into an equal theory.
use crate::{Compiler, Error, Profile, ProfileSet};
use typedlogic_fol::syntax::{AsObject, FromObject, Object, Sentence, Theory};

/// Loads a theory from a YAML document written by [`YamlCompiler`].
///
/// **Example**:
/// ```rust
/// use typedlogic_compile::{yaml::{load_yaml, YamlCompiler}, Compiler};
/// use typedlogic_fol::syntax::{Sentence, Term, Theory};
///
/// let mut theory = Theory::named("example");
/// theory.add(Sentence::from(Term::proposition("P")).implies(Term::proposition("Q").into()));
///
/// let text = YamlCompiler.compile(&theory).unwrap();
/// assert_eq!(theory, load_yaml(&text).unwrap());
/// ```
pub fn load_yaml(text: &str) -> Result<Theory, Error> {
    let object: Object = serde_yaml::from_str(text)?;
    Ok(Theory::from_object(&object)?)
}

/// Compiles theories to YAML.
#[derive(Clone, Copy, Default, Debug)]
pub struct YamlCompiler;

impl Compiler for YamlCompiler {
    fn compile(&self, theory: &Theory) -> Result<String, Error> {
        Ok(serde_yaml::to_string(&theory.as_object())?)
    }

    fn compile_sentence(&self, sentence: &Sentence) -> Result<String, Error> {
        Ok(serde_yaml::to_string(&sentence.as_object())?)
    }

    fn suffix(&self) -> &'static str {
        "yaml"
    }

    fn profile(&self) -> ProfileSet {
        ProfileSet::new(vec![Profile::Unrestricted, Profile::SortedLogic])
    }
}

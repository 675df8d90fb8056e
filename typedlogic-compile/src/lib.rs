//! Provides the interfaces and the implementations of compilers that render typed first-order
//! theories into the input languages of external solvers and into archival formats.
//!
//! ## Background
//! A [`Theory`] is a collection of predicate definitions, typed declarations and groups of
//! sentences. Solvers accept different fragments of first-order logic: Prolog and Datalog engines
//! run Horn rules, theorem provers accept arbitrary first-order sentences and archival formats
//! represent anything. A [`Compiler`] renders a theory in the syntax of one target, after
//! normalizing its sentences with the passes of [`typedlogic_fol::transform`] when the target
//! requires so.
//!
//! ## Profiles
//! The fragment of logic accepted by a target is described by its [`ProfileSet`]. A sentence
//! whose shape falls outside the fragment cannot be rendered; the renderer then fails with
//! [`Error::NotInProfile`], carrying a [`Violation`] that names the offending shape. This is the
//! only recoverable error: a non-strict compiler replaces the sentence with a comment and carries
//! on with the rest of the theory while a strict compiler returns the error.
//!
//! **Example**:
//! ```rust
//! use typedlogic_compile::{get_compiler, CompilerOptions, Syntax};
//! use typedlogic_fol::syntax::{Sentence, Term, Theory};
//!
//! let p: Sentence = Term::proposition("P").into();
//! let q: Sentence = Term::proposition("Q").into();
//! let r: Sentence = Term::proposition("R").into();
//!
//! let compiler = get_compiler(Syntax::Prolog, &CompilerOptions::default());
//! let rules = compiler.compile_sentence(&p.and(q).implies(r)).unwrap();
//! assert!(rules.ends_with("r :- p, q."));
//! ```
//!
//! [`Theory`]: typedlogic_fol::syntax::Theory
pub mod fol;
pub mod profile;
pub mod prolog;
pub mod prover9;
pub mod sexpr;
pub mod souffle;
pub mod tptp;
pub mod trace;
pub mod yaml;

#[cfg(test)]
mod test_prelude;

pub use profile::{Profile, ProfileSet};

use serde_derive::{Deserialize, Serialize};
use std::{fmt, io::Write, str::FromStr};
use thiserror::Error;
use typedlogic_fol::{
    stratify,
    syntax::{self, Sentence, Theory},
};

/// Names the reason why a sentence cannot be rendered by a compiler.
#[derive(Error, Clone, PartialEq, Debug)]
pub enum Violation {
    /// Is raised by rule languages for top level sentences other than implications and terms.
    #[error("top level sentence must be an implication or a term, found `{sentence}`")]
    TopLevel { sentence: String },

    #[error("disjunctions are not allowed in the head of `{rule}`")]
    DisjunctiveHead { rule: String },

    #[error("conjunctions are not allowed in the head of `{rule}`")]
    ConjunctiveHead { rule: String },

    #[error("the head of `{rule}` is not a term")]
    HeadNotTerm { rule: String },

    /// Is raised when a variable of the head of a rule does not occur in its body.
    #[error("variable `{variable}` in the head of `{rule}` is not bound by its body")]
    UnboundHeadVariable { variable: String, rule: String },

    #[error("nested function term `{term}` is not supported")]
    FunctionTerm { term: String },

    #[error("Skolem term `{term}` is not supported")]
    SkolemTerm { term: String },

    /// Is raised for sentence kinds that a target does not support at all.
    #[error("`{kind}` sentences are not supported by {syntax}")]
    UnsupportedSentence {
        kind: &'static str,
        syntax: &'static str,
    },
}

/// Is the type of errors arising from compiling theories.
#[derive(Error, Debug)]
pub enum Error {
    /// Is returned when a sentence falls outside the profile of the target.
    #[error("not in profile: {0}")]
    NotInProfile(Violation),

    /// Is returned when an infix operator is applied to other than one or two arguments.
    #[error("operator `{operator}` takes one or two arguments, found {arity}")]
    OperatorArity { operator: String, arity: usize },

    #[error("cannot render `{value}`: {reason}")]
    UnsupportedValue { value: String, reason: String },

    #[error(transparent)]
    Syntax(#[from] syntax::Error),

    #[error(transparent)]
    Stratify(#[from] stratify::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unknown syntax `{name}`")]
    UnknownSyntax { name: String },
}

impl Error {
    /// Returns true if the receiver is [`Error::NotInProfile`].
    pub fn is_not_in_profile(&self) -> bool {
        matches!(self, Self::NotInProfile(_))
    }
}

impl From<Violation> for Error {
    fn from(violation: Violation) -> Self {
        Self::NotInProfile(violation)
    }
}

/// Is the trait of compilers from theories to the text of a target syntax.
///
/// Compilers are deterministic: compiling the same theory twice produces identical text.
pub trait Compiler {
    /// Renders `theory` in the target syntax.
    fn compile(&self, theory: &Theory) -> Result<String, Error>;

    /// Renders a single sentence, as the only sentence of an otherwise empty theory.
    fn compile_sentence(&self, sentence: &Sentence) -> Result<String, Error> {
        let mut theory = Theory::default();
        theory.add(sentence.clone());
        self.compile(&theory)
    }

    /// Renders `theory` into `target`.
    fn compile_to_target(&self, theory: &Theory, target: &mut dyn Write) -> Result<(), Error> {
        let text = self.compile(theory)?;
        target.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Returns the conventional file suffix of the target syntax.
    fn suffix(&self) -> &'static str;

    /// Returns the fragment of logic that the target accepts.
    fn profile(&self) -> ProfileSet;
}

/// Enumerates the supported target syntaxes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    Prolog,
    Souffle,
    Tptp,
    Prover9,
    Fol,
    SExpr,
    Yaml,
}

impl Syntax {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prolog => "prolog",
            Self::Souffle => "souffle",
            Self::Tptp => "tptp",
            Self::Prover9 => "prover9",
            Self::Fol => "fol",
            Self::SExpr => "sexpr",
            Self::Yaml => "yaml",
        }
    }

    pub fn all() -> &'static [Syntax] {
        &[
            Self::Prolog,
            Self::Souffle,
            Self::Tptp,
            Self::Prover9,
            Self::Fol,
            Self::SExpr,
            Self::Yaml,
        ]
    }
}

impl FromStr for Syntax {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|syntax| syntax.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::UnknownSyntax {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configures the compilers returned by [`get_compiler`].
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Fails on the first sentence outside the profile of the target instead of replacing it
    /// with a comment.
    pub strict: bool,

    /// Overrides the default configuration of the Prolog compiler.
    pub prolog: Option<prolog::PrologConfig>,
}

/// Returns a compiler for `syntax`, configured by `options`.
pub fn get_compiler(syntax: Syntax, options: &CompilerOptions) -> Box<dyn Compiler> {
    match syntax {
        Syntax::Prolog => Box::new(prolog::PrologCompiler {
            config: options.prolog.clone().unwrap_or_default(),
            strict: options.strict,
        }),
        Syntax::Souffle => Box::new(souffle::SouffleCompiler {
            strict: options.strict,
            ..souffle::SouffleCompiler::new()
        }),
        Syntax::Tptp => Box::new(tptp::TptpCompiler {
            strict: options.strict,
        }),
        Syntax::Prover9 => Box::new(prover9::Prover9Compiler {
            strict: options.strict,
            goals: Vec::new(),
        }),
        Syntax::Fol => Box::new(fol::FolCompiler),
        Syntax::SExpr => Box::new(sexpr::SExprCompiler),
        Syntax::Yaml => Box::new(yaml::YamlCompiler),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn test_syntax_from_str() {
        assert_eq!(Syntax::Prolog, "prolog".parse::<Syntax>().unwrap());
        assert_eq!(Syntax::SExpr, "SEXPR".parse::<Syntax>().unwrap());
        assert!("owl".parse::<Syntax>().is_err());
        for syntax in Syntax::all() {
            assert_eq!(*syntax, syntax.to_string().parse::<Syntax>().unwrap());
        }
    }

    #[test]
    fn test_compiler_options_from_json() {
        let options: CompilerOptions =
            serde_json::from_str(r#"{"strict": true, "prolog": {"negation_symbol": "not"}}"#)
                .unwrap();
        assert!(options.strict);
        assert_eq!("not", options.prolog.unwrap().negation_symbol);
        assert_eq!(CompilerOptions::default(), serde_json::from_str("{}").unwrap());
    }

    #[test]
    fn get_compiler_passes_strict_to_souffle() {
        let mut theory = animals();
        theory.add(atom("Person").implies(fact("Likes", vec![x().into()])));
        let options = CompilerOptions {
            strict: true,
            ..Default::default()
        };
        assert!(get_compiler(Syntax::Souffle, &CompilerOptions::default())
            .compile(&theory)
            .is_ok());
        assert!(get_compiler(Syntax::Souffle, &options)
            .compile(&theory)
            .unwrap_err()
            .is_not_in_profile());
    }

    #[test]
    fn test_suffixes() {
        let suffixes: Vec<_> = Syntax::all()
            .iter()
            .map(|s| get_compiler(*s, &CompilerOptions::default()).suffix())
            .collect();
        assert_eq!(
            vec!["pro", "dl", "tptp", "prover9", "fol", "sexpr", "yaml"],
            suffixes
        );
    }

    #[test]
    fn compilers_are_deterministic() {
        let theory = animals();
        for syntax in Syntax::all() {
            let compiler = get_compiler(*syntax, &CompilerOptions::default());
            assert_eq!(
                compiler.compile(&theory).unwrap(),
                compiler.compile(&theory).unwrap(),
                "{} is not deterministic",
                syntax
            );
        }
    }

    #[test]
    fn test_compile_to_target() {
        let compiler = get_compiler(Syntax::Fol, &CompilerOptions::default());
        let mut buffer = Vec::new();
        compiler.compile_to_target(&animals(), &mut buffer).unwrap();
        assert_eq!(
            compiler.compile(&animals()).unwrap(),
            String::from_utf8(buffer).unwrap()
        );
    }

    #[test]
    fn test_is_not_in_profile() {
        let error: Error = Violation::HeadNotTerm { rule: "p".into() }.into();
        assert!(error.is_not_in_profile());
        assert!(!Error::UnknownSyntax { name: "x".into() }.is_not_in_profile());
    }
}

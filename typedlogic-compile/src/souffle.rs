//! Implements the compiler to the Soufflé dialect of Datalog.
//!
//! A Soufflé program declares its types and relations before its rules. The rules are the
//! Horn rules of the sentences of a theory, after its constants are substituted, weakened
//! until negation is stratified. Rules outside the Datalog profile are left out, unless the
//! compiler is strict.
use crate::{
    prolog::{as_prolog, capitalize, PrologConfig},
    trace, Compiler, Error, Profile, ProfileSet,
};
use itertools::Itertools;
use tracing::{info, span, Level};
use typedlogic_fol::{
    stratify::force_stratification,
    syntax::{self, Sentence, Theory, TypeDefinition},
    transform::{replace_constants, to_horn_rules, HornOptions},
};

fn base_type(name: &str) -> &'static str {
    match name {
        "int" | "float" => "number",
        _ => "symbol",
    }
}

fn type_declaration(name: &str, definition: &TypeDefinition) -> String {
    let base = match definition {
        TypeDefinition::Alias(alias) => base_type(alias).to_string(),
        TypeDefinition::Union(members) => members
            .iter()
            .filter_map(|member| match member {
                TypeDefinition::Alias(alias) => Some(base_type(alias)),
                TypeDefinition::Union(_) => None,
            })
            .join(" | "),
    };
    format!(".type {} = {}", capitalize(name), base)
}

/// Compiles theories to Soufflé programs.
#[derive(Clone, Debug)]
pub struct SouffleCompiler {
    pub config: PrologConfig,

    /// Fails on rules outside the Datalog profile instead of leaving them out.
    pub strict: bool,
}

impl SouffleCompiler {
    pub fn new() -> Self {
        Self {
            config: PrologConfig::souffle(),
            strict: false,
        }
    }

    fn declarations(&self, theory: &Theory) -> Result<Vec<String>, Error> {
        let mut lines = theory
            .type_definitions
            .iter()
            .map(|(name, definition)| type_declaration(name, definition))
            .collect_vec();

        if theory.predicate_definitions.is_empty() {
            return Err(syntax::Error::MissingPredicateDefinitions.into());
        }
        for definition in &theory.predicate_definitions {
            let arguments = definition
                .arguments
                .iter()
                .map(|(argument, typ)| {
                    let typ = if theory.type_definitions.contains_key(typ) {
                        capitalize(typ)
                    } else {
                        base_type(typ).to_string()
                    };
                    format!("{}: {}", argument.to_lowercase(), typ)
                })
                .join(", ");
            lines.push(format!(".decl {}({})", definition.predicate, arguments));
        }
        Ok(lines)
    }
}

impl Default for SouffleCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler for SouffleCompiler {
    fn compile(&self, theory: &Theory) -> Result<String, Error> {
        let compile_span = span!(Level::INFO, trace::COMPILE, syntax = "souffle");
        let _enter = compile_span.enter();

        let mut lines = self.declarations(theory)?;

        let ground_terms = theory.ground_terms.iter().cloned().map(Sentence::from).collect_vec();
        let rules = theory
            .sentences()
            .into_iter()
            .chain(ground_terms.iter())
            .flat_map(|s| {
                to_horn_rules(&replace_constants(s, &theory.constants), &HornOptions::default())
            })
            .collect_vec();
        let rules = force_stratification(&rules)?;

        for rule in &rules {
            match as_prolog(rule, &self.config) {
                Ok(text) => lines.push(text),
                Err(e) if e.is_not_in_profile() && !self.strict => continue,
                Err(e) => return Err(e),
            }
        }

        info!(event = trace::COMPILED, sentences = rules.len());
        Ok(lines.join("\n"))
    }

    fn suffix(&self) -> &'static str {
        "dl"
    }

    fn profile(&self) -> ProfileSet {
        ProfileSet::new(vec![
            Profile::ClassicDatalog,
            Profile::SortedLogic,
            Profile::AllowsComparisonTerms,
            Profile::SingleModelSemantics,
        ])
    }
}

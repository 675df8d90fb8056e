//! Implements the Prolog compiler and the rule renderer shared by the Datalog dialects.
//!
//! Prolog programs are sets of Horn rules `head :- body.`: every sentence is first converted to
//! Horn rules with [`to_horn_rules`] and each rule is then rendered according to a
//! [`PrologConfig`]. Rules must be range restricted, that is, every variable of the head must
//! occur in a term of the body.
use crate::{trace, Compiler, Error, Profile, ProfileSet, Violation};
use indexmap::IndexMap;
use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};
use tracing::{info, span, Level};
use typedlogic_fol::{
    syntax::{Implies, Sentence, Term, Theory, Value, Variable},
    transform::{to_horn_rules, HornOptions, SKOLEM_PREFIX},
};

/// Is the case that variable names are rendered in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableCase {
    /// Upper cases the first letter and lower cases the rest, as Prolog variables require.
    Capitalize,
    Lower,
    AsIs,
}

/// Is the case that predicate names are rendered in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateCase {
    Lower,
    Capitalize,
    Preserve,
}

/// Configures the rendering of rules.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PrologConfig {
    pub variable_case: VariableCase,

    pub predicate_case: PredicateCase,

    /// Allows disjunctions in the head of rules, rendered as `a; b :- body.`
    pub disjunctive_datalog: bool,

    /// Maps predicate names to infix operators, on top of the built-in operators.
    pub operator_map: IndexMap<String, String>,

    pub negation_symbol: String,

    pub negation_as_failure_symbol: String,

    /// Renders strings as JSON strings instead of single-quoted atoms.
    pub double_quote_strings: bool,

    /// Renders zero-argument terms as `p()` instead of `p`.
    pub include_parens_for_zero_args: bool,

    pub allow_function_terms: bool,

    /// Wraps disjunctions and negated sentences in parentheses.
    pub allow_nesting: bool,

    /// Is rendered in place of a null value in a fact; nested nulls are anonymous variables.
    pub null_term: String,

    pub allow_skolem_terms: bool,
}

impl Default for PrologConfig {
    fn default() -> Self {
        Self {
            variable_case: VariableCase::Capitalize,
            predicate_case: PredicateCase::Lower,
            disjunctive_datalog: false,
            operator_map: IndexMap::new(),
            negation_symbol: r"\+".into(),
            negation_as_failure_symbol: r"\+".into(),
            double_quote_strings: false,
            include_parens_for_zero_args: false,
            allow_function_terms: true,
            allow_nesting: true,
            null_term: "null(_)".into(),
            allow_skolem_terms: false,
        }
    }
}

impl PrologConfig {
    /// Returns the configuration of the Soufflé dialect of Datalog.
    pub fn souffle() -> Self {
        let mut operator_map = IndexMap::new();
        operator_map.insert("eq".to_string(), "=".to_string());
        Self {
            variable_case: VariableCase::Lower,
            predicate_case: PredicateCase::Preserve,
            operator_map,
            negation_symbol: "!".into(),
            negation_as_failure_symbol: "!".into(),
            double_quote_strings: true,
            include_parens_for_zero_args: true,
            ..Default::default()
        }
    }

    /// Returns the configuration used for rendering terms in documentation.
    pub fn fol() -> Self {
        Self {
            variable_case: VariableCase::AsIs,
            predicate_case: PredicateCase::Preserve,
            null_term: "null".into(),
            allow_skolem_terms: true,
            ..Default::default()
        }
    }

    fn operator(&self, predicate: &str) -> Option<&str> {
        self.operator_map
            .get(predicate)
            .map(String::as_str)
            .or_else(|| builtin_operator(predicate))
    }

    fn horn_options(&self) -> HornOptions {
        HornOptions {
            allow_disjunctions_in_head: self.disjunctive_datalog,
            allow_goal_clauses: None,
        }
    }
}

/// Returns the infix operator that the built-in predicate `name` stands for.
pub fn builtin_operator(name: &str) -> Option<&'static str> {
    let operator = match name {
        "add" => "+",
        "sub" => "-",
        "mul" => "*",
        "truediv" => "/",
        "floordiv" => "//",
        "mod" => "%",
        "pow" => "**",
        "lshift" => "<<",
        "rshift" => ">>",
        "or" => "|",
        "xor" => "^",
        "and" => "&",
        "matmul" => "@",
        "eq" => "==",
        "ne" => "!=",
        "lt" => "<",
        "le" => "<=",
        "gt" => ">",
        "ge" => ">=",
        "is" => "is",
        "is_not" => "is not",
        "in" => "in",
        "not_in" => "not in",
        _ => return None,
    };
    Some(operator)
}

/// Upper cases the first character of `name` and lower cases the rest.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Renders `value` as a single-quoted Prolog atom.
pub(crate) fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', r"\\").replace('\'', r"\'"))
}

struct Renderer<'c> {
    config: &'c PrologConfig,
}

impl<'c> Renderer<'c> {
    fn paren(&self, s: String) -> String {
        if self.config.allow_nesting {
            format!("({})", s)
        } else {
            s
        }
    }

    fn sentence(&self, sentence: &Sentence, depth: usize) -> Result<String, Error> {
        let canonical = sentence.canonical();
        let mut sentence = canonical.as_ref();
        if let Sentence::Forall(this) = sentence {
            sentence = this.sentence();
        }
        if depth == 0 && !matches!(sentence, Sentence::Implies(_) | Sentence::Term(_)) {
            return Err(Violation::TopLevel {
                sentence: sentence.to_string(),
            }
            .into());
        }

        match sentence {
            Sentence::Exists(this) => self.sentence(this.sentence(), depth),
            Sentence::And(this) if this.operands().is_empty() => Ok("true".into()),
            Sentence::And(this) => Ok(this
                .operands()
                .iter()
                .map(|s| self.sentence(s, depth + 1))
                .collect::<Result<Vec<_>, _>>()?
                .join(", ")),
            Sentence::Or(this) if this.operands().is_empty() => Ok("fail".into()),
            Sentence::Or(this) => {
                let operands = this
                    .operands()
                    .iter()
                    .map(|s| self.sentence(s, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.paren(operands.join("; ")))
            }
            Sentence::Not(this) => Ok(format!(
                "{} {}",
                self.config.negation_symbol,
                self.paren(self.sentence(this.negated(), depth + 1)?)
            )),
            Sentence::NegationAsFailure(this) => Ok(format!(
                "{} {}",
                self.config.negation_as_failure_symbol,
                self.paren(self.sentence(this.negated(), depth + 1)?)
            )),
            Sentence::Term(this) => self.term(this, depth),
            Sentence::Implies(this) => self.rule(this, depth),
            Sentence::Extension(this) => self.sentence(&this.to_model_object(), depth),
            _ => Err(Violation::UnsupportedSentence {
                kind: sentence.kind(),
                syntax: "prolog",
            }
            .into()),
        }
    }

    fn variable(&self, variable: &Variable) -> String {
        match self.config.variable_case {
            VariableCase::Capitalize => capitalize(variable.name()),
            VariableCase::Lower => variable.name().to_lowercase(),
            VariableCase::AsIs => variable.name().to_string(),
        }
    }

    fn value(&self, value: &Value, depth: usize) -> Result<String, Error> {
        let text = match value {
            Value::Null if depth > 0 => "_".to_string(),
            Value::Null => self.config.null_term.clone(),
            Value::Var(v) => self.variable(v),
            Value::Term(t) => {
                if !self.config.allow_function_terms {
                    return Err(Violation::FunctionTerm { term: t.to_string() }.into());
                }
                self.term(t, depth + 1)?
            }
            Value::Str(s) if self.config.double_quote_strings => {
                serde_json::Value::from(s.as_str()).to_string()
            }
            Value::Str(s) => quote(s),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format!("{:?}", f),
            Value::Bool(b) => b.to_string(),
        };
        Ok(text)
    }

    fn term(&self, term: &Term, depth: usize) -> Result<String, Error> {
        let values = term.values();
        if !self.config.allow_skolem_terms {
            if let Some(skolem) = values
                .iter()
                .filter_map(|v| v.as_term())
                .find(|t| t.predicate().starts_with(SKOLEM_PREFIX))
            {
                return Err(Violation::SkolemTerm {
                    term: skolem.to_string(),
                }
                .into());
            }
        }

        if let Some(operator) = self.config.operator(term.predicate()) {
            return match values.as_slice() {
                [left, right] => Ok(format!(
                    "{} {} {}",
                    self.value(left, depth)?,
                    operator,
                    self.value(right, depth)?
                )),
                [operand] => Ok(format!("{} {}", operator, self.value(operand, depth)?)),
                _ => Err(Error::OperatorArity {
                    operator: operator.to_string(),
                    arity: values.len(),
                }),
            };
        }

        let predicate = match self.config.predicate_case {
            PredicateCase::Lower => term.predicate().to_lowercase(),
            PredicateCase::Capitalize => capitalize(term.predicate()),
            PredicateCase::Preserve => term.predicate().to_string(),
        };
        if values.is_empty() && !self.config.include_parens_for_zero_args {
            return Ok(predicate);
        }
        let arguments = values
            .iter()
            .map(|v| self.value(v, depth))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}({})", predicate, arguments.join(", ")))
    }

    fn rule(&self, rule: &Implies, depth: usize) -> Result<String, Error> {
        let text = || Sentence::from(rule.clone()).to_string();
        match rule.consequent() {
            Sentence::Or(this) if this.operands().len() > 1 && !self.config.disjunctive_datalog => {
                return Err(Violation::DisjunctiveHead { rule: text() }.into())
            }
            Sentence::And(_) => return Err(Violation::ConjunctiveHead { rule: text() }.into()),
            _ => {}
        }

        let body = conjuncts(rule.antecedent())
            .into_iter()
            .map(|s| match s {
                Sentence::Exists(this) => this.sentence(),
                _ => s,
            })
            .filter_map(Sentence::as_term)
            .flat_map(Term::variable_names)
            .collect_vec();
        for head in disjuncts(rule.consequent()) {
            let head = match head {
                Sentence::Not(_) => continue,
                Sentence::Term(t) => t,
                _ => return Err(Violation::HeadNotTerm { rule: text() }.into()),
            };
            if let Some(variable) = head.variable_names().into_iter().find(|v| !body.contains(v)) {
                return Err(Violation::UnboundHeadVariable {
                    variable: variable.to_string(),
                    rule: text(),
                }
                .into());
            }
        }

        let mut head = self.sentence(rule.consequent(), depth + 1)?;
        let body = self.sentence(rule.antecedent(), depth + 1)?;
        if head.starts_with('(') && head.ends_with(')') {
            head = head[1..head.len() - 1].to_string();
        }
        if body == "true" {
            Ok(format!("{}.", head))
        } else if head == "fail" {
            Ok(format!(":- {}.", body))
        } else {
            Ok(format!("{} :- {}.", head, body))
        }
    }
}

fn conjuncts(sentence: &Sentence) -> Vec<&Sentence> {
    match sentence {
        Sentence::And(this) => this.operands().iter().collect(),
        _ => vec![sentence],
    }
}

fn disjuncts(sentence: &Sentence) -> Vec<&Sentence> {
    match sentence {
        Sentence::Or(this) => this.operands().iter().collect(),
        _ => vec![sentence],
    }
}

/// Renders a sentence that is already a rule or a term.
///
/// **Example**:
/// ```rust
/// use typedlogic_compile::prolog::{as_prolog, PrologConfig};
/// use typedlogic_fol::syntax::{Sentence, Term};
///
/// let c: Sentence = Term::proposition("C").into();
/// let d: Sentence = Term::proposition("D").into();
/// let e: Sentence = Term::proposition("E").into();
///
/// let config = PrologConfig::default();
/// let rule = c.clone().and(e.clone()).implies(d.clone());
/// assert_eq!("d :- c, e.", as_prolog(&rule, &config).unwrap());
/// assert_eq!("c :- (d; e).", as_prolog(&d.or(e).implies(c), &config).unwrap());
/// ```
pub fn as_prolog(sentence: &Sentence, config: &PrologConfig) -> Result<String, Error> {
    Renderer { config }.sentence(sentence, 0)
}

/// Renders a term as it appears in the body of a rule.
pub fn render_term(term: &Term, config: &PrologConfig) -> Result<String, Error> {
    Renderer { config }.term(term, 0)
}

/// Converts `sentence` to Horn rules and renders each of them.
pub fn translate(sentence: &Sentence, config: &PrologConfig) -> Result<Vec<String>, Error> {
    to_horn_rules(sentence, &config.horn_options())
        .iter()
        .map(|rule| as_prolog(rule, config))
        .collect()
}

/// Compiles theories to Prolog programs.
#[derive(Clone, Default, Debug)]
pub struct PrologCompiler {
    pub config: PrologConfig,

    /// Fails on untranslatable sentences instead of commenting them out.
    pub strict: bool,
}

impl PrologCompiler {
    fn translate_into(&self, sentence: &Sentence, lines: &mut Vec<String>) -> Result<(), Error> {
        match translate(sentence, &self.config) {
            Ok(rules) => {
                if !rules.is_empty() {
                    lines.push(rules.join("\n"));
                }
                Ok(())
            }
            Err(e) if e.is_not_in_profile() && !self.strict => {
                let fol = crate::fol::as_fol(sentence)?.replace('\n', " ");
                info!(event = trace::UNTRANSLATABLE, sentence = %fol, reason = %e);
                lines.push(format!("%% UNTRANSLATABLE: {}", fol));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

impl Compiler for PrologCompiler {
    fn compile(&self, theory: &Theory) -> Result<String, Error> {
        let compile_span = span!(Level::INFO, trace::COMPILE, syntax = "prolog");
        let _enter = compile_span.enter();

        let mut lines = vec!["%% Predicate Definitions".to_string()];
        lines.extend(theory.predicate_definitions.iter().map(|pd| format!("% {}", pd)));
        for group in &theory.sentence_groups {
            lines.push(format!("\n%% {}\n", group.name));
            for sentence in &group.sentences {
                self.translate_into(sentence, &mut lines)?;
            }
        }
        if !theory.ground_terms.is_empty() {
            lines.push("\n%% Ground Terms\n".into());
            for term in &theory.ground_terms {
                self.translate_into(&term.clone().into(), &mut lines)?;
            }
        }

        info!(event = trace::COMPILED, sentences = theory.sentences().len());
        Ok(lines.join("\n"))
    }

    fn suffix(&self) -> &'static str {
        "pro"
    }

    fn profile(&self) -> ProfileSet {
        if self.config.disjunctive_datalog {
            ProfileSet::new(vec![
                Profile::AnswerSetProgramming,
                Profile::AllowsComparisonTerms,
                Profile::MultipleModelSemantics,
            ])
        } else {
            ProfileSet::new(vec![
                Profile::ClassicPrologNegationAsFailure,
                Profile::AllowsComparisonTerms,
                Profile::SingleModelSemantics,
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use typedlogic_fol::{syntax::Variable, term, v};

    fn prolog(sentence: &Sentence) -> String {
        as_prolog(sentence, &PrologConfig::default()).unwrap()
    }

    fn violation(sentence: &Sentence, config: &PrologConfig) -> Violation {
        match as_prolog(sentence, config) {
            Err(Error::NotInProfile(violation)) => violation,
            other => panic!("expected a violation, found {:?}", other),
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!("X", capitalize("x"));
        assert_eq!("Species", capitalize("species"));
        assert_eq!("Xy", capitalize("xY"));
        assert_eq!("", capitalize(""));
    }

    #[test]
    fn test_as_prolog_terms() {
        let (x, y) = (Variable::typed("x", "str"), Variable::typed("y", "str"));
        let a: Sentence = Term::new("A", vec![x.clone().into(), y.into()]).into();
        assert_eq!("a(X, Y)", prolog(&a));
        assert_eq!("a(X, Y)", prolog(&Sentence::forall(vec![x.clone()], a)));
        assert_eq!("c", prolog(&atom("C")));
        assert_eq!(
            "b('foo', 5, 1.5, true)",
            prolog(&fact("B", vec!["foo".into(), 5.into(), 1.5.into(), true.into()]))
        );
        assert_eq!(r"b('it\'s')", prolog(&fact("B", vec!["it's".into()])));
        assert_eq!("b(null(_))", prolog(&fact("B", vec![Value::Null])));
        assert_eq!("X < 5", prolog(&Term::new("lt", vec![x.clone().into(), 5.into()]).into()));
        assert_eq!("X == 5", prolog(&Term::new("eq", vec![x.into(), 5.into()]).into()));
    }

    #[test]
    fn test_as_prolog_rules() {
        let (c, d, e) = (atom("C"), atom("D"), atom("E"));
        assert_eq!("d :- c.", prolog(&c.clone().implies(d.clone())));
        assert_eq!("d :- c, e.", prolog(&c.clone().and(e.clone()).implies(d.clone())));
        assert_eq!("c :- d, e.", prolog(&d.clone().and(e.clone()).implies(c.clone())));
        assert_eq!("c :- (d; e).", prolog(&d.clone().or(e.clone()).implies(c.clone())));
        assert_eq!("c.", prolog(&Sentence::top().implies(c.clone())));
        assert_eq!(":- c, d.", prolog(&c.clone().and(d.clone()).implies(Sentence::bottom())));
        assert_eq!(
            r"d :- c, \+ (e).",
            prolog(&c.clone().and(Sentence::not(e.clone())).implies(d.clone()))
        );
        assert_eq!(
            "d :- c, a(X).",
            prolog(
                &c.clone()
                    .and(Sentence::exists(vec![v!(x)], term!(A(x)).into()))
                    .implies(d.clone())
            )
        );
        assert_eq!(
            "q(X) :- p(X, Y).",
            prolog(&Sentence::forall(
                vec![v!(x), v!(y)],
                Sentence::from(term!(P(x, y))).implies(term!(Q(x)).into())
            ))
        );
    }

    #[test]
    fn test_as_prolog_config() {
        let mut config = PrologConfig {
            disjunctive_datalog: true,
            ..Default::default()
        };
        let (c, d, e) = (atom("C"), atom("D"), atom("E"));
        assert_eq!(
            "c; d :- e.",
            as_prolog(&Sentence::all(vec![e.clone()]).implies(c.clone().or(d.clone())), &config)
                .unwrap()
        );

        config.negation_symbol = "!".into();
        config.allow_nesting = false;
        config.variable_case = VariableCase::AsIs;
        config.predicate_case = PredicateCase::Preserve;
        assert_eq!(
            "D(x) :- C(x), ! E(x).",
            as_prolog(
                &Sentence::from(term!(C(x)))
                    .and(Sentence::not(term!(E(x)).into()))
                    .implies(term!(D(x)).into()),
                &config
            )
            .unwrap()
        );

        let souffle = PrologConfig::souffle();
        assert_eq!(
            r#"p("a", x) :- q(), x = 1."#,
            as_prolog(
                &atom("q")
                    .and(Term::new("eq", vec![x().into(), 1.into()]).into())
                    .implies(term!(p("a", x)).into()),
                &souffle
            )
            .unwrap()
        );

        let mut config = PrologConfig::default();
        config.operator_map.insert("member".into(), "in".into());
        assert_eq!(
            "X in Y",
            render_term(&term!(member(x, y)), &config).unwrap()
        );
        assert!(matches!(
            render_term(&term!(add(x, y, y)), &config),
            Err(Error::OperatorArity { arity: 3, .. })
        ));
    }

    #[test]
    fn test_as_prolog_violations() {
        let config = PrologConfig::default();
        let (c, d, e) = (atom("C"), atom("D"), atom("E"));
        assert!(matches!(
            violation(&c.clone().and(d.clone()), &config),
            Violation::TopLevel { .. }
        ));
        assert!(matches!(
            violation(&e.clone().implies(c.clone().or(d.clone())), &config),
            Violation::DisjunctiveHead { .. }
        ));
        assert!(matches!(
            violation(&e.clone().implies(c.clone().and(d.clone())), &config),
            Violation::ConjunctiveHead { .. }
        ));
        assert!(matches!(
            violation(&e.clone().implies(c.clone().implies(d)), &config),
            Violation::HeadNotTerm { .. }
        ));
        assert_eq!(
            Violation::UnboundHeadVariable {
                variable: "y".into(),
                rule: "P(?x) → Q(?x, ?y)".into(),
            },
            violation(&Sentence::from(term!(P(x))).implies(term!(Q(x, y)).into()), &config)
        );
        assert!(matches!(
            violation(&e.iff(c), &config),
            Violation::TopLevel { .. }
        ));

        let skolem = Term::new("sk__1", vec![x().into()]);
        let rule = Sentence::from(term!(P(x)))
            .implies(Term::new("Q", vec![x().into(), skolem.into()]).into());
        assert!(matches!(violation(&rule, &config), Violation::SkolemTerm { .. }));

        let f = Term::new("f", vec![x().into()]);
        let rule = Sentence::from(term!(P(x))).implies(Term::new("Q", vec![f.into()]).into());
        assert_eq!("q(f(X)) :- p(X).", prolog(&rule));
        let config = PrologConfig {
            allow_function_terms: false,
            ..Default::default()
        };
        assert!(matches!(violation(&rule, &config), Violation::FunctionTerm { .. }));
    }

    #[test]
    fn test_translate() {
        let config = PrologConfig::default();
        let (p, q, r) = (atom("P"), atom("Q"), atom("R"));
        assert_eq!(
            vec!["r :- p, q."],
            translate(&p.clone().and(q.clone()).implies(r.clone()), &config).unwrap()
        );
        assert_eq!(
            vec!["r :- p.", "r :- q."],
            translate(&p.clone().or(q.clone()).implies(r.clone()), &config).unwrap()
        );
        assert_eq!(vec!["p."], translate(&p, &config).unwrap());
        assert!(translate(&Sentence::not(p.and(q)), &config).unwrap().is_empty());
    }

    #[test]
    fn test_prolog_compiler() {
        let compiler = PrologCompiler::default();
        assert_eq!(
            "%% Predicate Definitions\n\
             % Likes(subject: str, object: str)\n\
             % Person(name: str)\n\
             % Animal(name: str, species: str)\n\
             \n\
             %% persons\n\
             \n\
             person('Fred').\n\
             person('Jie').\n\
             \n\
             %% animals\n\
             \n\
             animal('corky', 'cat').\n\
             animal('fido', 'dog').\n\
             \n\
             %% animal_preferences\n\
             \n\
             likes(X, 'Fred') :- animal(X, Species).\n\
             likes(X, 'Jie') :- animal(X, 'cat').",
            compiler.compile(&animals()).unwrap()
        );
    }

    #[test]
    fn prolog_compiler_untranslatable() {
        let rule = Sentence::from(term!(P(x))).implies(term!(Q(x, y)).into());
        let mut theory = Theory::default();
        theory.add(rule.clone());
        theory.ground_terms.push(term!(R("a")));

        let compiler = PrologCompiler::default();
        assert_eq!(
            "%% Predicate Definitions\n\
             \n\
             %% Sentences\n\
             \n\
             %% UNTRANSLATABLE: P(x) → Q(x, y)\n\
             \n\
             %% Ground Terms\n\
             \n\
             r('a').",
            compiler.compile(&theory).unwrap()
        );

        let compiler = PrologCompiler {
            strict: true,
            ..Default::default()
        };
        assert!(compiler.compile(&theory).unwrap_err().is_not_in_profile());
        assert!(compiler.compile_sentence(&rule).is_err());
    }
}

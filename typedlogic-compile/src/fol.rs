//! Renders sentences in the Unicode notation of first-order logic, for documentation.
use crate::{
    prolog::{render_term, PrologConfig},
    Compiler, Error, Profile, ProfileSet,
};
use itertools::Itertools;
use typedlogic_fol::syntax::{Sentence, Theory, Variable};

fn variable(v: &Variable) -> String {
    match v.domain() {
        Some(domain) => format!("{}:{}", v.name(), domain),
        None => v.name().to_string(),
    }
}

struct Renderer {
    config: PrologConfig,
}

impl Renderer {
    fn join(&self, operands: &[Sentence], separator: &str) -> Result<String, Error> {
        Ok(operands
            .iter()
            .map(|s| self.operand(s))
            .collect::<Result<Vec<_>, _>>()?
            .join(separator))
    }

    // Operands that bind looser than their parent are wrapped in parentheses.
    fn operand(&self, sentence: &Sentence) -> Result<String, Error> {
        let text = self.sentence(sentence)?;
        match sentence {
            Sentence::And(this) if this.operands().len() > 1 => Ok(format!("({})", text)),
            Sentence::Implies(_)
            | Sentence::Implied(_)
            | Sentence::Iff(_)
            | Sentence::Forall(_)
            | Sentence::Exists(_) => Ok(format!("({})", text)),
            _ => Ok(text),
        }
    }

    fn sentence(&self, sentence: &Sentence) -> Result<String, Error> {
        let text = match sentence {
            Sentence::Term(this) => render_term(this, &self.config)?,
            Sentence::Forall(this) => format!(
                "∀[{}]. {}",
                this.variables().iter().map(variable).join(" "),
                self.sentence(this.sentence())?
            ),
            Sentence::Exists(this) => format!(
                "∃[{}]. {}",
                this.variables().iter().map(variable).join(" "),
                self.sentence(this.sentence())?
            ),
            Sentence::And(this) if this.operands().is_empty() => "⊤".into(),
            Sentence::And(this) => self.join(this.operands(), " ∧ ")?,
            Sentence::Or(this) if this.operands().is_empty() => "⊥".into(),
            Sentence::Or(this) => format!("({})", self.join(this.operands(), " ∨ ")?),
            Sentence::Xor(this) => format!("({})", self.join(this.operands(), " ⊕ ")?),
            Sentence::ExactlyOne(this) => format!("∃!({})", self.join(this.operands(), ", ")?),
            Sentence::Not(this) => format!("¬{}", self.operand(this.negated())?),
            Sentence::NegationAsFailure(this) => format!("not {}", self.operand(this.negated())?),
            Sentence::Implies(this) => format!(
                "{} → {}",
                self.operand(this.antecedent())?,
                self.operand(this.consequent())?
            ),
            Sentence::Implied(this) => format!(
                "{} ← {}",
                self.operand(this.consequent())?,
                self.operand(this.antecedent())?
            ),
            Sentence::Iff(this) => format!(
                "{} ↔ {}",
                self.operand(this.left())?,
                self.operand(this.right())?
            ),
            Sentence::Extension(this) => self.sentence(&this.to_model_object())?,
        };
        Ok(text)
    }
}

/// Renders `sentence` in Unicode first-order notation.
///
/// **Example**:
/// ```rust
/// use typedlogic_compile::fol::as_fol;
/// use typedlogic_fol::syntax::{Sentence, Term, Variable};
///
/// let x = Variable::typed("x", "str");
/// let a: Sentence = Term::new("A", vec![x.clone().into()]).into();
/// let b: Sentence = Term::new("B", vec![x.clone().into()]).into();
///
/// let all = Sentence::forall(vec![x.clone()], a.clone().implies(b.clone()));
/// assert_eq!("∀[x:str]. A(x) → B(x)", as_fol(&all).unwrap());
///
/// let some = Sentence::exists(vec![x], a.clone().and(b.clone()));
/// assert_eq!("∃[x:str]. A(x) ∧ B(x)", as_fol(&some).unwrap());
/// assert_eq!("(A(x) ∨ B(x))", as_fol(&a.or(b)).unwrap());
/// ```
pub fn as_fol(sentence: &Sentence) -> Result<String, Error> {
    Renderer {
        config: PrologConfig::fol(),
    }
    .sentence(sentence)
}

/// Compiles theories to Unicode first-order notation, one sentence per line.
#[derive(Clone, Copy, Default, Debug)]
pub struct FolCompiler;

impl Compiler for FolCompiler {
    fn compile(&self, theory: &Theory) -> Result<String, Error> {
        let config = PrologConfig::fol();
        let mut lines = Vec::new();
        for sentence in theory.sentences() {
            lines.push(as_fol(sentence)?);
        }
        for term in &theory.ground_terms {
            lines.push(render_term(term, &config)?);
        }
        Ok(lines.join("\n"))
    }

    fn suffix(&self) -> &'static str {
        "fol"
    }

    fn profile(&self) -> ProfileSet {
        ProfileSet::new(vec![Profile::Unrestricted, Profile::SortedLogic])
    }
}

use crate::syntax::*;

// Propositions
#[allow(non_snake_case)]
pub fn P() -> Sentence { Term::proposition("P").into() }

#[allow(non_snake_case)]
pub fn Q() -> Sentence { Term::proposition("Q").into() }

#[allow(non_snake_case)]
pub fn R() -> Sentence { Term::proposition("R").into() }

#[allow(non_snake_case)]
pub fn S() -> Sentence { Term::proposition("S").into() }

// Variables
pub fn x() -> Variable { Variable::new("x") }

pub fn y() -> Variable { Variable::new("y") }

pub fn not(sentence: Sentence) -> Sentence {
    Sentence::not(sentence)
}

/// Evaluates a quantifier-free sentence over propositions, where `valuation` decides the
/// truth of each term.
pub fn evaluate<F: Fn(&Term) -> bool>(sentence: &Sentence, valuation: &F) -> bool {
    let operands = sentence.operands();
    match sentence {
        Sentence::Term(t) => valuation(t),
        Sentence::And(_) => operands.iter().all(|s| evaluate(s, valuation)),
        Sentence::Or(_) => operands.iter().any(|s| evaluate(s, valuation)),
        // some but not all operands hold
        Sentence::Xor(_) if operands.len() == 1 => evaluate(operands[0], valuation),
        Sentence::Xor(_) => {
            operands.iter().any(|s| evaluate(s, valuation))
                && !operands.iter().all(|s| evaluate(s, valuation))
        }
        Sentence::ExactlyOne(_) => {
            operands.iter().filter(|s| evaluate(s, valuation)).count() == 1
        }
        Sentence::Not(_) | Sentence::NegationAsFailure(_) => !evaluate(operands[0], valuation),
        Sentence::Implies(_) => {
            !evaluate(operands[0], valuation) || evaluate(operands[1], valuation)
        }
        Sentence::Implied(_) => {
            evaluate(operands[0], valuation) || !evaluate(operands[1], valuation)
        }
        Sentence::Iff(_) => evaluate(operands[0], valuation) == evaluate(operands[1], valuation),
        Sentence::Forall(this) => evaluate(this.sentence(), valuation),
        Sentence::Exists(this) => evaluate(this.sentence(), valuation),
        Sentence::Extension(this) => evaluate(&this.to_model_object(), valuation),
    }
}

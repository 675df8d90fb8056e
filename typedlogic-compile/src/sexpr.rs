//! Implements the compiler to S-expressions, for archiving theories.
use crate::{Compiler, Error, Profile, ProfileSet};
use typedlogic_fol::syntax::{AsSExpr, SExpr, Sentence, Theory};

fn render_at(sexpr: &SExpr, position: usize, depth: usize, out: &mut String) {
    match sexpr {
        SExpr::List(items) => {
            if position > 0 {
                out.push('\n');
                out.push_str(&"  ".repeat(depth));
            }
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                render_at(item, i, depth + 1, out);
            }
            out.push(')');
        }
        SExpr::Atom(atom) => {
            if position > 0 {
                out.push(' ');
            }
            match atom {
                serde_json::Value::String(s) if position == 0 => out.push_str(s),
                _ => out.push_str(&atom.to_string()),
            }
        }
    }
}

/// Renders `sexpr` with every list but the first element of its parent on a new line,
/// indented by two spaces per level. Atoms at the head of a list are bare, the others are
/// JSON encoded.
///
/// **Example**:
/// ```rust
/// use typedlogic_compile::sexpr::render;
/// use typedlogic_fol::syntax::SExpr;
///
/// let sexpr = SExpr::List(vec![
///     SExpr::atom("P"),
///     SExpr::List(vec![SExpr::atom("Variable"), SExpr::atom("x")]),
///     SExpr::atom("a"),
/// ]);
/// assert_eq!("(P\n  (Variable \"x\") \"a\")", render(&sexpr));
/// ```
pub fn render(sexpr: &SExpr) -> String {
    let mut out = String::new();
    render_at(sexpr, 0, 0, &mut out);
    out
}

/// Compiles theories to S-expressions.
#[derive(Clone, Copy, Default, Debug)]
pub struct SExprCompiler;

impl Compiler for SExprCompiler {
    fn compile(&self, theory: &Theory) -> Result<String, Error> {
        Ok(render(&theory.as_sexpr()))
    }

    fn compile_sentence(&self, sentence: &Sentence) -> Result<String, Error> {
        Ok(render(&sentence.as_sexpr()))
    }

    fn suffix(&self) -> &'static str {
        "sexpr"
    }

    fn profile(&self) -> ProfileSet {
        ProfileSet::new(vec![Profile::Unrestricted, Profile::SortedLogic])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typedlogic_fol::{syntax::PredicateDefinition, term};

    #[test]
    fn test_render_atoms() {
        assert_eq!("p", render(&SExpr::atom("p")));
        assert_eq!("3", render(&SExpr::atom(3)));
        assert_eq!("()", render(&SExpr::List(vec![])));
        assert_eq!(
            "(f 1 null \"two words\")",
            render(&SExpr::List(vec![
                SExpr::atom("f"),
                SExpr::atom(1),
                SExpr::Atom(serde_json::Value::Null),
                SExpr::atom("two words"),
            ]))
        );
    }

    #[test]
    fn test_sexpr_compile_sentence() {
        let sentence = Sentence::from(term!(P(x))).implies(term!(Q(x)).into());
        assert_eq!(
            "(Implies\n  (P\n    (Variable \"x\"))\n  (Q\n    (Variable \"x\")))",
            SExprCompiler.compile_sentence(&sentence).unwrap()
        );
    }

    #[test]
    fn test_sexpr_compiler() {
        let mut theory = Theory::default();
        theory.predicate_definitions = vec![
            PredicateDefinition::new("P", vec![("x", "str")]),
            PredicateDefinition::new("Q", vec![("x", "str")]),
        ];
        theory.add(Sentence::from(term!(P(x))).implies(term!(Q(x)).into()));
        let expected = r#"(Theory
  (name null)
  (constants
    (dict
      ()))
  (type_definitions
    (dict
      ()))
  (predicate_definitions
    ((PredicateDefinition
        (predicate "P")
        (arguments
          (dict
            ((x "str"))))
        (description null)
        (metadata null)
        (parents null))
      (PredicateDefinition
        (predicate "Q")
        (arguments
          (dict
            ((x "str"))))
        (description null)
        (metadata null)
        (parents null))))
  (sentence_groups
    ((SentenceGroup
        (name "Sentences")
        (group_type null)
        (docstring null)
        (sentences
          ((Implies
              (P
                (Variable "x"))
              (Q
                (Variable "x"))))))))
  (ground_terms
    ()))"#;
        assert_eq!(expected, SExprCompiler.compile(&theory).unwrap());
    }
}

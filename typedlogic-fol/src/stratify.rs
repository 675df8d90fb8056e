/*! Detects and enforces stratified negation in sets of Horn rules.

A program is stratified when no predicate depends negatively on itself, directly or through
a cycle. The analysis builds the predicate dependency graph of the rules and looks for a
negative edge within a strongly connected component. */

use crate::syntax::Sentence;
use indexmap::IndexMap;
use petgraph::{
    algo::tarjan_scc,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use std::collections::HashSet;
use thiserror::Error;
use tracing::info;

/// Is the type of errors arising from stratification.
#[derive(Error, Debug)]
pub enum Error {
    /// Is returned when the offending edge of a non-stratified program cannot be traced
    /// back to any rule.
    #[error("cannot find a rule for the edge `{}` → `{}`", .edge.0, .edge.1)]
    NoCandidateRule { edge: (String, String) },
}

/// Is the polarity of a dependency between two predicates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Is the result of analyzing a program for stratification.
#[derive(Clone, PartialEq, Debug)]
pub struct Analysis {
    /// Is true if the program is stratified.
    pub stratified: bool,

    /// Is the first negative edge `(head, body)` found within a strongly connected
    /// component, if any.
    pub offending_edge: Option<(String, String)>,

    /// Are the strongly connected components of the dependency graph.
    pub components: Vec<Vec<String>>,
}

/// Is the dependency graph of a program: an edge `p → q` records that a rule for `p`
/// refers to `q` in its body.
struct DependencyGraph {
    graph: DiGraph<String, Polarity>,
    nodes: IndexMap<String, NodeIndex>,
    edges: HashSet<(NodeIndex, NodeIndex, Polarity)>,
}

impl DependencyGraph {
    fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            nodes: IndexMap::new(),
            edges: HashSet::new(),
        }
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.nodes.get(name) {
            return *index;
        }
        let index = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), index);
        index
    }

    fn add_edge(&mut self, head: &str, body: &str, polarity: Polarity) {
        let from = self.node(head);
        let to = self.node(body);
        if self.edges.insert((from, to, polarity)) {
            self.graph.add_edge(from, to, polarity);
        }
    }

    fn analyze(&self) -> Analysis {
        let components = tarjan_scc(&self.graph);
        let mut component_of = vec![0; self.graph.node_count()];
        for (i, component) in components.iter().enumerate() {
            for node in component {
                component_of[node.index()] = i;
            }
        }

        let mut offending_edge = None;
        'nodes: for node in self.graph.node_indices() {
            let mut negative: Vec<_> = self
                .graph
                .edges(node)
                .filter(|e| *e.weight() == Polarity::Negative)
                .collect();
            negative.sort_by_key(|e| e.id());
            for edge in negative {
                if component_of[edge.source().index()] == component_of[edge.target().index()] {
                    offending_edge = Some((
                        self.graph[edge.source()].clone(),
                        self.graph[edge.target()].clone(),
                    ));
                    break 'nodes;
                }
            }
        }

        Analysis {
            stratified: offending_edge.is_none(),
            offending_edge,
            components: components
                .into_iter()
                .map(|c| c.into_iter().map(|n| self.graph[n].clone()).collect())
                .collect(),
        }
    }
}

/// Analyzes a program given as a list of dependencies: each entry pairs a head predicate
/// with the body predicates it depends on, flagged `true` when negated.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::stratify::analyze_datalog_program;
///
/// let program = vec![
///     ("p", vec![("q", false), ("r", true)]),
///     ("q", vec![("s", false)]),
///     ("r", vec![("p", false)]),
/// ];
/// let analysis = analyze_datalog_program(&program);
///
/// assert!(!analysis.stratified);
/// assert_eq!(Some(("p".to_string(), "r".to_string())), analysis.offending_edge);
/// ```
pub fn analyze_datalog_program<S: AsRef<str>>(program: &[(S, Vec<(S, bool)>)]) -> Analysis {
    let mut graph = DependencyGraph::new();
    for (head, body) in program {
        graph.node(head.as_ref());
        for (predicate, negated) in body {
            let polarity = if *negated {
                Polarity::Negative
            } else {
                Polarity::Positive
            };
            graph.add_edge(head.as_ref(), predicate.as_ref(), polarity);
        }
    }
    graph.analyze()
}

// Returns the head predicate and the body dependencies of a rule `Implies(body, head)`;
// other sentences contribute nothing.
fn dependencies(rule: &Sentence) -> Option<(&str, Vec<(&str, bool)>)> {
    let rule = match rule {
        Sentence::Implies(this) => this,
        _ => return None,
    };
    let head = rule.consequent().as_term()?;
    let body = match rule.antecedent() {
        Sentence::And(this) => this.operands().iter().collect(),
        other => vec![other],
    };
    let body = body
        .into_iter()
        .filter_map(|literal| match literal {
            Sentence::Not(this) => this.negated().as_term().map(|t| (t.predicate(), true)),
            _ => literal.as_term().map(|t| (t.predicate(), false)),
        })
        .collect();
    Some((head.predicate(), body))
}

/// Analyzes a list of Horn rules, sentences of the form `Implies(body, head)` where `head`
/// is a term and `body` is a term, a negated term or a conjunction of them. Rules of any
/// other shape are ignored.
pub fn analyze(rules: &[Sentence]) -> Analysis {
    let program: Vec<_> = rules.iter().filter_map(dependencies).collect();
    analyze_datalog_program(&program)
}

/// Weakens `rules` until they are stratified: while the program is not stratified, the
/// first rule that produces the offending negative edge is removed.
///
/// **Example**:
/// ```rust
/// use typedlogic_fol::syntax::{Sentence, Term};
/// use typedlogic_fol::stratify::force_stratification;
///
/// let term = |p: &str| -> Sentence { Term::proposition(p).into() };
/// let rules = vec![
///     term("q").and(Sentence::not(term("r"))).implies(term("p")),
///     term("s").implies(term("q")),
///     term("p").implies(term("r")),
/// ];
///
/// let stratified = force_stratification(&rules).unwrap();
/// assert_eq!(rules[1..].to_vec(), stratified);
/// ```
pub fn force_stratification(rules: &[Sentence]) -> Result<Vec<Sentence>, Error> {
    let mut rules = rules.to_vec();
    loop {
        let (head, body) = match analyze(&rules).offending_edge {
            Some(edge) => edge,
            None => return Ok(rules),
        };

        let candidate = rules.iter().position(|rule| match dependencies(rule) {
            Some((h, deps)) => h == head && deps.contains(&(body.as_str(), true)),
            None => false,
        });
        match candidate {
            Some(index) => {
                let rule = rules.remove(index);
                info!(event = "@drop_rule", rule = %rule, edge = ?(head.as_str(), body.as_str()));
            }
            None => return Err(Error::NoCandidateRule { edge: (head, body) }),
        }
    }
}

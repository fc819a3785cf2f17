use std::collections::HashMap;

use arbor_ecs::{NodeId, SyntaxTree, TreeError};
use arbor_parser::{ClauseBoundary, Constituent};
use arbor_protocol::{ClauseKind, EdgeLabel, NodeKind, PhraseKind, Token};

/// One segmented clause together with the constituents built for it.
#[derive(Debug, Clone)]
pub struct ClausePlan {
    pub boundary: ClauseBoundary,
    pub constituents: Vec<Constituent>,
}

/// Materializes every clause plan into one tree under a `Sentence` root.
///
/// Subordinate and relative clauses hang from the phrase that holds their anchor
/// word; the main clause hangs from the root. The finished tree is swept once and
/// any violation is returned, never repaired.
pub fn assemble(tokens: &[Token], plans: &[ClausePlan]) -> Result<SyntaxTree, TreeError> {
    let mut tree = SyntaxTree::new(tokens.len());
    let mut words: HashMap<usize, NodeId> = HashMap::with_capacity(tokens.len());

    let mut clauses = Vec::with_capacity(plans.len());
    for plan in plans {
        let clause = tree.add_clause(plan.boundary.kind);
        for (i, constituent) in plan.constituents.iter().enumerate() {
            let label = if i == 0 && constituent.kind() == Some(PhraseKind::VerbPhrase) {
                EdgeLabel::Predicate
            } else {
                EdgeLabel::Fragment
            };
            let node = materialize(&mut tree, tokens, constituent, &mut words)?;
            tree.attach(clause, node, label)?;
        }
        clauses.push(clause);
    }

    for (plan, clause) in plans.iter().zip(clauses) {
        let boundary = &plan.boundary;
        let (parent, label) = match (boundary.kind, boundary.anchor) {
            (ClauseKind::Main, _) => (tree.root(), EdgeLabel::MainClause),
            (kind, Some(anchor)) => {
                let label = if kind == ClauseKind::Relative {
                    EdgeLabel::RelClause
                } else {
                    EdgeLabel::SubClause
                };
                let word = words.get(&anchor).copied().ok_or_else(|| TreeError::Construction {
                    message: format!("anchor token {} was never placed", anchor),
                    nodes: vec![clause],
                })?;
                (anchor_target(&tree, word), label)
            }
            (_, None) => (tree.root(), EdgeLabel::SubClause),
        };
        let position = surface_position(&tree, parent, boundary.start);
        tree.attach_at(parent, clause, label, position)?;
    }

    tree.validate()?;
    Ok(tree)
}

/// Builds the nodes of one constituent top-down with an explicit stack.
fn materialize(
    tree: &mut SyntaxTree,
    tokens: &[Token],
    constituent: &Constituent,
    words: &mut HashMap<usize, NodeId>,
) -> Result<NodeId, TreeError> {
    let top = spawn(tree, tokens, constituent, words)?;
    let mut stack = vec![(top, constituent)];
    while let Some((node, current)) = stack.pop() {
        for (label, child) in current.children() {
            let child_node = spawn(tree, tokens, child, words)?;
            tree.attach(node, child_node, label.clone())?;
            stack.push((child_node, child));
        }
    }
    Ok(top)
}

fn spawn(
    tree: &mut SyntaxTree,
    tokens: &[Token],
    constituent: &Constituent,
    words: &mut HashMap<usize, NodeId>,
) -> Result<NodeId, TreeError> {
    match constituent {
        Constituent::Word { index } => {
            let token = tokens.get(*index).cloned().ok_or_else(|| TreeError::Construction {
                message: format!("token index {} out of range for {} tokens", index, tokens.len()),
                nodes: Vec::new(),
            })?;
            let node = tree.add_word(token);
            words.insert(*index, node);
            Ok(node)
        }
        Constituent::Phrase { span, .. } => Ok(tree.add_phrase(span.kind)),
    }
}

/// Node a clause anchored at `word` hangs from: the word's phrase, or the verb
/// phrase around a phrasal-verb unit.
fn anchor_target(tree: &SyntaxTree, word: NodeId) -> NodeId {
    let Some(parent) = tree.parent(word) else {
        return tree.root();
    };
    if tree.kind(parent) == Some(NodeKind::Phrase(PhraseKind::PhrasalVerb)) {
        if let Some(above) = tree.parent(parent) {
            return above;
        }
    }
    parent
}

/// Child slot that keeps `parent`'s children in surface order.
fn surface_position(tree: &SyntaxTree, parent: NodeId, first: usize) -> usize {
    let children = tree.children(parent);
    children
        .iter()
        .position(|c| tree.first_token(*c).map_or(false, |f| f > first))
        .unwrap_or(children.len())
}

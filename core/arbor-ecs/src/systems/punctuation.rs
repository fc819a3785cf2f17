use arbor_protocol::{EdgeLabel, NodeKind};

use crate::{NodeId, SyntaxTree, TreeError};

fn is_punctuation(tree: &SyntaxTree, node: NodeId) -> bool {
    tree.token(node).map(|t| t.features().is_punctuation).unwrap_or(false)
}

/// Lifts punctuation out of phrases onto the nearest clause (or the sentence),
/// then keeps each clause's punctuation trailing in token order.
pub fn relocate_punctuation(tree: &mut SyntaxTree) -> Result<usize, TreeError> {
    let mut rewrites = 0;

    let stranded: Vec<NodeId> = tree
        .leaves(tree.root())
        .into_iter()
        .filter(|w| is_punctuation(tree, *w))
        .filter(|w| {
            tree.parent(*w)
                .and_then(|p| tree.kind(p))
                .map(|k| k.is_phrase())
                .unwrap_or(false)
        })
        .collect();

    for mark in stranded {
        let Some(old_parent) = tree.parent(mark) else { continue };
        let Some(target) = tree.enclosing_clause(mark) else { continue };
        tree.attach(target, mark, EdgeLabel::Punct)?;
        rewrites += 1;
        prune_empty(tree, old_parent)?;
    }

    let clauses: Vec<NodeId> = tree
        .preorder(tree.root())
        .into_iter()
        .filter(|n| matches!(tree.kind(*n), Some(NodeKind::Clause(_) | NodeKind::Sentence)))
        .collect();

    for clause in clauses {
        let children = tree.children(clause);
        let (mut marks, mut order): (Vec<NodeId>, Vec<NodeId>) =
            children.iter().partition(|c| is_punctuation(tree, **c));
        marks.sort_by_key(|m| tree.token_index(*m).unwrap_or(usize::MAX));
        order.append(&mut marks);
        if order != children {
            tree.reorder_children(clause, order)?;
            rewrites += 1;
        }
    }

    Ok(rewrites)
}

/// Removes phrases left without children, walking upward.
fn prune_empty(tree: &mut SyntaxTree, start: NodeId) -> Result<(), TreeError> {
    let mut current = start;
    while tree.kind(current).map(|k| k.is_phrase()).unwrap_or(false) && tree.children(current).is_empty() {
        let parent = tree.parent(current);
        tree.remove(current)?;
        match parent {
            Some(p) => current = p,
            None => break,
        }
    }
    Ok(())
}

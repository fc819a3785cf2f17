use arbor_protocol::{DepRel, EdgeLabel, NodeKind, Token, UPos};

use crate::{NodeId, SyntaxTree};

pub fn tok(index: usize, text: &str, lemma: &str, pos: UPos, tag: &str) -> Token {
    Token::new(index, text, lemma, pos, tag, DepRel::Root, index)
}

pub fn word(tree: &mut SyntaxTree, parent: NodeId, label: EdgeLabel, token: Token) -> NodeId {
    let node = tree.add_word(token);
    tree.attach(parent, node, label).unwrap();
    node
}

/// Labels of the children of `node`, in order.
pub fn labels(tree: &SyntaxTree, node: NodeId) -> Vec<String> {
    tree.children(node)
        .into_iter()
        .map(|c| tree.label(c).map(|l| l.to_string()).unwrap_or_default())
        .collect()
}

pub fn first_of_kind(tree: &SyntaxTree, kind: NodeKind) -> Option<NodeId> {
    tree.preorder(tree.root()).into_iter().find(|n| tree.kind(*n) == Some(kind))
}

use serde::Serialize;

use arbor_protocol::{palette, NodeKind};

use crate::{NodeId, SyntaxTree};

/// Owned, read-only snapshot of a tree for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeView {
    pub kind: &'static str,
    /// Clause or phrase category (`main`, `NP`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sense: Option<String>,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeView>,
}

impl TreeView {
    pub(crate) fn build(tree: &SyntaxTree, root: NodeId) -> Self {
        // Children are built before their parent; the finished views wait in `done`.
        let order = tree.preorder(root);
        let mut done: std::collections::HashMap<NodeId, TreeView> = std::collections::HashMap::new();
        for node in order.iter().rev() {
            let children = tree
                .children(*node)
                .into_iter()
                .filter_map(|c| done.remove(&c))
                .collect();
            done.insert(*node, Self::single(tree, *node, children));
        }
        done.remove(&root)
            .unwrap_or_else(|| Self::single(tree, root, Vec::new()))
    }

    fn single(tree: &SyntaxTree, node: NodeId, children: Vec<TreeView>) -> Self {
        let kind = tree.kind(node).unwrap_or(NodeKind::Word);
        let token = tree.token(node);
        let label = tree.label(node);

        let category = match kind {
            NodeKind::Clause(c) => Some(c.as_str()),
            NodeKind::Phrase(p) => Some(p.as_str()),
            _ => None,
        };
        let color = palette::node_color(kind)
            .or_else(|| token.as_ref().map(|t| palette::tag_color(&t.tag)))
            .unwrap_or("#D5D8DC");

        Self {
            kind: kind.as_str(),
            category,
            label: label.as_ref().map(|l| l.to_string()),
            text: tree.text(node),
            token: token.as_ref().map(|t| t.index),
            lemma: token.as_ref().map(|t| t.lemma.clone()),
            tag: token.as_ref().map(|t| t.tag.clone()),
            sense: tree.sense(node).map(|(_, name)| name),
            color,
            edge_color: label.as_ref().map(palette::edge_color),
            children,
        }
    }

    /// Number of nodes in the view.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeView::size).sum::<usize>()
    }
}

pub mod components;
pub mod error;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod systems;
pub mod view;

use std::collections::HashSet;

use arbor_protocol::{ClauseKind, EdgeLabel, NodeKind, PhraseKind, SenseId, Token};
use hecs::{Entity, World};

use components::{Children, LemmaForm, Node, Parent, Sense, WordData};
pub use error::{NodeId, TreeError};
use systems::invariants::{check_invariants, InvariantViolation};
pub use view::TreeView;

/// A sentence tree stored in an entity-component world.
///
/// Nodes are entities; ownership lives in `Children`, the upward link in `Parent`.
/// Every mutation keeps the two in step.
pub struct SyntaxTree {
    world: World,
    root: Entity,
    token_count: usize,
}

impl SyntaxTree {
    /// Creates an empty tree with a `Sentence` root for a sentence of `token_count` tokens.
    pub fn new(token_count: usize) -> Self {
        let mut world = World::new();
        let root = world.spawn((
            Node {
                kind: NodeKind::Sentence,
                label: None,
            },
            Children::default(),
        ));
        Self {
            world,
            root,
            token_count,
        }
    }

    /// Expose the inner hecs World for read-only systems
    pub fn inner(&self) -> &World {
        &self.world
    }

    pub fn root(&self) -> NodeId {
        NodeId(self.root)
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.world.contains(node.0)
    }

    pub fn add_word(&mut self, token: Token) -> NodeId {
        NodeId(self.world.spawn((
            Node {
                kind: NodeKind::Word,
                label: None,
            },
            Children::default(),
            WordData { token },
        )))
    }

    pub fn add_phrase(&mut self, kind: PhraseKind) -> NodeId {
        self.spawn_node(NodeKind::Phrase(kind))
    }

    pub fn add_clause(&mut self, kind: ClauseKind) -> NodeId {
        self.spawn_node(NodeKind::Clause(kind))
    }

    fn spawn_node(&mut self, kind: NodeKind) -> NodeId {
        NodeId(self.world.spawn((Node { kind, label: None }, Children::default())))
    }

    fn ensure(&self, node: NodeId) -> Result<(), TreeError> {
        if self.world.contains(node.0) {
            Ok(())
        } else {
            Err(TreeError::NoSuchNode(node))
        }
    }

    /// Appends `child` under `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId, label: EdgeLabel) -> Result<(), TreeError> {
        let position = self.children_of(parent)?.len();
        self.attach_at(parent, child, label, position)
    }

    /// Attaches `child` under `parent` at `position` (clamped, counted after `child`
    /// has left any previous owner).
    ///
    /// The cycle check runs before anything is touched: if `child` is `parent` or one of
    /// its ancestors the call fails and the tree is unchanged.
    pub fn attach_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        label: EdgeLabel,
        position: usize,
    ) -> Result<(), TreeError> {
        self.ensure(parent)?;
        self.ensure(child)?;

        if child.0 == self.root {
            return Err(TreeError::construction("the sentence root cannot be attached", vec![child, parent]));
        }
        if self.kind(parent) == Some(NodeKind::Word) {
            return Err(TreeError::construction("word nodes are leaves", vec![parent, child]));
        }
        if parent == child || self.ancestors(parent).contains(&child) {
            return Err(TreeError::construction(
                "attachment would make a node its own ancestor",
                vec![child, parent],
            ));
        }

        // 1. Leave the previous owner
        self.detach(child)?;

        // 2. Join the new owner
        {
            let mut children = self
                .world
                .get::<&mut Children>(parent.0)
                .map_err(|_| TreeError::NoSuchNode(parent))?;
            let position = position.min(children.0.len());
            children.0.insert(position, child.0);
        }

        // 3. Back-reference and label
        self.world
            .insert_one(child.0, Parent(parent.0))
            .map_err(|_| TreeError::NoSuchNode(child))?;
        if let Ok(mut node) = self.world.get::<&mut Node>(child.0) {
            node.label = Some(label);
        }
        Ok(())
    }

    /// Removes `node` from its owner. Returns the previous owner, if any.
    pub fn detach(&mut self, node: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.ensure(node)?;
        let owner = match self.world.remove_one::<Parent>(node.0) {
            Ok(Parent(owner)) => owner,
            Err(_) => return Ok(None),
        };
        if let Ok(mut children) = self.world.get::<&mut Children>(owner) {
            children.0.retain(|c| *c != node.0);
        }
        Ok(Some(NodeId(owner)))
    }

    /// Detaches `node` and despawns it together with its whole subtree.
    pub fn remove(&mut self, node: NodeId) -> Result<(), TreeError> {
        if node.0 == self.root {
            return Err(TreeError::construction("the sentence root cannot be removed", vec![node]));
        }
        self.detach(node)?;
        for entity in self.preorder(node) {
            let _ = self.world.despawn(entity.0);
        }
        Ok(())
    }

    /// Replaces the child order of `node`. `order` must be a permutation of the current children.
    pub fn reorder_children(&mut self, node: NodeId, order: Vec<NodeId>) -> Result<(), TreeError> {
        let mut current = self.children_of(node)?;
        let mut proposed = order.clone();
        current.sort_by_key(|n| n.0.id());
        proposed.sort_by_key(|n| n.0.id());
        if current != proposed {
            return Err(TreeError::construction("reorder must keep the same children", vec![node]));
        }
        let mut children = self
            .world
            .get::<&mut Children>(node.0)
            .map_err(|_| TreeError::NoSuchNode(node))?;
        children.0 = order.into_iter().map(|n| n.0).collect();
        Ok(())
    }

    fn children_of(&self, node: NodeId) -> Result<Vec<NodeId>, TreeError> {
        self.world
            .get::<&Children>(node.0)
            .map(|c| c.0.iter().copied().map(NodeId).collect())
            .map_err(|_| TreeError::NoSuchNode(node))
    }

    /// Children in order. Empty for leaves and unknown nodes.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.children_of(node).unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.world.get::<&Parent>(node.0).ok().map(|p| NodeId(p.0))
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.world.get::<&Node>(node.0).ok().map(|n| n.kind)
    }

    pub fn label(&self, node: NodeId) -> Option<EdgeLabel> {
        self.world.get::<&Node>(node.0).ok().and_then(|n| n.label.clone())
    }

    pub fn set_label(&mut self, node: NodeId, label: EdgeLabel) -> Result<(), TreeError> {
        let mut data = self.world.get::<&mut Node>(node.0).map_err(|_| TreeError::NoSuchNode(node))?;
        data.label = Some(label);
        Ok(())
    }

    pub fn token(&self, node: NodeId) -> Option<Token> {
        self.world.get::<&WordData>(node.0).ok().map(|w| w.token.clone())
    }

    pub fn token_index(&self, node: NodeId) -> Option<usize> {
        self.world.get::<&WordData>(node.0).ok().map(|w| w.token.index)
    }

    pub fn is_lemma_form(&self, node: NodeId) -> bool {
        self.world.get::<&LemmaForm>(node.0).is_ok()
    }

    pub fn mark_lemma_form(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.world
            .insert_one(node.0, LemmaForm)
            .map_err(|_| TreeError::NoSuchNode(node))
    }

    pub fn set_sense(&mut self, node: NodeId, id: SenseId, name: impl Into<String>) -> Result<(), TreeError> {
        self.world
            .insert_one(node.0, Sense { id, name: name.into() })
            .map_err(|_| TreeError::NoSuchNode(node))
    }

    pub fn sense(&self, node: NodeId) -> Option<(SenseId, String)> {
        self.world.get::<&Sense>(node.0).ok().map(|s| (s.id, s.name.clone()))
    }

    /// Parent chain from `node` upward, excluding `node`. Stops on a revisit,
    /// so it terminates even on a corrupted store.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([node.0]);
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            if !seen.insert(parent.0) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Nearest ancestor that is a clause or the sentence root.
    pub fn enclosing_clause(&self, node: NodeId) -> Option<NodeId> {
        self.ancestors(node)
            .into_iter()
            .find(|a| matches!(self.kind(*a), Some(NodeKind::Clause(_) | NodeKind::Sentence)))
    }

    /// Pre-order walk of the subtree under `from` (inclusive), guarded by a visited set.
    pub fn preorder(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            if !seen.insert(node.0) {
                continue;
            }
            order.push(node);
            for child in self.children(node).into_iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Word leaves under `node` in tree order.
    pub fn leaves(&self, node: NodeId) -> Vec<NodeId> {
        self.preorder(node)
            .into_iter()
            .filter(|n| self.kind(*n) == Some(NodeKind::Word))
            .collect()
    }

    /// Smallest token index covered by `node`.
    pub fn first_token(&self, node: NodeId) -> Option<usize> {
        self.leaves(node).into_iter().filter_map(|l| self.token_index(l)).min()
    }

    /// Surface text covered by `node`, in token order. A decomposed word reads as
    /// its surface form once; a lone lemma leaf reads as the lemma.
    pub fn text(&self, node: NodeId) -> String {
        if let Some(token) = self.token(node) {
            return if self.is_lemma_form(node) { token.lemma } else { token.text };
        }
        let mut words: Vec<Token> = self.leaves(node).into_iter().filter_map(|l| self.token(l)).collect();
        words.sort_by_key(|t| t.index);
        words.dedup_by_key(|t| t.index);
        words.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ")
    }

    /// First child of `node` carrying `label`.
    pub fn child_with_label(&self, node: NodeId, label: &EdgeLabel) -> Option<NodeId> {
        self.children(node).into_iter().find(|c| self.label(*c).as_ref() == Some(label))
    }

    /// Full invariant sweep. Returns every violation found.
    pub fn violations(&self) -> Vec<InvariantViolation> {
        check_invariants(&self.world, self.root, self.token_count)
    }

    /// Invariant sweep as a `Result`: any violation is a construction error
    /// carrying every offending node.
    pub fn validate(&self) -> Result<(), TreeError> {
        let violations = self.violations();
        if violations.is_empty() {
            return Ok(());
        }
        let message = violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; ");
        let mut nodes: Vec<NodeId> = Vec::new();
        for violation in &violations {
            for node in &violation.nodes {
                if !nodes.contains(node) {
                    nodes.push(*node);
                }
            }
        }
        Err(TreeError::Construction { message, nodes })
    }

    /// Bracketed rendering, e.g. `(S (main_clause:CLAUSE (predicate:VP (verb:eats))))`.
    pub fn to_bracketed(&self) -> String {
        let mut out = String::new();
        self.write_bracketed(self.root(), &mut out, &mut HashSet::new());
        out
    }

    fn write_bracketed(&self, node: NodeId, out: &mut String, seen: &mut HashSet<Entity>) {
        if !seen.insert(node.0) {
            return;
        }
        if let Some(label) = self.label(node) {
            out.push_str(label.as_str());
            out.push(':');
        }
        match self.kind(node) {
            Some(NodeKind::Word) => out.push_str(&self.text(node)),
            kind => {
                out.push('(');
                out.push_str(match kind {
                    Some(NodeKind::Sentence) => "S",
                    Some(NodeKind::Clause(_)) => "CLAUSE",
                    Some(NodeKind::Phrase(p)) => p.as_str(),
                    _ => "?",
                });
                for child in self.children(node) {
                    out.push(' ');
                    self.write_bracketed(child, out, seen);
                }
                out.push(')');
            }
        }
    }

    pub fn to_view(&self) -> TreeView {
        TreeView::build(self, self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::{DepRel, UPos};
    use systems::invariants::ViolationKind;

    fn t(index: usize, text: &str, pos: UPos, dep: DepRel, head: usize) -> Token {
        Token::new(index, text, text.to_lowercase(), pos, "", dep, head)
    }

    #[test]
    fn test_attach_keeps_back_references() {
        let mut tree = SyntaxTree::new(1);
        let clause = tree.add_clause(ClauseKind::Main);
        let word = tree.add_word(t(0, "Go", UPos::Verb, DepRel::Root, 0));

        tree.attach(tree.root(), clause, EdgeLabel::MainClause).unwrap();
        tree.attach(clause, word, EdgeLabel::Verb).unwrap();

        assert_eq!(tree.parent(word), Some(clause));
        assert_eq!(tree.children(clause), vec![word]);
        assert_eq!(tree.label(word), Some(EdgeLabel::Verb));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_reattach_moves_child() {
        let mut tree = SyntaxTree::new(1);
        let a = tree.add_phrase(PhraseKind::NounPhrase);
        let b = tree.add_phrase(PhraseKind::NounPhrase);
        let word = tree.add_word(t(0, "cat", UPos::Noun, DepRel::Root, 0));
        tree.attach(tree.root(), a, EdgeLabel::Fragment).unwrap();
        tree.attach(tree.root(), b, EdgeLabel::Fragment).unwrap();

        tree.attach(a, word, EdgeLabel::Head).unwrap();
        tree.attach(b, word, EdgeLabel::Head).unwrap();

        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), vec![word]);
        assert_eq!(tree.parent(word), Some(b));
    }

    #[test]
    fn test_attach_rejects_cycle_without_mutating() {
        let mut tree = SyntaxTree::new(0);
        let outer = tree.add_phrase(PhraseKind::NounPhrase);
        let inner = tree.add_phrase(PhraseKind::NounPhrase);
        tree.attach(tree.root(), outer, EdgeLabel::Fragment).unwrap();
        tree.attach(outer, inner, EdgeLabel::Core).unwrap();

        let err = tree.attach(inner, outer, EdgeLabel::Core).unwrap_err();
        match err {
            TreeError::Construction { nodes, .. } => assert!(nodes.contains(&outer)),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(tree.parent(outer), Some(tree.root()));
        assert_eq!(tree.children(outer), vec![inner]);
        assert!(tree.attach(outer, outer, EdgeLabel::Core).is_err());
    }

    #[test]
    fn test_missing_and_duplicate_tokens_are_reported() {
        let mut tree = SyntaxTree::new(2);
        let clause = tree.add_clause(ClauseKind::Main);
        tree.attach(tree.root(), clause, EdgeLabel::MainClause).unwrap();
        let first = tree.add_word(t(0, "Go", UPos::Verb, DepRel::Root, 0));
        let again = tree.add_word(t(0, "Go", UPos::Verb, DepRel::Root, 0));
        tree.attach(clause, first, EdgeLabel::Verb).unwrap();
        tree.attach(clause, again, EdgeLabel::Verb).unwrap();

        let kinds: Vec<ViolationKind> = tree.violations().into_iter().map(|v| v.kind).collect();
        assert!(kinds.contains(&ViolationKind::DuplicateToken(0)));
        assert!(kinds.contains(&ViolationKind::MissingToken(1)));
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_remove_despawns_subtree() {
        let mut tree = SyntaxTree::new(0);
        let phrase = tree.add_phrase(PhraseKind::NounPhrase);
        let word = tree.add_word(t(0, "cat", UPos::Noun, DepRel::Root, 0));
        tree.attach(tree.root(), phrase, EdgeLabel::Fragment).unwrap();
        tree.attach(phrase, word, EdgeLabel::Head).unwrap();

        tree.remove(phrase).unwrap();
        assert!(!tree.contains(phrase));
        assert!(!tree.contains(word));
        assert!(tree.children(tree.root()).is_empty());
        assert!(tree.remove(tree.root()).is_err());
    }

    #[test]
    fn test_text_follows_token_order() {
        let mut tree = SyntaxTree::new(2);
        let np = tree.add_phrase(PhraseKind::NounPhrase);
        let head = tree.add_word(t(1, "scooter", UPos::Noun, DepRel::Root, 1));
        let det = tree.add_word(t(0, "a", UPos::Det, DepRel::Det, 1));
        tree.attach(tree.root(), np, EdgeLabel::Fragment).unwrap();
        tree.attach(np, head, EdgeLabel::Head).unwrap();
        tree.attach(np, det, EdgeLabel::Det).unwrap();

        assert_eq!(tree.text(np), "a scooter");
        assert_eq!(tree.first_token(np), Some(0));
        assert_eq!(tree.to_bracketed(), "(S fragment:(NP head:scooter det:a))");
    }

    #[test]
    fn test_words_cannot_own_children() {
        let mut tree = SyntaxTree::new(2);
        let a = tree.add_word(t(0, "a", UPos::Det, DepRel::Det, 1));
        let b = tree.add_word(t(1, "cat", UPos::Noun, DepRel::Root, 1));
        assert!(tree.attach(b, a, EdgeLabel::Det).is_err());
    }

    mod reattachment {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn random_reattachments_keep_invariants(moves in prop::collection::vec((0usize..16, 0usize..16), 0..48)) {
                let mut tree = SyntaxTree::new(4);
                let clause = tree.add_clause(ClauseKind::Main);
                tree.attach(tree.root(), clause, EdgeLabel::MainClause).unwrap();

                let mut phrases = Vec::new();
                for _ in 0..6 {
                    let phrase = tree.add_phrase(PhraseKind::NounPhrase);
                    tree.attach(clause, phrase, EdgeLabel::Fragment).unwrap();
                    phrases.push(phrase);
                }
                let mut nodes = phrases.clone();
                for index in 0..4 {
                    let word = tree.add_word(t(index, "w", UPos::Noun, DepRel::Root, index));
                    tree.attach(phrases[index], word, EdgeLabel::Head).unwrap();
                    nodes.push(word);
                }

                for (parent, child) in moves {
                    let parent = phrases[parent % phrases.len()];
                    let child = nodes[child % nodes.len()];
                    let before = tree.to_bracketed();
                    if tree.attach(parent, child, EdgeLabel::Part).is_err() {
                        // A refused attachment leaves the tree as it was
                        prop_assert_eq!(before, tree.to_bracketed());
                    }
                    prop_assert!(tree.violations().is_empty());
                }
            }
        }
    }
}

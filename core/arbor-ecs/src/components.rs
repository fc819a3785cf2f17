use arbor_protocol::{EdgeLabel, NodeKind, SenseId, Token};
use hecs::Entity;

/// Every tree node carries one. `label` is the relation to the current parent.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub label: Option<EdgeLabel>,
}

/// Ordered, owned children.
#[derive(Debug, Clone, Default)]
pub struct Children(pub Vec<Entity>);

/// Non-owning back-reference. Absent on the root and on detached nodes.
#[derive(Debug, Clone, Copy)]
pub struct Parent(pub Entity);

/// The source token of a word leaf.
#[derive(Debug, Clone)]
pub struct WordData {
    pub token: Token,
}

/// Marks the base-form leaf produced by lemma decomposition.
#[derive(Debug, Clone, Copy)]
pub struct LemmaForm;

/// Resolved word sense.
#[derive(Debug, Clone)]
pub struct Sense {
    pub id: SenseId,
    pub name: String,
}

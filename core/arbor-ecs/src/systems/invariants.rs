use std::collections::{HashMap, HashSet};
use std::fmt;

use arbor_protocol::NodeKind;
use hecs::{Entity, World};

use crate::components::{Children, Node, Parent, WordData};
use crate::error::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The root is owned by something or carries a back-reference.
    RootHasParent,
    /// A non-root node nobody owns.
    Orphan,
    /// Owned more than once (by several parents, or twice by the same one).
    MultipleParents,
    /// `Parent` disagrees with the actual owner.
    ParentMismatch,
    /// Owned, but not reachable from the root.
    Unreachable,
    /// Reached twice while walking down from the root.
    Cycle,
    WordWithChildren,
    MissingToken(usize),
    DuplicateToken(usize),
    UnknownToken(usize),
}

#[derive(Debug, Clone)]
pub struct InvariantViolation {
    pub kind: ViolationKind,
    pub nodes: Vec<NodeId>,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ViolationKind::RootHasParent => "root has a parent".to_string(),
            ViolationKind::Orphan => "node has no parent".to_string(),
            ViolationKind::MultipleParents => "node has more than one parent".to_string(),
            ViolationKind::ParentMismatch => "parent back-reference differs from owner".to_string(),
            ViolationKind::Unreachable => "node is unreachable from the root".to_string(),
            ViolationKind::Cycle => "node is its own descendant".to_string(),
            ViolationKind::WordWithChildren => "word node has children".to_string(),
            ViolationKind::MissingToken(i) => format!("token {i} is missing"),
            ViolationKind::DuplicateToken(i) => format!("token {i} appears more than once"),
            ViolationKind::UnknownToken(i) => format!("token {i} is out of range"),
        };
        f.write_str(&what)
    }
}

fn violation(kind: ViolationKind, nodes: &[Entity]) -> InvariantViolation {
    InvariantViolation {
        kind,
        nodes: nodes.iter().copied().map(NodeId).collect(),
    }
}

/// Sweeps the whole world for single-parent, back-reference, acyclicity and
/// token-coverage violations. Read-only; terminates on any store.
pub fn check_invariants(world: &World, root: Entity, token_count: usize) -> Vec<InvariantViolation> {
    let mut errors = Vec::new();

    // Ownership as recorded in Children
    let mut owners: HashMap<Entity, Vec<Entity>> = HashMap::new();
    for (owner, children) in world.query::<&Children>().iter() {
        for child in &children.0 {
            owners.entry(*child).or_default().push(owner);
        }
    }

    for (entity, node) in world.query::<&Node>().iter() {
        let recorded = world.get::<&Parent>(entity).ok().map(|p| p.0);
        let owned_by = owners.get(&entity).map(Vec::as_slice).unwrap_or(&[]);

        if entity == root {
            if !owned_by.is_empty() || recorded.is_some() {
                errors.push(violation(ViolationKind::RootHasParent, &[entity]));
            }
        } else {
            match owned_by {
                [] => errors.push(violation(ViolationKind::Orphan, &[entity])),
                [owner] => {
                    if recorded != Some(*owner) {
                        errors.push(violation(ViolationKind::ParentMismatch, &[entity, *owner]));
                    }
                }
                many => {
                    let mut nodes = vec![entity];
                    nodes.extend_from_slice(many);
                    errors.push(violation(ViolationKind::MultipleParents, &nodes));
                }
            }
        }

        if node.kind == NodeKind::Word {
            let has_children = world.get::<&Children>(entity).map(|c| !c.0.is_empty()).unwrap_or(false);
            if has_children {
                errors.push(violation(ViolationKind::WordWithChildren, &[entity]));
            }
        }
    }

    // Walk down from the root with a visited set
    let mut visited: HashSet<Entity> = HashSet::new();
    let mut coverage: HashMap<usize, Vec<Entity>> = HashMap::new();
    let mut stack = vec![root];
    while let Some(entity) = stack.pop() {
        if !visited.insert(entity) {
            errors.push(violation(ViolationKind::Cycle, &[entity]));
            continue;
        }
        if let Ok(word) = world.get::<&WordData>(entity) {
            coverage.entry(word.token.index).or_default().push(entity);
        }
        if let Ok(children) = world.get::<&Children>(entity) {
            stack.extend(children.0.iter().rev().copied());
        }
    }

    for (entity, _) in world.query::<&Node>().iter() {
        if !visited.contains(&entity) && owners.contains_key(&entity) {
            errors.push(violation(ViolationKind::Unreachable, &[entity]));
        }
    }

    for index in 0..token_count {
        match coverage.get(&index).map(Vec::as_slice) {
            None | Some([]) => errors.push(violation(ViolationKind::MissingToken(index), &[])),
            Some([_]) => {}
            Some(many) => errors.push(violation(ViolationKind::DuplicateToken(index), many)),
        }
    }
    let mut unknown: Vec<_> = coverage.iter().filter(|(index, _)| **index >= token_count).collect();
    unknown.sort_by_key(|(index, _)| **index);
    for (index, nodes) in unknown {
        errors.push(violation(ViolationKind::UnknownToken(*index), nodes));
    }

    errors
}

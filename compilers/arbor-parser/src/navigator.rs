use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};

use arbor_protocol::{DepRel, Token};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Dependent to head.
    Up,
    /// Head to dependent.
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub direction: Direction,
    pub relation: DepRel,
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            Direction::Up => '↑',
            Direction::Down => '↓',
        };
        write!(f, "{}{}", arrow, self.relation)
    }
}

/// Token indices visited by a path, plus the relation crossed at each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyPath {
    pub nodes: Vec<usize>,
    pub steps: Vec<PathStep>,
}

impl DependencyPath {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for DependencyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.steps.iter().map(|s| s.to_string()).collect();
        f.write_str(&rendered.join(" "))
    }
}

/// Read-only traversal over the raw head links of one sentence.
///
/// Tokens are addressed by position. Nothing here assumes the links form a tree:
/// every upward walk carries a visited set.
pub struct DependencyGraph<'a> {
    tokens: &'a [Token],
    graph: UnGraph<usize, DepRel>,
}

impl<'a> DependencyGraph<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let len = tokens.len();
        let mut graph = UnGraph::with_capacity(len, len);
        for i in 0..len {
            graph.add_node(i);
        }
        for (i, token) in tokens.iter().enumerate() {
            if token.head >= len {
                log::warn!(
                    "token {} ({:?}) has head {} outside the sentence; treating it as a root",
                    i,
                    token.text,
                    token.head
                );
            } else if token.head != i {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(token.head), token.dep.clone());
            }
        }
        Self { tokens, graph }
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn check(&self, index: usize) -> Result<(), ParseError> {
        if index < self.tokens.len() {
            Ok(())
        } else {
            Err(ParseError::IndexOutOfRange {
                index,
                len: self.tokens.len(),
            })
        }
    }

    /// Head of `index`; `None` for roots and for heads outside the sentence.
    pub fn head_of(&self, index: usize) -> Option<usize> {
        let token = self.tokens.get(index)?;
        (token.head != index && token.head < self.tokens.len()).then_some(token.head)
    }

    pub fn is_root(&self, index: usize) -> bool {
        index < self.tokens.len() && self.head_of(index).is_none()
    }

    /// The first root token.
    pub fn root(&self) -> Option<usize> {
        (0..self.tokens.len()).find(|i| self.is_root(*i))
    }

    pub fn roots(&self) -> Vec<usize> {
        (0..self.tokens.len()).filter(|i| self.is_root(*i)).collect()
    }

    /// Direct dependents of `index`, never `index` itself.
    pub fn children(&self, index: usize) -> Vec<usize> {
        (0..self.tokens.len())
            .filter(|j| *j != index && self.head_of(*j) == Some(index))
            .collect()
    }

    /// Head chain above `index`, nearest first. Stops at the first revisit and
    /// reports the partial chain as a cycle.
    pub fn ancestors(&self, index: usize) -> Result<Vec<usize>, ParseError> {
        self.check(index)?;
        let mut chain = Vec::new();
        let mut visited = HashSet::from([index]);
        let mut current = index;
        while let Some(head) = self.head_of(current) {
            if !visited.insert(head) {
                return Err(ParseError::CyclicDependency { start: index, chain });
            }
            chain.push(head);
            current = head;
        }
        Ok(chain)
    }

    /// True when any token's head chain revisits an index.
    pub fn is_cyclic(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// The first cycle found, as the error `ancestors` reports for it.
    pub fn find_cycle(&self) -> Option<ParseError> {
        let mut finished: HashSet<usize> = HashSet::new();
        for i in 0..self.tokens.len() {
            if finished.contains(&i) {
                continue;
            }
            match self.ancestors(i) {
                Ok(chain) => {
                    finished.insert(i);
                    finished.extend(chain);
                }
                Err(err) => {
                    if let ParseError::CyclicDependency { start, chain } = &err {
                        log::warn!("cyclic dependency from token {}: {:?}", start, chain);
                    }
                    return Some(err);
                }
            }
        }
        None
    }

    /// `index` and everything below it, in token order.
    pub fn subtree(&self, index: usize) -> Vec<usize> {
        let mut seen = HashSet::new();
        let mut stack = vec![index];
        while let Some(node) = stack.pop() {
            if node >= self.tokens.len() || !seen.insert(node) {
                continue;
            }
            stack.extend(self.children(node));
        }
        let mut nodes: Vec<usize> = seen.into_iter().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Shortest path over the undirected view of the head links.
    pub fn path(&self, from: usize, to: usize) -> Result<DependencyPath, ParseError> {
        self.check(from)?;
        self.check(to)?;

        let mut previous: HashMap<usize, usize> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        let mut seen = HashSet::from([from]);
        while let Some(current) = queue.pop_front() {
            if current == to {
                break;
            }
            for neighbor in self.graph.neighbors(NodeIndex::new(current)) {
                let next = self.graph[neighbor];
                if seen.insert(next) {
                    previous.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
        if !seen.contains(&to) {
            return Err(ParseError::PathNotFound { from, to });
        }

        let mut nodes = vec![to];
        let mut current = to;
        while let Some(prev) = previous.get(&current) {
            nodes.push(*prev);
            current = *prev;
        }
        nodes.reverse();

        let steps = nodes
            .windows(2)
            .map(|pair| {
                let (a, b) = (pair[0], pair[1]);
                if self.head_of(a) == Some(b) {
                    PathStep {
                        direction: Direction::Up,
                        relation: self.tokens[a].dep.clone(),
                    }
                } else {
                    PathStep {
                        direction: Direction::Down,
                        relation: self.tokens[b].dep.clone(),
                    }
                }
            })
            .collect();

        Ok(DependencyPath { nodes, steps })
    }

    pub fn distance(&self, from: usize, to: usize) -> Result<usize, ParseError> {
        self.path(from, to).map(|p| p.len())
    }

    /// Deepest token that both chains pass through (each chain includes its start).
    pub fn lowest_common_ancestor(&self, a: usize, b: usize) -> Result<usize, ParseError> {
        let mut chain_a = vec![a];
        chain_a.extend(self.ancestors(a)?);
        let mut chain_b: HashSet<usize> = HashSet::from([b]);
        chain_b.extend(self.ancestors(b)?);

        chain_a
            .into_iter()
            .find(|i| chain_b.contains(i))
            .ok_or(ParseError::PathNotFound { from: a, to: b })
    }

    /// Other dependents of the same head, in token order. Roots have none.
    pub fn siblings(&self, index: usize) -> Vec<usize> {
        match self.head_of(index) {
            Some(head) => self.children(head).into_iter().filter(|j| *j != index).collect(),
            None => Vec::new(),
        }
    }

    /// True when `head` lies on the head chain above `index`.
    pub fn is_dependent_of(&self, index: usize, head: usize) -> Result<bool, ParseError> {
        self.check(head)?;
        Ok(self.ancestors(index)?.contains(&head))
    }

    /// The nearest verb governing `index`, `index` included. Auxiliaries are
    /// skipped in favour of the verb they attach to.
    pub fn head_verb(&self, index: usize) -> Result<Option<usize>, ParseError> {
        let chain = self.ancestors(index)?;
        Ok(std::iter::once(index)
            .chain(chain)
            .find(|i| self.tokens[*i].pos.is_verbal() && !self.tokens[*i].dep.is_auxiliary()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::UPos;

    fn t(index: usize, text: &str, pos: UPos, dep: &str, head: usize) -> Token {
        Token::new(index, text, text.to_lowercase(), pos, "", DepRel::parse(dep), head)
    }

    /// The cat eats fish .
    fn svo() -> Vec<Token> {
        vec![
            t(0, "The", UPos::Det, "det", 1),
            t(1, "cat", UPos::Noun, "nsubj", 2),
            t(2, "eats", UPos::Verb, "ROOT", 2),
            t(3, "fish", UPos::Noun, "dobj", 2),
            t(4, ".", UPos::Punct, "punct", 2),
        ]
    }

    #[test]
    fn test_children_and_ancestors() {
        let tokens = svo();
        let nav = DependencyGraph::new(&tokens);
        assert_eq!(nav.children(2), vec![1, 3, 4]);
        assert_eq!(nav.children(1), vec![0]);
        assert_eq!(nav.ancestors(0).unwrap(), vec![1, 2]);
        assert_eq!(nav.root(), Some(2));
        assert!(!nav.is_cyclic());
    }

    #[test]
    fn test_self_reference_is_not_a_child() {
        let tokens = vec![t(0, "Go", UPos::Verb, "ROOT", 0)];
        let nav = DependencyGraph::new(&tokens);
        assert!(nav.children(0).is_empty());
        assert!(nav.ancestors(0).unwrap().is_empty());
    }

    #[test]
    fn test_cycle_terminates_with_partial_chain() {
        let tokens = vec![
            t(0, "a", UPos::Det, "det", 1),
            t(1, "b", UPos::Noun, "ROOT", 1),
            t(2, "c", UPos::Noun, "dep", 1),
            t(3, "d", UPos::Verb, "dep", 5),
            t(4, "e", UPos::Noun, "dep", 1),
            t(5, "f", UPos::Verb, "dep", 3),
        ];
        let nav = DependencyGraph::new(&tokens);

        match nav.ancestors(3) {
            Err(ParseError::CyclicDependency { start, chain }) => {
                assert_eq!(start, 3);
                assert_eq!(chain, vec![5]);
            }
            other => panic!("expected a cycle, got {:?}", other),
        }
        assert!(nav.is_cyclic());
        assert!(nav.ancestors(0).is_ok());
    }

    #[test]
    fn test_path_and_distance() {
        let tokens = svo();
        let nav = DependencyGraph::new(&tokens);

        let path = nav.path(1, 3).unwrap();
        assert_eq!(path.nodes, vec![1, 2, 3]);
        assert_eq!(path.to_string(), "↑nsubj ↓dobj");
        assert_eq!(nav.distance(0, 3).unwrap(), 3);
        assert_eq!(nav.distance(4, 4).unwrap(), 0);
        assert!(matches!(nav.path(0, 9), Err(ParseError::IndexOutOfRange { index: 9, len: 5 })));
    }

    #[test]
    fn test_disconnected_tokens_have_no_path() {
        let tokens = vec![t(0, "Hi", UPos::Intj, "ROOT", 0), t(1, "there", UPos::Adv, "ROOT", 1)];
        let nav = DependencyGraph::new(&tokens);
        assert_eq!(nav.path(0, 1), Err(ParseError::PathNotFound { from: 0, to: 1 }));
        assert_eq!(nav.roots(), vec![0, 1]);
    }

    #[test]
    fn test_lowest_common_ancestor() {
        let tokens = svo();
        let nav = DependencyGraph::new(&tokens);
        assert_eq!(nav.lowest_common_ancestor(0, 3).unwrap(), 2);
        assert_eq!(nav.lowest_common_ancestor(0, 1).unwrap(), 1);
    }

    #[test]
    fn test_out_of_range_head_is_root() {
        let tokens = vec![t(0, "x", UPos::Noun, "dep", 7), t(1, "y", UPos::Noun, "dep", 0)];
        let nav = DependencyGraph::new(&tokens);
        assert_eq!(nav.head_of(0), None);
        assert_eq!(nav.root(), Some(0));
        assert_eq!(nav.subtree(0), vec![0, 1]);
    }

    #[test]
    fn test_siblings_share_a_head() {
        let tokens = svo();
        let nav = DependencyGraph::new(&tokens);
        assert_eq!(nav.siblings(3), vec![1, 4]);
        assert!(nav.siblings(0).is_empty());
        assert!(nav.siblings(2).is_empty());
    }

    #[test]
    fn test_dependency_reaches_through_the_chain() {
        let tokens = svo();
        let nav = DependencyGraph::new(&tokens);
        assert!(nav.is_dependent_of(0, 2).unwrap());
        assert!(nav.is_dependent_of(0, 1).unwrap());
        assert!(!nav.is_dependent_of(2, 0).unwrap());
        assert!(!nav.is_dependent_of(3, 3).unwrap());
        assert!(nav.is_dependent_of(0, 9).is_err());
    }

    #[test]
    fn test_head_verb_skips_auxiliaries() {
        // She has eaten .
        let tokens = vec![
            t(0, "She", UPos::Pron, "nsubj", 2),
            t(1, "has", UPos::Aux, "aux", 2),
            t(2, "eaten", UPos::Verb, "ROOT", 2),
            t(3, ".", UPos::Punct, "punct", 2),
        ];
        let nav = DependencyGraph::new(&tokens);
        assert_eq!(nav.head_verb(0).unwrap(), Some(2));
        assert_eq!(nav.head_verb(1).unwrap(), Some(2));
        assert_eq!(nav.head_verb(2).unwrap(), Some(2));

        let fragment = vec![t(0, "Hello", UPos::Intj, "ROOT", 0)];
        assert_eq!(DependencyGraph::new(&fragment).head_verb(0).unwrap(), None);
    }

    #[test]
    fn test_head_verb_reports_cycles() {
        let tokens = vec![
            t(0, "a", UPos::Noun, "dep", 1),
            t(1, "b", UPos::Noun, "dep", 0),
        ];
        let nav = DependencyGraph::new(&tokens);
        assert!(matches!(nav.head_verb(0), Err(ParseError::CyclicDependency { .. })));
    }
}

use std::collections::BTreeMap;

use arbor_protocol::ClauseKind;

use crate::error::ParseError;
use crate::navigator::DependencyGraph;

/// One clause: a governing token and the tokens it owns.
///
/// `start` and `end` are the first and last member (inclusive). Members need not be
/// contiguous when another clause is nested inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseBoundary {
    pub head: usize,
    pub start: usize,
    pub end: usize,
    pub kind: ClauseKind,
    pub verb_indices: Vec<usize>,
    pub subject_indices: Vec<usize>,
    pub members: Vec<usize>,
    /// Token in the governing clause this clause hangs from. `None` for roots.
    pub anchor: Option<usize>,
    /// Verbless span standing in for a clause.
    pub fragment: bool,
}

impl ClauseBoundary {
    pub fn contains(&self, index: usize) -> bool {
        self.members.binary_search(&index).is_ok()
    }
}

fn is_clause_head(nav: &DependencyGraph<'_>, index: usize) -> bool {
    let token = &nav.tokens()[index];
    nav.is_root(index) || (token.pos.is_verbal() && token.dep.heads_clause())
}

/// Partitions the sentence into clauses. Every token lands in exactly one clause:
/// the one governed by its nearest clause-heading ancestor.
pub fn segment(nav: &DependencyGraph<'_>) -> Result<Vec<ClauseBoundary>, ParseError> {
    let tokens = nav.tokens();
    if !tokens.iter().any(|t| t.pos.is_verbal()) {
        return Err(ParseError::NoClauseFound);
    }

    let mut owners: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for index in 0..tokens.len() {
        let owner = if is_clause_head(nav, index) {
            index
        } else {
            // Roots head clauses, so the chain always reaches one
            nav.ancestors(index)?
                .into_iter()
                .find(|a| is_clause_head(nav, *a))
                .unwrap_or(index)
        };
        owners.entry(owner).or_default().push(index);
    }

    // The root verb's clause is the main one; a verbless root only when no root is a verb
    let roots = nav.roots();
    let main_head = roots
        .iter()
        .copied()
        .find(|r| tokens[*r].pos.is_verbal())
        .or_else(|| roots.first().copied());
    let clauses = owners
        .into_iter()
        .map(|(head, members)| {
            let token = &tokens[head];
            let kind = if Some(head) == main_head {
                ClauseKind::Main
            } else if token.dep.is_relative() && !nav.is_root(head) {
                ClauseKind::Relative
            } else {
                ClauseKind::Subordinate
            };
            boundary(nav, head, kind, members, false)
        })
        .collect();

    Ok(clauses)
}

/// `segment`, downgrading a verbless sentence to one `Main` fragment clause.
pub fn segment_or_fragment(nav: &DependencyGraph<'_>) -> Result<Vec<ClauseBoundary>, ParseError> {
    match segment(nav) {
        Err(ParseError::NoClauseFound) => {
            let Some(head) = nav.root() else {
                return Ok(Vec::new());
            };
            log::debug!("no verb in {} token(s); using a fragment clause", nav.len());
            let members = (0..nav.len()).collect();
            Ok(vec![boundary(nav, head, ClauseKind::Main, members, true)])
        }
        other => other,
    }
}

fn boundary(
    nav: &DependencyGraph<'_>,
    head: usize,
    kind: ClauseKind,
    members: Vec<usize>,
    fragment: bool,
) -> ClauseBoundary {
    let tokens = nav.tokens();
    let verb_indices = members.iter().copied().filter(|i| tokens[*i].pos.is_verbal()).collect();
    let subject_indices = members.iter().copied().filter(|i| tokens[*i].dep.is_subject()).collect();
    ClauseBoundary {
        head,
        start: members.first().copied().unwrap_or(head),
        end: members.last().copied().unwrap_or(head),
        kind,
        verb_indices,
        subject_indices,
        anchor: if fragment { None } else { nav.head_of(head) },
        members,
        fragment,
    }
}

//! In-place rewrites over a finished tree. Each pass maps a valid tree to a valid
//! tree and is idempotent.

pub mod grouping;
pub mod invariants;
pub mod lemma;
pub mod phrasal;
pub mod punctuation;

use crate::{SyntaxTree, TreeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    GroupObjects,
    ReinterpretPhrasalVerbs,
    RelocatePunctuation,
    DecomposeLemmas,
}

impl Pass {
    pub fn name(&self) -> &'static str {
        match self {
            Pass::GroupObjects => "object grouping",
            Pass::ReinterpretPhrasalVerbs => "phrasal-verb reinterpretation",
            Pass::RelocatePunctuation => "punctuation relocation",
            Pass::DecomposeLemmas => "lemma decomposition",
        }
    }

    /// Runs the pass and re-verifies the tree. Returns the number of rewrites.
    pub fn apply(&self, tree: &mut SyntaxTree) -> Result<usize, TreeError> {
        let rewrites = match self {
            Pass::GroupObjects => grouping::group_objects(tree)?,
            Pass::ReinterpretPhrasalVerbs => phrasal::reinterpret_phrasal_verbs(tree)?,
            Pass::RelocatePunctuation => punctuation::relocate_punctuation(tree)?,
            Pass::DecomposeLemmas => lemma::decompose_lemmas(tree)?,
        };
        if rewrites > 0 {
            log::debug!("{} rewrote {} node(s)", self.name(), rewrites);
        }
        tree.validate()?;
        Ok(rewrites)
    }
}

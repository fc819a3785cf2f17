use arbor_ecs::{NodeId, SyntaxTree, TreeError};
use arbor_protocol::{is_particle, EdgeLabel, NodeKind, PhraseKind};

use crate::disambiguate::{select_sense, SenseContext};
use crate::repository::SenseRepository;

/// Reads the phrasal-verb context of a word leaf off the tree. A decomposition
/// wrapper is looked through.
pub fn context_of(tree: &SyntaxTree, word: NodeId) -> SenseContext {
    let mut slot = word;
    let mut parent = tree.parent(word);
    if let Some(p) = parent {
        if tree.kind(p) == Some(NodeKind::Phrase(PhraseKind::Inflected)) {
            slot = p;
            parent = tree.parent(p);
        }
    }

    let Some(unit) = parent.filter(|p| tree.kind(*p) == Some(NodeKind::Phrase(PhraseKind::PhrasalVerb))) else {
        return SenseContext::default();
    };

    match tree.label(slot) {
        Some(EdgeLabel::Verb) => {
            let particle = tree
                .child_with_label(unit, &EdgeLabel::Particle)
                .and_then(|p| {
                    tree.leaves(p)
                        .into_iter()
                        .filter_map(|l| tree.token(l))
                        .find(|t| is_particle(&t.lemma))
                })
                .map(|t| t.lemma.to_lowercase());
            SenseContext {
                particle,
                is_particle: false,
            }
        }
        Some(EdgeLabel::Particle) => SenseContext {
            particle: None,
            is_particle: true,
        },
        _ => SenseContext::default(),
    }
}

/// Stores the best sense on every word leaf that has one. Returns how many were annotated.
pub fn annotate_senses(tree: &mut SyntaxTree, repository: &dyn SenseRepository) -> Result<usize, TreeError> {
    let mut annotated = 0;
    for word in tree.leaves(tree.root()) {
        let Some(token) = tree.token(word) else { continue };
        let context = context_of(tree, word);
        if let Some(sense) = select_sense(repository, &token, &context) {
            tree.set_sense(word, sense.id, sense.name)?;
            annotated += 1;
        }
    }
    Ok(annotated)
}

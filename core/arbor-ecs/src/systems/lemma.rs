use arbor_morph::decompose;
use arbor_protocol::{EdgeLabel, NodeKind, PhraseKind};

use crate::{NodeId, SyntaxTree, TreeError};

/// Replaces each inflected word leaf with an `Inflected` wrapper that keeps the
/// word's edge label, holding the lemma leaf under an inflection-class edge.
pub fn decompose_lemmas(tree: &mut SyntaxTree) -> Result<usize, TreeError> {
    let mut rewrites = 0;

    let words: Vec<NodeId> = tree
        .leaves(tree.root())
        .into_iter()
        .filter(|w| !tree.is_lemma_form(*w))
        .collect();

    for word in words {
        let Some(token) = tree.token(word) else { continue };
        let Some(decomposition) = decompose(&token) else { continue };
        let Some(parent) = tree.parent(word) else { continue };

        let label = tree.label(word).unwrap_or(EdgeLabel::Head);
        let position = tree.children(parent).iter().position(|c| *c == word).unwrap_or(0);

        let wrapper = tree.add_phrase(PhraseKind::Inflected);
        tree.attach(wrapper, word, EdgeLabel::Inflection(decomposition.class))?;
        tree.mark_lemma_form(word)?;
        tree.attach_at(parent, wrapper, label, position)?;
        rewrites += 1;
    }

    Ok(rewrites)
}

/// The wrapper of a decomposed word, if `node` is one.
pub fn lemma_leaf(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    if tree.kind(node) != Some(NodeKind::Phrase(PhraseKind::Inflected)) {
        return None;
    }
    tree.children(node).into_iter().find(|c| tree.is_lemma_form(*c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{labels, tok, word};
    use arbor_protocol::{ClauseKind, InflectionClass, UPos};

    fn cats_ran() -> (SyntaxTree, NodeId) {
        let mut tree = SyntaxTree::new(3);
        let clause = tree.add_clause(ClauseKind::Main);
        tree.attach(tree.root(), clause, EdgeLabel::MainClause).unwrap();
        let vp = tree.add_phrase(PhraseKind::VerbPhrase);
        tree.attach(clause, vp, EdgeLabel::Predicate).unwrap();
        word(&mut tree, vp, EdgeLabel::Subj, tok(0, "Cats", "cat", UPos::Noun, "NNS"));
        word(&mut tree, vp, EdgeLabel::Verb, tok(1, "ran", "run", UPos::Verb, "VBD"));
        word(&mut tree, clause, EdgeLabel::Punct, tok(2, ".", ".", UPos::Punct, "."));
        (tree, vp)
    }

    #[test]
    fn test_inflected_words_are_split() {
        let (mut tree, vp) = cats_ran();
        assert_eq!(decompose_lemmas(&mut tree).unwrap(), 2);

        assert_eq!(labels(&tree, vp), vec!["subj", "verb"]);
        let verb = tree.child_with_label(vp, &EdgeLabel::Verb).unwrap();
        assert_eq!(labels(&tree, verb), vec!["past"]);
        let leaf = lemma_leaf(&tree, verb).unwrap();
        assert_eq!(tree.text(leaf), "run");
        assert_eq!(tree.text(verb), "ran");
        assert_eq!(
            tree.label(leaf),
            Some(EdgeLabel::Inflection(InflectionClass::Past))
        );

        let subj = tree.child_with_label(vp, &EdgeLabel::Subj).unwrap();
        assert_eq!(labels(&tree, subj), vec!["plural"]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_decomposition_is_idempotent() {
        let (mut tree, _) = cats_ran();
        decompose_lemmas(&mut tree).unwrap();
        let once = tree.to_view();
        assert_eq!(decompose_lemmas(&mut tree).unwrap(), 0);
        assert_eq!(tree.to_view(), once);
    }
}

use arbor_protocol::{EdgeLabel, NodeKind, PhraseKind};

use crate::{NodeId, SyntaxTree, TreeError};

/// Merges the scattered `obj` siblings of a verb phrase (plus the `cc` words
/// between them) into one noun phrase labeled `obj`.
pub fn group_objects(tree: &mut SyntaxTree) -> Result<usize, TreeError> {
    let mut rewrites = 0;

    let verb_phrases: Vec<NodeId> = tree
        .preorder(tree.root())
        .into_iter()
        .filter(|n| tree.kind(*n) == Some(NodeKind::Phrase(PhraseKind::VerbPhrase)))
        .collect();

    for vp in verb_phrases {
        let children = tree.children(vp);
        let objects: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, c)| tree.label(**c) == Some(EdgeLabel::Obj))
            .map(|(i, _)| i)
            .collect();

        let (first, last) = match (objects.first(), objects.last()) {
            (Some(first), Some(last)) if objects.len() > 1 => (*first, *last),
            _ => continue,
        };

        let members: Vec<(NodeId, EdgeLabel)> = children[first..=last]
            .iter()
            .filter_map(|c| match tree.label(*c) {
                Some(EdgeLabel::Obj) => Some((*c, EdgeLabel::Part)),
                Some(EdgeLabel::Cc) => Some((*c, EdgeLabel::Cc)),
                _ => None,
            })
            .collect();

        let group = tree.add_phrase(PhraseKind::NounPhrase);
        for (member, label) in members {
            tree.attach(group, member, label)?;
        }
        tree.attach_at(vp, group, EdgeLabel::Obj, first)?;
        rewrites += 1;
    }

    Ok(rewrites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{labels, tok, word};
    use arbor_protocol::{ClauseKind, UPos};

    /// "She ate apples and pears quickly." with the conjuncts hoisted as separate objects.
    fn scattered() -> (SyntaxTree, NodeId) {
        let mut tree = SyntaxTree::new(7);
        let clause = tree.add_clause(ClauseKind::Main);
        tree.attach(tree.root(), clause, EdgeLabel::MainClause).unwrap();
        let vp = tree.add_phrase(PhraseKind::VerbPhrase);
        tree.attach(clause, vp, EdgeLabel::Predicate).unwrap();

        word(&mut tree, vp, EdgeLabel::Subj, tok(0, "She", "she", UPos::Pron, "PRP"));
        word(&mut tree, vp, EdgeLabel::Verb, tok(1, "ate", "eat", UPos::Verb, "VBD"));
        word(&mut tree, vp, EdgeLabel::Obj, tok(2, "apples", "apple", UPos::Noun, "NNS"));
        word(&mut tree, vp, EdgeLabel::Cc, tok(3, "and", "and", UPos::CConj, "CC"));
        word(&mut tree, vp, EdgeLabel::Obj, tok(4, "pears", "pear", UPos::Noun, "NNS"));
        word(&mut tree, vp, EdgeLabel::Mod, tok(5, "quickly", "quickly", UPos::Adv, "RB"));
        word(&mut tree, clause, EdgeLabel::Punct, tok(6, ".", ".", UPos::Punct, "."));
        (tree, vp)
    }

    #[test]
    fn test_objects_merge_into_one_phrase() {
        let (mut tree, vp) = scattered();
        assert_eq!(group_objects(&mut tree).unwrap(), 1);

        assert_eq!(labels(&tree, vp), vec!["subj", "verb", "obj", "mod"]);
        let group = tree.child_with_label(vp, &EdgeLabel::Obj).unwrap();
        assert_eq!(tree.kind(group), Some(NodeKind::Phrase(PhraseKind::NounPhrase)));
        assert_eq!(labels(&tree, group), vec!["part", "cc", "part"]);
        assert_eq!(tree.text(group), "apples and pears");
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let (mut tree, _) = scattered();
        group_objects(&mut tree).unwrap();
        let once = tree.to_view();
        assert_eq!(group_objects(&mut tree).unwrap(), 0);
        assert_eq!(tree.to_view(), once);
    }

    #[test]
    fn test_single_object_untouched() {
        let mut tree = SyntaxTree::new(2);
        let vp = tree.add_phrase(PhraseKind::VerbPhrase);
        tree.attach(tree.root(), vp, EdgeLabel::Predicate).unwrap();
        word(&mut tree, vp, EdgeLabel::Verb, tok(0, "eats", "eat", UPos::Verb, "VBZ"));
        word(&mut tree, vp, EdgeLabel::Obj, tok(1, "fish", "fish", UPos::Noun, "NN"));

        assert_eq!(group_objects(&mut tree).unwrap(), 0);
        assert_eq!(labels(&tree, vp), vec!["verb", "obj"]);
    }
}

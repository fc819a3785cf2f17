use arbor_protocol::{is_phrasal_pair, EdgeLabel, NodeKind, PhraseKind};

use crate::{NodeId, SyntaxTree, TreeError};

struct Candidate {
    vp: NodeId,
    verb: NodeId,
    prep_phrase: NodeId,
    particle: NodeId,
}

/// Late phrasal-verb merge: `verb` + adjacent `prep_phrase` whose preposition the
/// verb is known to take as a particle. The preposition's object is promoted to
/// the verb phrase's `obj`.
pub fn reinterpret_phrasal_verbs(tree: &mut SyntaxTree) -> Result<usize, TreeError> {
    let mut rewrites = 0;

    let verb_phrases: Vec<NodeId> = tree
        .preorder(tree.root())
        .into_iter()
        .filter(|n| tree.kind(*n) == Some(NodeKind::Phrase(PhraseKind::VerbPhrase)))
        .collect();

    for vp in verb_phrases {
        if let Some(candidate) = find_candidate(tree, vp) {
            merge(tree, candidate)?;
            rewrites += 1;
        }
    }

    Ok(rewrites)
}

fn find_candidate(tree: &SyntaxTree, vp: NodeId) -> Option<Candidate> {
    let children = tree.children(vp);
    if children.iter().any(|c| tree.label(*c) == Some(EdgeLabel::Obj)) {
        return None;
    }

    let verb = children
        .iter()
        .copied()
        .find(|c| tree.label(*c) == Some(EdgeLabel::Verb) && tree.kind(*c) == Some(NodeKind::Word))?;
    let verb_token = tree.token(verb)?;

    children.iter().copied().find_map(|pp| {
        if tree.label(pp) != Some(EdgeLabel::PrepPhrase)
            || tree.kind(pp) != Some(NodeKind::Phrase(PhraseKind::PrepPhrase))
        {
            return None;
        }
        let particle = tree.child_with_label(pp, &EdgeLabel::Prep)?;
        let prep = tree.token(particle)?;
        let object = tree.child_with_label(pp, &EdgeLabel::PObj);
        let adjacent = prep.index == verb_token.index + 1;
        if adjacent && object.is_some() && is_phrasal_pair(&verb_token.lemma, &prep.text) {
            Some(Candidate {
                vp,
                verb,
                prep_phrase: pp,
                particle,
            })
        } else {
            None
        }
    })
}

fn merge(tree: &mut SyntaxTree, candidate: Candidate) -> Result<(), TreeError> {
    let Candidate {
        vp,
        verb,
        prep_phrase,
        particle,
    } = candidate;

    let verb_position = tree.children(vp).iter().position(|c| *c == verb).unwrap_or(0);

    let unit = tree.add_phrase(PhraseKind::PhrasalVerb);
    tree.attach(unit, verb, EdgeLabel::Verb)?;
    tree.attach(unit, particle, EdgeLabel::Particle)?;
    tree.attach_at(vp, unit, EdgeLabel::Verb, verb_position)?;

    // Whatever the preposition governed now hangs off the verb phrase
    let mut position = tree.children(vp).iter().position(|c| *c == prep_phrase).unwrap_or(0);
    for rest in tree.children(prep_phrase) {
        let label = match tree.label(rest) {
            Some(EdgeLabel::PObj) => EdgeLabel::Obj,
            Some(other) => other,
            None => EdgeLabel::Mod,
        };
        tree.attach_at(vp, rest, label, position)?;
        position += 1;
    }
    tree.remove(prep_phrase)
}

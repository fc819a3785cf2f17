#![cfg_attr(not(test), no_std)] // proptest needs std in tests

extern crate alloc;

use alloc::string::String;

use arbor_protocol::{InflectionClass, MorphFlags, Token, UPos};

/// A word split into its base form and the grammatical feature that separates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub lemma: String,
    pub class: InflectionClass,
}

/// Reads grammatical features off a Penn Treebank tag.
pub fn analyze_tag(pos: UPos, tag: &str) -> MorphFlags {
    match (pos, tag) {
        (UPos::Verb | UPos::Aux, "VB") => MorphFlags::BASE,
        (UPos::Verb | UPos::Aux, "VBD") => MorphFlags::PAST,
        (UPos::Verb | UPos::Aux, "VBN") => MorphFlags::PAST | MorphFlags::PARTICIPLE,
        (UPos::Verb | UPos::Aux, "VBG") => MorphFlags::GERUND | MorphFlags::PARTICIPLE,
        (UPos::Verb | UPos::Aux, "VBP") => MorphFlags::PRESENT,
        (UPos::Verb | UPos::Aux, "VBZ") => MorphFlags::PRESENT | MorphFlags::THIRD_PERSON,
        (UPos::Noun | UPos::PropN, "NN") => MorphFlags::SINGULAR,
        (UPos::Noun | UPos::PropN, "NNS") => MorphFlags::PLURAL,
        (UPos::Noun | UPos::PropN, "NNP") => MorphFlags::PROPER | MorphFlags::SINGULAR,
        (UPos::Noun | UPos::PropN, "NNPS") => MorphFlags::PROPER | MorphFlags::PLURAL,
        (UPos::Adj, "JJ") | (UPos::Adv, "RB") => MorphFlags::POSITIVE,
        (UPos::Adj, "JJR") | (UPos::Adv, "RBR") => MorphFlags::COMPARATIVE,
        (UPos::Adj, "JJS") | (UPos::Adv, "RBS") => MorphFlags::SUPERLATIVE,
        _ => MorphFlags::empty(),
    }
}

/// Guesses grammatical features from the suffix the surface form adds to the lemma.
pub fn analyze_suffix(pos: UPos, text: &str, lemma: &str) -> MorphFlags {
    let text = text.to_lowercase();
    let lemma = lemma.to_lowercase();
    if text == lemma {
        return MorphFlags::empty();
    }

    let added = |suffix: &str| text.ends_with(suffix) && !lemma.ends_with(suffix);

    match pos {
        UPos::Verb | UPos::Aux => {
            if added("ing") {
                MorphFlags::GERUND | MorphFlags::PARTICIPLE
            } else if added("ed") {
                MorphFlags::PAST
            } else if added("s") {
                MorphFlags::PRESENT | MorphFlags::THIRD_PERSON
            } else {
                MorphFlags::empty()
            }
        }
        UPos::Noun | UPos::PropN => {
            if added("s") {
                MorphFlags::PLURAL
            } else {
                MorphFlags::empty()
            }
        }
        UPos::Adj | UPos::Adv => {
            if added("est") {
                MorphFlags::SUPERLATIVE
            } else if added("er") {
                MorphFlags::COMPARATIVE
            } else {
                MorphFlags::empty()
            }
        }
        _ => MorphFlags::empty(),
    }
}

/// Only inflected content words are worth splitting.
pub fn should_decompose(token: &Token) -> bool {
    if token.lemma.to_lowercase() == token.text.to_lowercase() {
        return false;
    }
    if token.text.chars().count() <= 1 {
        return false;
    }
    matches!(token.pos, UPos::Verb | UPos::Noun | UPos::Adj | UPos::Adv)
}

/// The inflection class for a token. The tag decides unless it only names the
/// unmarked form, in which case the surface/lemma difference gets a say.
pub fn inflection_class(token: &Token) -> InflectionClass {
    let unmarked = MorphFlags::BASE | MorphFlags::SINGULAR | MorphFlags::POSITIVE;

    let tag_flags = analyze_tag(token.pos, &token.tag);
    let flags = if tag_flags.is_empty() || unmarked.contains(tag_flags) {
        let suffix_flags = analyze_suffix(token.pos, &token.text, &token.lemma);
        if suffix_flags.is_empty() {
            tag_flags
        } else {
            suffix_flags
        }
    } else {
        tag_flags
    };

    InflectionClass::from_flags(flags)
}

pub fn decompose(token: &Token) -> Option<Decomposition> {
    if !should_decompose(token) {
        return None;
    }
    Some(Decomposition {
        lemma: token.lemma.clone(),
        class: inflection_class(token),
    })
}

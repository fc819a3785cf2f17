use proptest::prelude::*;

use arbor_assembler::{analyze, NormalizerConfig, PipelineConfig};
use arbor_ecs::systems::Pass;
use arbor_ecs::SyntaxTree;
use arbor_protocol::{DepRel, Lexicon, Token, UPos};

const WORDS: &[(&str, &str, UPos, &str)] = &[
    ("the", "the", UPos::Det, "DT"),
    ("cats", "cat", UPos::Noun, "NNS"),
    ("looked", "look", UPos::Verb, "VBD"),
    ("up", "up", UPos::Adp, "RP"),
    ("big", "big", UPos::Adj, "JJ"),
    ("quickly", "quickly", UPos::Adv, "RB"),
    ("and", "and", UPos::CConj, "CC"),
    ("has", "have", UPos::Aux, "VBZ"),
    ("her", "her", UPos::Pron, "PRP$"),
    ("in", "in", UPos::Adp, "IN"),
    (".", ".", UPos::Punct, "."),
    ("two", "two", UPos::Num, "CD"),
];

const RELATIONS: &[&str] = &[
    "nsubj", "dobj", "iobj", "det", "amod", "advmod", "prep", "pobj", "prt", "aux", "poss", "nummod",
    "compound", "cc", "conj", "punct", "ccomp", "xcomp", "advcl", "relcl", "acl", "mark", "appos", "dep",
];

fn sentence(rows: &[(usize, usize, usize)], heads: &[usize]) -> Vec<Token> {
    rows.iter()
        .zip(heads)
        .enumerate()
        .map(|(index, ((word, rel, _), head))| {
            let (text, lemma, pos, tag) = WORDS[*word % WORDS.len()];
            let dep = if *head == index {
                DepRel::Root
            } else {
                DepRel::parse(RELATIONS[*rel % RELATIONS.len()])
            };
            Token::new(index, text, lemma, pos, tag, dep, *head)
        })
        .collect()
}

/// Heads pointing strictly left: always a forest.
fn acyclic() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec((0usize..64, 0usize..64, 0usize..64), 1..14).prop_map(|rows| {
        let heads: Vec<usize> = rows
            .iter()
            .enumerate()
            .map(|(i, (_, _, h))| if i == 0 { 0 } else { h % i })
            .collect();
        sentence(&rows, &heads)
    })
}

/// Heads anywhere in the sentence: cycles allowed.
fn arbitrary() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec((0usize..64, 0usize..64, 0usize..64), 1..14).prop_map(|rows| {
        let len = rows.len();
        let heads: Vec<usize> = rows.iter().map(|(_, _, h)| h % len).collect();
        sentence(&rows, &heads)
    })
}

fn covered(tree: &SyntaxTree) -> Vec<usize> {
    let mut indices: Vec<usize> = tree
        .leaves(tree.root())
        .into_iter()
        .filter_map(|l| tree.token_index(l))
        .collect();
    indices.sort_unstable();
    indices
}

fn structured_only() -> PipelineConfig {
    PipelineConfig {
        disambiguate_senses: false,
        normalizer: NormalizerConfig {
            group_objects: false,
            reinterpret_phrasal_verbs: false,
            relocate_punctuation: false,
        },
        ..PipelineConfig::default()
    }
}

proptest! {
    #[test]
    fn acyclic_parses_yield_valid_covering_trees(tokens in acyclic()) {
        let config = PipelineConfig {
            decompose_lemmas: true,
            ..PipelineConfig::default()
        };
        let analysis = analyze(&tokens, &Lexicon::default(), &config).unwrap();
        prop_assert!(analysis.tree.violations().is_empty());
        prop_assert_eq!(covered(&analysis.tree), (0..tokens.len()).collect::<Vec<_>>());
    }

    #[test]
    fn any_parse_yields_some_valid_tree(tokens in arbitrary()) {
        let analysis = analyze(&tokens, &Lexicon::default(), &PipelineConfig::default()).unwrap();
        prop_assert!(analysis.tree.violations().is_empty());
        prop_assert_eq!(covered(&analysis.tree), (0..tokens.len()).collect::<Vec<_>>());
    }

    #[test]
    fn normalizer_passes_are_idempotent(tokens in acyclic()) {
        for pass in [
            Pass::GroupObjects,
            Pass::ReinterpretPhrasalVerbs,
            Pass::RelocatePunctuation,
            Pass::DecomposeLemmas,
        ] {
            let mut tree = analyze(&tokens, &Lexicon::default(), &structured_only()).unwrap().tree;
            pass.apply(&mut tree).unwrap();
            let once = tree.to_bracketed();
            pass.apply(&mut tree).unwrap();
            prop_assert_eq!(once, tree.to_bracketed(), "{} is not idempotent", pass.name());
        }
    }
}

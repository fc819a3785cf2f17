#![no_std] // Critical for WASM/Embedded compatibility

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod label;
pub mod lexical;
pub mod morphology;
pub mod palette;
pub mod token;

// Re-export core types for convenience
pub use ids::{ArchivedSenseId, SenseId};
pub use label::*;
pub use lexical::*;
pub use morphology::*;
pub use token::*;

pub mod model;
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{check_archived_root, to_bytes};

    #[test]
    fn test_lexicon_archive_round_trip() {
        let lexicon = Lexicon {
            version: 1,
            entries: vec![LexEntry {
                lemma: "scooter".to_string(),
                pos: SimplePos::Noun,
                senses: vec![Sense {
                    id: SenseId::new(7),
                    name: "scooter.n.01".to_string(),
                    definition: "a wheeled vehicle".to_string(),
                    frequency: 3,
                    technical: false,
                }],
            }],
        };

        let bytes = to_bytes::<_, 256>(&lexicon).expect("Failed to serialize Lexicon");
        let archived = check_archived_root::<Lexicon>(&bytes).expect("Archive failed validation");

        assert_eq!(archived.entries.len(), 1);
        assert_eq!(archived.entries[0].lemma.as_str(), "scooter");
        assert_eq!(SimplePos::from(&archived.entries[0].pos), SimplePos::Noun);
        assert_eq!(archived.entries[0].senses[0].id.0, 7);
    }

    #[test]
    fn test_id_layout() {
        // SenseId(u32) should be exactly 4 bytes
        assert_eq!(core::mem::size_of::<SenseId>(), 4);
    }

    #[test]
    fn test_dep_rel_parsing() {
        assert_eq!(DepRel::parse("nsubj"), DepRel::NSubj);
        assert_eq!(DepRel::parse("ROOT"), DepRel::Root);
        assert_eq!(DepRel::parse("obj"), DepRel::DObj);
        assert_eq!(DepRel::parse("compound:prt"), DepRel::Prt);
        assert_eq!(DepRel::parse("goeswith"), DepRel::Other("goeswith".to_string()));
        assert_eq!(DepRel::parse("goeswith").as_str(), "goeswith");
    }

    #[test]
    fn test_token_features() {
        let noun = Token::new(0, "cat", "cat", UPos::Noun, "NN", DepRel::NSubj, 1);
        let det = Token::new(0, "the", "the", UPos::Det, "DT", DepRel::Det, 1);
        let stop = Token::new(2, ".", ".", UPos::Punct, ".", DepRel::Punct, 1);

        assert!(noun.features().is_content_word);
        assert!(det.features().is_function_word);
        assert!(stop.features().is_punctuation);
        assert!(!stop.features().is_function_word);
    }

    #[test]
    fn test_lexical_tables_are_reexported() {
        assert!(is_particle("up"));
        assert!(is_phrasal_pair("look", "up"));
        assert!(!is_phrasal_pair("eat", "into"));
        assert!(ASPECTUAL_CUES.contains(&"completely"));
        assert!(!SPATIAL_CUES.is_empty());
    }

    #[test]
    fn test_only_relcl_marks_relative_clause() {
        assert!(DepRel::RelCl.is_relative());
        assert!(!DepRel::Acl.is_relative());
        assert!(DepRel::Acl.heads_clause());
    }

    #[test]
    fn test_edge_label_from_dep() {
        assert_eq!(EdgeLabel::from_dep(&DepRel::NSubj), EdgeLabel::Subj);
        assert_eq!(EdgeLabel::from_dep(&DepRel::Advmod), EdgeLabel::Mod);
        assert_eq!(EdgeLabel::Inflection(InflectionClass::Past).as_str(), "past");
    }
}

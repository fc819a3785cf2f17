//! From raw head links to per-clause constituent trees.

pub mod clause;
pub mod conll;
pub mod error;
pub mod navigator;
pub mod phrase;

pub use clause::{segment, segment_or_fragment, ClauseBoundary};
pub use conll::read_sentences;
pub use error::ParseError;
pub use navigator::{DependencyGraph, DependencyPath, Direction, PathStep};
pub use phrase::{Constituent, Dependent, PhraseBuilder, PhraseSpan};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Arbitrary head links never hang the navigator.
        #[test]
        fn test_navigation_terminates(heads in prop::collection::vec(0usize..12, 1..12)) {
            let tokens: Vec<_> = heads
                .iter()
                .enumerate()
                .map(|(i, h)| arbor_protocol::Token::new(
                    i, "w", "w", arbor_protocol::UPos::Noun, "NN", arbor_protocol::DepRel::Compound, *h,
                ))
                .collect();
            let nav = DependencyGraph::new(&tokens);
            for i in 0..tokens.len() {
                match nav.ancestors(i) {
                    Ok(chain) => prop_assert!(chain.len() < tokens.len()),
                    Err(ParseError::CyclicDependency { start, chain }) => {
                        prop_assert_eq!(start, i);
                        prop_assert!(chain.len() < tokens.len());
                    }
                    Err(other) => prop_assert!(false, "unexpected error {}", other),
                }
            }
            let _ = nav.is_cyclic();
        }
    }
}

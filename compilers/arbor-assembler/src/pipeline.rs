use std::thread;

use arbor_ecs::{SyntaxTree, TreeError};
use arbor_parser::{segment_or_fragment, DependencyGraph, ParseError, PhraseBuilder};
use arbor_protocol::{ClauseKind, EdgeLabel, Token};
use arbor_senses::{annotate_senses, SenseRepository};

use crate::assemble::{assemble, ClausePlan};
use crate::config::{CyclePolicy, PipelineConfig};
use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// Clauses and phrases were built.
    Structured,
    /// Structuring failed; every token sits directly under one fragment clause.
    Flat { reason: String },
}

/// Finished tree of one sentence and how it was obtained.
pub struct Analysis {
    pub tree: SyntaxTree,
    pub status: AnalysisStatus,
}

impl Analysis {
    pub fn is_structured(&self) -> bool {
        self.status == AnalysisStatus::Structured
    }
}

/// Runs one sentence through segmentation, phrase building, assembly, the enabled
/// normalizer passes and sense annotation.
///
/// Any failure while structuring falls back to a flat tree. The only errors returned
/// are misnumbered input and, under `CyclePolicy::Reject`, cyclic head links.
pub fn analyze(
    tokens: &[Token],
    repository: &dyn SenseRepository,
    config: &PipelineConfig,
) -> Result<Analysis, PipelineError> {
    if let Some((position, token)) = tokens.iter().enumerate().find(|(i, t)| t.index != *i) {
        return Err(PipelineError::Misnumbered {
            position,
            index: token.index,
        });
    }

    let (mut tree, status) = match structure(tokens, config) {
        Ok(tree) => (tree, AnalysisStatus::Structured),
        Err(err @ PipelineError::Parse(ParseError::CyclicDependency { .. }))
            if config.cycle_policy == CyclePolicy::Reject =>
        {
            return Err(err);
        }
        Err(err) => {
            log::warn!("falling back to a flat tree for {} token(s): {}", tokens.len(), err);
            let reason = err.to_string();
            (flat_tree(tokens)?, AnalysisStatus::Flat { reason })
        }
    };

    if config.disambiguate_senses {
        annotate_senses(&mut tree, repository)?;
    }
    Ok(Analysis { tree, status })
}

fn structure(tokens: &[Token], config: &PipelineConfig) -> Result<SyntaxTree, PipelineError> {
    let nav = DependencyGraph::new(tokens);
    if let Some(cycle) = nav.find_cycle() {
        return Err(cycle.into());
    }

    let builder = PhraseBuilder::new(&nav);
    let plans: Vec<ClausePlan> = segment_or_fragment(&nav)?
        .into_iter()
        .map(|boundary| ClausePlan {
            constituents: builder.build_clause(&boundary),
            boundary,
        })
        .collect();

    let mut tree = assemble(tokens, &plans)?;
    for pass in config.passes() {
        pass.apply(&mut tree)?;
    }
    Ok(tree)
}

/// Every token as a word under one fragment clause, labeled by its relation.
pub fn flat_tree(tokens: &[Token]) -> Result<SyntaxTree, TreeError> {
    let mut tree = SyntaxTree::new(tokens.len());
    let clause = tree.add_clause(ClauseKind::Main);
    tree.attach(tree.root(), clause, EdgeLabel::Fragment)?;
    for token in tokens {
        let label = EdgeLabel::from_dep(&token.dep);
        let word = tree.add_word(token.clone());
        tree.attach(clause, word, label)?;
    }
    tree.validate()?;
    Ok(tree)
}

/// `analyze` over many sentences on scoped worker threads. Results keep input order.
pub fn analyze_batch(
    sentences: &[Vec<Token>],
    repository: &dyn SenseRepository,
    config: &PipelineConfig,
) -> Vec<Result<Analysis, PipelineError>> {
    let workers = if cfg!(target_arch = "wasm32") {
        1
    } else {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(sentences.len())
    };
    analyze_with_workers(sentences, repository, config, workers)
}

/// Sentences split over `workers` scoped threads. One worker (or none) runs inline,
/// which is also the only mode on targets without threads.
fn analyze_with_workers(
    sentences: &[Vec<Token>],
    repository: &dyn SenseRepository,
    config: &PipelineConfig,
    workers: usize,
) -> Vec<Result<Analysis, PipelineError>> {
    if workers <= 1 || sentences.len() <= 1 {
        return sentences
            .iter()
            .map(|tokens| analyze(tokens, repository, config))
            .collect();
    }
    let chunk = sentences.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = sentences
            .chunks(chunk)
            .map(|part| {
                let handle = scope.spawn(move || {
                    part.iter()
                        .map(|tokens| analyze(tokens, repository, config))
                        .collect::<Vec<_>>()
                });
                (part.len(), handle)
            })
            .collect();

        let mut results = Vec::with_capacity(sentences.len());
        for (len, handle) in handles {
            match handle.join() {
                Ok(part) => results.extend(part),
                Err(_) => results.extend((0..len).map(|_| Err(PipelineError::WorkerPanicked))),
            }
        }
        results
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::{DepRel, Lexicon, NodeKind, UPos};

    fn t(index: usize, text: &str, pos: UPos, dep: &str, head: usize) -> Token {
        Token::new(index, text, text.to_lowercase(), pos, "", DepRel::parse(dep), head)
    }

    fn cyclic() -> Vec<Token> {
        vec![
            t(0, "a", UPos::Det, "det", 1),
            t(1, "b", UPos::Noun, "ROOT", 1),
            t(2, "c", UPos::Noun, "dep", 1),
            t(3, "d", UPos::Verb, "dep", 5),
            t(4, "e", UPos::Noun, "dep", 1),
            t(5, "f", UPos::Verb, "dep", 3),
        ]
    }

    #[test]
    fn test_flat_tree_covers_every_token() {
        let tokens = cyclic();
        let tree = flat_tree(&tokens).unwrap();
        let clause = tree.children(tree.root())[0];
        assert_eq!(tree.kind(clause), Some(NodeKind::Clause(ClauseKind::Main)));
        assert_eq!(tree.children(clause).len(), tokens.len());
        assert!(tree.violations().is_empty());
    }

    #[test]
    fn test_cycle_policy() {
        let tokens = cyclic();
        let lexicon = Lexicon::default();

        let analysis = analyze(&tokens, &lexicon, &PipelineConfig::default()).unwrap();
        assert!(matches!(analysis.status, AnalysisStatus::Flat { .. }));

        let reject = PipelineConfig {
            cycle_policy: CyclePolicy::Reject,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            analyze(&tokens, &lexicon, &reject),
            Err(PipelineError::Parse(ParseError::CyclicDependency { .. }))
        ));
    }

    #[test]
    fn test_misnumbered_input_is_rejected() {
        let tokens = vec![t(1, "Go", UPos::Verb, "ROOT", 1)];
        assert!(matches!(
            analyze(&tokens, &Lexicon::default(), &PipelineConfig::default()),
            Err(PipelineError::Misnumbered { position: 0, index: 1 })
        ));
    }

    #[test]
    fn test_batch_keeps_order() {
        let sentences = vec![
            vec![t(0, "Go", UPos::Verb, "ROOT", 0)],
            cyclic(),
            vec![t(0, "Stop", UPos::Verb, "ROOT", 0)],
        ];
        let results = analyze_batch(&sentences, &Lexicon::default(), &PipelineConfig::default());
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().is_structured());
        assert!(!results[1].as_ref().unwrap().is_structured());
        assert_eq!(results[2].as_ref().unwrap().tree.text(results[2].as_ref().unwrap().tree.root()), "Stop");
    }

    #[test]
    fn test_single_worker_runs_inline() {
        let sentences = vec![
            vec![t(0, "Go", UPos::Verb, "ROOT", 0)],
            cyclic(),
            vec![t(0, "Stop", UPos::Verb, "ROOT", 0)],
        ];
        let lexicon = Lexicon::default();
        let config = PipelineConfig::default();
        let inline = analyze_with_workers(&sentences, &lexicon, &config, 1);
        let threaded = analyze_with_workers(&sentences, &lexicon, &config, 2);

        assert_eq!(inline.len(), 3);
        for (a, b) in inline.iter().zip(&threaded) {
            let (a, b) = (a.as_ref().unwrap(), b.as_ref().unwrap());
            assert_eq!(a.status, b.status);
            assert_eq!(a.tree.to_bracketed(), b.tree.to_bracketed());
        }
        assert!(analyze_with_workers(&[], &lexicon, &config, 0).is_empty());
    }
}

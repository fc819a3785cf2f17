use serde::Serialize;

use arbor_ecs::TreeView;
use arbor_parser::read_sentences;
use arbor_senses::SenseRepository;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::pipeline::{analyze_batch, AnalysisStatus};

/// Serializable result for one sentence, as handed to a renderer.
#[derive(Debug, Serialize)]
pub struct SentenceReport {
    pub index: usize,
    pub text: String,
    pub structured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub bracketed: String,
    pub tree: TreeView,
}

#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub sentences: Vec<SentenceReport>,
}

/// Reads a CoNLL-U document and analyzes every sentence in it.
pub fn analyze_document(
    conll: &str,
    repository: &dyn SenseRepository,
    config: &PipelineConfig,
) -> Result<DocumentReport, PipelineError> {
    let sentences = read_sentences(conll)?;
    let mut reports = Vec::with_capacity(sentences.len());
    for (index, result) in analyze_batch(&sentences, repository, config).into_iter().enumerate() {
        let analysis = result?;
        let fallback_reason = match analysis.status {
            AnalysisStatus::Structured => None,
            AnalysisStatus::Flat { reason } => Some(reason),
        };
        let tree = &analysis.tree;
        reports.push(SentenceReport {
            index,
            text: tree.text(tree.root()),
            structured: fallback_reason.is_none(),
            fallback_reason,
            bracketed: tree.to_bracketed(),
            tree: tree.to_view(),
        });
    }
    Ok(DocumentReport { sentences: reports })
}

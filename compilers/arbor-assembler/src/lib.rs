//! From a dependency parse to a finished syntactic tree.

pub mod assemble;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use assemble::{assemble, ClausePlan};
pub use config::{CyclePolicy, NormalizerConfig, PipelineConfig};
pub use error::PipelineError;
pub use pipeline::{analyze, analyze_batch, flat_tree, Analysis, AnalysisStatus};
pub use report::{analyze_document, DocumentReport, SentenceReport};

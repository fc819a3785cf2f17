use arbor_ecs::TreeError;
use arbor_parser::ParseError;
use arbor_senses::SenseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Sense(#[from] SenseError),

    /// Token `index` sits at the wrong position in the input list.
    #[error("token at position {position} carries index {index}")]
    Misnumbered { position: usize, index: usize },

    #[error("worker thread panicked")]
    WorkerPanicked,
}

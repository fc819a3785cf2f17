use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The head links revisit an index. `chain` is the walk up to the repeat.
    #[error("cyclic dependency starting at token {start}: {chain:?}")]
    CyclicDependency { start: usize, chain: Vec<usize> },

    #[error("no verb found; the sentence has no clause")]
    NoClauseFound,

    #[error("no dependency path between token {from} and token {to}")]
    PathNotFound { from: usize, to: usize },

    #[error("token index {index} out of range for {len} tokens")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("CoNLL-U line {line}: {message}")]
    Conll { line: usize, message: String },
}

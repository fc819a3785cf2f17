use thiserror::Error;

#[derive(Debug, Error)]
pub enum SenseError {
    #[error("lexicon archive failed validation: {0}")]
    InvalidArchive(String),
}

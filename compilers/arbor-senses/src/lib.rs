//! Sense selection for word leaves against an external, read-only repository.

pub mod annotate;
pub mod disambiguate;
pub mod error;
pub mod repository;

pub use annotate::{annotate_senses, context_of};
pub use disambiguate::{disambiguate, lookup_pos, select_sense, SenseContext};
pub use error::SenseError;
pub use repository::{LexiconArchive, SenseCandidate, SenseRepository};

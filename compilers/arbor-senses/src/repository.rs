use rkyv::check_archived_root;

use arbor_protocol::{ArchivedLexicon, Lexicon, SenseId, SimplePos};

use crate::error::SenseError;

/// A sense as the repository reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenseCandidate {
    pub id: SenseId,
    pub name: String,
    pub definition: String,
    pub frequency: u32,
    pub technical: bool,
}

/// Read-only sense store shared across worker threads.
pub trait SenseRepository: Send + Sync {
    /// Senses of `lemma` with the given POS, most frequent first. Empty when unknown.
    fn lookup(&self, lemma: &str, pos: SimplePos) -> Vec<SenseCandidate>;
}

fn by_frequency(mut senses: Vec<SenseCandidate>) -> Vec<SenseCandidate> {
    senses.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    senses
}

impl SenseRepository for Lexicon {
    fn lookup(&self, lemma: &str, pos: SimplePos) -> Vec<SenseCandidate> {
        let senses = self
            .entries
            .iter()
            .filter(|e| e.pos == pos && e.lemma.eq_ignore_ascii_case(lemma))
            .flat_map(|e| e.senses.iter())
            .map(|s| SenseCandidate {
                id: s.id,
                name: s.name.clone(),
                definition: s.definition.clone(),
                frequency: s.frequency,
                technical: s.technical,
            })
            .collect();
        by_frequency(senses)
    }
}

/// Zero-copy view over a compiled lexicon. Validated once on construction.
pub struct LexiconArchive<'a> {
    archived: &'a ArchivedLexicon,
}

impl<'a> LexiconArchive<'a> {
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, SenseError> {
        let archived = check_archived_root::<Lexicon>(bytes)
            .map_err(|e| SenseError::InvalidArchive(e.to_string()))?;
        log::debug!(
            "lexicon v{} loaded with {} entries",
            archived.version,
            archived.entries.len()
        );
        Ok(Self { archived })
    }

    pub fn version(&self) -> u32 {
        self.archived.version
    }

    pub fn len(&self) -> usize {
        self.archived.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archived.entries.is_empty()
    }
}

impl SenseRepository for LexiconArchive<'_> {
    fn lookup(&self, lemma: &str, pos: SimplePos) -> Vec<SenseCandidate> {
        let senses = self
            .archived
            .entries
            .iter()
            .filter(|e| SimplePos::from(&e.pos) == pos && e.lemma.as_str().eq_ignore_ascii_case(lemma))
            .flat_map(|e| e.senses.iter())
            .map(|s| SenseCandidate {
                id: SenseId::from(&s.id),
                name: s.name.as_str().to_string(),
                definition: s.definition.as_str().to_string(),
                frequency: s.frequency,
                technical: s.technical,
            })
            .collect();
        by_frequency(senses)
    }
}

use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Identifier of one sense (one meaning of a lemma) in a lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(transparent)]
pub struct SenseId(pub u32);

impl SenseId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for SenseId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<&ArchivedSenseId> for SenseId {
    fn from(id: &ArchivedSenseId) -> Self {
        Self(id.0)
    }
}

impl fmt::Display for SenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sense#{}", self.0)
    }
}

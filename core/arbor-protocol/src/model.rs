use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::SenseId;
use crate::morphology::SimplePos;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One meaning of a lemma.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Sense {
    pub id: SenseId,
    /// WordNet-style name, e.g. `look_up.v.01`.
    pub name: String,
    pub definition: String,
    /// Corpus frequency; higher is more common.
    pub frequency: u32,
    /// Domain-specific meaning (sports, chemistry, ...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub technical: bool,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexEntry {
    pub lemma: String,
    pub pos: SimplePos,
    pub senses: Vec<Sense>,
}

/// The sense repository as shipped: compiled from JSON, read zero-copy.
#[derive(Debug, Clone, Default, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub entries: Vec<LexEntry>,
}

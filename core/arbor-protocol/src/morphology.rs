use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

use crate::token::UPos;

/// Coarse POS used by the sense repository (WordNet style: n, v, a, r).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum SimplePos {
    Noun = 0,
    Verb = 1,
    Adjective = 2,
    Adverb = 3,
}

impl SimplePos {
    /// Function words have no simplified POS.
    pub fn from_upos(pos: UPos) -> Option<Self> {
        match pos {
            UPos::Noun | UPos::PropN => Some(SimplePos::Noun),
            UPos::Verb => Some(SimplePos::Verb),
            UPos::Adj => Some(SimplePos::Adjective),
            UPos::Adv => Some(SimplePos::Adverb),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            SimplePos::Noun => 'n',
            SimplePos::Verb => 'v',
            SimplePos::Adjective => 'a',
            SimplePos::Adverb => 'r',
        }
    }
}

impl From<&ArchivedSimplePos> for SimplePos {
    fn from(archived: &ArchivedSimplePos) -> Self {
        match archived {
            ArchivedSimplePos::Noun => SimplePos::Noun,
            ArchivedSimplePos::Verb => SimplePos::Verb,
            ArchivedSimplePos::Adjective => SimplePos::Adjective,
            ArchivedSimplePos::Adverb => SimplePos::Adverb,
        }
    }
}

/// Inflection class carried on a lemma-decomposition edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum InflectionClass {
    Base = 0,
    Past = 1,
    PastParticiple = 2,
    Gerund = 3,
    Present = 4,
    Present3Sg = 5,
    Singular = 6,
    Plural = 7,
    ProperSingular = 8,
    ProperPlural = 9,
    Positive = 10,
    Comparative = 11,
    Superlative = 12,
    /// Inflected, but the class could not be determined.
    Form = 13,
}

impl InflectionClass {
    pub fn label(&self) -> &'static str {
        match self {
            InflectionClass::Base => "base",
            InflectionClass::Past => "past",
            InflectionClass::PastParticiple => "past_part",
            InflectionClass::Gerund => "gerund",
            InflectionClass::Present => "present",
            InflectionClass::Present3Sg => "present_3sg",
            InflectionClass::Singular => "singular",
            InflectionClass::Plural => "plural",
            InflectionClass::ProperSingular => "proper_sg",
            InflectionClass::ProperPlural => "proper_pl",
            InflectionClass::Positive => "positive",
            InflectionClass::Comparative => "comparative",
            InflectionClass::Superlative => "superlative",
            InflectionClass::Form => "form",
        }
    }

    /// Picks the most specific class encoded in a flag set.
    pub fn from_flags(flags: MorphFlags) -> Self {
        if flags.contains(MorphFlags::PARTICIPLE | MorphFlags::PAST) {
            InflectionClass::PastParticiple
        } else if flags.contains(MorphFlags::GERUND) {
            InflectionClass::Gerund
        } else if flags.contains(MorphFlags::PAST) {
            InflectionClass::Past
        } else if flags.contains(MorphFlags::PRESENT | MorphFlags::THIRD_PERSON) {
            InflectionClass::Present3Sg
        } else if flags.contains(MorphFlags::PRESENT) {
            InflectionClass::Present
        } else if flags.contains(MorphFlags::BASE) {
            InflectionClass::Base
        } else if flags.contains(MorphFlags::PROPER | MorphFlags::PLURAL) {
            InflectionClass::ProperPlural
        } else if flags.contains(MorphFlags::PROPER) {
            InflectionClass::ProperSingular
        } else if flags.contains(MorphFlags::PLURAL) {
            InflectionClass::Plural
        } else if flags.contains(MorphFlags::SINGULAR) {
            InflectionClass::Singular
        } else if flags.contains(MorphFlags::SUPERLATIVE) {
            InflectionClass::Superlative
        } else if flags.contains(MorphFlags::COMPARATIVE) {
            InflectionClass::Comparative
        } else if flags.contains(MorphFlags::POSITIVE) {
            InflectionClass::Positive
        } else {
            InflectionClass::Form
        }
    }
}

bitflags! {
    /// Grammatical features read off a fine-grained tag or a surface/lemma diff.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct MorphFlags: u32 {
        // Tense / aspect (Bits 0-4)
        const BASE = 1;
        const PRESENT = 2;
        const PAST = 4;
        const PARTICIPLE = 8;
        const GERUND = 16;

        // Person (Bit 5)
        const THIRD_PERSON = 32;

        // Number (Bits 6-7)
        const SINGULAR = 64;
        const PLURAL = 128;

        // Nominal class (Bit 8)
        const PROPER = 256;

        // Degree (Bits 9-11)
        const POSITIVE = 512;
        const COMPARATIVE = 1024;
        const SUPERLATIVE = 2048;
    }
}

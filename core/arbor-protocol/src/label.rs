use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::morphology::InflectionClass;
use crate::token::DepRel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum ClauseKind {
    Main = 0,
    Subordinate = 1,
    Relative = 2,
}

impl ClauseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseKind::Main => "main",
            ClauseKind::Subordinate => "subordinate",
            ClauseKind::Relative => "relative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum PhraseKind {
    NounPhrase = 0,
    VerbPhrase = 1,
    PrepPhrase = 2,
    PhrasalVerb = 3,
    AdjPhrase = 4,
    AdvPhrase = 5,
    /// Wrapper produced by lemma decomposition.
    Inflected = 6,
}

impl PhraseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhraseKind::NounPhrase => "NP",
            PhraseKind::VerbPhrase => "VP",
            PhraseKind::PrepPhrase => "PP",
            PhraseKind::PhrasalVerb => "PV",
            PhraseKind::AdjPhrase => "ADJP",
            PhraseKind::AdvPhrase => "ADVP",
            PhraseKind::Inflected => "INFL",
        }
    }
}

/// The type of a node in the syntactic tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum NodeKind {
    /// Synthetic sentence root.
    Sentence,
    Clause(ClauseKind),
    Phrase(PhraseKind),
    Word,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Sentence => "sentence",
            NodeKind::Clause(_) => "clause",
            NodeKind::Phrase(_) => "phrase",
            NodeKind::Word => "word",
        }
    }

    pub fn is_phrase(&self) -> bool {
        matches!(self, NodeKind::Phrase(_))
    }
}

/// Relation label on the edge from a node to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum EdgeLabel {
    MainClause,
    SubClause,
    RelClause,
    Predicate,
    Fragment,
    Subj,
    Verb,
    Obj,
    IObj,
    Aux,
    Mod,
    Particle,
    Det,
    Poss,
    Num,
    Adj,
    Compound,
    Head,
    Core,
    Prep,
    PObj,
    PComp,
    PrepPhrase,
    Comp,
    Conj,
    Cc,
    Mark,
    Punct,
    Case,
    Appos,
    Part,
    Inflection(InflectionClass),
    Other(String),
}

impl EdgeLabel {
    pub fn as_str(&self) -> &str {
        match self {
            EdgeLabel::MainClause => "main_clause",
            EdgeLabel::SubClause => "sub_clause",
            EdgeLabel::RelClause => "rel_clause",
            EdgeLabel::Predicate => "predicate",
            EdgeLabel::Fragment => "fragment",
            EdgeLabel::Subj => "subj",
            EdgeLabel::Verb => "verb",
            EdgeLabel::Obj => "obj",
            EdgeLabel::IObj => "iobj",
            EdgeLabel::Aux => "aux",
            EdgeLabel::Mod => "mod",
            EdgeLabel::Particle => "particle",
            EdgeLabel::Det => "det",
            EdgeLabel::Poss => "poss",
            EdgeLabel::Num => "num",
            EdgeLabel::Adj => "adj",
            EdgeLabel::Compound => "compound",
            EdgeLabel::Head => "head",
            EdgeLabel::Core => "core",
            EdgeLabel::Prep => "prep",
            EdgeLabel::PObj => "pobj",
            EdgeLabel::PComp => "pcomp",
            EdgeLabel::PrepPhrase => "prep_phrase",
            EdgeLabel::Comp => "comp",
            EdgeLabel::Conj => "conj",
            EdgeLabel::Cc => "cc",
            EdgeLabel::Mark => "mark",
            EdgeLabel::Punct => "punct",
            EdgeLabel::Case => "case",
            EdgeLabel::Appos => "appos",
            EdgeLabel::Part => "part",
            EdgeLabel::Inflection(class) => class.label(),
            EdgeLabel::Other(label) => label.as_str(),
        }
    }

    /// Generic label for a dependent that no phrase rule claims.
    pub fn from_dep(dep: &DepRel) -> Self {
        match dep {
            DepRel::NSubj | DepRel::NSubjPass | DepRel::Expl => EdgeLabel::Subj,
            DepRel::DObj => EdgeLabel::Obj,
            DepRel::IObj | DepRel::Dative => EdgeLabel::IObj,
            DepRel::Attr | DepRel::AComp | DepRel::Oprd | DepRel::XComp => EdgeLabel::Comp,
            DepRel::PObj => EdgeLabel::PObj,
            DepRel::PComp => EdgeLabel::PComp,
            DepRel::Prep => EdgeLabel::PrepPhrase,
            DepRel::Case => EdgeLabel::Case,
            DepRel::Det | DepRel::Predet => EdgeLabel::Det,
            DepRel::Amod => EdgeLabel::Adj,
            DepRel::Advmod | DepRel::NpAdvmod | DepRel::Neg | DepRel::Acl => EdgeLabel::Mod,
            DepRel::Aux | DepRel::AuxPass => EdgeLabel::Aux,
            DepRel::Poss => EdgeLabel::Poss,
            DepRel::NumMod => EdgeLabel::Num,
            DepRel::Compound => EdgeLabel::Compound,
            DepRel::Prt => EdgeLabel::Particle,
            DepRel::Punct => EdgeLabel::Punct,
            DepRel::Cc => EdgeLabel::Cc,
            DepRel::Conj => EdgeLabel::Conj,
            DepRel::Mark => EdgeLabel::Mark,
            DepRel::Appos => EdgeLabel::Appos,
            other => EdgeLabel::Other(String::from(other.as_str())),
        }
    }

    pub fn is_inflection(&self) -> bool {
        matches!(self, EdgeLabel::Inflection(_))
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use alloc::string::{String, ToString};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Universal part-of-speech tag assigned by the external parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum UPos {
    Noun = 0,
    PropN = 1,
    Verb = 2,
    Aux = 3,
    Adj = 4,
    Adv = 5,
    Pron = 6,
    Det = 7,
    Adp = 8,
    Num = 9,
    CConj = 10,
    SConj = 11,
    Part = 12,
    Intj = 13,
    Punct = 14,
    Sym = 15,
    X = 16,
}

impl UPos {
    /// Parses a UPOS tag case-insensitively. Unknown tags map to `X`.
    pub fn parse(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "NOUN" => UPos::Noun,
            "PROPN" => UPos::PropN,
            "VERB" => UPos::Verb,
            "AUX" => UPos::Aux,
            "ADJ" => UPos::Adj,
            "ADV" => UPos::Adv,
            "PRON" => UPos::Pron,
            "DET" => UPos::Det,
            "ADP" => UPos::Adp,
            "NUM" => UPos::Num,
            "CCONJ" | "CONJ" => UPos::CConj,
            "SCONJ" => UPos::SConj,
            "PART" => UPos::Part,
            "INTJ" => UPos::Intj,
            "PUNCT" => UPos::Punct,
            "SYM" => UPos::Sym,
            _ => UPos::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UPos::Noun => "NOUN",
            UPos::PropN => "PROPN",
            UPos::Verb => "VERB",
            UPos::Aux => "AUX",
            UPos::Adj => "ADJ",
            UPos::Adv => "ADV",
            UPos::Pron => "PRON",
            UPos::Det => "DET",
            UPos::Adp => "ADP",
            UPos::Num => "NUM",
            UPos::CConj => "CCONJ",
            UPos::SConj => "SCONJ",
            UPos::Part => "PART",
            UPos::Intj => "INTJ",
            UPos::Punct => "PUNCT",
            UPos::Sym => "SYM",
            UPos::X => "X",
        }
    }

    pub fn is_verbal(&self) -> bool {
        matches!(self, UPos::Verb | UPos::Aux)
    }
}

/// Dependency relation label (ClearNLP / Universal Dependencies flavour).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum DepRel {
    Root,
    NSubj,
    NSubjPass,
    CSubj,
    DObj,
    IObj,
    Dative,
    Attr,
    AComp,
    Oprd,
    PObj,
    PComp,
    Prep,
    Case,
    Det,
    Predet,
    Amod,
    Advmod,
    NpAdvmod,
    Neg,
    Aux,
    AuxPass,
    Poss,
    NumMod,
    Compound,
    Prt,
    Punct,
    Cc,
    Conj,
    Mark,
    CComp,
    XComp,
    AdvCl,
    RelCl,
    Acl,
    Appos,
    Expl,
    Parataxis,
    Other(String),
}

impl DepRel {
    pub fn parse(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "root" => DepRel::Root,
            "nsubj" => DepRel::NSubj,
            "nsubjpass" | "nsubj:pass" => DepRel::NSubjPass,
            "csubj" | "csubjpass" => DepRel::CSubj,
            "dobj" | "obj" => DepRel::DObj,
            "iobj" => DepRel::IObj,
            "dative" => DepRel::Dative,
            "attr" => DepRel::Attr,
            "acomp" => DepRel::AComp,
            "oprd" => DepRel::Oprd,
            "pobj" => DepRel::PObj,
            "pcomp" => DepRel::PComp,
            "prep" => DepRel::Prep,
            "case" => DepRel::Case,
            "det" => DepRel::Det,
            "predet" => DepRel::Predet,
            "amod" => DepRel::Amod,
            "advmod" => DepRel::Advmod,
            "npadvmod" | "obl:npmod" => DepRel::NpAdvmod,
            "neg" => DepRel::Neg,
            "aux" => DepRel::Aux,
            "auxpass" | "aux:pass" => DepRel::AuxPass,
            "poss" | "nmod:poss" => DepRel::Poss,
            "nummod" => DepRel::NumMod,
            "compound" => DepRel::Compound,
            "prt" | "compound:prt" => DepRel::Prt,
            "punct" => DepRel::Punct,
            "cc" => DepRel::Cc,
            "conj" => DepRel::Conj,
            "mark" => DepRel::Mark,
            "ccomp" => DepRel::CComp,
            "xcomp" => DepRel::XComp,
            "advcl" => DepRel::AdvCl,
            "relcl" | "acl:relcl" => DepRel::RelCl,
            "acl" => DepRel::Acl,
            "appos" => DepRel::Appos,
            "expl" => DepRel::Expl,
            "parataxis" => DepRel::Parataxis,
            other => DepRel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DepRel::Root => "ROOT",
            DepRel::NSubj => "nsubj",
            DepRel::NSubjPass => "nsubjpass",
            DepRel::CSubj => "csubj",
            DepRel::DObj => "dobj",
            DepRel::IObj => "iobj",
            DepRel::Dative => "dative",
            DepRel::Attr => "attr",
            DepRel::AComp => "acomp",
            DepRel::Oprd => "oprd",
            DepRel::PObj => "pobj",
            DepRel::PComp => "pcomp",
            DepRel::Prep => "prep",
            DepRel::Case => "case",
            DepRel::Det => "det",
            DepRel::Predet => "predet",
            DepRel::Amod => "amod",
            DepRel::Advmod => "advmod",
            DepRel::NpAdvmod => "npadvmod",
            DepRel::Neg => "neg",
            DepRel::Aux => "aux",
            DepRel::AuxPass => "auxpass",
            DepRel::Poss => "poss",
            DepRel::NumMod => "nummod",
            DepRel::Compound => "compound",
            DepRel::Prt => "prt",
            DepRel::Punct => "punct",
            DepRel::Cc => "cc",
            DepRel::Conj => "conj",
            DepRel::Mark => "mark",
            DepRel::CComp => "ccomp",
            DepRel::XComp => "xcomp",
            DepRel::AdvCl => "advcl",
            DepRel::RelCl => "relcl",
            DepRel::Acl => "acl",
            DepRel::Appos => "appos",
            DepRel::Expl => "expl",
            DepRel::Parataxis => "parataxis",
            DepRel::Other(label) => label.as_str(),
        }
    }

    pub fn is_subject(&self) -> bool {
        matches!(self, DepRel::NSubj | DepRel::NSubjPass | DepRel::Expl)
    }

    pub fn is_auxiliary(&self) -> bool {
        matches!(self, DepRel::Aux | DepRel::AuxPass)
    }

    /// Relations under which a verb governs a clause of its own.
    pub fn heads_clause(&self) -> bool {
        matches!(
            self,
            DepRel::Root
                | DepRel::CComp
                | DepRel::CSubj
                | DepRel::AdvCl
                | DepRel::RelCl
                | DepRel::Acl
                | DepRel::Parataxis
        )
    }

    /// Only an explicit relative-clause relation; plain `acl` stays subordinate.
    pub fn is_relative(&self) -> bool {
        matches!(self, DepRel::RelCl)
    }
}

impl From<&str> for DepRel {
    fn from(label: &str) -> Self {
        DepRel::parse(label)
    }
}

impl fmt::Display for DepRel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One token of the external parser's output. Never mutated after construction.
///
/// `head == index` marks a sentence root.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Token {
    pub index: usize,
    pub text: String,
    pub lemma: String,
    pub pos: UPos,
    /// Fine-grained (Penn Treebank) tag, e.g. `VBD`.
    pub tag: String,
    pub dep: DepRel,
    pub head: usize,
}

impl Token {
    pub fn new(
        index: usize,
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: UPos,
        tag: impl Into<String>,
        dep: DepRel,
        head: usize,
    ) -> Self {
        Self {
            index,
            text: text.into(),
            lemma: lemma.into(),
            pos,
            tag: tag.into(),
            dep,
            head,
        }
    }

    pub fn is_root(&self) -> bool {
        self.head == self.index
    }

    pub fn features(&self) -> TokenFeatures<'_> {
        TokenFeatures::from(self)
    }
}

/// Derived, read-only classification of a token.
#[derive(Debug, Clone, Copy)]
pub struct TokenFeatures<'a> {
    pub token: &'a Token,
    pub is_content_word: bool,
    pub is_function_word: bool,
    pub is_punctuation: bool,
}

impl<'a> From<&'a Token> for TokenFeatures<'a> {
    fn from(token: &'a Token) -> Self {
        let is_punctuation = matches!(token.pos, UPos::Punct | UPos::Sym)
            || (!token.text.is_empty() && token.text.chars().all(|c| c.is_ascii_punctuation()));

        let is_content_word = !is_punctuation
            && matches!(
                token.pos,
                UPos::Noun | UPos::PropN | UPos::Verb | UPos::Adj | UPos::Adv | UPos::Num
            );

        Self {
            token,
            is_content_word,
            is_function_word: !is_content_word && !is_punctuation,
            is_punctuation,
        }
    }
}

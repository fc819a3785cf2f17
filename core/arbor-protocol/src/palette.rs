//! Static display colours for the rendering layer. Nothing here is computed from data.

use crate::label::{EdgeLabel, NodeKind};

/// Colour for a node type. Words are coloured by their tag instead.
pub fn node_color(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Sentence => Some("#FFD700"),
        NodeKind::Clause(_) => Some("#87CEEB"),
        NodeKind::Phrase(_) => Some("#DDA0DD"),
        NodeKind::Word => None,
    }
}

pub fn edge_color(label: &EdgeLabel) -> &'static str {
    match label {
        EdgeLabel::MainClause => "#87CEFA",
        EdgeLabel::SubClause => "#95E1D3",
        EdgeLabel::RelClause => "#4ECDC4",
        EdgeLabel::Predicate | EdgeLabel::Verb => "#FFD93D",
        EdgeLabel::Subj => "#FF8B94",
        EdgeLabel::Obj | EdgeLabel::IObj => "#6BCB77",
        EdgeLabel::Mod => "#BB8FCE",
        EdgeLabel::Adj => "#F7DC6F",
        EdgeLabel::Prep => "#F8C471",
        EdgeLabel::Det => "#85C1E2",
        EdgeLabel::Aux => "#ABEBC6",
        EdgeLabel::Head => "#4169E1",
        EdgeLabel::PrepPhrase => "#FF7F50",
        EdgeLabel::PObj => "#00CED1",
        EdgeLabel::Num => "#FF69B4",
        EdgeLabel::Poss => "#9370DB",
        EdgeLabel::Compound => "#20B2AA",
        EdgeLabel::Particle => "#DDA0DD",
        EdgeLabel::Part => "#F0E68C",
        EdgeLabel::Inflection(_) => "#FFB347",
        _ => "#B4B4B4",
    }
}

/// Word colour keyed on the Penn Treebank tag.
pub fn tag_color(tag: &str) -> &'static str {
    if tag.starts_with("NN") {
        "#FFB6C1"
    } else if tag.starts_with("VB") {
        "#98D8C8"
    } else if tag.starts_with("JJ") {
        "#F7DC6F"
    } else if tag.starts_with("RB") {
        "#BB8FCE"
    } else if matches!(tag, "DT" | "PRP" | "PRP$" | "WDT" | "WP" | "WP$") {
        "#85C1E2"
    } else if matches!(tag, "IN" | "TO") {
        "#F8C471"
    } else if tag == "CC" {
        "#ABEBC6"
    } else {
        "#D5D8DC"
    }
}

//! Closed word lists shared by phrase building, normalization and sense selection.

/// Words that can act as phrasal-verb particles.
pub const PARTICLES: &[&str] = &[
    "up", "down", "out", "off", "on", "in", "over", "away", "back", "through", "around", "along",
    "across", "by",
];

/// Verb lemma -> particles it forms a phrasal verb with, even when the parser
/// tagged the particle as a preposition.
pub const PHRASAL_PATTERNS: &[(&str, &[&str])] = &[
    ("look", &["up", "over", "into", "after"]),
    ("run", &["over", "into", "down", "up"]),
    ("turn", &["on", "off", "over", "down"]),
    ("take", &["over", "off", "out", "up"]),
    ("put", &["on", "off", "up", "down"]),
    ("get", &["up", "down", "over", "off"]),
    ("knock", &["over", "down", "out"]),
];

/// Definition cues for a particle used aspectually ("eat up").
pub const ASPECTUAL_CUES: &[&str] = &["thoroughly", "completely", "finished"];

/// Definition cues for a spatial preposition/adverb reading.
pub const SPATIAL_CUES: &[&str] = &["across", "above", "beyond", "position", "location", "space"];

pub fn is_particle(word: &str) -> bool {
    PARTICLES.iter().any(|p| p.eq_ignore_ascii_case(word))
}

pub fn is_phrasal_pair(verb_lemma: &str, particle: &str) -> bool {
    PHRASAL_PATTERNS.iter().any(|(verb, particles)| {
        verb.eq_ignore_ascii_case(verb_lemma) && particles.iter().any(|p| p.eq_ignore_ascii_case(particle))
    })
}

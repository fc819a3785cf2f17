use arbor_protocol::{is_particle, SenseId, SimplePos, Token, UPos, ASPECTUAL_CUES, SPATIAL_CUES};

use crate::repository::{SenseCandidate, SenseRepository};

/// What the tree says about a word's surroundings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenseContext {
    /// The particle of the phrasal verb this word is the verb of.
    pub particle: Option<String>,
    /// The word is itself a phrasal-verb particle.
    pub is_particle: bool,
}

/// POS to look a token up under. Prepositions from the particle set are read as adverbs.
pub fn lookup_pos(token: &Token) -> Option<SimplePos> {
    SimplePos::from_upos(token.pos).or_else(|| {
        (matches!(token.pos, UPos::Adp | UPos::Part) && is_particle(&token.lemma)).then_some(SimplePos::Adverb)
    })
}

fn mentions(definition: &str, word: &str) -> bool {
    definition
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| w.eq_ignore_ascii_case(word))
}

/// Drops technical senses unless nothing else is left.
fn prefer_common(senses: Vec<SenseCandidate>) -> Vec<SenseCandidate> {
    if senses.iter().any(|s| !s.technical) {
        senses.into_iter().filter(|s| !s.technical).collect()
    } else {
        senses
    }
}

/// Best sense for `token`, or `None` when the repository has nothing for it.
pub fn select_sense(
    repository: &dyn SenseRepository,
    token: &Token,
    context: &SenseContext,
) -> Option<SenseCandidate> {
    let pos = lookup_pos(token)?;
    let lemma = token.lemma.to_lowercase();

    if let (Some(particle), SimplePos::Verb) = (context.particle.as_deref(), pos) {
        let unit = format!("{}_{}", lemma, particle.to_lowercase());
        if let Some(sense) = prefer_common(repository.lookup(&unit, SimplePos::Verb)).into_iter().next() {
            return Some(sense);
        }
    }

    let mut senses = prefer_common(repository.lookup(&lemma, pos));

    if let Some(particle) = context.particle.as_deref() {
        let consistent: Vec<SenseCandidate> = senses
            .iter()
            .filter(|s| mentions(&s.definition, particle))
            .cloned()
            .collect();
        if !consistent.is_empty() {
            senses = consistent;
        }
    }

    if is_particle(&lemma) {
        let cues = if context.is_particle { ASPECTUAL_CUES } else { SPATIAL_CUES };
        if let Some(sense) = senses.iter().find(|s| cues.iter().any(|c| mentions(&s.definition, c))) {
            return Some(sense.clone());
        }
    }

    senses.into_iter().next()
}

pub fn disambiguate(repository: &dyn SenseRepository, token: &Token, context: &SenseContext) -> Option<SenseId> {
    select_sense(repository, token, context).map(|s| s.id)
}

use arbor_ecs::systems::Pass;
use serde::{Deserialize, Serialize};

/// What to do when the head links of a sentence contain a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Return a flat tree.
    #[default]
    Fallback,
    /// Return the `CyclicDependency` error.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub group_objects: bool,
    pub reinterpret_phrasal_verbs: bool,
    pub relocate_punctuation: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            group_objects: true,
            reinterpret_phrasal_verbs: true,
            relocate_punctuation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub decompose_lemmas: bool,
    pub disambiguate_senses: bool,
    pub cycle_policy: CyclePolicy,
    pub normalizer: NormalizerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            decompose_lemmas: false,
            disambiguate_senses: true,
            cycle_policy: CyclePolicy::Fallback,
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Enabled normalizer passes, in the order they run.
    pub fn passes(&self) -> Vec<Pass> {
        let mut passes = Vec::with_capacity(4);
        if self.normalizer.group_objects {
            passes.push(Pass::GroupObjects);
        }
        if self.normalizer.reinterpret_phrasal_verbs {
            passes.push(Pass::ReinterpretPhrasalVerbs);
        }
        if self.normalizer.relocate_punctuation {
            passes.push(Pass::RelocatePunctuation);
        }
        if self.decompose_lemmas {
            passes.push(Pass::DecomposeLemmas);
        }
        passes
    }
}

use arbor_assembler::{analyze_document, DocumentReport, PipelineConfig};
use arbor_protocol::{palette, ClauseKind, NodeKind, PhraseKind};
use arbor_senses::LexiconArchive;
use rkyv::AlignedVec;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// The structured response sent back to JavaScript
#[derive(Serialize)]
pub struct EngineReport {
    pub lexicon_version: u32,
    #[serde(flatten)]
    pub document: DocumentReport,
}

#[derive(Serialize)]
pub struct Legend {
    pub sentence: &'static str,
    pub clause: &'static str,
    pub phrase: &'static str,
}

/// The engine instance running in the browser
#[wasm_bindgen]
pub struct ArborEngine {
    // Owned copy of the sense lexicon archive, aligned for zero-copy reads
    data: AlignedVec,
    config: PipelineConfig,
}

impl ArborEngine {
    fn archive(&self) -> Result<LexiconArchive<'_>, JsValue> {
        LexiconArchive::from_bytes(&self.data).map_err(to_js)
    }

    /// Analysis without the JS conversion.
    pub fn report(&self, conll: &str) -> Result<EngineReport, JsValue> {
        let archive = self.archive()?;
        let document = analyze_document(conll, &archive, &self.config).map_err(to_js)?;
        Ok(EngineReport {
            lexicon_version: archive.version(),
            document,
        })
    }
}

#[wasm_bindgen]
impl ArborEngine {
    /// Takes the lexicon bytes (loaded via fetch() in JS) and validates them once.
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<ArborEngine, JsValue> {
        let mut aligned = AlignedVec::with_capacity(data.len());
        aligned.extend_from_slice(&data);
        let engine = Self {
            data: aligned,
            config: PipelineConfig::default(),
        };
        engine.archive()?;
        Ok(engine)
    }

    /// Replaces the pipeline configuration from a JSON object; missing fields keep their defaults.
    pub fn configure(&mut self, json: &str) -> Result<(), JsValue> {
        self.config = PipelineConfig::from_json(json).map_err(to_js)?;
        Ok(())
    }

    /// CoNLL-U -> trees -> JSON
    pub fn analyze(&self, conll: &str) -> Result<JsValue, JsValue> {
        let report = self.report(conll)?;
        serde_wasm_bindgen::to_value(&report).map_err(JsValue::from)
    }

    /// Colours of the non-word node kinds, for the renderer's legend.
    pub fn legend(&self) -> Result<JsValue, JsValue> {
        let color = |kind| palette::node_color(kind).unwrap_or_default();
        let legend = Legend {
            sentence: color(NodeKind::Sentence),
            clause: color(NodeKind::Clause(ClauseKind::Main)),
            phrase: color(NodeKind::Phrase(PhraseKind::NounPhrase)),
        };
        serde_wasm_bindgen::to_value(&legend).map_err(JsValue::from)
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::{LexEntry, Lexicon, Sense, SenseId, SimplePos};

    fn lexicon_bytes() -> Vec<u8> {
        let lexicon = Lexicon {
            version: 3,
            entries: vec![LexEntry {
                lemma: "cat".to_string(),
                pos: SimplePos::Noun,
                senses: vec![Sense {
                    id: SenseId::new(1),
                    name: "cat.n.01".to_string(),
                    definition: "feline mammal".to_string(),
                    frequency: 18,
                    technical: false,
                }],
            }],
        };
        rkyv::to_bytes::<_, 256>(&lexicon).unwrap().to_vec()
    }

    #[test]
    fn test_report_uses_the_archive() {
        let engine = ArborEngine::new(lexicon_bytes()).unwrap();
        let report = engine
            .report("1\tcat\tcat\tNOUN\tNN\t_\t0\tROOT\t_\t_\n")
            .unwrap();
        assert_eq!(report.lexicon_version, 3);
        assert_eq!(report.document.sentences.len(), 1);

        let tree = &report.document.sentences[0].tree;
        let word = &tree.children[0].children[0];
        assert_eq!(word.sense.as_deref(), Some("cat.n.01"));
    }
}

//! Text encoders for semantic matching.

use std::collections::HashMap;

use rv_core::{Embedding, EntityKind, World};

use crate::command::CommandKind;
use crate::lexer::tokenize;
use crate::lexicon;

/// Encodes text into vectors and compares them.
pub trait SemanticScorer {
    /// Fingerprint stored next to pre-computed vectors. Vectors from a
    /// different model are recomputed.
    fn model_id(&self) -> &str;

    /// Encode a word or short phrase.
    fn encode(&self, text: &str) -> Embedding;

    /// Similarity in `[-1, 1]`.
    fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        a.cosine(b)
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Extra weight of the last content word, the head of an English noun phrase.
const HEAD_WEIGHT: f32 = 1.5;

/// Slot shared by every word outside the vocabulary.
const UNKNOWN_SLOT: usize = 0;

/// Bag-of-words over a closed vocabulary.
///
/// Every known content word owns one dimension, so two different words never
/// share a feature. Words outside the vocabulary all add to
/// [`UNKNOWN_SLOT`], which no vocabulary phrase ever touches: an unknown word
/// dilutes a query without matching anything. The last word counts
/// [`HEAD_WEIGHT`] so that "key" sits closer to "golden key" than
/// "golden key" sits to "silver key". Vectors are L2-normalised; text with no
/// content words encodes to the zero vector, which is similar to nothing.
#[derive(Debug, Clone)]
pub struct VocabularyEncoder {
    index: HashMap<String, usize>,
    model_id: String,
}

impl VocabularyEncoder {
    /// An encoder knowing the content words of `phrases`.
    ///
    /// The model id fingerprints the vocabulary, so vectors stored for one
    /// vocabulary are recomputed under another.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = HashMap::new();
        let mut fingerprint = FNV_OFFSET;
        for phrase in phrases {
            for word in content_words(phrase.as_ref()) {
                if index.contains_key(&word) {
                    continue;
                }
                fingerprint = fnv1a(fingerprint, word.as_bytes());
                fingerprint = fnv1a(fingerprint, b"\n");
                let slot = index.len() + 1;
                index.insert(word, slot);
            }
        }
        let model_id = format!("vocab-{}-{fingerprint:016x}-v1", index.len());
        Self { index, model_id }
    }

    /// Command synonyms plus the names of every location and item in `world`.
    pub fn for_world(world: &World) -> Self {
        let synonyms = CommandKind::ALL
            .into_iter()
            .flat_map(|kind| kind.synonyms().iter().copied());
        let names = world
            .all_entities()
            .filter(|e| e.kind != EntityKind::Player)
            .map(|e| e.name.as_str());
        Self::new(synonyms.chain(names))
    }

    /// Vector length: one slot per known word plus the unknown slot.
    pub fn dimensions(&self) -> usize {
        self.index.len() + 1
    }
}

impl SemanticScorer for VocabularyEncoder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn encode(&self, text: &str) -> Embedding {
        let mut values = vec![0.0f32; self.dimensions()];
        let words = content_words(text);

        let last = words.len().saturating_sub(1);
        for (i, word) in words.iter().enumerate() {
            let weight = if i == last { HEAD_WEIGHT } else { 1.0 };
            let slot = self.index.get(word).copied().unwrap_or(UNKNOWN_SLOT);
            values[slot] += weight;
        }

        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut values {
                *v /= norm;
            }
        }
        Embedding::new(values)
    }
}

fn content_words(text: &str) -> Vec<String> {
    tokenize(text)
        .iter()
        .filter_map(|t| t.as_word())
        .filter(|w| !lexicon::is_stopword(w))
        .map(str::to_string)
        .collect()
}

fn fnv1a(seed: u64, bytes: &[u8]) -> u64 {
    bytes.iter().fold(seed, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

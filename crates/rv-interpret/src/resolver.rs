//! Threshold and cardinality policy over scored candidates.

use rv_core::Embedding;
use strsim::jaro_winkler;

use crate::scorer::SemanticScorer;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Something a query can resolve to, with its reference vectors.
#[derive(Debug, Clone)]
pub struct Labeled<K> {
    /// Caller-defined identity.
    pub key: K,
    /// Display name.
    pub name: String,
    /// Reference vectors. The candidate scores the best of them.
    pub vectors: Vec<Embedding>,
}

/// A labeled value paired with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<K> {
    /// Caller-defined identity.
    pub key: K,
    /// Display name.
    pub name: String,
    /// Similarity to the query.
    pub score: f32,
}

/// Outcome of resolving a query against a candidate set.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<K> {
    /// Exactly one candidate cleared the threshold.
    Resolved(Candidate<K>),
    /// Nothing cleared the threshold.
    NoMatch,
    /// Several candidates cleared the threshold, best first.
    Ambiguous(Vec<Candidate<K>>),
}

/// Score every labeled value against `query` and keep those at or above
/// `threshold`, best first. Equal scores keep their input order.
pub fn rank<K: Clone>(
    scorer: &dyn SemanticScorer,
    query: &Embedding,
    labeled: &[Labeled<K>],
    threshold: f32,
) -> Vec<Candidate<K>> {
    let mut candidates: Vec<Candidate<K>> = labeled
        .iter()
        .filter_map(|l| {
            let score = l
                .vectors
                .iter()
                .map(|v| scorer.similarity(query, v))
                .fold(f32::NEG_INFINITY, f32::max);
            (score >= threshold).then(|| Candidate {
                key: l.key.clone(),
                name: l.name.clone(),
                score,
            })
        })
        .collect();
    // sort_by is stable
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}

/// Rank, then apply the cardinality policy.
pub fn resolve<K: Clone>(
    scorer: &dyn SemanticScorer,
    query: &Embedding,
    labeled: &[Labeled<K>],
    threshold: f32,
) -> Resolution<K> {
    let mut ranked = rank(scorer, query, labeled, threshold);
    match ranked.len() {
        0 => Resolution::NoMatch,
        1 => Resolution::Resolved(ranked.remove(0)),
        _ => Resolution::Ambiguous(ranked),
    }
}

/// Names that look like a misspelling of `input`, most similar first.
///
/// Each name is compared whole and by its last word, so "lanter" finds
/// "lantern" and "kee" finds "golden key".
pub fn suggest_names<'a>(
    input: &str,
    names: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<String> {
    let input = input.to_lowercase();
    let mut scored: Vec<(String, f64)> = Vec::new();
    for name in names {
        let lower = name.to_lowercase();
        let head = lower.rsplit(' ').next().unwrap_or(&lower);
        let score = jaro_winkler(&input, &lower).max(jaro_winkler(&input, head));
        if score >= SUGGESTION_THRESHOLD && !scored.iter().any(|(n, _)| n == name) {
            scored.push((name.to_string(), score));
        }
    }
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().take(limit).map(|(name, _)| name).collect()
}

//! English word lists shared by the front-end and the vocabulary encoder.

use crate::command::CommandKind;

/// Articles, particles, pronouns and politeness words carrying no meaning
/// for command interpretation.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "to", "toward", "towards", "at", "into", "in", "inside", "on", "onto", "up",
    "down", "out", "of", "from", "with", "my", "your", "his", "her", "its", "this", "that",
    "these", "those", "some", "please", "i", "me", "you", "it", "let", "lets", "now", "then",
];

/// Modal and auxiliary verbs that may precede the real verb.
const AUXILIARIES: &[&str] = &[
    "want", "would", "like", "will", "shall", "can", "could", "should", "must", "try", "need",
];

/// Verbs the game recognizes but does not act on yet.
const RESERVED_VERBS: &[&str] = &["use", "read", "talk", "speak", "look", "open"];

const IRREGULAR: &[(&str, &str)] = &[
    ("went", "go"),
    ("gone", "go"),
    ("goes", "go"),
    ("took", "take"),
    ("taken", "take"),
    ("got", "get"),
    ("gotten", "get"),
    ("ran", "run"),
    ("left", "leave"),
    ("spoke", "speak"),
    ("spoken", "speak"),
];

/// True for words filtered out before matching.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// True for modal verbs like "want" or "could".
pub fn is_auxiliary(word: &str) -> bool {
    AUXILIARIES.contains(&word)
}

/// True for verbs in the command vocabulary or reserved for later commands.
pub fn is_known_verb(word: &str) -> bool {
    RESERVED_VERBS.contains(&word)
        || CommandKind::ALL
            .iter()
            .any(|kind| kind.synonyms().contains(&word))
}

/// Reduce an inflected verb to its dictionary form.
///
/// Irregular forms come from a fixed table. Regular forms are found by
/// stripping `-s`, `-es`, `-ed`, `-d` and `-ing` and keeping the first stem
/// the lexicon knows. Unknown words come back unchanged.
pub fn lemmatize(word: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR.iter().find(|(form, _)| *form == word) {
        return (*lemma).to_string();
    }
    if is_known_verb(word) {
        return word.to_string();
    }
    stems(word)
        .into_iter()
        .find(|stem| is_known_verb(stem))
        .unwrap_or_else(|| word.to_string())
}

fn stems(word: &str) -> Vec<String> {
    let mut out = Vec::new();
    for suffix in ["ing", "ed", "es", "s", "d"] {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        if stem.len() < 2 {
            continue;
        }
        out.push(stem.to_string());
        if suffix == "ing" {
            out.push(format!("{stem}e"));
        }
        if let Some(single) = undouble(stem) {
            out.push(single);
        }
    }
    out
}

/// `dropp` -> `drop`, `grabb` -> `grab`.
fn undouble(stem: &str) -> Option<String> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let before = chars.next()?;
    if last == before && !"aeiou".contains(last) {
        let mut single = stem.to_string();
        single.pop();
        Some(single)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_forms() {
        assert_eq!(lemmatize("went"), "go");
        assert_eq!(lemmatize("took"), "take");
        assert_eq!(lemmatize("left"), "leave");
    }

    #[test]
    fn regular_suffixes() {
        assert_eq!(lemmatize("walking"), "walk");
        assert_eq!(lemmatize("grabbed"), "grab");
        assert_eq!(lemmatize("dropping"), "drop");
        assert_eq!(lemmatize("moved"), "move");
        assert_eq!(lemmatize("fetches"), "fetch");
        assert_eq!(lemmatize("takes"), "take");
        assert_eq!(lemmatize("taking"), "take");
    }

    #[test]
    fn base_forms_and_unknown_words_unchanged() {
        assert_eq!(lemmatize("go"), "go");
        assert_eq!(lemmatize("dance"), "dance");
        assert_eq!(lemmatize("dancing"), "dancing");
    }

    #[test]
    fn reserved_verbs_are_known() {
        assert!(is_known_verb("read"));
        assert!(is_known_verb("look"));
        assert!(!is_known_verb("juggle"));
    }

    #[test]
    fn stopwords_and_auxiliaries() {
        assert!(is_stopword("the"));
        assert!(!is_stopword("key"));
        assert!(is_auxiliary("want"));
    }
}

//! Natural-language front-end: raw sentence to verb and noun phrase.

use crate::lexer::tokenize;
use crate::lexicon;

/// What the front-end understood of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// Dictionary form of the main verb.
    pub verb: Option<String>,
    /// The object noun phrase, adjectives included ("golden key").
    pub noun: Option<String>,
    /// The input as typed.
    pub raw: String,
}

impl ParseResult {
    /// Both verb and noun, if the sentence yielded both.
    pub fn verb_and_noun(&self) -> Option<(&str, &str)> {
        Some((self.verb.as_deref()?, self.noun.as_deref()?))
    }
}

/// Turns a sentence into a [`ParseResult`]. Must be deterministic.
pub trait LanguageFrontEnd {
    /// Analyze one line of input.
    fn analyze(&self, input: &str) -> ParseResult;
}

/// Rule-based English front-end.
///
/// Stopwords and particles are dropped, leading modal verbs are skipped, the
/// first remaining word is the verb and the rest form the noun phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleFrontEnd;

impl LanguageFrontEnd for RuleFrontEnd {
    fn analyze(&self, input: &str) -> ParseResult {
        let tokens = tokenize(input);
        let mut content: Vec<&str> = tokens
            .iter()
            .filter_map(|t| t.as_word())
            .filter(|w| !lexicon::is_stopword(w))
            .collect();

        // "want go tavern" -> "go tavern"
        while content.len() > 1 && lexicon::is_auxiliary(content[0]) {
            content.remove(0);
        }

        let mut words = content.into_iter();
        let verb = words.next().map(lexicon::lemmatize);
        let rest: Vec<&str> = words.collect();
        let noun = (!rest.is_empty()).then(|| rest.join(" "));

        ParseResult {
            verb,
            noun,
            raw: input.to_string(),
        }
    }
}

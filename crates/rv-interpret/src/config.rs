//! Configuration for an interpreter.

/// Knobs of the interpretation loop. Match thresholds are fixed and not
/// part of this.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Inputs that end the session while no menu is open (case-insensitive).
    pub quit_words: Vec<String>,
    /// Maximum "did you mean" names after an unmatched object.
    pub suggestion_limit: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            quit_words: vec!["quit".into(), "exit".into(), "q".into()],
            suggestion_limit: 3,
        }
    }
}

impl InterpreterConfig {
    /// Replace the quit sentinels.
    pub fn with_quit_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quit_words = words.into_iter().map(|w| w.into().to_lowercase()).collect();
        self
    }

    /// Set the suggestion limit. Zero disables suggestions.
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// True if `input` is a quit sentinel.
    pub fn is_quit(&self, input: &str) -> bool {
        let input = input.trim().to_lowercase();
        self.quit_words.iter().any(|w| *w == input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = InterpreterConfig::default();
        assert!(cfg.is_quit("quit"));
        assert!(cfg.is_quit("  EXIT "));
        assert!(cfg.is_quit("q"));
        assert!(!cfg.is_quit("go"));
        assert_eq!(cfg.suggestion_limit, 3);
    }

    #[test]
    fn builder_methods() {
        let cfg = InterpreterConfig::default()
            .with_quit_words(["Beenden"])
            .with_suggestion_limit(0);
        assert!(cfg.is_quit("beenden"));
        assert!(!cfg.is_quit("quit"));
        assert_eq!(cfg.suggestion_limit, 0);
    }
}

use logos::Logos;

/// A token of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A lowercased word, apostrophes and inner hyphens kept (`don't`, `well-worn`).
    Word(String),
    /// A run of digits.
    Number(String),
    /// A single punctuation mark.
    Punct(char),
}

impl Token {
    /// The word text, if this token is a word.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }
}

#[derive(Logos, Debug)]
#[logos(skip r"\s+")]
enum RawToken {
    #[regex(r"\p{L}[\p{L}\p{N}'-]*")]
    Word,

    #[regex(r"\p{N}+")]
    Number,

    #[regex(r"[.,;:!?]")]
    Punct,
}

/// Split one line of input into tokens.
///
/// Characters that fit no token (stray symbols, emoji) are dropped.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = RawToken::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        match result {
            Ok(RawToken::Word) => tokens.push(Token::Word(
                slice.trim_end_matches(['\'', '-']).to_lowercase(),
            )),
            Ok(RawToken::Number) => tokens.push(Token::Number(slice.to_string())),
            Ok(RawToken::Punct) => {
                if let Some(c) = slice.chars().next() {
                    tokens.push(Token::Punct(c));
                }
            }
            Err(()) => tracing::trace!(skipped = slice, "unlexable input"),
        }
    }
    tokens
}

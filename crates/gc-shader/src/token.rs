//! Format-preserving tokenizer
//!
//! Source text is split into a flat list of fragments: maximal runs of word
//! characters, and every other character (punctuation, whitespace, newlines)
//! as its own single-character token. No token carries a semantic tag; rules
//! classify tokens by comparing their text.

use std::fmt;

/// A fragment of shader source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
}

/// Ordered token list owned by a single translation
pub type TokenSequence = Vec<Token>;

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Replace the token text in place
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Any whitespace character, newlines included
    pub fn is_whitespace(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_whitespace)
    }

    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }

    /// Whitespace that does not end a line
    pub fn is_inline_space(&self) -> bool {
        self.is_whitespace() && !self.is_newline()
    }

    pub fn is_number(&self) -> bool {
        !self.text.is_empty() && self.text.bytes().all(|b| b.is_ascii_digit())
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Identifier characters. `_` must be included so built-ins such as
/// `gl_FragColor` come out as one token.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `source` into tokens. Joining the result reproduces `source` exactly.
pub fn tokenize(source: &str) -> TokenSequence {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let mut end = start + c.len_utf8();

        if is_word_char(c) {
            while let Some(&(idx, next)) = chars.peek() {
                if !is_word_char(next) {
                    break;
                }
                end = idx + next.len_utf8();
                chars.next();
            }
        }

        tokens.push(Token::new(&source[start..end]));
    }

    tokens
}

/// 1-based source line of the token at `index`
pub fn line_of(tokens: &[Token], index: usize) -> usize {
    let end = index.min(tokens.len());
    1 + tokens[..end].iter().filter(|t| t.is_newline()).count()
}

/// Index of the next token at or after `from` that is not inline whitespace
pub fn skip_inline_space(tokens: &[Token], from: usize) -> usize {
    let mut i = from;
    while i < tokens.len() && tokens[i].is_inline_space() {
        i += 1;
    }
    i
}

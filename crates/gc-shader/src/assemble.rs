//! Reassembly of rewritten token sequences

use crate::token::Token;

/// Concatenate token texts in order with no separators
pub fn join(tokens: &[Token]) -> String {
    let len = tokens.iter().map(|t| t.as_str().len()).sum();
    let mut out = String::with_capacity(len);
    for token in tokens {
        out.push_str(token.as_str());
    }
    out
}

/// Join `tokens` with `preamble` spliced in before the token at `insert_at`.
///
/// `insert_at` past the end appends the preamble on a fresh line.
pub fn assemble(tokens: &[Token], preamble: &str, insert_at: usize) -> String {
    let split = insert_at.min(tokens.len());
    let (head, tail) = tokens.split_at(split);

    let mut out = String::with_capacity(preamble.len() + tokens.len() * 4);
    for token in head {
        out.push_str(token.as_str());
    }
    if !preamble.is_empty() {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(preamble);
    }
    for token in tail {
        out.push_str(token.as_str());
    }
    out
}

/// Splice point for the preamble: the start of the line after the `#version`
/// directive containing `version_at`, or the start of the source.
pub fn preamble_position(tokens: &[Token], version_at: Option<usize>) -> usize {
    match version_at {
        Some(at) => tokens[at..]
            .iter()
            .position(Token::is_newline)
            .map(|offset| at + offset + 1)
            .unwrap_or(tokens.len()),
        None => 0,
    }
}

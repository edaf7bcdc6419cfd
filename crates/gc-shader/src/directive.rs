//! Preprocessor directive handling
//!
//! Only `#version` is rewritten. Every other directive (`#define`, `#ifdef`,
//! `#extension`, ...) passes through untouched.

use gc_core::TranslateError;

use crate::token::{line_of, skip_inline_space, Token};

/// Profile names that may follow the version number
const PROFILES: [&str; 3] = ["core", "compatibility", "es"];

/// Rewrite the directive introduced by the `#` token at `cursor`.
///
/// Returns `Ok(Some(index))` with the index of the rewritten version number,
/// where the caller resumes scanning, or `Ok(None)` when the directive is not
/// a `#version` declaration.
pub fn rewrite_directive(
    tokens: &mut [Token],
    cursor: usize,
    version: &str,
) -> Result<Option<usize>, TranslateError> {
    let keyword = skip_inline_space(tokens, cursor + 1);
    let Some(token) = tokens.get(keyword) else {
        return Ok(None);
    };

    if *token != "version" {
        // `#version120` tokenizes as a single word
        if is_fused_version(token.as_str()) {
            let line = line_of(tokens, keyword);
            tracing::warn!("Malformed #version directive on line {}", line);
            return Err(TranslateError::MalformedDirective { line });
        }
        return Ok(None);
    }

    let line = line_of(tokens, keyword);
    let separator = keyword + 1;
    match tokens.get(separator) {
        None => return Err(truncated(line)),
        Some(t) if t.is_newline() => return Err(truncated(line)),
        Some(t) if !t.is_whitespace() => {
            tracing::warn!("#version needs a space before the number on line {}", line);
            return Err(TranslateError::MalformedDirective { line });
        }
        Some(_) => {}
    }

    let number = skip_inline_space(tokens, separator);
    match tokens.get(number) {
        None => return Err(truncated(line)),
        Some(t) if t.is_newline() => return Err(truncated(line)),
        Some(t) if !t.is_number() => {
            tracing::warn!("#version is followed by `{}` on line {}", t, line);
            return Err(TranslateError::MalformedDirective { line });
        }
        Some(_) => {}
    }

    tracing::trace!("Rewriting #version {} -> {}", tokens[number], version);
    tokens[number].set(version);
    drop_profile(tokens, number + 1);

    Ok(Some(number))
}

fn truncated(line: usize) -> TranslateError {
    tracing::warn!("#version directive on line {} has no version number", line);
    TranslateError::TruncatedDirective { line }
}

fn is_fused_version(word: &str) -> bool {
    word.strip_prefix("version")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Blank a profile name trailing the version number, since the replacement
/// text already carries the target profile.
fn drop_profile(tokens: &mut [Token], from: usize) {
    let profile = skip_inline_space(tokens, from);
    let Some(token) = tokens.get(profile) else {
        return;
    };
    if profile == from || !PROFILES.contains(&token.as_str()) {
        return;
    }
    for token in &mut tokens[from..=profile] {
        token.set("");
    }
}

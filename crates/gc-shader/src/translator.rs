//! Single-pass rewrite engine
//!
//! A translation tokenizes the source, walks the tokens once from left to
//! right applying the rules enabled by the target dialect, then joins the
//! tokens back together with the dialect preamble spliced in.

use gc_core::config::{OutputPlacement, TranslateConfig, DEFAULT_OUTPUT_VARIABLE};
use gc_core::TranslateError;

use crate::assemble::{assemble, preamble_position};
use crate::dialect::{output_declaration, DialectTarget, Preamble, Rules};
use crate::directive::rewrite_directive;
use crate::stage::ShaderStage;
use crate::token::{line_of, skip_inline_space, tokenize, Token, TokenSequence};

/// Settings for a [`Translator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    pub target: DialectTarget,
    /// Identifier that replaces `gl_FragColor`
    pub output_variable: String,
    pub output_placement: OutputPlacement,
    /// Emit the version pragma and dialect define
    pub emit_header: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            target: DialectTarget::default(),
            output_variable: DEFAULT_OUTPUT_VARIABLE.to_string(),
            output_placement: OutputPlacement::default(),
            emit_header: true,
        }
    }
}

impl From<&TranslateConfig> for TranslateOptions {
    fn from(config: &TranslateConfig) -> Self {
        Self {
            target: config.target.into(),
            output_variable: config.output_variable.clone(),
            output_placement: config.output_placement,
            emit_header: config.emit_header,
        }
    }
}

impl TranslateOptions {
    pub fn for_target(target: DialectTarget) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }
}

/// What the rule set does with the token under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Directive,
    Rename(&'static str),
    FragColor,
    Unsupported,
    MainSignature,
    Keep,
}

/// Comment context of the token under the cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Comment {
    #[default]
    Code,
    Line,
    /// The `*` of an opening `/*`
    BlockOpen,
    Block,
    /// The `/` of a closing `*/`
    BlockClose,
}

impl Comment {
    /// Step onto the token at `i`; true when that token is part of a comment
    fn advance(&mut self, tokens: &[Token], i: usize) -> bool {
        let token = &tokens[i];
        let next = tokens.get(i + 1);
        match *self {
            Comment::Code => {
                if *token == "/" && next.is_some_and(|t| *t == "/") {
                    *self = Comment::Line;
                } else if *token == "/" && next.is_some_and(|t| *t == "*") {
                    *self = Comment::BlockOpen;
                } else {
                    return false;
                }
            }
            Comment::Line => {
                if token.is_newline() {
                    *self = Comment::Code;
                }
            }
            Comment::BlockOpen => *self = Comment::Block,
            Comment::Block => {
                if *token == "*" && next.is_some_and(|t| *t == "/") {
                    *self = Comment::BlockClose;
                }
            }
            Comment::BlockClose => *self = Comment::Code,
        }
        true
    }
}

/// Positions recorded during the pass
#[derive(Debug, Default)]
struct PassState {
    comment: Comment,
    /// Rewritten `#version` number
    version_at: Option<usize>,
    /// `void` of the first `void main(` signature
    main_at: Option<usize>,
    /// Number of `void main(` signatures outside comments
    main_count: usize,
    /// First `gl_FragColor` reference
    first_output: Option<usize>,
}

/// Translates shader stages into one target dialect.
///
/// Holds configuration only; every call works on its own token sequence, so a
/// single translator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: TranslateOptions,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        Self { options }
    }

    pub fn for_target(target: DialectTarget) -> Self {
        Self::new(TranslateOptions::for_target(target))
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    pub fn target(&self) -> DialectTarget {
        self.options.target
    }

    /// Translate one shader stage's source text
    pub fn translate(&self, source: &str, stage: ShaderStage) -> Result<String, TranslateError> {
        self.translate_tokens(tokenize(source), stage)
    }

    /// Translate an already tokenized shader stage
    pub fn translate_tokens(
        &self,
        mut tokens: TokenSequence,
        stage: ShaderStage,
    ) -> Result<String, TranslateError> {
        let target = self.options.target;
        let rules = target.rules();
        tracing::debug!(
            "Translating {} shader to {} ({} tokens)",
            stage,
            target,
            tokens.len()
        );

        let mut state = PassState::default();
        let mut i = 0;
        while i < tokens.len() {
            // Comments are copied through untouched
            if state.comment.advance(&tokens, i) {
                i += 1;
                continue;
            }

            match self.classify(&tokens, i, stage, rules) {
                Action::Directive => {
                    if let Some(at) = rewrite_directive(&mut tokens, i, target.version())? {
                        state.version_at.get_or_insert(at);
                        i = at;
                    }
                }
                Action::Rename(text) => {
                    tracing::trace!("{} -> {}", tokens[i], text);
                    tokens[i].set(text);
                }
                Action::FragColor => {
                    tokens[i].set(self.options.output_variable.as_str());
                    state.first_output.get_or_insert(i);
                }
                Action::Unsupported => {
                    let line = line_of(&tokens, i);
                    tracing::warn!("Cannot translate {} on line {}", tokens[i], line);
                    return Err(TranslateError::UnsupportedConstruct {
                        construct: tokens[i].to_string(),
                        line,
                    });
                }
                Action::MainSignature => {
                    state.main_at.get_or_insert(i);
                    state.main_count += 1;
                }
                Action::Keep => {}
            }
            i += 1;
        }

        Ok(self.finish(tokens, state))
    }

    fn classify(&self, tokens: &[Token], i: usize, stage: ShaderStage, rules: Rules) -> Action {
        let token = tokens[i].as_str();
        let declares_outputs = self.options.target.declares_outputs(stage);

        match token {
            "#" if rules.contains(Rules::VERSION_DIRECTIVE) => Action::Directive,
            "attribute"
                if stage == ShaderStage::Vertex && rules.contains(Rules::ATTRIBUTE_TO_IN) =>
            {
                Action::Rename("in")
            }
            "varying" if rules.contains(Rules::VARYING_DIRECTION) => {
                Action::Rename(stage.varying_qualifier())
            }
            "gl_FragColor" if declares_outputs => Action::FragColor,
            // Multiple render targets need one declared output per index; not rewritten
            "gl_FragData" if declares_outputs => Action::Unsupported,
            "void" if declares_outputs && is_main_signature(tokens, i) => Action::MainSignature,
            _ if rules.contains(Rules::UNIFIED_TEXTURE) && is_texture_call(tokens, i) => {
                Action::Rename("texture")
            }
            _ => Action::Keep,
        }
    }

    /// Place the output declaration and preamble, then join
    fn finish(&self, mut tokens: TokenSequence, state: PassState) -> String {
        let target = self.options.target;
        let mut preamble = if self.options.emit_header {
            Preamble::for_target(target)
        } else {
            Preamble::default()
        };
        if state.version_at.is_some() {
            preamble.version = None;
        }
        if has_define(&tokens, target.define()) {
            preamble.define = None;
        }

        let mut insert_at = preamble_position(&tokens, state.version_at);

        if let Some(first) = state.first_output {
            let declaration = output_declaration(&self.options.output_variable);
            match (self.options.output_placement, state.main_at) {
                // Several `main` signatures leave the entry point ambiguous
                (OutputPlacement::BeforeMain, Some(main))
                    if main < first && state.main_count == 1 =>
                {
                    tracing::trace!("Declaring {} before main", self.options.output_variable);
                    tokens.insert(main, Token::new(declaration));
                    if main < insert_at {
                        insert_at += 1;
                    }
                }
                _ => preamble.output = Some(declaration),
            }
        }

        assemble(&tokens, &preamble.render(), insert_at)
    }
}

/// Translate with default options for `target`
pub fn translate(
    source: &str,
    stage: ShaderStage,
    target: DialectTarget,
) -> Result<String, TranslateError> {
    Translator::for_target(target).translate(source, stage)
}

fn next_significant(tokens: &[Token], from: usize) -> usize {
    let mut i = from;
    while i < tokens.len() && tokens[i].is_whitespace() {
        i += 1;
    }
    i
}

/// `void main (` with any whitespace between the words
fn is_main_signature(tokens: &[Token], i: usize) -> bool {
    let name = next_significant(tokens, i + 1);
    if tokens.get(name).map_or(true, |t| *t != "main") {
        return false;
    }
    let paren = next_significant(tokens, name + 1);
    tokens.get(paren).is_some_and(|t| *t == "(")
}

/// A `texture*` identifier immediately followed by `(`
fn is_texture_call(tokens: &[Token], i: usize) -> bool {
    let token = &tokens[i];
    *token != "texture"
        && token.as_str().contains("texture")
        && tokens.get(i + 1).is_some_and(|t| *t == "(")
}

/// Whether the source already carries `#define <name>`
fn has_define(tokens: &[Token], name: &str) -> bool {
    tokens.iter().enumerate().any(|(i, token)| {
        if *token != "#" {
            return false;
        }
        let keyword = skip_inline_space(tokens, i + 1);
        if tokens.get(keyword).map_or(true, |t| *t != "define") {
            return false;
        }
        let macro_name = skip_inline_space(tokens, keyword + 1);
        tokens.get(macro_name).is_some_and(|t| *t == name)
    })
}

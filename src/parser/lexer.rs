//! Lexer for rich-text templates using logos
//!
//! The template is split into annotation spans (`{@…}`) and verbatim text
//! runs. Whitespace is never skipped: everything outside an annotation is
//! template text and must survive untouched.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// A complete annotation span, `{@` through the matching `}`
    #[regex(r"\{@[^}]*\}", |lex| lex.slice().to_string())]
    Annotation(String),

    /// `{@` with no closing brace before end of input. Matches only when
    /// the complete-annotation pattern cannot (longest match wins).
    #[regex(r"\{@[^}]*")]
    Unterminated,

    /// Plain template text. A lone `{` that does not open an annotation is
    /// ordinary text too.
    #[regex(r"[^{]+|\{")]
    Text,
}

/// Lex a template into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

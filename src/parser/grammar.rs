//! Annotation parsing using chumsky
//!
//! The lexer isolates `{@…}` spans; this module parses the interior of each
//! span (key, separator, verbatim payload) and assembles the full segment
//! sequence. Scanning is pure: it performs no dispatch and is fail-fast on
//! the first malformed annotation, left to right.

use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::ast::{Annotation, Segment, Spanned};
use crate::parser::lexer::{self, Token};

/// Characters permitted in an annotation key. Note the hyphen is valid
/// (`{@my-key}`); the key must still be non-empty and start right after `{@`.
pub fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Parser for one complete annotation span, `{@` through `}`.
///
/// Exactly one whitespace character after the key is consumed as the
/// separator; everything after it up to the closing brace is the payload,
/// verbatim. A key immediately followed by `}` yields the empty payload.
fn annotation_body<'a>() -> impl Parser<'a, &'a str, Annotation, extra::Err<Rich<'a, char>>> {
    let key = any()
        .filter(|c: &char| is_key_char(*c))
        .repeated()
        .at_least(1)
        .collect::<String>();

    let separator = any().filter(|c: &char| c.is_whitespace());

    let payload = any()
        .filter(|c: &char| *c != '}')
        .repeated()
        .collect::<String>();

    just("{@")
        .ignore_then(key)
        .then(separator.ignore_then(payload).or_not())
        .then_ignore(just('}'))
        .then_ignore(end())
        .map(|(key, payload)| Annotation {
            key,
            payload: payload.unwrap_or_default(),
        })
}

/// Parse the interior of a single lexed annotation span.
///
/// `offset` is the span's start in the full template, used to re-base error
/// spans so diagnostics point into the original source.
fn parse_annotation(raw: &str, offset: usize) -> Result<Annotation, ParseError> {
    annotation_body()
        .parse(raw)
        .into_result()
        .map_err(|errs| ParseError::from_rich(&errs[0], offset))
}

/// Scan a template into text and annotation segments.
///
/// Returns the first error encountered in source order: a malformed key, junk
/// between key and closing brace, or an unterminated `{@`. No processors are
/// consulted here; resolution against a registry is the builder's job.
pub fn scan(input: &str) -> Result<Vec<Spanned<Segment>>, ParseError> {
    let mut segments: Vec<Spanned<Segment>> = Vec::new();

    for (token, span) in lexer::lex(input) {
        match token {
            Token::Text => {
                let slice = &input[span.clone()];
                // A lone `{` lexes separately from the run around it; merge
                // adjacent text tokens back into one segment.
                match segments.last_mut() {
                    Some(Spanned {
                        node: Segment::Text(text),
                        span: prev,
                    }) if prev.end == span.start => {
                        text.push_str(slice);
                        prev.end = span.end;
                    }
                    _ => segments.push(Spanned::new(Segment::Text(slice.to_string()), span)),
                }
            }
            Token::Annotation(raw) => {
                let ann = parse_annotation(&raw, span.start)?;
                segments.push(Spanned::new(Segment::Annotation(ann), span));
            }
            Token::Unterminated => return Err(ParseError::Unterminated { span }),
        }
    }

    Ok(segments)
}

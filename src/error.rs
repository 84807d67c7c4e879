//! Error types for template scanning

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Malformed annotation: empty or ill-formed key, or stray characters
    /// between the key and the closing brace
    #[error("invalid annotation at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    /// `{@` with no closing brace before end of input
    #[error("unterminated annotation at {span:?}")]
    Unterminated { span: Span },
}

impl ParseError {
    /// Convert a chumsky error over one annotation's interior.
    ///
    /// `offset` re-bases the error span from the annotation slice onto the
    /// full template.
    pub fn from_rich(err: &chumsky::error::Rich<'_, char>, offset: usize) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { .. } => match err.found() {
                Some(c) => format!("unexpected character {}", format_char(c)),
                None => "unexpected end of annotation".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_char(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of annotation".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("'{}'", s)),
                chumsky::error::RichPattern::Any => Some("any character".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        let range = err.span().into_range();
        ParseError::Syntax {
            span: offset + range.start..offset + range.end,
            message,
            expected,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .unwrap();
            }
            ParseError::Unterminated { span } => {
                Report::build(ReportKind::Error, filename, span.start)
                    .with_message("unterminated annotation")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message("this `{@` has no closing `}`")
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .unwrap();
            }
        }
        String::from_utf8(buf).unwrap()
    }
}

/// Format a character for human-readable error messages
fn format_char(c: &char) -> String {
    match c {
        '\t' => "tab".to_string(),
        '\n' => "newline".to_string(),
        ' ' => "space".to_string(),
        other => format!("'{}'", other),
    }
}

//! Metamark - inline meta-annotation scanning for rich-text templates
//!
//! This library scans text templates for `{@key payload}` annotations,
//! validates each key against a registry of processors, and dispatches every
//! payload to the matching processor in source order.
//!
//! # Example
//!
//! ```rust
//! use metamark::{RichTextBuilder, RichTextProcessor};
//!
//! struct Link;
//!
//! impl RichTextProcessor for Link {
//!     fn key(&self) -> &str {
//!         "link"
//!     }
//!
//!     fn process(&mut self, payload: &str) {
//!         assert_eq!(payload, "open settings");
//!     }
//! }
//!
//! let mut builder = RichTextBuilder::new();
//! builder.register_processor(Box::new(Link)).unwrap();
//! builder.set_text("Click {@link open settings} to continue.").unwrap();
//! ```

pub mod builder;
pub mod error;
pub mod parser;
pub mod processor;
pub mod schema;

pub use builder::RichTextBuilder;
pub use error::ParseError;
pub use parser::{scan, Annotation, Segment, Span, Spanned};
pub use processor::{ProcessorError, ProcessorRegistry, RichTextProcessor};
pub use schema::{KeySchema, SchemaError};

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Errors that can fail a `set_text` call
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// The template contains a malformed or unterminated annotation
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// A well-formed annotation names a key with no registered processor
    #[error("no processor registered for annotation key '{key}'")]
    UnknownKey { key: String, span: Span },
}

impl BuildError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            BuildError::Parse(err) => err.format(source, filename),
            BuildError::UnknownKey { key, span } => {
                let mut buf = Vec::new();
                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(format!("unknown annotation key '{}'", key))
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message("no processor registered for this key")
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .unwrap();
                String::from_utf8(buf).unwrap()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nop(&'static str);

    impl RichTextProcessor for Nop {
        fn key(&self) -> &str {
            self.0
        }

        fn process(&mut self, _payload: &str) {}
    }

    #[test]
    fn test_error_kinds_distinguishable() {
        let mut builder = RichTextBuilder::new();
        builder
            .register_processor(Box::new(Nop("key")))
            .expect("Should register");

        let syntax = builder.set_text("{@ bad}").expect_err("Should fail");
        assert!(matches!(syntax, BuildError::Parse(_)));

        let unknown = builder.set_text("{@other}").expect_err("Should fail");
        assert!(matches!(unknown, BuildError::UnknownKey { .. }));
    }

    #[test]
    fn test_format_unknown_key_points_at_annotation() {
        let mut builder = RichTextBuilder::new();
        let source = "see {@docs here}";
        let err = builder.set_text(source).expect_err("Should fail");
        let report = err.format(source, "template.txt");
        assert!(report.contains("docs"));
        assert!(report.contains("template.txt"));
    }
}

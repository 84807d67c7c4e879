//! Rich-text builder: eager scan plus processor dispatch

use crate::parser::{scan, Segment, Spanned};
use crate::processor::{ProcessorError, ProcessorRegistry, RichTextProcessor};
use crate::BuildError;

/// Builds rich text from a template with inline `{@key payload}` annotations.
///
/// Processors are registered up front; `set_text` then scans the template
/// eagerly and dispatches each annotation's payload to its processor. A
/// malformed template or an unregistered key fails the call.
#[derive(Default)]
pub struct RichTextBuilder {
    registry: ProcessorRegistry,
    text: Option<String>,
}

impl RichTextBuilder {
    /// Create a builder with no processors registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor under its own key.
    ///
    /// Errors if a processor is already registered under the same key.
    pub fn register_processor(
        &mut self,
        processor: Box<dyn RichTextProcessor>,
    ) -> Result<(), ProcessorError> {
        self.registry.register(processor)
    }

    /// The registered processors
    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    /// Set the template text, scanning and dispatching immediately.
    ///
    /// The whole template is scanned before anything runs, so a syntax error
    /// anywhere prevents all dispatch. Resolution then walks annotations in
    /// source order: an unknown key aborts the walk, but processors invoked
    /// before it stay invoked. Calling `set_text` again re-triggers the full
    /// dispatch sequence; nothing is memoized across calls.
    pub fn set_text(&mut self, text: &str) -> Result<(), BuildError> {
        let segments = scan(text)?;
        self.dispatch(&segments)?;
        self.text = Some(text.to_string());
        Ok(())
    }

    /// The template from the last successful `set_text`
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn dispatch(&mut self, segments: &[Spanned<Segment>]) -> Result<(), BuildError> {
        for segment in segments {
            if let Segment::Annotation(ann) = &segment.node {
                let processor =
                    self.registry
                        .get_mut(&ann.key)
                        .ok_or_else(|| BuildError::UnknownKey {
                            key: ann.key.clone(),
                            span: segment.span.clone(),
                        })?;
                processor.process(&ann.payload);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        key: String,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn new(key: &str) -> (Self, Rc<RefCell<Vec<String>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    key: key.to_string(),
                    calls: Rc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl RichTextProcessor for Recorder {
        fn key(&self) -> &str {
            &self.key
        }

        fn process(&mut self, payload: &str) {
            self.calls.borrow_mut().push(payload.to_string());
        }
    }

    #[test]
    fn test_text_stored_after_successful_set() {
        let mut builder = RichTextBuilder::new();
        builder.set_text("plain text").expect("Should set");
        assert_eq!(builder.text(), Some("plain text"));
    }

    #[test]
    fn test_text_not_stored_after_failure() {
        let mut builder = RichTextBuilder::new();
        builder.set_text("ok").expect("Should set");
        let _ = builder.set_text("{@missing}").expect_err("Should fail");
        assert_eq!(builder.text(), Some("ok"));
    }

    #[test]
    fn test_syntax_error_prevents_all_dispatch() {
        let mut builder = RichTextBuilder::new();
        let (recorder, calls) = Recorder::new("key");
        builder
            .register_processor(Box::new(recorder))
            .expect("Should register");

        // The first annotation is fine; the second is malformed. Scanning
        // happens before dispatch, so the first must not fire either.
        let err = builder
            .set_text("{@key one} {@ bad}")
            .expect_err("Should fail");
        assert!(matches!(err, BuildError::Parse(_)));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_unknown_key_leaves_earlier_dispatches_executed() {
        let mut builder = RichTextBuilder::new();
        let (recorder, calls) = Recorder::new("known");
        builder
            .register_processor(Box::new(recorder))
            .expect("Should register");

        let err = builder
            .set_text("{@known first} {@mystery x}")
            .expect_err("Should fail");
        assert!(matches!(err, BuildError::UnknownKey { ref key, .. } if key == "mystery"));
        assert_eq!(*calls.borrow(), vec!["first".to_string()]);
    }

    #[test]
    fn test_unknown_key_reports_span() {
        let mut builder = RichTextBuilder::new();
        let err = builder.set_text("ab {@key data}").expect_err("Should fail");
        match err {
            BuildError::UnknownKey { key, span } => {
                assert_eq!(key, "key");
                assert_eq!(span, 3..14);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

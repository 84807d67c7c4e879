//! Processor contract and registry for annotation dispatch

mod registry;

pub use registry::{ProcessorError, ProcessorRegistry};

/// A handler for one annotation key.
///
/// The builder invokes `process` once per annotation occurrence, in
/// left-to-right source order, with the verbatim payload (empty when the key
/// is immediately followed by `}`).
pub trait RichTextProcessor {
    /// The unique key this processor is registered under
    fn key(&self) -> &str;

    /// Consume the payload of one annotation occurrence
    fn process(&mut self, payload: &str);
}

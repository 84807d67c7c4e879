//! Segment types produced by scanning a rich-text template

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A node paired with its byte span in the template
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// One resolved meta-annotation occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Registry key, e.g. `my-key` in `{@my-key data}`
    pub key: String,
    /// Verbatim payload between the key separator and the closing brace.
    /// Empty when the key is immediately followed by `}`.
    pub payload: String,
}

/// A contiguous piece of the template: plain text or an annotation
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Text outside annotation spans, passed through unchanged
    Text(String),
    Annotation(Annotation),
}

impl Segment {
    /// The annotation, if this segment is one
    pub fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            Segment::Annotation(ann) => Some(ann),
            Segment::Text(_) => None,
        }
    }
}

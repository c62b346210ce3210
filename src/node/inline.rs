//! Inline elements
//!
//! Mirrors pandoc-types' `Inline` constructors; serde produces pandoc's
//! `{"t": ..., "c": ...}` JSON encoding.

use serde::{Deserialize, Serialize};

use crate::attr::Attr;
use crate::format::Format;

use super::{Block, NodeKind};

/// Link or image target: `(url, title)`.
pub type Target = (String, String);

/// Inline content of a pandoc document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Inline {
    Str(String),
    Emph(Vec<Inline>),
    Underline(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikeout(Vec<Inline>),
    Superscript(Vec<Inline>),
    Subscript(Vec<Inline>),
    SmallCaps(Vec<Inline>),
    Quoted(QuoteType, Vec<Inline>),
    Cite(Vec<Citation>, Vec<Inline>),
    Code(Attr, String),
    Space,
    SoftBreak,
    LineBreak,
    Math(MathType, String),
    RawInline(Format, String),
    Link(Attr, Vec<Inline>, Target),
    Image(Attr, Vec<Inline>, Target),
    Note(Vec<Block>),
    Span(Attr, Vec<Inline>),
}

impl Inline {
    /// Plain string node.
    pub fn str(text: impl Into<String>) -> Self {
        Inline::Str(text.into())
    }

    /// Raw fragment for `format`.
    pub fn raw(format: Format, text: impl Into<String>) -> Self {
        Inline::RawInline(format, text.into())
    }

    /// Structural category of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Inline::Str(_) => NodeKind::Str,
            Inline::Emph(_) => NodeKind::Emph,
            Inline::Underline(_) => NodeKind::Underline,
            Inline::Strong(_) => NodeKind::Strong,
            Inline::Strikeout(_) => NodeKind::Strikeout,
            Inline::Superscript(_) => NodeKind::Superscript,
            Inline::Subscript(_) => NodeKind::Subscript,
            Inline::SmallCaps(_) => NodeKind::SmallCaps,
            Inline::Quoted(..) => NodeKind::Quoted,
            Inline::Cite(..) => NodeKind::Cite,
            Inline::Code(..) => NodeKind::Code,
            Inline::Space => NodeKind::Space,
            Inline::SoftBreak => NodeKind::SoftBreak,
            Inline::LineBreak => NodeKind::LineBreak,
            Inline::Math(..) => NodeKind::Math,
            Inline::RawInline(..) => NodeKind::RawInline,
            Inline::Link(..) => NodeKind::Link,
            Inline::Image(..) => NodeKind::Image,
            Inline::Note(_) => NodeKind::Note,
            Inline::Span(..) => NodeKind::Span,
        }
    }

    /// Attributes, for the variants that carry them.
    pub fn attr(&self) -> Option<&Attr> {
        match self {
            Inline::Code(attr, _)
            | Inline::Link(attr, ..)
            | Inline::Image(attr, ..)
            | Inline::Span(attr, _) => Some(attr),
            _ => None,
        }
    }

    /// Whether this is a span carrying `class`.
    pub fn is_span_with(&self, class: &str) -> bool {
        matches!(self, Inline::Span(attr, _) if attr.has_class(class))
    }
}

/// Kind of quotation marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum QuoteType {
    SingleQuote,
    DoubleQuote,
}

/// Inline (`$...$`) or display (`$$...$$`) math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum MathType {
    DisplayMath,
    InlineMath,
}

/// How a citation is rendered in running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum CitationMode {
    AuthorInText,
    SuppressAuthor,
    NormalCitation,
}

/// A single bibliography reference within a `Cite`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub citation_id: String,
    pub citation_prefix: Vec<Inline>,
    pub citation_suffix: Vec<Inline>,
    pub citation_mode: CitationMode,
    pub citation_note_num: i64,
    pub citation_hash: i64,
}

//! Node types of a pandoc document tree.
//!
//! - `Inline` / `Block`: closed enumerations of every pandoc element
//! - `table`: table structure (captions, column specs, rows, cells)
//! - `Document`: root container with metadata and target format
//!
//! All types serialize to and from pandoc's JSON AST.

mod block;
mod document;
mod inline;
pub mod table;

pub use block::{Block, ListAttributes, ListNumberDelim, ListNumberStyle};
pub use document::{API_VERSION, Document, HEADER_INCLUDES, Meta, MetaValue};
pub use inline::{Citation, CitationMode, Inline, MathType, QuoteType, Target};
pub use table::{Alignment, Caption, Cell, ColSpec, ColWidth, Row, TableBody, TableFoot, TableHead};

use std::fmt;

/// Structural category of an element, one per pandoc constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Inlines
    Str,
    Emph,
    Underline,
    Strong,
    Strikeout,
    Superscript,
    Subscript,
    SmallCaps,
    Quoted,
    Cite,
    Code,
    Space,
    SoftBreak,
    LineBreak,
    Math,
    RawInline,
    Link,
    Image,
    Note,
    Span,
    // Blocks
    Plain,
    Para,
    LineBlock,
    CodeBlock,
    RawBlock,
    BlockQuote,
    OrderedList,
    BulletList,
    DefinitionList,
    Header,
    HorizontalRule,
    Table,
    Figure,
    Div,
}

impl NodeKind {
    /// Whether this kind is a block-level element.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            NodeKind::Plain
                | NodeKind::Para
                | NodeKind::LineBlock
                | NodeKind::CodeBlock
                | NodeKind::RawBlock
                | NodeKind::BlockQuote
                | NodeKind::OrderedList
                | NodeKind::BulletList
                | NodeKind::DefinitionList
                | NodeKind::Header
                | NodeKind::HorizontalRule
                | NodeKind::Table
                | NodeKind::Figure
                | NodeKind::Div
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

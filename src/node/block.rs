//! Block elements

use serde::{Deserialize, Serialize};

use crate::attr::Attr;
use crate::format::Format;

use super::table::{Caption, ColSpec, TableBody, TableFoot, TableHead};
use super::{Inline, NodeKind};

/// Block content of a pandoc document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Block {
    Plain(Vec<Inline>),
    Para(Vec<Inline>),
    LineBlock(Vec<Vec<Inline>>),
    CodeBlock(Attr, String),
    RawBlock(Format, String),
    BlockQuote(Vec<Block>),
    OrderedList(ListAttributes, Vec<Vec<Block>>),
    BulletList(Vec<Vec<Block>>),
    DefinitionList(Vec<(Vec<Inline>, Vec<Vec<Block>>)>),
    Header(i32, Attr, Vec<Inline>),
    HorizontalRule,
    Table(Attr, Caption, Vec<ColSpec>, TableHead, Vec<TableBody>, TableFoot),
    Figure(Attr, Caption, Vec<Block>),
    Div(Attr, Vec<Block>),
}

impl Block {
    /// Raw fragment for `format`.
    pub fn raw(format: Format, text: impl Into<String>) -> Self {
        Block::RawBlock(format, text.into())
    }

    /// Structural category of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Block::Plain(_) => NodeKind::Plain,
            Block::Para(_) => NodeKind::Para,
            Block::LineBlock(_) => NodeKind::LineBlock,
            Block::CodeBlock(..) => NodeKind::CodeBlock,
            Block::RawBlock(..) => NodeKind::RawBlock,
            Block::BlockQuote(_) => NodeKind::BlockQuote,
            Block::OrderedList(..) => NodeKind::OrderedList,
            Block::BulletList(_) => NodeKind::BulletList,
            Block::DefinitionList(_) => NodeKind::DefinitionList,
            Block::Header(..) => NodeKind::Header,
            Block::HorizontalRule => NodeKind::HorizontalRule,
            Block::Table(..) => NodeKind::Table,
            Block::Figure(..) => NodeKind::Figure,
            Block::Div(..) => NodeKind::Div,
        }
    }

    /// Attributes, for the variants that carry them.
    pub fn attr(&self) -> Option<&Attr> {
        match self {
            Block::CodeBlock(attr, _)
            | Block::Header(_, attr, _)
            | Block::Table(attr, ..)
            | Block::Figure(attr, ..)
            | Block::Div(attr, _) => Some(attr),
            _ => None,
        }
    }

    /// Inline content of `Plain` and `Para` blocks.
    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Block::Plain(inlines) | Block::Para(inlines) => Some(inlines),
            _ => None,
        }
    }
}

/// Ordered list start number, style and delimiter.
pub type ListAttributes = (i32, ListNumberStyle, ListNumberDelim);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum ListNumberStyle {
    DefaultStyle,
    Example,
    Decimal,
    LowerRoman,
    UpperRoman,
    LowerAlpha,
    UpperAlpha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum ListNumberDelim {
    DefaultDelim,
    Period,
    OneParen,
    TwoParens,
}

//! Table structure (pandoc-types 1.23 layout).
//!
//! These are tuple structs because pandoc encodes them as JSON arrays.

use serde::{Deserialize, Serialize};

use crate::attr::Attr;

use super::{Block, Inline};

/// Table or figure caption: optional short caption plus long caption blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Caption(pub Option<Vec<Inline>>, pub Vec<Block>);

impl Caption {
    pub fn short(&self) -> Option<&[Inline]> {
        self.0.as_deref()
    }

    pub fn long(&self) -> &[Block] {
        &self.1
    }

    /// Inlines of the long caption, in order, across all its blocks.
    pub fn long_inlines(&self) -> impl Iterator<Item = &Inline> {
        self.1.iter().filter_map(Block::inlines).flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none() && self.1.is_empty()
    }
}

/// Horizontal alignment of a column or cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Alignment {
    AlignLeft,
    AlignRight,
    AlignCenter,
    #[default]
    AlignDefault,
}

/// Column width as a fraction of the text width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum ColWidth {
    ColWidth(f64),
    #[default]
    ColWidthDefault,
}

/// Column specification: alignment and width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColSpec(pub Alignment, pub ColWidth);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableHead(pub Attr, pub Vec<Row>);

/// Body: attributes, number of row-header columns, intermediate head rows, rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBody(pub Attr, pub i32, pub Vec<Row>, pub Vec<Row>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableFoot(pub Attr, pub Vec<Row>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row(pub Attr, pub Vec<Cell>);

/// Cell: attributes, alignment, row span, column span, content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell(pub Attr, pub Alignment, pub i32, pub i32, pub Vec<Block>);

impl TableHead {
    pub fn rows(&self) -> &[Row] {
        &self.1
    }
}

impl TableBody {
    /// Intermediate head rows followed by body rows.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.2.iter().chain(self.3.iter())
    }
}

impl TableFoot {
    pub fn rows(&self) -> &[Row] {
        &self.1
    }
}

impl Row {
    pub fn cells(&self) -> &[Cell] {
        &self.1
    }
}

impl Cell {
    /// Single-span cell with default alignment.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self(Attr::default(), Alignment::AlignDefault, 1, 1, blocks)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.4
    }
}

//! Document type and metadata
//!
//! The root container handed over by pandoc, with the metadata helpers the
//! filters need to inject preamble content.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::format::Format;

use super::{Block, Inline};

/// pandoc-types version this crate speaks.
pub const API_VERSION: [u32; 3] = [1, 23, 1];

/// Metadata key receiving LaTeX preamble additions.
pub const HEADER_INCLUDES: &str = "header-includes";

/// Insertion-ordered document metadata.
pub type Meta = IndexMap<String, MetaValue, FxBuildHasher>;

// =============================================================================
// Document
// =============================================================================

/// Root document container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "pandoc-api-version")]
    pub api_version: Vec<u32>,
    pub meta: Meta,
    pub blocks: Vec<Block>,
    /// Target output format of the current pass. Not part of pandoc's JSON.
    #[serde(skip)]
    pub format: Format,
}

impl Document {
    /// Create a document with empty metadata.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            api_version: API_VERSION.to_vec(),
            meta: Meta::default(),
            blocks,
            format: Format::default(),
        }
    }

    /// Builder: set the target format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Parse pandoc's JSON representation.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to pandoc's JSON representation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Append raw preamble lines to `header-includes`.
    ///
    /// Existing content is kept: a list is extended, any other value becomes
    /// the first element of a new list.
    pub fn append_header_includes(&mut self, format: &Format, lines: impl IntoIterator<Item = String>) {
        let items: Vec<MetaValue> = lines
            .into_iter()
            .map(|line| MetaValue::MetaInlines(vec![Inline::raw(format.clone(), line)]))
            .collect();
        if items.is_empty() {
            return;
        }

        match self.meta.get_mut(HEADER_INCLUDES) {
            Some(MetaValue::MetaList(list)) => list.extend(items),
            Some(existing) => {
                let first = std::mem::replace(existing, MetaValue::MetaList(Vec::new()));
                let mut list = Vec::with_capacity(items.len() + 1);
                list.push(first);
                list.extend(items);
                *existing = MetaValue::MetaList(list);
            }
            None => {
                self.meta.insert(HEADER_INCLUDES.to_owned(), MetaValue::MetaList(items));
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

// =============================================================================
// MetaValue
// =============================================================================

/// Metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum MetaValue {
    MetaMap(Meta),
    MetaList(Vec<MetaValue>),
    MetaBool(bool),
    MetaString(String),
    MetaInlines(Vec<Inline>),
    MetaBlocks(Vec<Block>),
}

//! Prelude module for common imports.
//!
//! ```ignore
//! use texweave::prelude::*;
//! ```

// Node types
pub use crate::node::{Block, Caption, Document, Inline, Meta, MetaValue, NodeKind};

// Attributes
pub use crate::attr::{Attr, Attrs, AttrsExt};

// Transform
pub use crate::transform::{Action, Context, Filter, Pipeline, Scope, Walker};

// Filters
pub use crate::filters::{
    AllCaps, BlockQuotes, Figures, Glossary, Listings, RefSpans, Tables, TextQuote, Unnumbered,
};

// Conversion
pub use crate::convert::{Pandoc, TextConverter, Verbatim};

// Templates
pub use crate::template::{Template, TemplateError, Values};

// Config
pub use crate::config::Config;

// Format
pub use crate::format::Format;

// Error
pub use crate::error::{ConvertError, FilterError, FilterResult};

//! texweave - pandoc JSON filters for LaTeX-first academic writing
//!
//! ## Core Concepts
//!
//! **Filters**: each filter matches elements of a pandoc document by kind and
//! class and replaces them with raw target-format markup. Some collect
//! per-document state (glossary definitions) and flush it into the preamble.
//!
//! **Walk**: one depth-first pass per filter, children before parents, with
//! the chain of enclosing elements available to every hook.
//!
//! ## Modules
//! - `node`: pandoc AST (`Document`, `Block`, `Inline`, tables, metadata)
//! - `attr`: element attributes and `attr_schema!`
//! - `transform`: `Filter` trait, `Walker`, `Pipeline`
//! - `filters`: the concrete filters and their registry
//! - `convert`: markdown/inline conversion through `pandoc`
//! - `template`: literal output templates
//!
//! ## Usage
//!
//! ```ignore
//! use texweave::prelude::*;
//!
//! let doc = Document::from_json(&json)?.with_format(Format::Latex);
//! let converter = Pandoc::default();
//!
//! let doc = Pipeline::new(doc, &converter)
//!     .pipe(&mut Glossary::new())?
//!     .pipe(&mut Tables::default())?
//!     .into_inner();
//! ```

/// Attribute types and schemas
pub mod attr;

/// Filter configuration
pub mod config;

/// Text converters
pub mod convert;

/// Error types
pub mod error;

/// The concrete filters
pub mod filters;

/// Target formats
pub mod format;

/// Node types: Document, Block, Inline
pub mod node;

/// Prelude for common imports
pub mod prelude;

/// Plain-text extraction
pub mod stringify;

/// Output templates
pub mod template;

/// Document walk and filter passes
pub mod transform;

pub use error::{ConvertError, FilterError, FilterResult};
pub use format::Format;
pub use node::{Block, Document, Inline};

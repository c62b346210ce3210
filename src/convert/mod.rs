//! Text conversion collaborators.
//!
//! Filters produce markdown snippets (captions, glossary descriptions) or
//! hold inline content (quotes, headers) that must be written in the target
//! format. A [`TextConverter`] does that writing.
//!
//! | Converter | Backend | Use |
//! |-----------|---------|-----|
//! | [`Pandoc`] | `pandoc` subprocess | production |
//! | [`Verbatim`] | none | tests, `--no-convert` |

mod pandoc;

pub use self::pandoc::Pandoc;

use crate::error::ConvertError;
use crate::format::Format;
use crate::node::Inline;
use crate::stringify::stringify;

/// Converts text fragments into a target format.
pub trait TextConverter {
    /// Convert markdown source.
    fn markdown(&self, src: &str, format: &Format) -> Result<String, ConvertError>;

    /// Write inline content.
    fn inlines(&self, inlines: &[Inline], format: &Format) -> Result<String, ConvertError>;
}

impl<C: TextConverter + ?Sized> TextConverter for &C {
    fn markdown(&self, src: &str, format: &Format) -> Result<String, ConvertError> {
        (**self).markdown(src, format)
    }

    fn inlines(&self, inlines: &[Inline], format: &Format) -> Result<String, ConvertError> {
        (**self).inlines(inlines, format)
    }
}

/// Converter that leaves markdown untouched and flattens inlines.
///
/// Deterministic and process-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl TextConverter for Verbatim {
    fn markdown(&self, src: &str, _format: &Format) -> Result<String, ConvertError> {
        Ok(src.to_owned())
    }

    fn inlines(&self, inlines: &[Inline], _format: &Format) -> Result<String, ConvertError> {
        Ok(stringify(inlines))
    }
}

//! Sequential filter passes over one document.

use crate::convert::TextConverter;
use crate::error::FilterResult;
use crate::node::Document;

use super::core::Filter;
use super::walk::Walker;

/// Runs filters one after another, like repeated `--filter` flags.
///
/// # Example
///
/// ```ignore
/// use texweave::convert::Verbatim;
/// use texweave::filters::{AllCaps, RefSpans};
/// use texweave::transform::Pipeline;
///
/// let doc = Pipeline::new(doc, &Verbatim)
///     .pipe(&mut AllCaps)?
///     .pipe(&mut RefSpans)?
///     .into_inner();
/// ```
pub struct Pipeline<'c> {
    doc: Document,
    walker: Walker<'c>,
}

impl<'c> Pipeline<'c> {
    /// Create a new pipeline from a document.
    #[inline]
    pub fn new(doc: Document, converter: &'c dyn TextConverter) -> Self {
        Self {
            doc,
            walker: Walker::new(converter),
        }
    }

    /// Run one filter pass.
    pub fn pipe<F: Filter + ?Sized>(self, filter: &mut F) -> FilterResult<Self> {
        let Self { doc, walker } = self;
        Ok(Self {
            doc: walker.run(doc, filter)?,
            walker,
        })
    }

    /// Run a filter pass only if `condition` is true.
    #[inline]
    pub fn pipe_if<F: Filter + ?Sized>(self, condition: bool, filter: &mut F) -> FilterResult<Self> {
        if condition { self.pipe(filter) } else { Ok(self) }
    }

    /// Run every filter in order.
    pub fn pipe_all<'f, I, F>(self, filters: I) -> FilterResult<Self>
    where
        I: IntoIterator<Item = &'f mut F>,
        F: Filter + ?Sized + 'f,
    {
        filters.into_iter().try_fold(self, |pipeline, filter| pipeline.pipe(filter))
    }

    /// Inspect the document without consuming the pipeline.
    #[inline]
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&Document),
    {
        f(&self.doc);
        self
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Consume the pipeline and return the document.
    #[inline]
    pub fn into_inner(self) -> Document {
        self.doc
    }
}

impl From<Pipeline<'_>> for Document {
    #[inline]
    fn from(pipeline: Pipeline<'_>) -> Self {
        pipeline.into_inner()
    }
}

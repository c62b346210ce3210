//! Core filter trait and the per-node context handed to it.

use crate::attr::Attr;
use crate::convert::TextConverter;
use crate::error::FilterResult;
use crate::format::Format;
use crate::node::{Block, Document, Inline, NodeKind};

/// Outcome of visiting one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<T> {
    /// Leave the node as it is.
    Keep,
    /// Substitute the node in place. The replacement is not visited again.
    Replace(T),
}

impl<T> Action<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Action::Keep)
    }

    /// The replacement, if any.
    pub fn into_replacement(self) -> Option<T> {
        match self {
            Action::Keep => None,
            Action::Replace(node) => Some(node),
        }
    }
}

/// A document filter.
///
/// The walker calls `prepare` once, then `inline`/`block` for every node
/// (children before their parent), then `finalize` once. Any error aborts the
/// pass.
pub trait Filter {
    /// Registry name, as given to `--filter`.
    fn name(&self) -> &'static str;

    /// Reset per-document state.
    fn prepare(&mut self, _doc: &Document) -> FilterResult<()> {
        Ok(())
    }

    fn inline(&mut self, _inline: &Inline, _cx: &Context<'_>) -> FilterResult<Action<Inline>> {
        Ok(Action::Keep)
    }

    fn block(&mut self, _block: &Block, _cx: &Context<'_>) -> FilterResult<Action<Block>> {
        Ok(Action::Keep)
    }

    /// Flush collected state into the document.
    fn finalize(&mut self, _doc: &mut Document) -> FilterResult<()> {
        Ok(())
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn prepare(&mut self, doc: &Document) -> FilterResult<()> {
        (**self).prepare(doc)
    }

    fn inline(&mut self, inline: &Inline, cx: &Context<'_>) -> FilterResult<Action<Inline>> {
        (**self).inline(inline, cx)
    }

    fn block(&mut self, block: &Block, cx: &Context<'_>) -> FilterResult<Action<Block>> {
        (**self).block(block, cx)
    }

    fn finalize(&mut self, doc: &mut Document) -> FilterResult<()> {
        (**self).finalize(doc)
    }
}

// =============================================================================
// Scope
// =============================================================================

/// One enclosing element, linked to its own parent.
///
/// Lives on the walker's stack; the chain is only valid during a visit.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    kind: NodeKind,
    attr: Option<&'a Attr>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new(kind: NodeKind, attr: Option<&'a Attr>, parent: Option<&'a Scope<'a>>) -> Self {
        Self { kind, attr, parent }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn attr(&self) -> Option<&'a Attr> {
        self.attr
    }

    pub fn parent(&self) -> Option<&'a Scope<'a>> {
        self.parent
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr.is_some_and(|a| a.has_class(class))
    }

    /// This scope followed by its ancestors, innermost first.
    pub fn ancestors(&'a self) -> impl Iterator<Item = &'a Scope<'a>> {
        std::iter::successors(Some(self), |scope| scope.parent)
    }
}

// =============================================================================
// Context
// =============================================================================

/// What a filter sees besides the node itself.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    format: &'a Format,
    converter: &'a dyn TextConverter,
    scope: Option<&'a Scope<'a>>,
}

impl<'a> Context<'a> {
    /// Context for a node without ancestors.
    pub fn new(format: &'a Format, converter: &'a dyn TextConverter) -> Self {
        Self {
            format,
            converter,
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: Option<&'a Scope<'a>>) -> Self {
        self.scope = scope;
        self
    }

    /// Target format of the pass.
    pub fn format(&self) -> &'a Format {
        self.format
    }

    pub fn is_latex(&self) -> bool {
        self.format.is_latex()
    }

    /// Immediately enclosing element.
    pub fn parent(&self) -> Option<&'a Scope<'a>> {
        self.scope
    }

    /// Enclosing elements, immediate parent first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a Scope<'a>> {
        std::iter::successors(self.scope, |scope| scope.parent)
    }

    /// Whether any ancestor is of `kind`.
    pub fn within(&self, kind: NodeKind) -> bool {
        self.ancestors().any(|scope| scope.kind == kind)
    }

    /// Convert markdown source to the target format.
    pub fn markdown(&self, src: &str) -> FilterResult<String> {
        Ok(self.converter.markdown(src, self.format)?)
    }

    /// Write inlines in the target format.
    pub fn inlines(&self, inlines: &[Inline]) -> FilterResult<String> {
        Ok(self.converter.inlines(inlines, self.format)?)
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("format", self.format)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Verbatim;

    #[test]
    fn test_ancestor_chain() {
        let div_attr = Attr::new().class("ext");
        let div = Scope::new(NodeKind::Div, Some(&div_attr), None);
        let table = Scope::new(NodeKind::Table, None, Some(&div));

        let format = Format::Latex;
        let cx = Context::new(&format, &Verbatim).with_scope(Some(&table));
        assert_eq!(cx.parent().map(Scope::kind), Some(NodeKind::Table));
        let kinds: Vec<_> = cx.ancestors().map(Scope::kind).collect();
        assert_eq!(kinds, [NodeKind::Table, NodeKind::Div]);
        assert!(cx.within(NodeKind::Div));
        assert!(!cx.within(NodeKind::Figure));
        assert!(table.parent().is_some_and(|p| p.has_class("ext")));
    }

    #[test]
    fn test_action_helpers() {
        let keep: Action<Inline> = Action::Keep;
        assert!(keep.is_keep());
        assert_eq!(Action::Replace(Inline::Space).into_replacement(), Some(Inline::Space));
    }
}

//! Depth-first document walk.
//!
//! Children are visited before their parent, siblings in document order.
//! Every element reachable from `Document::blocks` is visited exactly once:
//! captions, table cells, notes, list items, definition terms and citation
//! affixes included. Metadata is not walked.

use tracing::{debug, info_span};

use crate::convert::TextConverter;
use crate::error::FilterResult;
use crate::format::Format;
use crate::node::{Block, Caption, Document, Inline, Row};

use super::core::{Action, Context, Filter, Scope};

/// Runs filters over documents.
#[derive(Clone, Copy)]
pub struct Walker<'c> {
    converter: &'c dyn TextConverter,
}

impl<'c> Walker<'c> {
    pub fn new(converter: &'c dyn TextConverter) -> Self {
        Self { converter }
    }

    /// Run one complete filter pass: `prepare`, walk, `finalize`.
    pub fn run<F: Filter + ?Sized>(&self, mut doc: Document, filter: &mut F) -> FilterResult<Document> {
        let span = info_span!("filter", name = filter.name(), format = %doc.format);
        let _enter = span.enter();

        filter.prepare(&doc)?;
        let mut visit = Visit {
            filter: &mut *filter,
            format: &doc.format,
            converter: self.converter,
            replaced: 0,
        };
        visit.blocks(&mut doc.blocks, None)?;
        debug!(replaced = visit.replaced, "walk done");
        filter.finalize(&mut doc)?;
        Ok(doc)
    }
}

struct Visit<'w, F: ?Sized> {
    filter: &'w mut F,
    format: &'w Format,
    converter: &'w dyn TextConverter,
    replaced: usize,
}

impl<F: Filter + ?Sized> Visit<'_, F> {
    fn blocks(&mut self, blocks: &mut [Block], scope: Option<&Scope<'_>>) -> FilterResult<()> {
        for block in blocks {
            self.block(block, scope)?;
        }
        Ok(())
    }

    fn inlines(&mut self, inlines: &mut [Inline], scope: Option<&Scope<'_>>) -> FilterResult<()> {
        for inline in inlines {
            self.inline(inline, scope)?;
        }
        Ok(())
    }

    fn block(&mut self, block: &mut Block, scope: Option<&Scope<'_>>) -> FilterResult<()> {
        let kind = block.kind();
        match block {
            Block::Plain(inlines) | Block::Para(inlines) => {
                let here = Scope::new(kind, None, scope);
                self.inlines(inlines, Some(&here))?;
            }
            Block::LineBlock(lines) => {
                let here = Scope::new(kind, None, scope);
                for line in lines {
                    self.inlines(line, Some(&here))?;
                }
            }
            Block::BlockQuote(blocks) => {
                let here = Scope::new(kind, None, scope);
                self.blocks(blocks, Some(&here))?;
            }
            Block::OrderedList(_, items) | Block::BulletList(items) => {
                let here = Scope::new(kind, None, scope);
                for item in items {
                    self.blocks(item, Some(&here))?;
                }
            }
            Block::DefinitionList(entries) => {
                let here = Scope::new(kind, None, scope);
                for (term, definitions) in entries {
                    self.inlines(term, Some(&here))?;
                    for definition in definitions {
                        self.blocks(definition, Some(&here))?;
                    }
                }
            }
            Block::Header(_, attr, inlines) => {
                let here = Scope::new(kind, Some(&*attr), scope);
                self.inlines(inlines, Some(&here))?;
            }
            Block::Table(attr, caption, _, head, bodies, foot) => {
                let here = Scope::new(kind, Some(&*attr), scope);
                self.caption(caption, &here)?;
                self.rows(&mut head.1, &here)?;
                for body in bodies {
                    self.rows(&mut body.2, &here)?;
                    self.rows(&mut body.3, &here)?;
                }
                self.rows(&mut foot.1, &here)?;
            }
            Block::Figure(attr, caption, blocks) => {
                let here = Scope::new(kind, Some(&*attr), scope);
                self.caption(caption, &here)?;
                self.blocks(blocks, Some(&here))?;
            }
            Block::Div(attr, blocks) => {
                let here = Scope::new(kind, Some(&*attr), scope);
                self.blocks(blocks, Some(&here))?;
            }
            Block::CodeBlock(..) | Block::RawBlock(..) | Block::HorizontalRule => {}
        }

        let cx = Context::new(self.format, self.converter).with_scope(scope);
        if let Action::Replace(node) = self.filter.block(block, &cx)? {
            debug!(kind = %kind, "replaced block");
            self.replaced += 1;
            *block = node;
        }
        Ok(())
    }

    fn inline(&mut self, inline: &mut Inline, scope: Option<&Scope<'_>>) -> FilterResult<()> {
        let kind = inline.kind();
        match inline {
            Inline::Emph(content)
            | Inline::Underline(content)
            | Inline::Strong(content)
            | Inline::Strikeout(content)
            | Inline::Superscript(content)
            | Inline::Subscript(content)
            | Inline::SmallCaps(content)
            | Inline::Quoted(_, content) => {
                let here = Scope::new(kind, None, scope);
                self.inlines(content, Some(&here))?;
            }
            Inline::Cite(citations, content) => {
                let here = Scope::new(kind, None, scope);
                for citation in citations {
                    self.inlines(&mut citation.citation_prefix, Some(&here))?;
                    self.inlines(&mut citation.citation_suffix, Some(&here))?;
                }
                self.inlines(content, Some(&here))?;
            }
            Inline::Link(attr, content, _) | Inline::Image(attr, content, _) | Inline::Span(attr, content) => {
                let here = Scope::new(kind, Some(&*attr), scope);
                self.inlines(content, Some(&here))?;
            }
            Inline::Note(blocks) => {
                let here = Scope::new(kind, None, scope);
                self.blocks(blocks, Some(&here))?;
            }
            Inline::Str(_)
            | Inline::Code(..)
            | Inline::Space
            | Inline::SoftBreak
            | Inline::LineBreak
            | Inline::Math(..)
            | Inline::RawInline(..) => {}
        }

        let cx = Context::new(self.format, self.converter).with_scope(scope);
        if let Action::Replace(node) = self.filter.inline(inline, &cx)? {
            debug!(kind = %kind, "replaced inline");
            self.replaced += 1;
            *inline = node;
        }
        Ok(())
    }

    fn caption(&mut self, caption: &mut Caption, scope: &Scope<'_>) -> FilterResult<()> {
        if let Some(short) = &mut caption.0 {
            self.inlines(short, Some(scope))?;
        }
        self.blocks(&mut caption.1, Some(scope))
    }

    fn rows(&mut self, rows: &mut [Row], scope: &Scope<'_>) -> FilterResult<()> {
        for row in rows {
            for cell in &mut row.1 {
                self.blocks(&mut cell.4, Some(scope))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Attr;
    use crate::convert::Verbatim;
    use crate::node::{Cell, ColSpec, NodeKind, TableBody, TableFoot, TableHead};

    /// Records visit order and uppercases every `Str`.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
        prepared: usize,
        finalized: usize,
    }

    impl Filter for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn prepare(&mut self, _doc: &Document) -> FilterResult<()> {
            self.prepared += 1;
            Ok(())
        }

        fn inline(&mut self, inline: &Inline, cx: &Context<'_>) -> FilterResult<Action<Inline>> {
            match inline {
                Inline::Str(text) => {
                    let parent = cx.parent().map(|p| p.kind().to_string()).unwrap_or_default();
                    self.seen.push(format!("{text}@{parent}"));
                    Ok(Action::Replace(Inline::str(text.to_uppercase())))
                }
                other => {
                    self.seen.push(other.kind().to_string());
                    Ok(Action::Keep)
                }
            }
        }

        fn block(&mut self, block: &Block, _cx: &Context<'_>) -> FilterResult<Action<Block>> {
            self.seen.push(block.kind().to_string());
            Ok(Action::Keep)
        }

        fn finalize(&mut self, _doc: &mut Document) -> FilterResult<()> {
            self.finalized += 1;
            Ok(())
        }
    }

    #[test]
    fn test_post_order_visit() {
        let doc = Document::new(vec![Block::Para(vec![
            Inline::Emph(vec![Inline::str("a")]),
            Inline::str("b"),
        ])]);
        let mut filter = Recorder::default();
        let out = Walker::new(&Verbatim).run(doc, &mut filter).unwrap();

        assert_eq!(filter.seen, ["a@Emph", "Emph", "b@Para", "Para"]);
        assert_eq!((filter.prepared, filter.finalized), (1, 1));
        assert_eq!(
            out.blocks,
            vec![Block::Para(vec![Inline::Emph(vec![Inline::str("A")]), Inline::str("B")])]
        );
    }

    #[test]
    fn test_table_cells_and_notes_are_visited() {
        let cell = |text: &str| Cell::new(vec![Block::Plain(vec![Inline::str(text)])]);
        let table = Block::Table(
            Attr::new(),
            Caption(None, vec![Block::Plain(vec![Inline::str("cap")])]),
            vec![ColSpec::default()],
            TableHead(Attr::new(), vec![Row(Attr::new(), vec![cell("h")])]),
            vec![TableBody(Attr::new(), 0, vec![], vec![Row(Attr::new(), vec![cell("x")])])],
            TableFoot(Attr::new(), vec![]),
        );
        let note = Block::Para(vec![Inline::Note(vec![Block::Para(vec![Inline::str("n")])])]);
        let doc = Document::new(vec![Block::Div(Attr::new().class("ext"), vec![table]), note]);

        let mut filter = Recorder::default();
        Walker::new(&Verbatim).run(doc, &mut filter).unwrap();

        for expected in ["cap@Plain", "h@Plain", "x@Plain", "n@Para", "Note"] {
            assert!(filter.seen.iter().any(|s| s == expected), "missing {expected}: {:?}", filter.seen);
        }
        let table_pos = filter.seen.iter().position(|s| s == "Table").unwrap();
        let div_pos = filter.seen.iter().position(|s| s == "Div").unwrap();
        assert!(table_pos < div_pos);
    }

    /// Replaces every Span with another Span; must not loop.
    struct Rewrap;

    impl Filter for Rewrap {
        fn name(&self) -> &'static str {
            "rewrap"
        }

        fn inline(&mut self, inline: &Inline, cx: &Context<'_>) -> FilterResult<Action<Inline>> {
            assert!(cx.ancestors().all(|s| s.kind() != NodeKind::Span || s.attr().is_some()));
            match inline {
                Inline::Span(attr, content) => Ok(Action::Replace(Inline::Span(
                    attr.clone(),
                    vec![Inline::Span(Attr::new(), content.clone())],
                ))),
                _ => Ok(Action::Keep),
            }
        }
    }

    #[test]
    fn test_replacement_is_not_revisited() {
        let doc = Document::new(vec![Block::Plain(vec![Inline::Span(Attr::new(), vec![])])]);
        let out = Walker::new(&Verbatim).run(doc, &mut Rewrap).unwrap();
        assert_eq!(
            out.blocks,
            vec![Block::Plain(vec![Inline::Span(
                Attr::new(),
                vec![Inline::Span(Attr::new(), vec![])]
            )])]
        );
    }
}

//! Plain-text extraction from element trees.
//!
//! `stringify` drops all markup and keeps the words. `caption_text` keeps
//! math delimiters so the result can be fed back through a markdown reader
//! without losing formulas.

use crate::node::{Block, Inline, MathType, QuoteType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Plain,
    Caption,
}

/// Flatten inlines to plain text.
pub fn stringify(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_inlines(&mut out, inlines, Mode::Plain);
    out
}

/// Flatten blocks to plain text, one paragraph per block.
pub fn stringify_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    push_blocks(&mut out, blocks, Mode::Plain);
    out
}

/// Flatten caption inlines to markdown source.
///
/// Inline math becomes `$x$`, display math `$$ x $$`; a citation contributes
/// its rendered content only.
pub fn caption_text<'a>(inlines: impl IntoIterator<Item = &'a Inline>) -> String {
    let mut out = String::new();
    for inline in inlines {
        push_inline(&mut out, inline, Mode::Caption);
    }
    out
}

fn push_inlines(out: &mut String, inlines: &[Inline], mode: Mode) {
    for inline in inlines {
        push_inline(out, inline, mode);
    }
}

fn push_inline(out: &mut String, inline: &Inline, mode: Mode) {
    match inline {
        Inline::Str(text) | Inline::Code(_, text) | Inline::RawInline(_, text) => out.push_str(text),
        Inline::Math(kind, text) => match (mode, kind) {
            (Mode::Plain, _) => out.push_str(text),
            (Mode::Caption, MathType::InlineMath) => {
                out.push('$');
                out.push_str(text);
                out.push('$');
            }
            (Mode::Caption, MathType::DisplayMath) => {
                out.push_str("$$ ");
                out.push_str(text);
                out.push_str(" $$");
            }
        },
        Inline::Space | Inline::SoftBreak => out.push(' '),
        Inline::LineBreak => out.push('\n'),
        Inline::Quoted(quote, content) => {
            let mark = match quote {
                QuoteType::SingleQuote => '\'',
                QuoteType::DoubleQuote => '"',
            };
            out.push(mark);
            push_inlines(out, content, mode);
            out.push(mark);
        }
        Inline::Emph(content)
        | Inline::Underline(content)
        | Inline::Strong(content)
        | Inline::Strikeout(content)
        | Inline::Superscript(content)
        | Inline::Subscript(content)
        | Inline::SmallCaps(content)
        | Inline::Cite(_, content)
        | Inline::Link(_, content, _)
        | Inline::Image(_, content, _)
        | Inline::Span(_, content) => push_inlines(out, content, mode),
        Inline::Note(blocks) => push_blocks(out, blocks, mode),
    }
}

fn push_blocks(out: &mut String, blocks: &[Block], mode: Mode) {
    let mut first = true;
    for block in blocks {
        let start = out.len();
        if !first {
            out.push_str("\n\n");
        }
        let body = out.len();
        push_block(out, block, mode);
        if out.len() == body {
            // nothing written, drop the separator
            out.truncate(start);
        } else {
            first = false;
        }
    }
}

fn push_block(out: &mut String, block: &Block, mode: Mode) {
    match block {
        Block::Plain(inlines) | Block::Para(inlines) | Block::Header(_, _, inlines) => {
            push_inlines(out, inlines, mode)
        }
        Block::LineBlock(lines) => {
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                push_inlines(out, line, mode);
            }
        }
        Block::CodeBlock(_, text) | Block::RawBlock(_, text) => out.push_str(text),
        Block::BlockQuote(blocks) | Block::Div(_, blocks) | Block::Figure(_, _, blocks) => {
            push_blocks(out, blocks, mode)
        }
        Block::OrderedList(_, items) | Block::BulletList(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                push_blocks(out, item, mode);
            }
        }
        Block::DefinitionList(entries) => {
            for (i, (term, defs)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                push_inlines(out, term, mode);
                for def in defs {
                    out.push('\n');
                    push_blocks(out, def, mode);
                }
            }
        }
        Block::Table(_, caption, _, head, bodies, foot) => {
            push_blocks(out, caption.long(), mode);
            let rows = head.rows().iter().chain(bodies.iter().flat_map(|b| b.rows())).chain(foot.rows());
            for row in rows {
                for cell in row.cells() {
                    out.push(' ');
                    push_blocks(out, cell.blocks(), mode);
                }
            }
        }
        Block::HorizontalRule => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Attr;
    use crate::node::{Citation, CitationMode};

    fn words(text: &str) -> Vec<Inline> {
        let mut out = Vec::new();
        for (i, word) in text.split(' ').enumerate() {
            if i > 0 {
                out.push(Inline::Space);
            }
            out.push(Inline::str(word));
        }
        out
    }

    #[test]
    fn test_stringify_flattens_markup() {
        let inlines = vec![
            Inline::Emph(words("very")),
            Inline::Space,
            Inline::Span(Attr::new().class("x"), words("important thing")),
            Inline::Quoted(QuoteType::DoubleQuote, words("here")),
        ];
        assert_eq!(stringify(&inlines), "very important thing\"here\"");
    }

    #[test]
    fn test_stringify_keeps_math_source() {
        let inlines = vec![Inline::Math(MathType::InlineMath, "x^2".into())];
        assert_eq!(stringify(&inlines), "x^2");
    }

    #[test]
    fn test_caption_text_math_and_citations() {
        let citation = Citation {
            citation_id: "knuth84".into(),
            citation_prefix: vec![],
            citation_suffix: vec![],
            citation_mode: CitationMode::NormalCitation,
            citation_note_num: 1,
            citation_hash: 0,
        };
        let mut inlines = words("Growth of");
        inlines.push(Inline::Space);
        inlines.push(Inline::Math(MathType::InlineMath, "n^2".into()));
        inlines.push(Inline::Space);
        inlines.push(Inline::Math(MathType::DisplayMath, "f(x)".into()));
        inlines.push(Inline::Space);
        inlines.push(Inline::Cite(vec![citation], vec![Inline::str("[@knuth84]")]));

        assert_eq!(caption_text(&inlines), "Growth of $n^2$ $$ f(x) $$ [@knuth84]");
    }

    #[test]
    fn test_stringify_blocks_separates_paragraphs() {
        let blocks = vec![
            Block::Para(words("one")),
            Block::HorizontalRule,
            Block::Plain(words("two")),
        ];
        assert_eq!(stringify_blocks(&blocks), "one\n\ntwo");
    }
}

//! Unnumbered sections that still appear in the table of contents.
//!
//! `# Preface {.unnumbered}` → `\addsec{Preface}` (KOMA-Script).

use crate::error::FilterResult;
use crate::format::Format;
use crate::node::Block;
use crate::template::{Template, Values};
use crate::transform::{Action, Context, Filter};

const ADDSEC: Template = Template::new(r"\addsec{<< text >>}");

/// Header `.unnumbered` filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unnumbered;

impl Filter for Unnumbered {
    fn name(&self) -> &'static str {
        "unnumbered"
    }

    fn block(&mut self, block: &Block, cx: &Context<'_>) -> FilterResult<Action<Block>> {
        if !cx.is_latex() {
            return Ok(Action::Keep);
        }
        match block {
            Block::Header(_, attr, content) if attr.has_class("unnumbered") => {
                let text = cx.inlines(content)?;
                let tex = ADDSEC.render(&Values::new().text("text", text))?;
                Ok(Action::Replace(Block::raw(Format::Latex, tex)))
            }
            _ => Ok(Action::Keep),
        }
    }
}

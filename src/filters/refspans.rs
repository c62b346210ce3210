//! Cross references: `[#fig:trajan]{.ref}` → `\ref{fig:trajan}`.

use crate::error::FilterResult;
use crate::format::Format;
use crate::node::Inline;
use crate::stringify::stringify;
use crate::template::{Template, Values};
use crate::transform::{Action, Context, Filter};

const REF: Template = Template::new(r"\ref{<< label >>}");

/// Span `.ref` filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefSpans;

impl Filter for RefSpans {
    fn name(&self) -> &'static str {
        "refspans"
    }

    fn inline(&mut self, inline: &Inline, cx: &Context<'_>) -> FilterResult<Action<Inline>> {
        if !cx.is_latex() {
            return Ok(Action::Keep);
        }
        match inline {
            Inline::Span(attr, content) if attr.has_class("ref") => {
                let label = stringify(content).replace('#', "");
                let tex = REF.render(&Values::new().text("label", label))?;
                Ok(Action::Replace(Inline::raw(Format::Latex, tex)))
            }
            _ => Ok(Action::Keep),
        }
    }
}

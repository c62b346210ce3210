//! Tracked capitals: `[TRAJAN]{.allcaps}` → `\textuppercase{TRAJAN}`.
//!
//! The `\textuppercase` macro itself (microtype tracking, lining figures) is
//! expected in the document preamble.

use crate::error::FilterResult;
use crate::format::Format;
use crate::node::Inline;
use crate::stringify::stringify;
use crate::template::{Template, Values};
use crate::transform::{Action, Context, Filter};

const UPPERCASE: Template = Template::new(r"\textuppercase{<< text >>}");

/// Span `.allcaps` filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCaps;

impl Filter for AllCaps {
    fn name(&self) -> &'static str {
        "allcaps"
    }

    fn inline(&mut self, inline: &Inline, cx: &Context<'_>) -> FilterResult<Action<Inline>> {
        if !cx.is_latex() {
            return Ok(Action::Keep);
        }
        let Inline::Span(attr, content) = inline else {
            return Ok(Action::Keep);
        };
        if !attr.has_class("allcaps") {
            return Ok(Action::Keep);
        }

        let text = stringify(content);
        let tex = UPPERCASE.render(&Values::new().text("text", text))?;
        Ok(Action::Replace(Inline::raw(Format::Latex, tex)))
    }
}

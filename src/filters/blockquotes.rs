//! `csquotes` display quotations from fenced blocks.
//!
//! ````markdown
//! ``` blockquote
//! cite: "[@perez, 13]"
//! punct: .
//! ...
//! Scientific computing has traditionally focused on raw performance.
//! ```
//! ````
//!
//! The quoted text and the citation are markdown.

use serde::Deserialize;

use crate::error::FilterResult;
use crate::format::Format;
use crate::node::Block;
use crate::template::{Template, Values};
use crate::transform::{Action, Context, Filter};

use super::fenced;

const BLOCKQUOTE: Template = Template::new(
    r"\blockquote<% if cite %>[{<< cite >>}]<% else %><% if punct %>[]<% endif %><% endif %><% if punct %>[<< punct >>]<% endif %>{<< text >>}",
);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteOptions {
    #[serde(deserialize_with = "fenced::text")]
    cite: Option<String>,
    #[serde(deserialize_with = "fenced::text")]
    punct: Option<String>,
}

/// Fenced blockquote filter.
#[derive(Debug, Clone)]
pub struct BlockQuotes {
    class: String,
}

impl Default for BlockQuotes {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BLOCKQUOTE_CLASS)
    }
}

impl BlockQuotes {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into() }
    }
}

impl Filter for BlockQuotes {
    fn name(&self) -> &'static str {
        "blockquotes"
    }

    fn block(&mut self, block: &Block, cx: &Context<'_>) -> FilterResult<Action<Block>> {
        if !cx.is_latex() {
            return Ok(Action::Keep);
        }
        let Block::CodeBlock(attr, code) = block else {
            return Ok(Action::Keep);
        };
        if !attr.has_class(&self.class) {
            return Ok(Action::Keep);
        }
        let Some((options, body)) = fenced::parse::<QuoteOptions>(code) else {
            return Ok(Action::Keep);
        };

        let cite = options.cite.as_deref().map(|c| cx.markdown(c)).transpose()?;
        let text = cx.markdown(body.trim())?;
        let values = Values::new()
            .opt("cite", cite)
            .opt("punct", options.punct)
            .text("text", text);
        let tex = BLOCKQUOTE.render(&values)?;
        Ok(Action::Replace(Block::raw(Format::Latex, tex)))
    }
}

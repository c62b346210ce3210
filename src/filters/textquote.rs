//! `csquotes` inline quotations.
//!
//! ```markdown
//! [Veni, vidi, vici]{.textquote lang="latin" cite="[@caesar, 12]" punct="."}
//! ```
//!
//! becomes `\foreigntextquote{latin}[{<cite>}][.]{Veni, vidi, vici}`, or
//! `\textquote[...]` without `lang`. The citation is markdown and goes
//! through the converter.

use crate::attr_schema;
use crate::error::FilterResult;
use crate::format::Format;
use crate::node::Inline;
use crate::template::{Template, Values};
use crate::transform::{Action, Context, Filter};

const TEXTQUOTE: Template = Template::new(
    r"<% if lang %>\foreigntextquote{<< lang >>}<% else %>\textquote<% endif %><% if cite %>[{<< cite >>}]<% else %><% if punct %>[]<% endif %><% endif %><% if punct %>[<< punct >>]<% endif %>{<< text >>}",
);

attr_schema! {
    struct QuoteAttrs {
        lang,
        cite,
        punct,
    }
}

/// Span `.textquote` filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextQuote;

impl Filter for TextQuote {
    fn name(&self) -> &'static str {
        "textquote"
    }

    fn inline(&mut self, inline: &Inline, cx: &Context<'_>) -> FilterResult<Action<Inline>> {
        if !cx.is_latex() {
            return Ok(Action::Keep);
        }
        let Inline::Span(attr, content) = inline else {
            return Ok(Action::Keep);
        };
        if !attr.has_class("textquote") {
            return Ok(Action::Keep);
        }

        let attrs = QuoteAttrs::from_attr(attr);
        let cite = attrs.cite.as_deref().map(|c| cx.markdown(c)).transpose()?;
        let text = cx.inlines(content)?;

        let values = Values::new()
            .opt("lang", attrs.lang)
            .opt("cite", cite)
            .opt("punct", attrs.punct)
            .text("text", text);
        let tex = TEXTQUOTE.render(&values)?;
        Ok(Action::Replace(Inline::raw(Format::Latex, tex)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Attr;
    use crate::convert::Verbatim;

    fn quote(attr: Attr) -> Inline {
        Inline::Span(
            attr.class("textquote"),
            vec![Inline::str("Veni,"), Inline::Space, Inline::str("vidi")],
        )
    }

    fn render(attr: Attr) -> Action<Inline> {
        let format = Format::Latex;
        TextQuote.inline(&quote(attr), &Context::new(&format, &Verbatim)).unwrap()
    }

    #[test]
    fn test_plain_textquote() {
        assert_eq!(render(Attr::new()), Action::Replace(Inline::raw(Format::Latex, r"\textquote{Veni, vidi}")));
    }

    #[test]
    fn test_foreign_quote_with_cite_and_punct() {
        let attr = Attr::new().attr("lang", "latin").attr("cite", "[@caesar]").attr("punct", ".");
        assert_eq!(
            render(attr),
            Action::Replace(Inline::raw(Format::Latex, r"\foreigntextquote{latin}[{[@caesar]}][.]{Veni, vidi}"))
        );
    }

    #[test]
    fn test_punct_without_cite_keeps_slot() {
        let attr = Attr::new().attr("punct", "!");
        assert_eq!(render(attr), Action::Replace(Inline::raw(Format::Latex, r"\textquote[][!]{Veni, vidi}")));
    }
}

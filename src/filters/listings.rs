//! Code listings with `minted` (LaTeX) or a captioned Div (HTML).
//!
//! ````markdown
//! ``` python
//! identifier: lst:descent
//! caption: Gradient descent [vgl. @cousteau, 33-35]
//! floating: true
//! placement: htp
//! mintedopts: linenos=false, mathescape
//! ...
//! def gradient_descent(X, y, theta, alpha, iterations):
//!     ...
//! ```
//! ````
//!
//! The class names the language so editors keep their highlighting. A
//! captioned listing floats unless `floating: false` is given.

use serde::Deserialize;
use smallvec::SmallVec;

use crate::attr::Attr;
use crate::error::FilterResult;
use crate::format::Format;
use crate::node::{Block, Inline};
use crate::template::{Template, Values};
use crate::transform::{Action, Context, Filter};

use super::fenced;

const MINTED: Template = Template::new(
    r"<% if floating %>\begin{listing}<% if placement %>[<< placement >>]<% endif %>
<% endif %>\begin{minted}<% if options %>[<< options >>]<% endif %>{<< language >>}
<< content >>
\end{minted}
<% if caption %><% if floating %>\caption{<< caption >>}<% else %>\captionof{listing}{<< caption >>}<% endif %>
<% endif %><% if identifier %>\label{<< identifier >>}
<% endif %><% if floating %>\end{listing}<% endif %>",
);

const HTML_CONTAINER_CLASS: &str = "fencedSourceCode";
const HTML_CAPTION_CLASS: &str = "fencedSourceCodeCaption";

/// YAML header of a listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListingOptions {
    #[serde(deserialize_with = "fenced::text")]
    language: Option<String>,
    #[serde(deserialize_with = "fenced::text")]
    identifier: Option<String>,
    #[serde(deserialize_with = "fenced::text")]
    caption: Option<String>,
    floating: Option<bool>,
    #[serde(deserialize_with = "fenced::text")]
    placement: Option<String>,
    #[serde(deserialize_with = "fenced::text")]
    mintedopts: Option<String>,
}

/// Fenced listing filter.
#[derive(Debug, Clone)]
pub struct Listings {
    languages: SmallVec<[String; 4]>,
}

impl Default for Listings {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LISTING_LANGUAGES.iter().copied())
    }
}

impl Listings {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
        }
    }

    /// First class of `attr` that names a listing language.
    fn language<'a>(&self, attr: &'a Attr) -> Option<&'a str> {
        attr.classes
            .iter()
            .find(|class| self.languages.iter().any(|lang| lang == *class))
            .map(String::as_str)
    }

    fn latex(&self, options: ListingOptions, language: &str, body: &str, cx: &Context<'_>) -> FilterResult<Block> {
        let caption = options.caption.as_deref().map(|c| cx.markdown(c)).transpose()?;
        let floating = options.floating.unwrap_or(caption.is_some());

        let values = Values::new()
            .flag("floating", floating)
            .opt("placement", options.placement)
            .opt("options", options.mintedopts)
            .text("language", options.language.unwrap_or_else(|| language.to_owned()))
            .text("content", body.trim_end_matches('\n'))
            .opt("caption", caption)
            .opt("identifier", options.identifier);
        let mut tex = MINTED.render(&values)?;
        tex.truncate(tex.trim_end().len());
        Ok(Block::raw(Format::Latex, tex))
    }

    fn html(&self, options: ListingOptions, attr: &Attr, body: &str, cx: &Context<'_>) -> FilterResult<Block> {
        let caption = match options.caption.as_deref() {
            Some(caption) => cx.markdown(caption)?,
            None => String::new(),
        };

        let code = Block::CodeBlock(
            Attr {
                identifier: String::new(),
                classes: attr.classes.clone(),
                attributes: attr.attributes.clone(),
            },
            body.to_owned(),
        );
        let caption = Block::Plain(vec![Inline::Span(
            Attr::new().class(HTML_CAPTION_CLASS),
            vec![Inline::raw(Format::Html, caption)],
        )]);
        let container = Attr::new()
            .with_id(options.identifier.unwrap_or_default())
            .class(HTML_CONTAINER_CLASS);
        Ok(Block::Div(container, vec![code, caption]))
    }
}

impl Filter for Listings {
    fn name(&self) -> &'static str {
        "listings"
    }

    fn block(&mut self, block: &Block, cx: &Context<'_>) -> FilterResult<Action<Block>> {
        if !cx.format().is_latex() && !cx.format().is_html() {
            return Ok(Action::Keep);
        }
        let Block::CodeBlock(attr, code) = block else {
            return Ok(Action::Keep);
        };
        let Some(language) = self.language(attr) else {
            return Ok(Action::Keep);
        };
        let Some((options, body)) = fenced::parse::<ListingOptions>(code) else {
            return Ok(Action::Keep);
        };

        let replacement = if cx.is_latex() {
            self.latex(options, language, body, cx)?
        } else {
            self.html(options, attr, body, cx)?
        };
        Ok(Action::Replace(replacement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Verbatim;

    const CODE: &str = "def f():\n    return 1\n";

    fn block(class: &str, header: &str) -> Block {
        Block::CodeBlock(Attr::new().class(class).attr("startFrom", "3"), format!("{header}...\n{CODE}"))
    }

    fn run(format: Format, block: &Block) -> Action<Block> {
        Listings::default().block(block, &Context::new(&format, &Verbatim)).unwrap()
    }

    fn latex(block: &Block) -> String {
        match run(Format::Latex, block) {
            Action::Replace(Block::RawBlock(_, text)) => text,
            other => panic!("Expected RawBlock, got {other:?}"),
        }
    }

    #[test]
    fn test_floating_listing() {
        let header = "identifier: lst:f\ncaption: A *function*\nplacement: htp\nmintedopts: linenos\n";
        assert_eq!(
            latex(&block("python", header)),
            "\\begin{listing}[htp]\n\\begin{minted}[linenos]{python}\ndef f():\n    return 1\n\\end{minted}\n\\caption{A *function*}\n\\label{lst:f}\n\\end{listing}"
        );
    }

    #[test]
    fn test_inline_listing_with_caption() {
        let header = "caption: Query\nfloating: false\nlanguage: postgresql\n";
        assert_eq!(
            latex(&block("sql", header)),
            "\\begin{minted}{postgresql}\ndef f():\n    return 1\n\\end{minted}\n\\captionof{listing}{Query}"
        );
    }

    #[test]
    fn test_uncaptioned_listing() {
        assert_eq!(
            latex(&block("bash", "")),
            "\\begin{minted}{bash}\ndef f():\n    return 1\n\\end{minted}"
        );
    }

    #[test]
    fn test_html_listing() {
        let out = run(Format::Html, &block("python", "identifier: lst:f\ncaption: Hello\n"));
        let Action::Replace(Block::Div(attr, content)) = out else {
            panic!("Expected Div");
        };
        assert_eq!(attr.id(), Some("lst:f"));
        assert!(attr.has_class("fencedSourceCode"));
        match &content[..] {
            [Block::CodeBlock(code_attr, code), Block::Plain(caption)] => {
                assert_eq!(code, CODE);
                assert!(code_attr.has_class("python"));
                assert_eq!(code_attr.get("startFrom"), Some("3"));
                assert!(caption[0].is_span_with("fencedSourceCodeCaption"));
            }
            other => panic!("Unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_blocks_left_alone() {
        // unknown language
        assert!(run(Format::Latex, &block("rust", "")).is_keep());
        // no header separator
        let plain = Block::CodeBlock(Attr::new().class("python"), CODE.to_owned());
        assert!(run(Format::Latex, &plain).is_keep());
        // malformed header
        assert!(run(Format::Latex, &block("python", "caption: [oops\n")).is_keep());
        // unsupported format
        assert!(run(Format::from("docx"), &block("python", "")).is_keep());
    }
}

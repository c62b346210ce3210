//! Acronyms and glossary entries for `glossaries-extra`.
//!
//! ```markdown
//! [so]{.ac short="SO" long="Stack Overflow"}
//! [ptt]{.gl .up name="Potato" text="potato" description="Starchy *tuber*" plural="potatoes"}
//! ```
//!
//! Every span becomes `\gls{label}` (`\Gls` with `.up`), where the label is
//! the lowercased span text. Definitions are collected per document, first
//! one wins, and written to `header-includes` after the walk:
//!
//! ```latex
//! \makeglossaries
//! \newabbreviation{so}{SO}{Stack Overflow}
//! \newglossaryentry{ptt}{ ... }
//! ```
//!
//! Uses are rendered whether or not the label is ever defined.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxBuildHasher;
use tracing::debug;

use crate::attr_schema;
use crate::error::FilterResult;
use crate::format::Format;
use crate::node::{Document, Inline};
use crate::stringify::stringify;
use crate::template::{Template, Values};
use crate::transform::{Action, Context, Filter};

const USE_TERM: Template = Template::new(r"<% if up %>\Gls<% else %>\gls<% endif %>{<< label >>}");

const DEFINE_ABBREVIATION: Template = Template::new(r"\newabbreviation{<< label >>}{<< short >>}{<< long >>}");

const DEFINE_ENTRY: Template = Template::new(
    r"\newglossaryentry{<< label >>}{
    name={<< name >>},
<% if text %>    text={<< text >>},
<% endif %><% if plural %>    plural={<< plural >>},
<% endif %>    description={<< description >>}
}",
);

const MAKE_GLOSSARIES: &str = r"\makeglossaries";

attr_schema! {
    struct AbbreviationAttrs {
        short,
        long,
    }
}

attr_schema! {
    struct EntryAttrs {
        name,
        text,
        description,
        plural,
    }
}

/// `\newabbreviation` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviation {
    pub label: String,
    pub short: String,
    pub long: String,
}

/// `\newglossaryentry` fields. The description is already converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub label: String,
    pub name: String,
    pub text: Option<String>,
    pub plural: Option<String>,
    pub description: String,
}

type Registry<T> = IndexMap<String, T, FxBuildHasher>;

/// Span `.ac` / `.gl` filter with its per-document registry.
#[derive(Debug, Default)]
pub struct Glossary {
    abbreviations: Registry<Abbreviation>,
    entries: Registry<GlossaryEntry>,
    uses: usize,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected abbreviations, in first-definition order.
    pub fn abbreviations(&self) -> impl Iterator<Item = &Abbreviation> {
        self.abbreviations.values()
    }

    /// Collected glossary entries, in first-definition order.
    pub fn entries(&self) -> impl Iterator<Item = &GlossaryEntry> {
        self.entries.values()
    }

    fn record_abbreviation(&mut self, label: &str, attrs: AbbreviationAttrs) {
        let (Some(short), Some(long)) = (attrs.short, attrs.long) else {
            return;
        };
        if let Entry::Vacant(slot) = self.abbreviations.entry(label.to_owned()) {
            debug!(label, "abbreviation defined");
            slot.insert(Abbreviation {
                label: label.to_owned(),
                short,
                long,
            });
        }
    }

    fn record_entry(&mut self, label: &str, attrs: EntryAttrs, cx: &Context<'_>) -> FilterResult<()> {
        if label.is_empty() {
            return Ok(());
        }
        let (Some(name), Some(description)) = (attrs.name, attrs.description) else {
            return Ok(());
        };
        if let Entry::Vacant(slot) = self.entries.entry(label.to_owned()) {
            debug!(label, "glossary entry defined");
            let description = cx.markdown(&description)?;
            slot.insert(GlossaryEntry {
                label: label.to_owned(),
                name,
                text: attrs.text,
                plural: attrs.plural,
                description,
            });
        }
        Ok(())
    }

    fn preamble(&self) -> FilterResult<Vec<String>> {
        let mut lines = Vec::with_capacity(1 + self.abbreviations.len() + self.entries.len());
        lines.push(MAKE_GLOSSARIES.to_owned());
        for abbr in self.abbreviations.values() {
            let values = Values::new()
                .text("label", abbr.label.as_str())
                .text("short", abbr.short.as_str())
                .text("long", abbr.long.as_str());
            lines.push(DEFINE_ABBREVIATION.render(&values)?);
        }
        for entry in self.entries.values() {
            let values = Values::new()
                .text("label", entry.label.as_str())
                .text("name", entry.name.as_str())
                .opt("text", entry.text.as_deref())
                .opt("plural", entry.plural.as_deref())
                .text("description", entry.description.as_str());
            lines.push(DEFINE_ENTRY.render(&values)?);
        }
        Ok(lines)
    }
}

impl Filter for Glossary {
    fn name(&self) -> &'static str {
        "glossary"
    }

    fn prepare(&mut self, _doc: &Document) -> FilterResult<()> {
        self.abbreviations.clear();
        self.entries.clear();
        self.uses = 0;
        Ok(())
    }

    fn inline(&mut self, inline: &Inline, cx: &Context<'_>) -> FilterResult<Action<Inline>> {
        if !cx.is_latex() {
            return Ok(Action::Keep);
        }
        let Inline::Span(attr, content) = inline else {
            return Ok(Action::Keep);
        };

        let label = stringify(content).to_lowercase();
        if attr.has_class("ac") {
            self.record_abbreviation(&label, AbbreviationAttrs::from_attr(attr));
        } else if attr.has_class("gl") {
            self.record_entry(&label, EntryAttrs::from_attr(attr), cx)?;
        } else {
            return Ok(Action::Keep);
        }
        self.uses += 1;

        let values = Values::new().text("label", label).flag("up", attr.has_class("up"));
        let tex = USE_TERM.render(&values)?;
        Ok(Action::Replace(Inline::raw(Format::Latex, tex)))
    }

    fn finalize(&mut self, doc: &mut Document) -> FilterResult<()> {
        if !doc.format.is_latex() || self.uses == 0 {
            return Ok(());
        }
        let lines = self.preamble()?;
        debug!(
            abbreviations = self.abbreviations.len(),
            entries = self.entries.len(),
            "flushing glossary"
        );
        doc.append_header_includes(&Format::Latex, lines);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Attr;
    use crate::convert::Verbatim;

    fn span(attr: Attr, text: &str) -> Inline {
        Inline::Span(attr, vec![Inline::str(text)])
    }

    fn latex() -> Format {
        Format::Latex
    }

    #[test]
    fn test_use_token() {
        let format = latex();
        let cx = Context::new(&format, &Verbatim);
        let mut gls = Glossary::new();

        let lower = gls.inline(&span(Attr::new().class("ac"), "LRU"), &cx).unwrap();
        assert_eq!(lower, Action::Replace(Inline::raw(Format::Latex, r"\gls{lru}")));

        let upper = gls.inline(&span(Attr::new().class("gl").class("up"), "Ptt"), &cx).unwrap();
        assert_eq!(upper, Action::Replace(Inline::raw(Format::Latex, r"\Gls{ptt}")));

        // no definition fields: still a use, nothing recorded
        assert_eq!(gls.abbreviations().count(), 0);
        assert_eq!(gls.entries().count(), 0);
    }

    #[test]
    fn test_first_definition_wins() {
        let format = latex();
        let cx = Context::new(&format, &Verbatim);
        let mut gls = Glossary::new();

        let first = Attr::new().class("ac").attr("short", "SO").attr("long", "Stack Overflow");
        let second = Attr::new().class("ac").attr("short", "SO").attr("long", "Something Else");
        gls.inline(&span(first, "so"), &cx).unwrap();
        let again = gls.inline(&span(second, "SO"), &cx).unwrap();

        assert!(!again.is_keep());
        let abbrs: Vec<_> = gls.abbreviations().collect();
        assert_eq!(abbrs.len(), 1);
        assert_eq!(abbrs[0].long, "Stack Overflow");
    }

    #[test]
    fn test_entry_rendering() {
        let format = latex();
        let cx = Context::new(&format, &Verbatim);
        let mut gls = Glossary::new();
        let attr = Attr::new()
            .class("gl")
            .attr("name", "Potato")
            .attr("description", "Starchy tuber")
            .attr("plural", "potatoes");
        gls.inline(&span(attr, "ptt"), &cx).unwrap();

        let lines = gls.preamble().unwrap();
        assert_eq!(lines[0], r"\makeglossaries");
        assert_eq!(
            lines[1],
            "\\newglossaryentry{ptt}{\n    name={Potato},\n    plural={potatoes},\n    description={Starchy tuber}\n}"
        );
    }

    #[test]
    fn test_finalize_only_when_used() {
        let mut gls = Glossary::new();
        let mut doc = Document::default().with_format(Format::Latex);
        gls.prepare(&doc).unwrap();
        gls.finalize(&mut doc).unwrap();
        assert!(doc.meta.is_empty());
    }

    #[test]
    fn test_html_is_untouched() {
        let format = Format::Html;
        let cx = Context::new(&format, &Verbatim);
        let mut gls = Glossary::new();
        assert!(gls.inline(&span(Attr::new().class("ac"), "x"), &cx).unwrap().is_keep());
    }
}

//! Extended figures: short captions, float placement and width.
//!
//! ```markdown
//! ![Food truck revenue [vgl. @perez, 13]](profit.pdf){#fig:trucks short="Revenue" placement="htbp" width="70%"}
//! ```
//!
//! Every image becomes a LaTeX `figure` float. A pandoc `Figure` holding a
//! single image is rendered as a whole, so the float is not nested. In a
//! `Figure` with several images each image becomes a bare graphic and pandoc
//! writes the float. `.pgf` files are `\input` instead of included as graphics.

use tracing::debug;

use crate::attr::Attr;
use crate::attr_schema;
use crate::error::FilterResult;
use crate::format::Format;
use crate::node::{Block, Inline, NodeKind, Target};
use crate::stringify::caption_text;
use crate::template::{Template, Values};
use crate::transform::{Action, Context, Filter};

use super::{print_factor, width_factor};

const GRAPHIC: Template = Template::new(
    r"<% if pgf %>\input{<< path >>}<% else %>\includegraphics<% if width %>[width=<< width >>\textwidth]<% endif %>{<< path >>}<% endif %>",
);

const FIGURE: Template = Template::new(
    r"\begin{figure}<% if placement %>[<< placement >>]<% endif %>
<% if identifier %>\hypertarget{<< identifier >>}{%
<% endif %>\centering
<< graphic >>
\caption<% if short_caption %>[<< short_caption >>]<% endif %>{<< caption >>}<% if identifier %>\label{<< identifier >>}
}<% endif %>
\end{figure}",
);

attr_schema! {
    struct FigureAttrs {
        short,
        placement,
        width,
    }
}

impl FigureAttrs {
    /// Fields of `self`, falling back to `other`.
    fn or(self, other: FigureAttrs) -> Self {
        Self {
            short: self.short.or(other.short),
            placement: self.placement.or(other.placement),
            width: self.width.or(other.width),
        }
    }
}

/// Image / Figure filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Figures;

/// Everything the template needs, gathered from an image (and its figure).
struct Graphic<'a> {
    attrs: FigureAttrs,
    identifier: Option<&'a str>,
    path: &'a str,
    /// Caption as markdown.
    caption: String,
}

impl Graphic<'_> {
    fn render(self, cx: &Context<'_>) -> FilterResult<String> {
        let graphic = graphic(self.path, self.attrs.width.as_deref())?;
        let short_caption = self.attrs.short.as_deref().map(|s| cx.markdown(s)).transpose()?;
        let caption = cx.markdown(&self.caption)?;

        let values = Values::new()
            .opt("placement", self.attrs.placement)
            .opt("identifier", self.identifier)
            .text("graphic", graphic)
            .opt("short_caption", short_caption)
            .text("caption", caption);
        Ok(FIGURE.render(&values)?)
    }
}

/// `\includegraphics` (or `\input`) for one image, without a float.
fn graphic(path: &str, width: Option<&str>) -> FilterResult<String> {
    let values = Values::new()
        .flag("pgf", path.ends_with(".pgf"))
        .opt("width", width_factor(width)?.map(print_factor))
        .text("path", path);
    Ok(GRAPHIC.render(&values)?)
}

/// Figure content with every paragraph-level image replaced by a bare
/// graphic, or `None` when there is no image.
fn bare_graphics(content: &[Block]) -> FilterResult<Option<Vec<Block>>> {
    let mut found = false;
    let mut replace = |inlines: &[Inline]| -> FilterResult<Vec<Inline>> {
        inlines
            .iter()
            .map(|inline| match inline {
                Inline::Image(attr, _, (path, _)) => {
                    found = true;
                    let attrs = FigureAttrs::from_attr(attr);
                    if attrs.short.is_some() || attrs.placement.is_some() {
                        debug!(path = %path, "short caption and placement only apply to a whole figure");
                    }
                    Ok(Inline::raw(Format::Latex, graphic(path, attrs.width.as_deref())?))
                }
                other => Ok(other.clone()),
            })
            .collect()
    };

    let blocks = content
        .iter()
        .map(|block| match block {
            Block::Plain(inlines) => Ok(Block::Plain(replace(inlines)?)),
            Block::Para(inlines) => Ok(Block::Para(replace(inlines)?)),
            other => Ok(other.clone()),
        })
        .collect::<FilterResult<Vec<_>>>()?;
    Ok(found.then_some(blocks))
}

/// The image of a figure made of exactly one image.
fn sole_image(content: &[Block]) -> Option<(&Attr, &[Inline], &Target)> {
    match content {
        [Block::Plain(inlines) | Block::Para(inlines)] => match inlines.as_slice() {
            [Inline::Image(attr, alt, target)] => Some((attr, alt.as_slice(), target)),
            _ => None,
        },
        _ => None,
    }
}

impl Filter for Figures {
    fn name(&self) -> &'static str {
        "figures"
    }

    fn inline(&mut self, inline: &Inline, cx: &Context<'_>) -> FilterResult<Action<Inline>> {
        if !cx.is_latex() || cx.within(NodeKind::Figure) {
            return Ok(Action::Keep);
        }
        let Inline::Image(attr, alt, (path, _title)) = inline else {
            return Ok(Action::Keep);
        };

        let graphic = Graphic {
            attrs: FigureAttrs::from_attr(attr),
            identifier: attr.id(),
            path,
            caption: caption_text(alt),
        };
        Ok(Action::Replace(Inline::raw(Format::Latex, graphic.render(cx)?)))
    }

    fn block(&mut self, block: &Block, cx: &Context<'_>) -> FilterResult<Action<Block>> {
        if !cx.is_latex() {
            return Ok(Action::Keep);
        }
        let Block::Figure(fig_attr, caption, content) = block else {
            return Ok(Action::Keep);
        };
        let Some((img_attr, alt, (path, _title))) = sole_image(content) else {
            return Ok(match bare_graphics(content)? {
                Some(content) => Action::Replace(Block::Figure(fig_attr.clone(), caption.clone(), content)),
                None => Action::Keep,
            });
        };

        let caption = if caption.long().is_empty() {
            caption_text(alt)
        } else {
            caption_text(caption.long_inlines())
        };
        let graphic = Graphic {
            attrs: FigureAttrs::from_attr(img_attr).or(FigureAttrs::from_attr(fig_attr)),
            identifier: img_attr.id().or(fig_attr.id()),
            path,
            caption,
        };
        Ok(Action::Replace(Block::raw(Format::Latex, graphic.render(cx)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Verbatim;
    use crate::node::{Caption, MathType};
    use crate::transform::Scope;

    fn image(attr: Attr, path: &str) -> Inline {
        Inline::Image(
            attr,
            vec![
                Inline::str("Growth"),
                Inline::Space,
                Inline::Math(MathType::InlineMath, "n^2".into()),
            ],
            (path.to_owned(), String::new()),
        )
    }

    fn inline_text(action: Action<Inline>) -> String {
        match action {
            Action::Replace(Inline::RawInline(_, text)) => text,
            other => panic!("Expected RawInline, got {other:?}"),
        }
    }

    fn block_text(action: Action<Block>) -> String {
        match action {
            Action::Replace(Block::RawBlock(_, text)) => text,
            other => panic!("Expected RawBlock, got {other:?}"),
        }
    }

    #[test]
    fn test_full_figure() {
        let format = Format::Latex;
        let cx = Context::new(&format, &Verbatim);
        let attr = Attr::new()
            .with_id("fig:growth")
            .attr("short", "Growth")
            .attr("placement", "htbp")
            .attr("width", "70%");
        let tex = inline_text(Figures.inline(&image(attr, "growth.pdf"), &cx).unwrap());
        assert_eq!(
            tex,
            "\\begin{figure}[htbp]\n\\hypertarget{fig:growth}{%\n\\centering\n\\includegraphics[width=0.70\\textwidth]{growth.pdf}\n\\caption[Growth]{Growth $n^2$}\\label{fig:growth}\n}\n\\end{figure}"
        );
    }

    #[test]
    fn test_minimal_figure_and_pgf() {
        let format = Format::Latex;
        let cx = Context::new(&format, &Verbatim);
        let tex = inline_text(Figures.inline(&image(Attr::new(), "plot.pgf"), &cx).unwrap());
        assert_eq!(
            tex,
            "\\begin{figure}\n\\centering\n\\input{plot.pgf}\n\\caption{Growth $n^2$}\n\\end{figure}"
        );
    }

    #[test]
    fn test_figure_block_uses_its_caption_and_id() {
        let format = Format::Latex;
        let cx = Context::new(&format, &Verbatim);
        let figure = Block::Figure(
            Attr::new().with_id("fig:a"),
            Caption(None, vec![Block::Plain(vec![Inline::str("Caption")])]),
            vec![Block::Plain(vec![image(Attr::new().attr("width", "100"), "a.png")])],
        );
        let tex = block_text(Figures.block(&figure, &cx).unwrap());
        assert!(tex.contains("\\includegraphics[width=1.00\\textwidth]{a.png}"));
        assert!(tex.contains("\\caption{Caption}\\label{fig:a}"));
    }

    #[test]
    fn test_multi_image_figure_gets_bare_graphics() {
        let format = Format::Latex;
        let cx = Context::new(&format, &Verbatim);
        let width = Attr::new().attr("width", "40%");
        let figure = Block::Figure(
            Attr::new().with_id("fig:pair"),
            Caption(None, vec![Block::Plain(vec![Inline::str("Pair")])]),
            vec![Block::Para(vec![
                image(width.clone(), "left.png"),
                Inline::Space,
                image(width, "right.pgf"),
            ])],
        );

        let Action::Replace(Block::Figure(attr, caption, content)) = Figures.block(&figure, &cx).unwrap() else {
            panic!("Expected Figure replacement");
        };
        assert_eq!(attr.id(), Some("fig:pair"));
        assert_eq!(caption.long(), [Block::Plain(vec![Inline::str("Pair")])]);
        assert_eq!(
            content,
            [Block::Para(vec![
                Inline::raw(Format::Latex, "\\includegraphics[width=0.40\\textwidth]{left.png}"),
                Inline::Space,
                Inline::raw(Format::Latex, "\\input{right.pgf}"),
            ])]
        );
    }

    #[test]
    fn test_images_inside_figure_wait_for_the_figure() {
        let format = Format::Latex;
        let figure = Attr::new();
        let scope = Scope::new(NodeKind::Figure, Some(&figure), None);
        let cx = Context::new(&format, &Verbatim).with_scope(Some(&scope));
        assert!(Figures.inline(&image(Attr::new(), "a.png"), &cx).unwrap().is_keep());
    }

    #[test]
    fn test_invalid_width_fails() {
        let format = Format::Latex;
        let cx = Context::new(&format, &Verbatim);
        let result = Figures.inline(&image(Attr::new().attr("width", "wide"), "a.png"), &cx);
        assert!(result.is_err());
    }

    #[test]
    fn test_html_passes_through() {
        let format = Format::Html;
        let cx = Context::new(&format, &Verbatim);
        assert!(Figures.inline(&image(Attr::new(), "a.png"), &cx).unwrap().is_keep());
    }
}

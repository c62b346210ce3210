//! Extended tables rendered as `longtable`.
//!
//! ```markdown
//! ::: {.ext #tbl:results short="Results" width="70%"}
//! | A | B |
//! |---|--:|
//! | 1 | 2 |
//!
//! : Results of the *first* run
//! :::
//! ```
//!
//! Only tables whose immediate parent is a container Div are handled. Every
//! cell is a top-aligned (header: bottom-aligned) `minipage` whose width is
//! the column width scaled by the container's `width`.

use smallvec::SmallVec;
use tracing::debug;

use crate::attr_schema;
use crate::error::FilterResult;
use crate::format::Format;
use crate::node::{Alignment, Block, Caption, ColSpec, ColWidth, NodeKind, Row, TableBody, TableFoot, TableHead};
use crate::stringify::{caption_text, stringify_blocks};
use crate::template::{Template, Values};
use crate::transform::{Action, Context, Filter};

use super::{print_factor, width_factor};

const LONGTABLE: Template = Template::new(
    r"\begin{longtable}<% if align %>[<< align >>]<% endif %>{@{}<< columns >>@{}}
<% if caption %>\caption<% if short_caption %>[<< short_caption >>]<% endif %>{<< caption >>}<% if identifier %>\label{<< identifier >>}<% endif %>\tabularnewline
<% endif %>\toprule
<% if header %><< header >>
\midrule
\endfirsthead
\toprule
<< header >>
\midrule
\endhead
<% endif %><< body >>
\bottomrule
\end{longtable}",
);

const CELL: Template = Template::new(
    r"\begin{minipage}[<< valign >>]{<< width >>\columnwidth}<< halign >>
<< text >>\strut
\end{minipage}",
);

attr_schema! {
    struct ContainerAttrs {
        short,
        placement,
        width,
    }
}

/// Table filter.
#[derive(Debug, Clone)]
pub struct Tables {
    container_classes: SmallVec<[String; 4]>,
}

impl Default for Tables {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TABLE_CLASSES.iter().copied())
    }
}

fn column_token(alignment: Alignment) -> char {
    match alignment {
        Alignment::AlignLeft | Alignment::AlignDefault => 'l',
        Alignment::AlignRight => 'r',
        Alignment::AlignCenter => 'c',
    }
}

fn cell_alignment(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::AlignLeft | Alignment::AlignDefault => r"\raggedright",
        Alignment::AlignRight => r"\raggedleft",
        Alignment::AlignCenter => r"\centering",
    }
}

/// `longtable` alignment option; float placements like `htbp` do not apply.
fn table_alignment(placement: Option<&str>) -> Option<&str> {
    match placement {
        Some(p @ ("l" | "c" | "r")) => Some(p),
        Some(other) => {
            debug!(placement = other, "longtable does not float, ignoring placement");
            None
        }
        None => None,
    }
}

/// Column layout shared by all rows.
struct Layout<'t> {
    specs: &'t [ColSpec],
    /// Container width factor.
    scale: f64,
}

impl Layout<'_> {
    fn width(&self, column: usize) -> f64 {
        let share = match self.specs.get(column).map(|spec| spec.1) {
            Some(ColWidth::ColWidth(w)) => w,
            _ => 1.0 / self.specs.len().max(1) as f64,
        };
        self.scale * share
    }

    fn alignment(&self, column: usize) -> Alignment {
        self.specs.get(column).map(|spec| spec.0).unwrap_or_default()
    }

    fn descriptor(&self) -> String {
        self.specs.iter().map(|spec| column_token(spec.0)).collect()
    }

    fn row(&self, row: &Row, valign: &str, cx: &Context<'_>) -> FilterResult<String> {
        let mut cells = Vec::with_capacity(row.cells().len());
        let mut column = 0;
        for cell in row.cells() {
            let span = usize::try_from(cell.3).unwrap_or(1).max(1);
            let width: f64 = (column..column + span).map(|c| self.width(c)).sum();
            let alignment = match cell.1 {
                Alignment::AlignDefault => self.alignment(column),
                explicit => explicit,
            };
            let text = cx.markdown(&stringify_blocks(cell.blocks()))?;

            let values = Values::new()
                .text("valign", valign)
                .text("width", print_factor(width))
                .text("halign", cell_alignment(alignment))
                .text("text", text);
            cells.push(CELL.render(&values)?);
            column += span;
        }
        Ok(format!("{} \\\\", cells.join(" & ")))
    }

    fn rows<'r>(&self, rows: impl Iterator<Item = &'r Row>, valign: &str, cx: &Context<'_>) -> FilterResult<String> {
        let rendered = rows.map(|row| self.row(row, valign, cx)).collect::<FilterResult<Vec<_>>>()?;
        Ok(rendered.join("\n"))
    }
}

impl Tables {
    pub fn new<I, S>(container_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            container_classes: container_classes.into_iter().map(Into::into).collect(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render(
        &self,
        container: ContainerAttrs,
        identifier: Option<&str>,
        caption: &Caption,
        specs: &[ColSpec],
        head: &TableHead,
        bodies: &[TableBody],
        foot: &TableFoot,
        cx: &Context<'_>,
    ) -> FilterResult<String> {
        let scale = width_factor(container.width.as_deref())?.unwrap_or(1.0);
        let layout = Layout { specs, scale };

        let caption = caption_text(caption.long_inlines());
        let caption = cx.markdown(&caption)?;
        let short_caption = container.short.as_deref().map(|s| cx.markdown(s)).transpose()?;
        let header = layout.rows(head.rows().iter(), "b", cx)?;
        let body = layout.rows(bodies.iter().flat_map(TableBody::rows).chain(foot.rows()), "t", cx)?;

        let values = Values::new()
            .opt("align", table_alignment(container.placement.as_deref()))
            .text("columns", layout.descriptor())
            .text("caption", caption)
            .opt("short_caption", short_caption)
            .opt("identifier", identifier)
            .text("header", header)
            .text("body", body);
        Ok(LONGTABLE.render(&values)?)
    }
}

impl Filter for Tables {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn block(&mut self, block: &Block, cx: &Context<'_>) -> FilterResult<Action<Block>> {
        if !cx.is_latex() {
            return Ok(Action::Keep);
        }
        let Block::Table(attr, caption, specs, head, bodies, foot) = block else {
            return Ok(Action::Keep);
        };
        let Some(container) = cx
            .parent()
            .filter(|p| p.kind() == NodeKind::Div)
            .and_then(|p| p.attr())
            .filter(|a| a.has_any_class(&self.container_classes))
        else {
            return Ok(Action::Keep);
        };

        let identifier = container.id().or(attr.id());
        let tex = self.render(
            ContainerAttrs::from_attr(container),
            identifier,
            caption,
            specs,
            head,
            bodies,
            foot,
            cx,
        )?;
        Ok(Action::Replace(Block::raw(Format::Latex, tex)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Attr;
    use crate::convert::Verbatim;
    use crate::node::{Cell, Inline};
    use crate::transform::Scope;

    fn cell(text: &str) -> Cell {
        Cell::new(vec![Block::Plain(vec![Inline::str(text)])])
    }

    fn table(specs: Vec<ColSpec>, head: Vec<Row>) -> Block {
        Block::Table(
            Attr::new(),
            Caption(None, vec![Block::Plain(vec![Inline::str("Results")])]),
            specs,
            TableHead(Attr::new(), head),
            vec![TableBody(
                Attr::new(),
                0,
                vec![],
                vec![
                    Row(Attr::new(), vec![cell("1"), cell("2")]),
                    Row(Attr::new(), vec![cell("3"), cell("4")]),
                ],
            )],
            TableFoot::default(),
        )
    }

    fn render_in(container: &Attr, block: &Block) -> Action<Block> {
        let format = Format::Latex;
        let scope = Scope::new(NodeKind::Div, Some(container), None);
        let cx = Context::new(&format, &Verbatim).with_scope(Some(&scope));
        Tables::default().block(block, &cx).unwrap()
    }

    fn text(action: Action<Block>) -> String {
        match action {
            Action::Replace(Block::RawBlock(_, text)) => text,
            other => panic!("Expected RawBlock, got {other:?}"),
        }
    }

    #[test]
    fn test_longtable_without_header() {
        let container = Attr::new().class("ext").attr("width", "70").attr("placement", "htbp");
        let tex = text(render_in(&container, &table(vec![ColSpec::default(); 2], vec![])));

        let expected = "\\begin{longtable}{@{}ll@{}}\n\
\\caption{Results}\\tabularnewline\n\
\\toprule\n\
\\begin{minipage}[t]{0.35\\columnwidth}\\raggedright\n1\\strut\n\\end{minipage} & \
\\begin{minipage}[t]{0.35\\columnwidth}\\raggedright\n2\\strut\n\\end{minipage} \\\\\n\
\\begin{minipage}[t]{0.35\\columnwidth}\\raggedright\n3\\strut\n\\end{minipage} & \
\\begin{minipage}[t]{0.35\\columnwidth}\\raggedright\n4\\strut\n\\end{minipage} \\\\\n\
\\bottomrule\n\
\\end{longtable}";
        assert_eq!(tex, expected);
    }

    #[test]
    fn test_header_alignment_and_widths() {
        let specs = vec![
            ColSpec(Alignment::AlignRight, ColWidth::ColWidth(0.25)),
            ColSpec(Alignment::AlignCenter, ColWidth::ColWidth(0.75)),
        ];
        let head = vec![Row(Attr::new(), vec![cell("A"), cell("B")])];
        let container = Attr::new().with_id("tbl:x").class("divtable").attr("short", "Short");
        let tex = text(render_in(&container, &table(specs, head)));

        assert!(tex.starts_with("\\begin{longtable}{@{}rc@{}}\n\\caption[Short]{Results}\\label{tbl:x}\\tabularnewline\n"));
        assert!(tex.contains("\\begin{minipage}[b]{0.25\\columnwidth}\\raggedleft\nA\\strut"));
        assert!(tex.contains("\\begin{minipage}[b]{0.75\\columnwidth}\\centering\nB\\strut"));
        assert!(tex.contains("\\endfirsthead\n\\toprule\n"));
        assert!(tex.contains("\\begin{minipage}[t]{0.25\\columnwidth}\\raggedleft\n1\\strut"));
    }

    #[test]
    fn test_table_outside_container_is_kept() {
        let format = Format::Latex;
        let cx = Context::new(&format, &Verbatim);
        let block = table(vec![ColSpec::default(); 2], vec![]);
        assert!(Tables::default().block(&block, &cx).unwrap().is_keep());

        let plain_div = Attr::new().class("note");
        assert!(render_in(&plain_div, &block).is_keep());
    }

    #[test]
    fn test_invalid_container_width_fails() {
        let format = Format::Latex;
        let container = Attr::new().class("ext").attr("width", "half");
        let scope = Scope::new(NodeKind::Div, Some(&container), None);
        let cx = Context::new(&format, &Verbatim).with_scope(Some(&scope));
        let block = table(vec![ColSpec::default(); 2], vec![]);
        assert!(Tables::default().block(&block, &cx).is_err());
    }

    #[test]
    fn test_container_width_keeps_precision() {
        // 66.6% of half a column is 0.333, not 0.67 * 0.5
        let specs = vec![ColSpec(Alignment::AlignLeft, ColWidth::ColWidth(0.5)); 2];
        let container = Attr::new().class("ext").attr("width", "66.6%");
        let tex = text(render_in(&container, &table(specs, vec![])));
        assert_eq!(tex.matches("{0.33\\columnwidth}").count(), 4, "{tex}");
    }
}

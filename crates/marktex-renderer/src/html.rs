//! HTML materializer for the enriched tree.
//!
//! Produces HTML5 with computed styles inlined as `style` attributes, so the
//! output renders the same without any external stylesheet.

use std::fmt::Write;

use marktex_layout::{Declarations, LayoutParams};

use crate::node::{Block, Cell, Container, ContainerKind, Document, Image, Inline, List, Table};
use crate::style;
use crate::util::escape_html;

/// Where the HTML is going to be shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderTarget {
    /// Interactive preview: page breaks are visible indicators.
    #[default]
    Screen,
    /// Print output: page breaks are hard page boundaries and screen-only chrome is omitted.
    Print,
}

/// Styles for the preview chrome around the page container.
const SCREEN_STYLES: &str = ".preview-wrapper { display: flex; justify-content: center; padding: 2rem; background: #f3f4f6; min-height: 100vh; box-sizing: border-box; overflow: auto; }
.print-container { background: white; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1); box-sizing: border-box; overflow-wrap: break-word; }
.print-container img { vertical-align: middle; }
.print-container pre { overflow-x: auto; }
";

/// HTML renderer for one target.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer {
    target: RenderTarget,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new(target: RenderTarget) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn target(&self) -> RenderTarget {
        self.target
    }

    /// Render the document body as an HTML fragment.
    #[must_use]
    pub fn render(&self, document: &Document) -> String {
        let mut out = String::with_capacity(4096);
        self.blocks(&document.blocks, &mut out);
        out
    }

    /// Render the body inside the page container styled from `layout`.
    #[must_use]
    pub fn render_page(&self, document: &Document, layout: &LayoutParams) -> String {
        let body = self.render(document);
        let container = format!(
            r#"<div class="print-container" style="{}">{body}</div>"#,
            escape_html(&layout.container_style().to_inline())
        );
        match self.target {
            RenderTarget::Screen => format!(r#"<div class="preview-wrapper">{container}</div>"#),
            RenderTarget::Print => container,
        }
    }

    /// Render a complete HTML document, including the print stylesheet.
    #[must_use]
    pub fn render_standalone(&self, document: &Document, layout: &LayoutParams) -> String {
        let title = document.title().unwrap_or_else(|| "Document".to_owned());
        let mut out = String::with_capacity(8192);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        writeln!(out, "<title>{}</title>", escape_html(title.trim())).unwrap();
        out.push_str("<style>\n");
        if self.target == RenderTarget::Screen {
            out.push_str(SCREEN_STYLES);
        }
        out.push_str(&layout.print_stylesheet());
        out.push_str("</style>\n</head>\n<body>\n");
        out.push_str(&self.render_page(document, layout));
        out.push_str("\n</body>\n</html>\n");
        out
    }

    fn blocks(&self, blocks: &[Block], out: &mut String) {
        for block in blocks {
            self.block(block, out);
        }
    }

    fn block(&self, block: &Block, out: &mut String) {
        match block {
            Block::Paragraph(content) => {
                out.push_str("<p>");
                inlines(content, out);
                out.push_str("</p>");
            }
            Block::Plain(content) => inlines(content, out),
            Block::Heading(heading) => {
                write!(out, r#"<h{} id="{}""#, heading.level, escape_html(&heading.id)).unwrap();
                if let Some(style) = &heading.style {
                    style_attr(style, out);
                }
                out.push('>');
                inlines(&heading.content, out);
                write!(out, "</h{}>", heading.level).unwrap();
            }
            Block::PageBreak => self.page_break(out),
            Block::Container(container) => self.container(container, out),
            Block::Table(table) => table_html(table, out),
            Block::List(list) => self.list(list, out),
            Block::BlockQuote(children) => {
                out.push_str("<blockquote>");
                self.blocks(children, out);
                out.push_str("</blockquote>");
            }
            Block::CodeBlock { lang, content } => match lang {
                Some(lang) => write!(
                    out,
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    escape_html(content)
                )
                .unwrap(),
                None => write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap(),
            },
            Block::Html(html) => out.push_str(html),
            Block::FootnoteDefinition { label, blocks } => {
                let label = escape_html(label);
                write!(
                    out,
                    r#"<div class="footnote-definition" id="fn-{label}"><sup class="footnote-definition-label">{label}</sup>"#
                )
                .unwrap();
                self.blocks(blocks, out);
                out.push_str("</div>");
            }
            Block::Rule => out.push_str("<hr>"),
        }
    }

    fn page_break(&self, out: &mut String) {
        match self.target {
            RenderTarget::Screen => {
                out.push_str(r#"<div class="page-break""#);
                style_attr(&style::page_break_indicator(), out);
                out.push_str(r#"><span class="page-break-label no-print">Page Break</span></div>"#);
            }
            RenderTarget::Print => out.push_str(
                r#"<div class="page-break" style="break-after:page;page-break-after:always;height:0"></div>"#,
            ),
        }
    }

    fn container(&self, container: &Container, out: &mut String) {
        match &container.kind {
            ContainerKind::Columns { style } => {
                out.push_str(r#"<div class="columns""#);
                style_attr(style, out);
                out.push('>');
            }
            ContainerKind::Column { style } => {
                out.push_str(r#"<div class="column""#);
                style_attr(style, out);
                out.push('>');
            }
            ContainerKind::Other { open_tag } => out.push_str(open_tag),
        }
        self.blocks(&container.children, out);
        out.push_str("</div>");
    }

    fn list(&self, list: &List, out: &mut String) {
        let tag = match list.start {
            Some(1) => {
                out.push_str("<ol>");
                "ol"
            }
            Some(start) => {
                write!(out, r#"<ol start="{start}">"#).unwrap();
                "ol"
            }
            None => {
                out.push_str("<ul>");
                "ul"
            }
        };
        for item in &list.items {
            out.push_str("<li>");
            self.blocks(item, out);
            out.push_str("</li>");
        }
        write!(out, "</{tag}>").unwrap();
    }
}

fn table_html(table: &Table, out: &mut String) {
    out.push_str("<table");
    style_attr(&table.style.table, out);
    out.push('>');
    if !table.head.is_empty() {
        out.push_str("<thead><tr>");
        cells("th", &table.head, out);
        out.push_str("</tr></thead>");
    }
    out.push_str("<tbody>");
    for row in &table.rows {
        out.push_str("<tr>");
        cells("td", row, out);
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

fn cells(tag: &str, cells: &[Cell], out: &mut String) {
    for cell in cells {
        write!(out, "<{tag}").unwrap();
        style_attr(&cell.style, out);
        out.push('>');
        inlines(&cell.content, out);
        write!(out, "</{tag}>").unwrap();
    }
}

fn inlines(content: &[Inline], out: &mut String) {
    for inline in content {
        inline_html(inline, out);
    }
}

fn inline_html(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(&escape_html(text)),
        Inline::Code(code) => write!(out, "<code>{}</code>", escape_html(code)).unwrap(),
        Inline::Html(html) => out.push_str(html),
        Inline::InlineMath(math) => write!(
            out,
            r#"<span class="math math-inline">{}</span>"#,
            escape_html(math)
        )
        .unwrap(),
        Inline::DisplayMath(math) => write!(
            out,
            r#"<span class="math math-display">{}</span>"#,
            escape_html(math)
        )
        .unwrap(),
        Inline::Emphasis(children) => wrap("em", children, out),
        Inline::Strong(children) => wrap("strong", children, out),
        Inline::Strikethrough(children) => wrap("s", children, out),
        Inline::Superscript(children) => wrap("sup", children, out),
        Inline::Subscript(children) => wrap("sub", children, out),
        Inline::Link {
            url,
            title,
            content,
        } => {
            write!(out, r#"<a href="{}""#, escape_html(url)).unwrap();
            if !title.is_empty() {
                write!(out, r#" title="{}""#, escape_html(title)).unwrap();
            }
            out.push('>');
            inlines(content, out);
            out.push_str("</a>");
        }
        Inline::Image(image) => image_html(image, out),
        Inline::FootnoteReference(label) => {
            let label = escape_html(label);
            write!(
                out,
                r##"<sup class="footnote-reference"><a href="#fn-{label}">{label}</a></sup>"##
            )
            .unwrap();
        }
        Inline::TaskListMarker(checked) => {
            if *checked {
                out.push_str(r#"<input type="checkbox" disabled checked> "#);
            } else {
                out.push_str(r#"<input type="checkbox" disabled> "#);
            }
        }
        Inline::SoftBreak => out.push('\n'),
        Inline::HardBreak => out.push_str("<br>"),
    }
}

fn wrap(tag: &str, children: &[Inline], out: &mut String) {
    write!(out, "<{tag}>").unwrap();
    inlines(children, out);
    write!(out, "</{tag}>").unwrap();
}

fn image_html(image: &Image, out: &mut String) {
    if let Some(wrapper) = &image.style.wrapper {
        out.push_str(r#"<span class="image-float""#);
        style_attr(wrapper, out);
        out.push('>');
    }

    write!(out, r#"<img src="{}""#, escape_html(&image.src)).unwrap();
    write!(out, r#" alt="{}""#, escape_html(&image.alt)).unwrap();
    if !image.title.is_empty() {
        write!(out, r#" title="{}""#, escape_html(&image.title)).unwrap();
    }
    style_attr(&image.style.image, out);
    out.push('>');

    if image.style.wrapper.is_some() {
        out.push_str("</span>");
    }
}

fn style_attr(style: &Declarations, out: &mut String) {
    if !style.is_empty() {
        write!(out, r#" style="{}""#, escape_html(&style.to_inline())).unwrap();
    }
}

//! Enriched document tree.
//!
//! Parsed markdown with every directive already resolved into typed data and
//! computed styles. The tree holds no directive syntax.

use marktex_layout::Declarations;
use pulldown_cmark::Alignment;

use crate::directive::{ColorExpr, ImageDirectives};
use crate::style::{ImageStyle, TableStyle};

/// Root of an enriched document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Plain text of the first level-1 heading, if any.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading(heading) if heading.level == 1 => Some(plain_text(&heading.content)),
            _ => None,
        })
    }
}

/// Block-level node.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    /// Inline content of a tight list item, rendered without a paragraph.
    Plain(Vec<Inline>),
    Heading(Heading),
    PageBreak,
    Container(Container),
    Table(Table),
    List(List),
    BlockQuote(Vec<Block>),
    CodeBlock {
        lang: Option<String>,
        content: String,
    },
    /// Raw HTML passed through unchanged.
    Html(String),
    FootnoteDefinition {
        label: String,
        blocks: Vec<Block>,
    },
    Rule,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub id: String,
    pub content: Vec<Inline>,
    pub background: Option<ColorExpr>,
    /// Present only when a background directive applied.
    pub style: Option<Declarations>,
}

/// A `div` container.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub kind: ContainerKind,
    pub children: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ContainerKind {
    /// Flex row of side-by-side columns.
    Columns { style: Declarations },
    /// One column inside [`ContainerKind::Columns`].
    Column { style: Declarations },
    /// Any other `div`, keeping its opening tag verbatim.
    Other { open_tag: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub alignments: Vec<Alignment>,
    pub head: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
    pub borderless: bool,
    pub style: TableStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub content: Vec<Inline>,
    pub style: Declarations,
}

#[derive(Clone, Debug, PartialEq)]
pub struct List {
    /// Start number for ordered lists.
    pub start: Option<u64>,
    pub items: Vec<Vec<Block>>,
}

/// Inline-level node.
#[derive(Clone, Debug, PartialEq)]
pub enum Inline {
    Text(String),
    Code(String),
    /// Raw inline HTML passed through unchanged.
    Html(String),
    InlineMath(String),
    DisplayMath(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Superscript(Vec<Inline>),
    Subscript(Vec<Inline>),
    Link {
        url: String,
        title: String,
        content: Vec<Inline>,
    },
    Image(Image),
    FootnoteReference(String),
    TaskListMarker(bool),
    SoftBreak,
    HardBreak,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub directives: ImageDirectives,
    pub style: ImageStyle,
}

/// Concatenated text of inline nodes, without markup.
#[must_use]
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_plain_text(inlines, &mut out);
    out
}

fn push_plain_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text)
            | Inline::Code(text)
            | Inline::InlineMath(text)
            | Inline::DisplayMath(text) => out.push_str(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children)
            | Inline::Superscript(children)
            | Inline::Subscript(children)
            | Inline::Link {
                content: children, ..
            } => push_plain_text(children, out),
            Inline::Image(image) => out.push_str(&image.alt),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
            Inline::Html(_) | Inline::FootnoteReference(_) | Inline::TaskListMarker(_) => {}
        }
    }
}

//! Builder state tracked while walking parser events.

use pulldown_cmark::Alignment;

use crate::node::{Block, Cell, ContainerKind, Inline};

/// Fenced or indented code block being collected.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    language: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Table being collected, cell by cell.
#[derive(Default)]
pub(crate) struct TableState {
    pub(crate) alignments: Vec<Alignment>,
    pub(crate) head: Vec<Cell>,
    pub(crate) rows: Vec<Vec<Cell>>,
    row: Vec<Cell>,
}

impl TableState {
    pub(crate) fn new(alignments: Vec<Alignment>) -> Self {
        Self {
            alignments,
            ..Self::default()
        }
    }

    pub(crate) fn push_cell(&mut self, cell: Cell) {
        self.row.push(cell);
    }

    pub(crate) fn end_head(&mut self) {
        self.head = std::mem::take(&mut self.row);
    }

    pub(crate) fn end_row(&mut self) {
        let row = std::mem::take(&mut self.row);
        self.rows.push(row);
    }
}

/// Open block-level scope collecting child blocks.
pub(crate) struct Frame {
    pub(crate) kind: FrameKind,
    pub(crate) blocks: Vec<Block>,
}

impl Frame {
    pub(crate) fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
        }
    }
}

pub(crate) enum FrameKind {
    Root,
    BlockQuote,
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Item,
    Container(ContainerKind),
    FootnoteDefinition(String),
    /// Scope whose children are spliced into the parent.
    Transparent,
}

/// Open inline scope collecting child inlines.
pub(crate) struct Span {
    pub(crate) kind: SpanKind,
    pub(crate) children: Vec<Inline>,
}

impl Span {
    pub(crate) fn new(kind: SpanKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Append an inline, merging adjacent text runs.
    pub(crate) fn push(&mut self, inline: Inline) {
        if let Inline::Text(text) = &inline
            && let Some(Inline::Text(last)) = self.children.last_mut()
        {
            last.push_str(text);
            return;
        }
        self.children.push(inline);
    }
}

pub(crate) enum SpanKind {
    // Leaves own a run of inline content.
    Paragraph,
    Heading(u8),
    TableCell,
    /// Inline content without an enclosing paragraph (tight list items).
    Plain,
    // Nested spans.
    Emphasis,
    Strong,
    Strikethrough,
    Superscript,
    Subscript,
    Link { url: String, title: String },
    Image { src: String, title: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_span_merges_text() {
        let mut span = Span::new(SpanKind::Paragraph);
        span.push(Inline::Text("Title ".to_owned()));
        span.push(Inline::Text("{bg:red}".to_owned()));
        span.push(Inline::SoftBreak);
        span.push(Inline::Text("next".to_owned()));
        assert_eq!(
            span.children,
            vec![
                Inline::Text("Title {bg:red}".to_owned()),
                Inline::SoftBreak,
                Inline::Text("next".to_owned()),
            ]
        );
    }

    #[test]
    fn test_code_block_state() {
        let mut code = CodeBlockState::default();
        code.start(Some("rust".to_owned()));
        assert!(code.is_active());
        code.push_str("fn main() {}\n");
        assert_eq!(
            code.end(),
            (Some("rust".to_owned()), "fn main() {}\n".to_owned())
        );
        assert!(!code.is_active());
    }

    #[test]
    fn test_table_state_rows() {
        let cell = |text: &str| Cell {
            content: vec![Inline::Text(text.to_owned())],
            style: marktex_layout::Declarations::new(),
        };
        let mut table = TableState::new(vec![Alignment::None, Alignment::Right]);
        table.push_cell(cell("A"));
        table.end_head();
        table.push_cell(cell("1"));
        table.end_row();
        assert_eq!(table.head.len(), 1);
        assert_eq!(table.rows, vec![vec![cell("1")]]);
    }
}

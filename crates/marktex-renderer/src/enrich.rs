//! Builds the enriched document tree from parser events.
//!
//! Every event kind the parser emits maps to a node: headings and images go
//! through their directive resolvers, tables get their structural styling,
//! and `div` lines inside raw HTML blocks open and close containers.

use std::collections::HashMap;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::directive::{resolve_heading, resolve_image};
use crate::node::{
    Block, Cell, Container, ContainerKind, Document, Heading, Image, Inline, List, Table,
    plain_text,
};
use crate::preprocess::{COLUMN_MARKERS, PAGE_BREAK_MARKER};
use crate::state::{CodeBlockState, Frame, FrameKind, Span, SpanKind, TableState};
use crate::style;
use crate::util::{heading_level_to_num, slugify};

/// Result of enriching a document.
#[derive(Clone, Debug)]
pub struct EnrichResult {
    pub document: Document,
    /// Structural problems that were repaired, such as unclosed containers.
    pub warnings: Vec<String>,
}

/// Parser options used for every document.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_MATH
}

/// Parse preprocessed markdown and build its enriched tree.
#[must_use]
pub fn enrich_markdown(markdown: &str) -> EnrichResult {
    Enricher::new().enrich(Parser::new_ext(markdown, parser_options()))
}

/// Event-driven tree builder.
pub struct Enricher {
    frames: Vec<Frame>,
    spans: Vec<Span>,
    code: CodeBlockState,
    table: Option<TableState>,
    html: Option<String>,
    id_counts: HashMap<String, usize>,
    warnings: Vec<String>,
}

impl Enricher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(FrameKind::Root)],
            spans: Vec::new(),
            code: CodeBlockState::default(),
            table: None,
            html: None,
            id_counts: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Consume parser events and return the finished tree.
    pub fn enrich<'a, I>(mut self, events: I) -> EnrichResult
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        self.finish()
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                if self.code.is_active() {
                    self.code.push_str(&text);
                } else {
                    self.push_inline(Inline::Text(text.into_string()));
                }
            }
            Event::Code(code) => self.push_inline(Inline::Code(code.into_string())),
            Event::InlineMath(math) => self.push_inline(Inline::InlineMath(math.into_string())),
            Event::DisplayMath(math) => self.push_inline(Inline::DisplayMath(math.into_string())),
            Event::Html(html) => match &mut self.html {
                Some(buffer) => buffer.push_str(&html),
                None => {
                    self.flush_plain();
                    self.push_block(Block::Html(html.into_string()));
                }
            },
            Event::InlineHtml(html) => self.push_inline(Inline::Html(html.into_string())),
            Event::FootnoteReference(label) => {
                self.push_inline(Inline::FootnoteReference(label.into_string()));
            }
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            Event::Rule => {
                self.flush_plain();
                self.push_block(Block::Rule);
            }
            Event::TaskListMarker(checked) => self.push_inline(Inline::TaskListMarker(checked)),
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open_leaf(SpanKind::Paragraph),
            Tag::Heading { level, .. } => {
                self.open_leaf(SpanKind::Heading(heading_level_to_num(level)));
            }
            Tag::BlockQuote(_) => self.open_frame(FrameKind::BlockQuote),
            Tag::CodeBlock(kind) => {
                self.flush_plain();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::HtmlBlock => {
                self.flush_plain();
                self.html = Some(String::new());
            }
            Tag::List(start) => self.open_frame(FrameKind::List {
                start,
                items: Vec::new(),
            }),
            Tag::Item => self.open_frame(FrameKind::Item),
            Tag::FootnoteDefinition(label) => {
                self.open_frame(FrameKind::FootnoteDefinition(label.into_string()));
            }
            Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => self.open_frame(FrameKind::Transparent),
            Tag::Table(alignments) => {
                self.flush_plain();
                self.table = Some(TableState::new(alignments));
            }
            Tag::TableHead | Tag::TableRow => {}
            Tag::TableCell => self.spans.push(Span::new(SpanKind::TableCell)),
            Tag::Emphasis => self.open_span(SpanKind::Emphasis),
            Tag::Strong => self.open_span(SpanKind::Strong),
            Tag::Strikethrough => self.open_span(SpanKind::Strikethrough),
            Tag::Superscript => self.open_span(SpanKind::Superscript),
            Tag::Subscript => self.open_span(SpanKind::Subscript),
            Tag::Link {
                dest_url, title, ..
            } => self.open_span(SpanKind::Link {
                url: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::Image {
                dest_url, title, ..
            } => self.open_span(SpanKind::Image {
                src: dest_url.into_string(),
                title: title.into_string(),
            }),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                let content = self.close_leaf();
                self.end_paragraph(content);
            }
            TagEnd::Heading(level) => {
                let content = self.close_leaf();
                self.end_heading(heading_level_to_num(level), content);
            }
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                self.push_block(Block::CodeBlock { lang, content });
            }
            TagEnd::HtmlBlock => {
                if let Some(html) = self.html.take() {
                    self.html_block(&html);
                }
            }
            TagEnd::BlockQuote(_)
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::FootnoteDefinition
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::MetadataBlock(_) => self.end_frame(),
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.end_table(table);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = &mut self.table {
                    table.end_head();
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = &mut self.table {
                    table.end_row();
                }
            }
            TagEnd::TableCell => {
                let content = self.close_leaf();
                if let Some(table) = &mut self.table {
                    table.push_cell(Cell {
                        content,
                        style: marktex_layout::Declarations::new(),
                    });
                }
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::Link
            | TagEnd::Image => self.close_span(),
        }
    }

    fn open_leaf(&mut self, kind: SpanKind) {
        self.flush_plain();
        self.spans.push(Span::new(kind));
    }

    fn close_leaf(&mut self) -> Vec<Inline> {
        self.spans.pop().map(|span| span.children).unwrap_or_default()
    }

    fn open_span(&mut self, kind: SpanKind) {
        if self.spans.is_empty() {
            self.spans.push(Span::new(SpanKind::Plain));
        }
        self.spans.push(Span::new(kind));
    }

    fn close_span(&mut self) {
        let Some(span) = self.spans.pop() else {
            return;
        };
        let children = span.children;
        let inline = match span.kind {
            SpanKind::Emphasis => Inline::Emphasis(children),
            SpanKind::Strong => Inline::Strong(children),
            SpanKind::Strikethrough => Inline::Strikethrough(children),
            SpanKind::Superscript => Inline::Superscript(children),
            SpanKind::Subscript => Inline::Subscript(children),
            SpanKind::Link { url, title } => Inline::Link {
                url,
                title,
                content: children,
            },
            SpanKind::Image { src, title } => Inline::Image(image(src, &title, &children)),
            SpanKind::Paragraph | SpanKind::Heading(_) | SpanKind::TableCell | SpanKind::Plain => {
                for child in children {
                    self.push_inline(child);
                }
                return;
            }
        };
        self.push_inline(inline);
    }

    fn push_inline(&mut self, inline: Inline) {
        if self.spans.is_empty() {
            self.spans.push(Span::new(SpanKind::Plain));
        }
        if let Some(span) = self.spans.last_mut() {
            span.push(inline);
        }
    }

    /// Close inline content that has no enclosing paragraph.
    fn flush_plain(&mut self) {
        if self.spans.len() == 1 && matches!(self.spans[0].kind, SpanKind::Plain) {
            let content = self.close_leaf();
            self.push_block(Block::Plain(content));
        }
    }

    fn push_block(&mut self, block: Block) {
        if let Some(frame) = self.frames.last_mut() {
            frame.blocks.push(block);
        }
    }

    fn open_frame(&mut self, kind: FrameKind) {
        self.flush_plain();
        self.frames.push(Frame::new(kind));
    }

    /// Close the innermost markdown frame, closing any containers left open inside it.
    fn end_frame(&mut self) {
        self.flush_plain();
        while self.top_is_container() {
            self.warnings
                .push("unclosed <div> closed at end of enclosing block".to_owned());
            self.pop_frame();
        }
        self.pop_frame();
    }

    fn top_is_container(&self) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| matches!(frame.kind, FrameKind::Container(_)))
    }

    /// Pop the innermost frame and attach it to its parent.
    fn pop_frame(&mut self) {
        if self.frames.len() <= 1 {
            return;
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let Frame { kind, blocks } = frame;
        match kind {
            FrameKind::Root => {}
            FrameKind::BlockQuote => self.push_block(Block::BlockQuote(blocks)),
            FrameKind::List { start, items } => self.push_block(Block::List(List { start, items })),
            FrameKind::Item => match self.frames.last_mut() {
                Some(Frame {
                    kind: FrameKind::List { items, .. },
                    ..
                }) => items.push(blocks),
                Some(parent) => parent.blocks.extend(blocks),
                None => {}
            },
            FrameKind::Container(kind) => self.push_block(Block::Container(Container {
                kind,
                children: blocks,
            })),
            FrameKind::FootnoteDefinition(label) => {
                self.push_block(Block::FootnoteDefinition { label, blocks });
            }
            FrameKind::Transparent => {
                if let Some(parent) = self.frames.last_mut() {
                    parent.blocks.extend(blocks);
                }
            }
        }
    }

    fn end_paragraph(&mut self, content: Vec<Inline>) {
        if is_page_break(&content) {
            self.push_block(Block::PageBreak);
            return;
        }

        if is_column_marker(&content)
            && let Some(Block::Table(table)) = self
                .frames
                .last_mut()
                .and_then(|frame| frame.blocks.last_mut())
        {
            table.borderless = true;
            apply_table_style(table);
            return;
        }

        self.push_block(Block::Paragraph(content));
    }

    fn end_heading(&mut self, level: u8, mut content: Vec<Inline>) {
        let mut background = None;
        if let Some(Inline::Text(last)) = content.last_mut()
            && let Some(directive) = resolve_heading(last)
        {
            if directive.text.is_empty() {
                content.pop();
            } else {
                *last = directive.text;
            }
            background = Some(directive.background);
        }

        let id = self.unique_id(&plain_text(&content));
        let style = background
            .as_ref()
            .map(|color| style::heading(level, color));
        self.push_block(Block::Heading(Heading {
            level,
            id,
            content,
            background,
            style,
        }));
    }

    fn end_table(&mut self, state: TableState) {
        let TableState {
            alignments,
            head,
            mut rows,
            ..
        } = state;

        let borderless = rows.last().is_some_and(|row| is_marker_row(row));
        if borderless {
            rows.pop();
        }

        let mut table = Table {
            alignments,
            head,
            rows,
            borderless,
            style: style::TableStyle::default(),
        };
        apply_table_style(&mut table);
        self.push_block(Block::Table(table));
    }

    /// Split a raw HTML block into page breaks, container tags and passthrough HTML.
    fn html_block(&mut self, html: &str) {
        let mut raw = String::new();

        for line in html.lines() {
            let trimmed = line.trim();
            if trimmed == PAGE_BREAK_MARKER {
                self.flush_raw(&mut raw);
                self.push_block(Block::PageBreak);
            } else if let Some(kind) = parse_div_open(trimmed) {
                self.flush_raw(&mut raw);
                self.frames.push(Frame::new(FrameKind::Container(kind)));
            } else if trimmed == "</div>" && self.top_is_container() {
                self.flush_raw(&mut raw);
                self.pop_frame();
            } else {
                raw.push_str(line);
                raw.push('\n');
            }
        }

        self.flush_raw(&mut raw);
    }

    fn flush_raw(&mut self, raw: &mut String) {
        if raw.trim().is_empty() {
            raw.clear();
        } else {
            let html = std::mem::take(raw);
            self.push_block(Block::Html(html));
        }
    }

    fn unique_id(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.id_counts.entry(base.clone()).or_default();
        let id = match *count {
            0 => base,
            n => format!("{base}-{n}"),
        };
        *count += 1;
        id
    }

    fn finish(mut self) -> EnrichResult {
        self.flush_plain();
        while self.frames.len() > 1 {
            if self.top_is_container() {
                self.warnings
                    .push("unclosed <div> closed at end of document".to_owned());
            }
            self.pop_frame();
        }

        let blocks = self
            .frames
            .pop()
            .map(|frame| frame.blocks)
            .unwrap_or_default();

        EnrichResult {
            document: Document { blocks },
            warnings: self.warnings,
        }
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}

fn image(src: String, title: &str, alt_content: &[Inline]) -> Image {
    let resolved = resolve_image(&plain_text(alt_content), title);
    Image {
        src,
        alt: resolved.alt,
        title: resolved.title,
        style: style::image(&resolved.directives),
        directives: resolved.directives,
    }
}

fn apply_table_style(table: &mut Table) {
    table.style = style::table(table.borderless);
    let alignment = |idx: usize| table.alignments.get(idx).copied().unwrap_or(Alignment::None);

    for (idx, cell) in table.head.iter_mut().enumerate() {
        cell.style = style::aligned(&table.style.head_cell, alignment(idx));
    }
    for row in &mut table.rows {
        for (idx, cell) in row.iter_mut().enumerate() {
            cell.style = style::aligned(&table.style.cell, alignment(idx));
        }
    }
}

/// Paragraph holding nothing but the page-break marker.
fn is_page_break(content: &[Inline]) -> bool {
    let mut html = String::new();
    for inline in content {
        match inline {
            Inline::Html(fragment) => html.push_str(fragment),
            Inline::Text(text) if text.trim().is_empty() => {}
            Inline::SoftBreak => {}
            _ => return false,
        }
    }
    html.trim() == PAGE_BREAK_MARKER
}

fn is_column_marker(content: &[Inline]) -> bool {
    matches!(content, [Inline::Text(text)] if COLUMN_MARKERS.contains(&text.trim()))
}

/// Table row that only carries a column marker in one cell.
fn is_marker_row(row: &[Cell]) -> bool {
    let mut texts = row
        .iter()
        .map(|cell| plain_text(&cell.content))
        .filter(|text| !text.trim().is_empty());
    match (texts.next(), texts.next()) {
        (Some(text), None) => COLUMN_MARKERS.contains(&text.trim()),
        _ => false,
    }
}

/// Recognize a line that is exactly one opening `div` tag.
fn parse_div_open(tag: &str) -> Option<ContainerKind> {
    let rest = tag.strip_prefix("<div")?;
    if !rest.starts_with(|c: char| c == '>' || c.is_whitespace()) {
        return None;
    }
    let body = tag.strip_suffix('>')?;
    if body.ends_with('/') || body.contains('>') {
        return None;
    }

    let classes = class_attr(rest).unwrap_or_default();
    let has_class = |name: &str| classes.split_whitespace().any(|class| class == name);

    Some(if has_class("columns") {
        ContainerKind::Columns {
            style: style::columns(),
        }
    } else if has_class("column") {
        ContainerKind::Column {
            style: style::column(),
        }
    } else {
        ContainerKind::Other {
            open_tag: tag.to_owned(),
        }
    })
}

fn class_attr(attrs: &str) -> Option<&str> {
    let value = &attrs[attrs.find("class=")? + "class=".len()..];
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &value[1..];
    value.find(quote).map(|end| &value[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::{FloatSide, ImageSize};
    use pretty_assertions::assert_eq;

    fn blocks(markdown: &str) -> Vec<Block> {
        enrich_markdown(markdown).document.blocks
    }

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_owned())
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(
            blocks("Hello *world*"),
            vec![Block::Paragraph(vec![
                text("Hello "),
                Inline::Emphasis(vec![text("world")]),
            ])]
        );
    }

    #[test]
    fn test_heading_without_directive() {
        let Block::Heading(heading) = &blocks("## Plain Title")[0] else {
            panic!("expected heading");
        };
        assert_eq!(heading.level, 2);
        assert_eq!(heading.id, "plain-title");
        assert_eq!(heading.content, vec![text("Plain Title")]);
        assert_eq!(heading.background, None);
        assert_eq!(heading.style, None);
    }

    #[test]
    fn test_heading_background() {
        let Block::Heading(heading) = &blocks("# Title {bg:#ff0000}")[0] else {
            panic!("expected heading");
        };
        assert_eq!(heading.content, vec![text("Title")]);
        assert_eq!(heading.id, "title");
        assert_eq!(heading.background.as_ref().unwrap().as_str(), "#ff0000");
        let style = heading.style.as_ref().unwrap();
        assert_eq!(style.get("background-color"), Some("#ff0000"));
        assert_eq!(style.get("padding"), Some("0.5rem 1rem"));
    }

    #[test]
    fn test_heading_background_after_markup() {
        let Block::Heading(heading) = &blocks("### **Bold** tail {bg:lightblue}")[0] else {
            panic!("expected heading");
        };
        assert_eq!(
            heading.content,
            vec![Inline::Strong(vec![text("Bold")]), text(" tail")]
        );
        assert_eq!(heading.style.as_ref().unwrap().get("padding"), Some("0.35rem 0.75rem"));
    }

    #[test]
    fn test_heading_invalid_color_kept() {
        let Block::Heading(heading) = &blocks("# Title {bg:bad color}")[0] else {
            panic!("expected heading");
        };
        assert_eq!(heading.content, vec![text("Title {bg:bad color}")]);
        assert_eq!(heading.background, None);
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let ids: Vec<_> = blocks("# Intro\n\n## Intro\n\n## Intro")
            .into_iter()
            .filter_map(|block| match block {
                Block::Heading(heading) => Some(heading.id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["intro", "intro-1", "intro-2"]);
    }

    #[test]
    fn test_image_directives() {
        let Block::Paragraph(content) = &blocks(r#"![Chart {300x200}](c.png "{float=right}")"#)[0]
        else {
            panic!("expected paragraph");
        };
        let [Inline::Image(image)] = content.as_slice() else {
            panic!("expected image");
        };
        assert_eq!(image.src, "c.png");
        assert_eq!(image.alt, "Chart");
        assert_eq!(image.title, "");
        assert_eq!(
            image.directives.size,
            Some(ImageSize::Both {
                width: 300,
                height: 200
            })
        );
        assert_eq!(image.directives.float, Some(FloatSide::Right));
        assert!(image.style.wrapper.is_some());
    }

    #[test]
    fn test_page_break_html_block() {
        assert_eq!(
            blocks("Before\n\n<div class=\"page-break\"></div>\n\nAfter"),
            vec![
                Block::Paragraph(vec![text("Before")]),
                Block::PageBreak,
                Block::Paragraph(vec![text("After")]),
            ]
        );
    }

    #[test]
    fn test_columns_containers() {
        let markdown = "<div class=\"columns\">\n\n<div class=\"column\">\n\n**Left**\n\n</div>\n\n\
                        <div class=\"column\">\n\nRight\n\n</div>\n\n</div>";
        let result = enrich_markdown(markdown);
        assert!(result.warnings.is_empty());
        let [Block::Container(columns)] = result.document.blocks.as_slice() else {
            panic!("expected one container");
        };
        assert!(matches!(columns.kind, ContainerKind::Columns { .. }));
        assert_eq!(columns.children.len(), 2);
        let Block::Container(left) = &columns.children[0] else {
            panic!("expected column");
        };
        assert!(matches!(left.kind, ContainerKind::Column { .. }));
        assert_eq!(
            left.children,
            vec![Block::Paragraph(vec![Inline::Strong(vec![text("Left")])])]
        );
    }

    #[test]
    fn test_other_div_keeps_tag() {
        let result = enrich_markdown("<div class=\"note\" id=\"n1\">\n\nInside\n\n</div>");
        let [Block::Container(container)] = result.document.blocks.as_slice() else {
            panic!("expected container");
        };
        assert_eq!(
            container.kind,
            ContainerKind::Other {
                open_tag: "<div class=\"note\" id=\"n1\">".to_owned()
            }
        );
        assert_eq!(container.children, vec![Block::Paragraph(vec![text("Inside")])]);
    }

    #[test]
    fn test_unbalanced_close_is_raw() {
        assert_eq!(
            blocks("Text\n\n</div>"),
            vec![
                Block::Paragraph(vec![text("Text")]),
                Block::Html("</div>\n".to_owned()),
            ]
        );
    }

    #[test]
    fn test_unclosed_container_closed_at_end() {
        let result = enrich_markdown("<div class=\"columns\">\n\nBody");
        assert_eq!(result.warnings.len(), 1);
        let [Block::Container(container)] = result.document.blocks.as_slice() else {
            panic!("expected container");
        };
        assert_eq!(container.children, vec![Block::Paragraph(vec![text("Body")])]);
    }

    #[test]
    fn test_table_styles() {
        let result = blocks("| A | B |\n|:--|--:|\n| 1 | 2 |");
        let [Block::Table(table)] = result.as_slice() else {
            panic!("expected table");
        };
        assert!(!table.borderless);
        assert_eq!(table.head.len(), 2);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.head[0].style.get("background-color"), Some("#f3f4f6"));
        assert_eq!(table.rows[0][1].style.get("text-align"), Some("right"));
        assert_eq!(table.rows[0][0].style.get("border"), Some("1px solid #d1d5db"));
    }

    #[test]
    fn test_marker_row_makes_table_borderless() {
        let result = blocks("| A | B |\n|---|---|\n| 1 | 2 |\n{borderless}");
        let [Block::Table(table)] = result.as_slice() else {
            panic!("expected table");
        };
        assert!(table.borderless);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0].style.get("border"), Some("none"));
    }

    #[test]
    fn test_marker_paragraph_makes_table_borderless() {
        let result = blocks("| A | B |\n|---|---|\n| 1 | 2 |\n\n{columns}");
        let [Block::Table(table)] = result.as_slice() else {
            panic!("expected only the table, got {result:?}");
        };
        assert!(table.borderless);
        assert_eq!(table.style.table.get("border"), Some("none"));
    }

    #[test]
    fn test_marker_paragraph_without_table_kept() {
        assert_eq!(
            blocks("{columns}"),
            vec![Block::Paragraph(vec![text("{columns}")])]
        );
    }

    #[test]
    fn test_tight_list_items() {
        let result = blocks("- one\n- two");
        let [Block::List(list)] = result.as_slice() else {
            panic!("expected list");
        };
        assert_eq!(list.start, None);
        assert_eq!(
            list.items,
            vec![
                vec![Block::Plain(vec![text("one")])],
                vec![Block::Plain(vec![text("two")])],
            ]
        );
    }

    #[test]
    fn test_nested_list_and_tasks() {
        let result = blocks("1. [x] done\n   - sub");
        let [Block::List(list)] = result.as_slice() else {
            panic!("expected list");
        };
        assert_eq!(list.start, Some(1));
        let item = &list.items[0];
        assert_eq!(
            item[0],
            Block::Plain(vec![Inline::TaskListMarker(true), text("done")])
        );
        assert!(matches!(item[1], Block::List(_)));
    }

    #[test]
    fn test_math_and_code() {
        let result = blocks("Inline $x^2$ math\n\n```rust\nlet a = 1;\n```");
        assert_eq!(
            result,
            vec![
                Block::Paragraph(vec![
                    text("Inline "),
                    Inline::InlineMath("x^2".to_owned()),
                    text(" math"),
                ]),
                Block::CodeBlock {
                    lang: Some("rust".to_owned()),
                    content: "let a = 1;\n".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_blockquote_and_rule() {
        assert_eq!(
            blocks("> quoted\n\n---"),
            vec![
                Block::BlockQuote(vec![Block::Paragraph(vec![text("quoted")])]),
                Block::Rule,
            ]
        );
    }

    #[test]
    fn test_footnotes() {
        let result = blocks("Claim[^1]\n\n[^1]: Source");
        assert_eq!(
            result,
            vec![
                Block::Paragraph(vec![
                    text("Claim"),
                    Inline::FootnoteReference("1".to_owned()),
                ]),
                Block::FootnoteDefinition {
                    label: "1".to_owned(),
                    blocks: vec![Block::Paragraph(vec![text("Source")])],
                },
            ]
        );
    }

    #[test]
    fn test_parse_div_open() {
        assert!(matches!(
            parse_div_open("<div class='columns'>"),
            Some(ContainerKind::Columns { .. })
        ));
        assert!(matches!(
            parse_div_open("<div class=\"wide column\">"),
            Some(ContainerKind::Column { .. })
        ));
        assert!(matches!(parse_div_open("<div>"), Some(ContainerKind::Other { .. })));
        assert_eq!(parse_div_open("<divider>"), None);
        assert_eq!(parse_div_open("<div>text</div>"), None);
        assert_eq!(parse_div_open("<div />"), None);
    }
}

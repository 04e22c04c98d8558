// Markdown to block model
//
// Pages are parsed once into a small tree of blocks that the document view
// renders. Only the constructs the guide pages use are modelled; anything
// else (raw HTML, footnotes, math) is dropped.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
}

/// A run of inline text with one style
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
    pub link: Option<String>,
}

pub type Cell = Vec<Span>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    List { start: Option<u64>, items: Vec<Vec<Block>> },
    Code { language: Option<String>, source: String },
    Image { src: String, alt: String },
    Table { header: Vec<Cell>, rows: Vec<Vec<Cell>> },
    /// Block quote, shown as an info callout
    Note(Vec<Block>),
    Rule,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn parse(markdown: &str) -> Self {
        let mut builder = Builder::default();
        for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
            builder.event(event);
        }
        builder.finish()
    }

    /// Every image source referenced anywhere in the document
    pub fn image_sources(&self) -> Vec<&str> {
        fn collect<'a>(blocks: &'a [Block], out: &mut Vec<&'a str>) {
            for block in blocks {
                match block {
                    Block::Image { src, .. } => out.push(src),
                    Block::List { items, .. } => items.iter().for_each(|item| collect(item, out)),
                    Block::Note(inner) => collect(inner, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.blocks, &mut out);
        out
    }
}

pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

enum Frame {
    List { start: Option<u64>, items: Vec<Vec<Block>> },
    Item(Vec<Block>),
    Quote(Vec<Block>),
}

#[derive(Default)]
struct TableState {
    header: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
    row: Vec<Cell>,
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    frames: Vec<Frame>,
    spans: Vec<Span>,
    strong: usize,
    emphasis: usize,
    link: Option<String>,
    heading: Option<u8>,
    code: Option<(Option<String>, String)>,
    image: Option<(String, String)>,
    table: Option<TableState>,
}

impl Builder {
    fn event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some((_, source)) = &mut self.code {
                    source.push_str(&text);
                } else if let Some((_, alt)) = &mut self.image {
                    alt.push_str(&text);
                } else {
                    self.push_text(&text, false);
                }
            }
            Event::Code(code) => {
                if let Some((_, alt)) = &mut self.image {
                    alt.push_str(&code);
                } else {
                    self.push_text(&code, true);
                }
            }
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.push_text("\n", false),
            Event::Rule => {
                self.flush_inline();
                self.push_block(Block::Rule);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => self.flush_inline(),
            Tag::Heading { level, .. } => {
                self.flush_inline();
                self.heading = Some(level as u8);
            }
            Tag::List(start) => {
                self.flush_inline();
                self.frames.push(Frame::List {
                    start,
                    items: Vec::new(),
                });
            }
            Tag::Item => self.frames.push(Frame::Item(Vec::new())),
            Tag::BlockQuote { .. } => {
                self.flush_inline();
                self.frames.push(Frame::Quote(Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.flush_inline();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.to_string()),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::Strong => self.strong += 1,
            Tag::Emphasis => self.emphasis += 1,
            Tag::Link { dest_url, .. } => self.link = Some(dest_url.to_string()),
            Tag::Image { dest_url, .. } => {
                self.flush_inline();
                self.image = Some((dest_url.to_string(), String::new()));
            }
            Tag::Table { .. } => {
                self.flush_inline();
                self.table = Some(TableState::default());
            }
            Tag::TableHead | Tag::TableRow | Tag::TableCell => {}
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.flush_inline(),
            TagEnd::Heading { .. } => {
                let spans = std::mem::take(&mut self.spans);
                let level = self.heading.take().unwrap_or(1);
                self.push_block(Block::Heading { level, spans });
            }
            TagEnd::List { .. } => {
                if let Some(Frame::List { start, items }) = self.frames.pop() {
                    self.push_block(Block::List { start, items });
                }
            }
            TagEnd::Item => {
                self.flush_inline();
                if let Some(Frame::Item(blocks)) = self.frames.pop() {
                    if let Some(Frame::List { items, .. }) = self.frames.last_mut() {
                        items.push(blocks);
                    }
                }
            }
            TagEnd::BlockQuote { .. } => {
                self.flush_inline();
                if let Some(Frame::Quote(blocks)) = self.frames.pop() {
                    self.push_block(Block::Note(blocks));
                }
            }
            TagEnd::CodeBlock => {
                if let Some((language, source)) = self.code.take() {
                    let source = source.trim_end_matches('\n').to_string();
                    self.push_block(Block::Code { language, source });
                }
            }
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Link { .. } => self.link = None,
            TagEnd::Image { .. } => {
                if let Some((src, alt)) = self.image.take() {
                    self.push_block(Block::Image { src, alt });
                }
            }
            TagEnd::TableCell => {
                let cell = std::mem::take(&mut self.spans);
                if let Some(table) = &mut self.table {
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = &mut self.table {
                    table.header = std::mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = &mut self.table {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table { .. } => {
                if let Some(table) = self.table.take() {
                    self.push_block(Block::Table {
                        header: table.header,
                        rows: table.rows,
                    });
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str, code: bool) {
        let style = SpanStyle {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code,
        };
        if let Some(last) = self.spans.last_mut() {
            if last.style == style && last.link == self.link {
                last.text.push_str(text);
                return;
            }
        }
        self.spans.push(Span {
            text: text.to_string(),
            style,
            link: self.link.clone(),
        });
    }

    /// Turn pending inline text into a paragraph of the enclosing container.
    /// Tight list items deliver their text without paragraph events.
    fn flush_inline(&mut self) {
        if self.heading.is_some() || self.table.is_some() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        if spans.iter().any(|s| !s.text.trim().is_empty()) {
            self.push_block(Block::Paragraph(spans));
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.frames.last_mut() {
            Some(Frame::Item(blocks)) | Some(Frame::Quote(blocks)) => blocks.push(block),
            // A list only ever holds items; anything else lands at the top level
            Some(Frame::List { .. }) | None => self.blocks.push(block),
        }
    }

    fn finish(mut self) -> Document {
        self.flush_inline();
        Document {
            blocks: self.blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraphs() {
        let doc = Document::parse("# Title\n\nSome **bold** text.\n\n## Sub\n");
        assert_eq!(doc.blocks.len(), 3);
        match &doc.blocks[0] {
            Block::Heading { level, spans } => {
                assert_eq!(*level, 1);
                assert_eq!(plain_text(spans), "Title");
            }
            other => panic!("expected heading, got {:?}", other),
        }
        match &doc.blocks[1] {
            Block::Paragraph(spans) => {
                assert_eq!(plain_text(spans), "Some bold text.");
                assert_eq!(spans.len(), 3);
                assert!(spans[1].style.strong);
                assert!(!spans[0].style.strong);
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
        assert!(matches!(&doc.blocks[2], Block::Heading { level: 2, .. }));
    }

    #[test]
    fn test_inline_code_and_links() {
        let doc =
            Document::parse("Run `pip install x` from [python.org](https://www.python.org/).");
        let Block::Paragraph(spans) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        let code = spans.iter().find(|s| s.style.code).unwrap();
        assert_eq!(code.text, "pip install x");
        let link = spans.iter().find(|s| s.link.is_some()).unwrap();
        assert_eq!(link.text, "python.org");
        assert_eq!(link.link.as_deref(), Some("https://www.python.org/"));
    }

    #[test]
    fn test_fenced_code_block_keeps_language() {
        let doc = Document::parse("```bash\npython -m venv venv\nsource venv/bin/activate\n```\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Code {
                language: Some("bash".to_string()),
                source: "python -m venv venv\nsource venv/bin/activate".to_string(),
            }]
        );
    }

    #[test]
    fn test_tight_list_with_nested_list() {
        let doc =
            Document::parse("- Errors:\n  - No face detected.\n  - Missing fields.\n- Done\n");
        let Block::List { start, items } = &doc.blocks[0] else {
            panic!("expected list, got {:?}", doc.blocks);
        };
        assert_eq!(*start, None);
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0][0], Block::Paragraph(spans) if plain_text(spans) == "Errors:"));
        match &items[0][1] {
            Block::List { items: nested, .. } => assert_eq!(nested.len(), 2),
            other => panic!("expected nested list, got {:?}", other),
        }
    }

    #[test]
    fn test_ordered_list_start() {
        let doc = Document::parse("3. third\n4. fourth\n");
        assert!(matches!(
            &doc.blocks[0],
            Block::List { start: Some(3), items } if items.len() == 2
        ));
    }

    #[test]
    fn test_code_block_inside_list_item() {
        let doc = Document::parse("1. Clone:\n\n   ```bash\n   git clone <url>\n   ```\n");
        let Block::List { items, .. } = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert!(items[0]
            .iter()
            .any(|b| matches!(b, Block::Code { source, .. } if source == "git clone <url>")));
    }

    #[test]
    fn test_image_becomes_block() {
        let doc =
            Document::parse("i) Go to the tab.\n\n![Register face](<images/register face.jpg>)\n");
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(
            doc.blocks[1],
            Block::Image {
                src: "images/register face.jpg".to_string(),
                alt: "Register face".to_string(),
            }
        );
        assert_eq!(doc.image_sources(), vec!["images/register face.jpg"]);
    }

    #[test]
    fn test_table() {
        let doc = Document::parse(
            "| Component | Location |\n|---|---|\n\
             | Registered Faces | known_faces.pkl |\n\
             | Attendance Records | Google Sheets |\n",
        );
        let Block::Table { header, rows } = &doc.blocks[0] else {
            panic!("expected table, got {:?}", doc.blocks);
        };
        let header: Vec<String> = header.iter().map(|c| plain_text(c)).collect();
        assert_eq!(header, vec!["Component", "Location"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(plain_text(&rows[1][1]), "Google Sheets");
    }

    #[test]
    fn test_block_quote_and_rule() {
        let doc = Document::parse("> No installation needed\n\n---\n");
        assert!(matches!(&doc.blocks[0], Block::Note(inner) if inner.len() == 1));
        assert_eq!(doc.blocks[1], Block::Rule);
    }

    #[test]
    fn test_raw_html_is_dropped() {
        let doc = Document::parse("<div>ignored</div>\n");
        assert!(doc.blocks.is_empty());
    }
}

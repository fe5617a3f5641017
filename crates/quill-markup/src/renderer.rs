//! Event-driven HTML rendering for the block-level parse.
//!
//! [`HtmlRenderer`] consumes `pulldown-cmark` events and writes HTML.
//! The block grammar is the host library's, unmodified; construct
//! rewriting happened earlier in the inline pass, so by the time events
//! arrive here custom fragments are plain raw-HTML events.
//!
//! Raw HTML passes through untouched by default (author content is
//! trusted); block close tags are followed by a newline so compiled
//! documents stay line-structured.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

/// Escape `&`, `<`, `>` and `"` for text and attribute positions.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renderer for one document's event stream.
///
/// Single-use: construct, feed [`render`](Self::render), take the HTML.
#[derive(Debug)]
pub struct HtmlRenderer {
    output: String,
    escape_raw_html: bool,
    code: CodeBlockState,
    image: ImageState,
}

impl HtmlRenderer {
    /// Create a renderer.
    ///
    /// With `escape_raw_html` set, raw HTML in the source is escaped
    /// into visible text instead of passing through. The platform runs
    /// with it off; the toggle exists at this level only, never per
    /// construct.
    #[must_use]
    pub fn new(escape_raw_html: bool) -> Self {
        Self {
            output: String::with_capacity(4096),
            escape_raw_html,
            code: CodeBlockState::default(),
            image: ImageState::default(),
        }
    }

    /// Render the event stream to an HTML string.
    #[must_use]
    pub fn render<'a, I>(mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.event(event);
        }
        self.output
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(&tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                write!(self.output, "<code>{}</code>", escape_html(&code)).unwrap();
            }
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.output.push('\n'),
            Event::HardBreak => self.output.push_str("<br />\n"),
            Event::Rule => self.output.push_str("<hr />\n"),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Not part of the blog dialect.
            }
        }
    }

    fn start_tag(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.output, "<h{}>", heading_level(*level)).unwrap();
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>\n"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>\n"),
                Some(n) => writeln!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>\n"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<del>"),
            Tag::Link { dest_url, .. } => {
                write!(self.output, r#"<a href="{}">"#, escape_html(dest_url)).unwrap();
            }
            Tag::Image { dest_url, .. } => {
                self.image.start(dest_url.to_string());
            }
            Tag::HtmlBlock
            | Tag::FootnoteDefinition(_)
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Table(_)
            | Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell
            | Tag::Superscript
            | Tag::Subscript => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>\n"),
            TagEnd::Heading(level) => {
                writeln!(self.output, "</h{}>", heading_level(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                match lang {
                    Some(lang) => writeln!(
                        self.output,
                        r#"<pre><code class="language-{}">{}</code></pre>"#,
                        escape_html(&lang),
                        escape_html(&content)
                    )
                    .unwrap(),
                    None => writeln!(
                        self.output,
                        "<pre><code>{}</code></pre>",
                        escape_html(&content)
                    )
                    .unwrap(),
                }
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</del>"),
            TagEnd::Link => self.output.push_str("</a>"),
            TagEnd::Image => {
                let (src, alt) = self.image.end();
                write!(
                    self.output,
                    r#"<img src="{}" alt="{}">"#,
                    escape_html(&src),
                    escape_html(&alt)
                )
                .unwrap();
            }
            TagEnd::HtmlBlock
            | TagEnd::FootnoteDefinition
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn raw_html(&mut self, html: &str) {
        if self.escape_raw_html {
            self.output.push_str(&escape_html(html));
        } else {
            self.output.push_str(html);
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Buffers code block content until the closing fence event.
#[derive(Debug, Default)]
struct CodeBlockState {
    active: bool,
    lang: Option<String>,
    content: String,
}

impl CodeBlockState {
    fn start(&mut self, lang: Option<String>) {
        self.active = true;
        self.lang = lang;
        self.content.clear();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.lang.take(), std::mem::take(&mut self.content))
    }
}

/// Collects alt text between image start and end events.
#[derive(Debug, Default)]
struct ImageState {
    active: bool,
    src: String,
    alt: String,
}

impl ImageState {
    fn start(&mut self, src: String) {
        self.active = true;
        self.src = src;
        self.alt.clear();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }

    fn end(&mut self) -> (String, String) {
        self.active = false;
        (std::mem::take(&mut self.src), std::mem::take(&mut self.alt))
    }
}

//! Markdown serialization of rendered documents
//!
//! Pages are assembled as a list of typed [`Block`]s. Serialization happens
//! in one place: every block is written out, then the whole text goes
//! through [`make_paragraphs`] so the reflow rules apply uniformly.

use std::fmt::Write;

use crate::reflow::{make_paragraphs, trim_rect};

/// Manual section that cross-references point into
pub const MAN_SECTION: u8 = 3;

/// A block of a rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading of the given level
    Heading { level: u8, text: String },
    /// Free-form text; may hold several paragraphs, lists and fenced code
    Prose(String),
    /// Fenced code block, body written verbatim
    Code { lang: Option<String>, body: String },
    /// Bullet list, one entry per item
    List(Vec<String>),
    /// Inline cross-references to other pages
    SeeAlso(Vec<String>),
    /// Bullet list of links to other pages
    Links(Vec<String>),
}

impl Block {
    /// Top-level heading
    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading {
            level: 1,
            text: text.into(),
        }
    }

    pub fn prose(text: impl Into<String>) -> Self {
        Block::Prose(text.into())
    }

    /// C code block; the body is trimmed as a rectangle
    pub fn c_code(body: &str) -> Self {
        Block::Code {
            lang: Some(String::from("c")),
            body: trim_rect(body),
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Block::Heading { level, text } => {
                let hashes = "#".repeat(usize::from(*level));
                writeln!(out, "{} {}", hashes, text).unwrap();
            }
            Block::Prose(text) => {
                writeln!(out, "{}", trim_rect(text)).unwrap();
            }
            Block::Code { lang, body } => {
                writeln!(out, "```{}", lang.as_deref().unwrap_or_default()).unwrap();
                writeln!(out, "{}", body).unwrap();
                writeln!(out, "```").unwrap();
            }
            Block::List(items) => {
                for item in items {
                    writeln!(out, "* {}", item).unwrap();
                }
            }
            Block::SeeAlso(names) => {
                let refs: Vec<String> = names.iter().map(|n| cross_reference(n)).collect();
                writeln!(out, "{}", refs.join(" ")).unwrap();
            }
            Block::Links(names) => {
                for name in names {
                    writeln!(out, "* {}", page_link(name)).unwrap();
                }
            }
        }
        writeln!(out).unwrap();
    }
}

/// Inline reference to another page, e.g. `**hclose**(3)`
pub fn cross_reference(name: &str) -> String {
    format!("**{}**({})", name, MAN_SECTION)
}

/// Link to another page, e.g. `[hclose(3)](hclose.html)`
pub fn page_link(name: &str) -> String {
    format!("[{}({})]({}.html)", name, MAN_SECTION, name)
}

/// An ordered sequence of blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Serialize and reflow the document
    pub fn to_markdown(&self) -> String {
        let mut raw = String::new();
        for block in &self.blocks {
            block.write_to(&mut raw);
        }
        make_paragraphs(&raw)
    }
}

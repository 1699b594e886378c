//! Table of contents

use tracing::warn;

use crate::config::RenderConfig;
use crate::markdown::{Block, Document};
use crate::sections::SectionMap;

/// Heading level of the per-section headers
const SECTION_LEVEL: u8 = 4;

/// Build the table of contents document.
///
/// Only the sections of [`RenderConfig::toc_sections`] appear, in that
/// order. A listed section without members is skipped.
pub fn toc_document(sections: &SectionMap, config: &RenderConfig) -> Document {
    let mut doc = Document::new();

    for name in &config.toc_sections {
        let Some(members) = sections.members(name) else {
            warn!(section = %name, "table of contents section has no functions");
            continue;
        };
        doc.push(Block::Heading {
            level: SECTION_LEVEL,
            text: name.clone(),
        });
        doc.push(Block::Links(members.to_vec()));
    }

    doc
}

/// Render the table of contents to Markdown
pub fn render_toc(sections: &SectionMap, config: &RenderConfig) -> String {
    toc_document(sections, config).to_markdown()
}

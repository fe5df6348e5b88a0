//! Markdown projection of answer content.
//!
//! [`project`] renders a [`Document`] to the Markdown stored alongside it
//! as `answer_md` and shown in answer list previews. The projection is
//! one-way: nothing parses Markdown back into a document.

mod inline;

use crate::content::{Block, BlockKind, Document};
use inline::{render_entities, render_inline};

/// Indentation for each level of list nesting.
pub const LIST_INDENT: &str = "    ";

/// Formatting choices for [`project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectorConfig {
    /// Repeated once per heading level in front of header blocks
    pub heading_trigger: String,
    /// Placed between the heading trigger and the heading text
    pub separator: String,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            heading_trigger: "#".to_string(),
            separator: " ".to_string(),
        }
    }
}

/// Render `doc` as Markdown, one line group per block, blocks joined by
/// `\n` without a trailing newline.
pub fn project(doc: &Document, config: &ProjectorConfig) -> String {
    let mut out = String::new();
    for (idx, block) in doc.blocks().iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        project_block(block, doc, config, &mut out);
    }
    out
}

fn project_block(block: &Block, doc: &Document, config: &ProjectorConfig, out: &mut String) {
    match block.kind() {
        BlockKind::Unstyled => render_inline(block, doc, out),
        BlockKind::Header(level) => {
            out.push_str(&config.heading_trigger.repeat(level as usize));
            out.push_str(&config.separator);
            render_inline(block, doc, out);
        }
        BlockKind::UnorderedListItem => {
            out.push_str(&LIST_INDENT.repeat(block.depth() as usize));
            out.push_str("- ");
            render_inline(block, doc, out);
        }
        BlockKind::OrderedListItem => {
            out.push_str(&LIST_INDENT.repeat(block.depth() as usize));
            out.push_str("1. ");
            render_inline(block, doc, out);
        }
        BlockKind::Blockquote => {
            out.push_str("> ");
            render_inline(block, doc, out);
        }
        BlockKind::CodeBlock => {
            out.push_str("```\n");
            out.push_str(block.text());
            out.push_str("\n```");
        }
        BlockKind::Atomic => render_entities(block, doc, out),
    }
}

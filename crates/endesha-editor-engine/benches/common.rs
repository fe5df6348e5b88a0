// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use endesha_editor_engine::{Block, BlockKind, Document, Entity, EntityKey, InlineStyle};
use std::collections::BTreeMap;

#[allow(dead_code)]
pub fn generate_answer(sections: usize) -> Document {
    let mut blocks = Vec::new();
    let mut entities = BTreeMap::new();

    for section in 0..sections {
        blocks.push(Block::new(
            format!("h{section}"),
            BlockKind::Header(2),
            format!("Section {section}"),
        ));
        blocks.push(
            Block::new(
                format!("p{section}"),
                BlockKind::Unstyled,
                "Keep left unless overtaking, and check mirrors before changing lanes.",
            )
            .with_style(InlineStyle::Bold, 0..9)
            .with_style(InlineStyle::Italic, 5..25)
            .with_style(InlineStyle::Code, 30..37)
            .with_entity(EntityKey(section as u32), 49..56),
        );
        entities.insert(
            EntityKey(section as u32),
            Entity::link("https://endesha.example/lanes"),
        );
        for item in 0..3u8 {
            blocks.push(
                Block::new(
                    format!("l{section}-{item}"),
                    BlockKind::UnorderedListItem,
                    format!("Item {item} of section {section}"),
                )
                .with_depth(item % 2),
            );
        }
    }

    match Document::from_parts(blocks, entities) {
        Ok(doc) => doc,
        Err(err) => panic!("generated answer is invalid: {err}"),
    }
}

#[allow(dead_code)]
pub fn generate_paragraph(styles: usize) -> Document {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(styles.max(1));
    let all = [
        InlineStyle::Bold,
        InlineStyle::Italic,
        InlineStyle::Strikethrough,
        InlineStyle::Underline,
        InlineStyle::Code,
    ];
    let mut block = Block::new("para", BlockKind::Unstyled, text.as_str());
    let len = block.len();
    for i in 0..styles {
        let start = (i * 7) % len;
        let end = (start + 11 + i % 13).min(len);
        block = block.with_style(all[i % all.len()].clone(), start..end);
    }

    match Document::from_parts(vec![block], BTreeMap::new()) {
        Ok(doc) => doc,
        Err(err) => panic!("generated paragraph is invalid: {err}"),
    }
}

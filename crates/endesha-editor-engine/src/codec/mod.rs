//! JSON persistence of answer content.
//!
//! [`encode`] writes a [`Document`] as the raw content JSON stored in an
//! answer's `answer` field; [`decode`] reads it back, rejecting anything
//! that does not form a valid document. For every document `d`,
//! `decode(&encode(&d)) == Ok(d)`.

mod error;
mod raw;

use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

use crate::content::{Block, BlockKey, BlockKind, Document, Entity, EntityKey, EntityKind, InlineStyle};
pub use error::DecodeError;
use raw::RawContent;

/// Serialise `doc` to its stored JSON form.
pub fn encode(doc: &Document) -> String {
    let blocks: Vec<Value> = doc.blocks().iter().map(encode_block).collect();
    let entity_map: Map<String, Value> = doc
        .entities()
        .iter()
        .map(|(key, entity)| (key.to_string(), encode_entity(entity)))
        .collect();
    json!({ "blocks": blocks, "entityMap": entity_map }).to_string()
}

fn encode_block(block: &Block) -> Value {
    let styles: Vec<Value> = block
        .styles()
        .iter()
        .map(|s| {
            json!({
                "offset": s.range.start,
                "length": s.range.len(),
                "style": s.style.wire_name(),
            })
        })
        .collect();
    let entities: Vec<Value> = block
        .entity_ranges()
        .iter()
        .map(|e| {
            json!({
                "offset": e.range.start,
                "length": e.range.len(),
                "key": e.key.0,
            })
        })
        .collect();
    json!({
        "key": block.key().as_str(),
        "text": block.text(),
        "type": block.kind().wire_name(),
        "depth": block.depth(),
        "inlineStyleRanges": styles,
        "entityRanges": entities,
        "data": block.data(),
    })
}

fn encode_entity(entity: &Entity) -> Value {
    json!({
        "type": entity.kind.wire_name(),
        "mutability": entity.mutability,
        "data": entity.data,
    })
}

/// Parse stored JSON into a document.
pub fn decode(json: &str) -> Result<Document, DecodeError> {
    let raw: RawContent = serde_json::from_str(json)?;

    let mut entities = BTreeMap::new();
    for (key, raw_entity) in raw.entity_map {
        let key = key
            .parse::<u32>()
            .map(EntityKey)
            .map_err(|_| DecodeError::InvalidEntityKey(key.clone()))?;
        let kind = EntityKind::from_wire(&raw_entity.kind)
            .ok_or_else(|| DecodeError::UnknownEntityType(raw_entity.kind.clone()))?;
        entities.insert(
            key,
            Entity {
                kind,
                mutability: raw_entity.mutability,
                data: raw_entity.data,
            },
        );
    }

    let mut taken: HashSet<String> = raw
        .blocks
        .iter()
        .filter(|b| !b.key.is_empty())
        .map(|b| b.key.clone())
        .collect();
    let mut blocks = Vec::with_capacity(raw.blocks.len());
    for raw_block in raw.blocks {
        let kind = BlockKind::from_wire(&raw_block.kind)
            .ok_or_else(|| DecodeError::UnknownBlockType(raw_block.kind.clone()))?;
        let key = if raw_block.key.is_empty() {
            unused_key(&mut taken)
        } else {
            BlockKey::new(raw_block.key)
        };

        let mut block = Block::new(key, kind, raw_block.text).with_depth(raw_block.depth);
        block.data = raw_block.data;
        for range in raw_block.inline_style_ranges {
            block = block.with_style(
                InlineStyle::from_wire(&range.style),
                span(range.offset, range.length),
            );
        }
        for range in raw_block.entity_ranges {
            block = block.with_entity(EntityKey(range.key), span(range.offset, range.length));
        }
        blocks.push(block);
    }

    Ok(Document::from_parts(blocks, entities)?)
}

fn span(offset: usize, length: usize) -> Range<usize> {
    offset..offset.saturating_add(length)
}

fn unused_key(taken: &mut HashSet<String>) -> BlockKey {
    loop {
        let key = BlockKey::generate();
        if taken.insert(key.as_str().to_string()) {
            return key;
        }
    }
}

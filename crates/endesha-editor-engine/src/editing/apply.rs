use std::ops::Range;

use super::commands::{EditError, EditOp};
use super::ranges::{intersect, shift_for_insert, shrink_for_delete, subtract};
use crate::content::offsets::{byte_offset, utf16_len};
use crate::content::{
    Block, BlockKey, BlockKind, Document, Entity, EntityRange, InlineStyle, MAX_HEADING_LEVEL,
    MAX_LIST_DEPTH, StyleRange,
};

/// Apply `op` to `doc`, returning the edited copy.
///
/// `doc` itself is never modified. On error nothing is returned but the
/// error, so a caller holding the previous document keeps a valid state.
pub fn apply_edit(doc: &Document, op: EditOp) -> Result<Document, EditError> {
    log::debug!("applying edit to block `{}`", op.block());
    let mut next = doc.clone();
    match op {
        EditOp::InsertText {
            block,
            offset,
            text,
        } => insert_text(&mut next, &block, offset, &text)?,
        EditOp::DeleteRange { block, range } => delete_range(&mut next, &block, range)?,
        EditOp::ToggleStyle {
            block,
            range,
            style,
        } => toggle_style(&mut next, &block, range, style)?,
        EditOp::SetBlockKind { block, kind } => set_block_kind(&mut next, &block, kind)?,
        EditOp::SetDepth { block, depth } => set_depth(&mut next, &block, depth)?,
        EditOp::ApplyEntity {
            block,
            range,
            entity,
        } => apply_entity(&mut next, &block, range, entity)?,
        EditOp::RemoveEntity { block, range } => remove_entity(&mut next, &block, range)?,
        EditOp::SplitBlock { block, offset } => split_block(&mut next, &block, offset)?,
        EditOp::RemoveBlock { block } => remove_block(&mut next, &block)?,
    }
    next.retain_referenced_entities();
    debug_assert!(next.validate().is_ok(), "edit broke document invariants");
    Ok(next)
}

fn block_mut<'a>(doc: &'a mut Document, key: &BlockKey) -> Result<&'a mut Block, EditError> {
    doc.blocks
        .iter_mut()
        .find(|b| &b.key == key)
        .ok_or_else(|| EditError::UnknownBlock(key.clone()))
}

/// Byte range in the block text for a UTF-16 range.
fn checked_byte_range(block: &Block, range: &Range<usize>) -> Result<Range<usize>, EditError> {
    let len = utf16_len(&block.text);
    if range.start > range.end || range.end > len {
        return Err(EditError::OutOfBounds {
            block: block.key.clone(),
            start: range.start,
            end: range.end,
            len,
        });
    }
    let to_byte = |offset: usize| {
        byte_offset(&block.text, offset).ok_or_else(|| EditError::NotCharBoundary {
            block: block.key.clone(),
            offset,
        })
    };
    Ok(to_byte(range.start)?..to_byte(range.end)?)
}

fn insert_text(
    doc: &mut Document,
    key: &BlockKey,
    offset: usize,
    text: &str,
) -> Result<(), EditError> {
    let block = block_mut(doc, key)?;
    let at = checked_byte_range(block, &(offset..offset))?.start;
    if text.is_empty() {
        return Ok(());
    }

    let added = utf16_len(text);
    block.text.insert_str(at, text);
    for style in &mut block.styles {
        style.range = shift_for_insert(&style.range, offset, added, true);
    }
    for entity in &mut block.entities {
        entity.range = shift_for_insert(&entity.range, offset, added, false);
    }
    block.normalize();
    Ok(())
}

fn delete_range(doc: &mut Document, key: &BlockKey, range: Range<usize>) -> Result<(), EditError> {
    let block = block_mut(doc, key)?;
    let bytes = checked_byte_range(block, &range)?;
    if bytes.is_empty() {
        return Ok(());
    }

    block.text.replace_range(bytes, "");
    block.styles = std::mem::take(&mut block.styles)
        .into_iter()
        .filter_map(|s| {
            shrink_for_delete(&s.range, &range).map(|r| StyleRange {
                style: s.style,
                range: r,
            })
        })
        .collect();
    block.entities = std::mem::take(&mut block.entities)
        .into_iter()
        .filter_map(|e| {
            shrink_for_delete(&e.range, &range).map(|r| EntityRange { key: e.key, range: r })
        })
        .collect();
    block.normalize();
    Ok(())
}

fn toggle_style(
    doc: &mut Document,
    key: &BlockKey,
    range: Range<usize>,
    style: InlineStyle,
) -> Result<(), EditError> {
    let block = block_mut(doc, key)?;
    checked_byte_range(block, &range)?;
    if range.is_empty() {
        return Err(EditError::EmptyRange { op: "toggle style" });
    }
    let style = style.canonical();

    if block.has_style_over(&style, &range) {
        block.styles = std::mem::take(&mut block.styles)
            .into_iter()
            .flat_map(|s| {
                if s.style != style {
                    return vec![s];
                }
                subtract(&s.range, &range)
                    .into_iter()
                    .map(|r| StyleRange {
                        style: s.style.clone(),
                        range: r,
                    })
                    .collect()
            })
            .collect();
    } else {
        block.styles.push(StyleRange { style, range });
    }
    block.normalize();
    Ok(())
}

fn set_block_kind(doc: &mut Document, key: &BlockKey, kind: BlockKind) -> Result<(), EditError> {
    if let BlockKind::Header(level) = kind
        && !(1..=MAX_HEADING_LEVEL).contains(&level)
    {
        return Err(EditError::HeadingLevel(level));
    }
    let block = block_mut(doc, key)?;
    block.kind = kind;
    if !kind.is_list() {
        block.depth = 0;
    }
    Ok(())
}

fn set_depth(doc: &mut Document, key: &BlockKey, depth: u8) -> Result<(), EditError> {
    if depth > MAX_LIST_DEPTH {
        return Err(EditError::DepthOutOfRange {
            depth,
            max: MAX_LIST_DEPTH,
        });
    }
    block_mut(doc, key)?.depth = depth;
    Ok(())
}

/// Entity ranges of `block` with `cut` carved out of them.
fn carve_entities(block: &mut Block, cut: &Range<usize>) {
    block.entities = std::mem::take(&mut block.entities)
        .into_iter()
        .flat_map(|e| {
            let key = e.key;
            subtract(&e.range, cut)
                .into_iter()
                .map(move |range| EntityRange { key, range })
        })
        .collect();
}

fn apply_entity(
    doc: &mut Document,
    key: &BlockKey,
    range: Range<usize>,
    entity: Entity,
) -> Result<(), EditError> {
    let entity_key = doc.next_entity_key().ok_or(EditError::EntityKeysExhausted)?;
    let block = block_mut(doc, key)?;
    checked_byte_range(block, &range)?;
    if range.is_empty() {
        return Err(EditError::EmptyRange { op: "apply entity" });
    }

    carve_entities(block, &range);
    block.entities.push(EntityRange {
        key: entity_key,
        range,
    });
    block.normalize();
    doc.entities.insert(entity_key, entity);
    Ok(())
}

fn remove_entity(doc: &mut Document, key: &BlockKey, range: Range<usize>) -> Result<(), EditError> {
    let block = block_mut(doc, key)?;
    checked_byte_range(block, &range)?;
    carve_entities(block, &range);
    block.normalize();
    Ok(())
}

fn split_block(doc: &mut Document, key: &BlockKey, offset: usize) -> Result<(), EditError> {
    let below_key = doc.fresh_block_key();
    let index = doc
        .block_index(key)
        .ok_or_else(|| EditError::UnknownBlock(key.clone()))?;
    let block = &mut doc.blocks[index];
    let at = checked_byte_range(block, &(offset..offset))?.start;

    let len = utf16_len(&block.text);
    let head = 0..offset;
    let tail = offset..len;
    let shift = |r: Range<usize>| (r.start - offset)..(r.end - offset);

    let mut below = Block::new(below_key, block.kind, block.text.split_off(at)).with_depth(block.depth);
    for style in std::mem::take(&mut block.styles) {
        if let Some(r) = intersect(&style.range, &tail) {
            below.styles.push(StyleRange {
                style: style.style.clone(),
                range: shift(r),
            });
        }
        if let Some(r) = intersect(&style.range, &head) {
            block.styles.push(StyleRange {
                style: style.style,
                range: r,
            });
        }
    }
    for entity in std::mem::take(&mut block.entities) {
        if let Some(r) = intersect(&entity.range, &tail) {
            below.entities.push(EntityRange {
                key: entity.key,
                range: shift(r),
            });
        }
        if let Some(r) = intersect(&entity.range, &head) {
            block.entities.push(EntityRange {
                key: entity.key,
                range: r,
            });
        }
    }
    block.normalize();
    below.normalize();
    doc.blocks.insert(index + 1, below);
    Ok(())
}

fn remove_block(doc: &mut Document, key: &BlockKey) -> Result<(), EditError> {
    let index = doc
        .block_index(key)
        .ok_or_else(|| EditError::UnknownBlock(key.clone()))?;
    doc.blocks.remove(index);
    if doc.blocks.is_empty() {
        doc.blocks.push(Block::empty());
    }
    Ok(())
}

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::block::{Block, BlockKey, BlockKind, MAX_HEADING_LEVEL};
use super::entity::{Entity, EntityKey};
use super::offsets::{byte_offset, utf16_len};

/// Ways a set of blocks and entities can fail to form a valid document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("document has no blocks")]
    NoBlocks,
    #[error("block key is empty")]
    EmptyBlockKey,
    #[error("duplicate block key `{0}`")]
    DuplicateBlockKey(BlockKey),
    #[error("block `{block}` has heading level {level}, expected 1..=6")]
    HeadingLevel { block: BlockKey, level: u8 },
    #[error("block `{block}`: range {start}..{end} exceeds text length {len}")]
    RangeOutOfBounds {
        block: BlockKey,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("block `{block}`: offset {offset} splits a character")]
    NotCharBoundary { block: BlockKey, offset: usize },
    #[error("block `{block}`: entity ranges overlap at offset {offset}")]
    OverlappingEntities { block: BlockKey, offset: usize },
    #[error("block `{block}` references missing entity {key}")]
    DanglingEntity { block: BlockKey, key: EntityKey },
}

/// The structured content of one answer: ordered blocks plus the entities
/// their ranges refer to.
///
/// A `Document` is always valid: every constructor and every edit checks
/// the invariants listed on [`InvariantError`] and keeps ranges canonical,
/// so two documents with the same content compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
    pub(crate) entities: BTreeMap<EntityKey, Entity>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: a single empty unstyled block and no entities.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::empty()],
            entities: BTreeMap::new(),
        }
    }

    /// Build a document from parts, canonicalising ranges and dropping
    /// entities no range refers to.
    pub fn from_parts(
        blocks: Vec<Block>,
        entities: BTreeMap<EntityKey, Entity>,
    ) -> Result<Self, InvariantError> {
        let mut doc = Self { blocks, entities };
        for block in &mut doc.blocks {
            block.normalize();
        }
        doc.validate()?;
        doc.retain_referenced_entities();
        Ok(doc)
    }

    /// Check every document invariant.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if self.blocks.is_empty() {
            return Err(InvariantError::NoBlocks);
        }

        let mut keys = HashSet::new();
        for block in &self.blocks {
            if block.key.as_str().is_empty() {
                return Err(InvariantError::EmptyBlockKey);
            }
            if !keys.insert(&block.key) {
                return Err(InvariantError::DuplicateBlockKey(block.key.clone()));
            }
            if let BlockKind::Header(level) = block.kind
                && !(1..=MAX_HEADING_LEVEL).contains(&level)
            {
                return Err(InvariantError::HeadingLevel {
                    block: block.key.clone(),
                    level,
                });
            }
            self.validate_ranges(block)?;
        }
        Ok(())
    }

    fn validate_ranges(&self, block: &Block) -> Result<(), InvariantError> {
        let len = utf16_len(&block.text);
        let ranges = block
            .styles
            .iter()
            .map(|s| &s.range)
            .chain(block.entities.iter().map(|e| &e.range));
        for range in ranges {
            if range.start > range.end || range.end > len {
                return Err(InvariantError::RangeOutOfBounds {
                    block: block.key.clone(),
                    start: range.start,
                    end: range.end,
                    len,
                });
            }
            for offset in [range.start, range.end] {
                if byte_offset(&block.text, offset).is_none() {
                    return Err(InvariantError::NotCharBoundary {
                        block: block.key.clone(),
                        offset,
                    });
                }
            }
        }

        // entity ranges are kept sorted by start
        for pair in block.entities.windows(2) {
            if pair[1].range.start < pair[0].range.end {
                return Err(InvariantError::OverlappingEntities {
                    block: block.key.clone(),
                    offset: pair[1].range.start,
                });
            }
        }

        for entity_range in &block.entities {
            if !self.entities.contains_key(&entity_range.key) {
                return Err(InvariantError::DanglingEntity {
                    block: block.key.clone(),
                    key: entity_range.key,
                });
            }
        }
        Ok(())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.key == key)
    }

    /// Key of the first block, the usual caret position in a fresh editor.
    pub fn first_block_key(&self) -> &BlockKey {
        // never empty, see `validate`
        &self.blocks[0].key
    }

    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(&key)
    }

    pub fn entities(&self) -> &BTreeMap<EntityKey, Entity> {
        &self.entities
    }

    /// Whether the document holds any visible text or entity.
    pub fn has_text(&self) -> bool {
        self.blocks.iter().any(|b| !b.text.trim().is_empty()) || !self.entities.is_empty()
    }

    pub(crate) fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| &b.key == key)
    }

    /// A block key not used by any block in this document.
    pub(crate) fn fresh_block_key(&self) -> BlockKey {
        loop {
            let key = BlockKey::generate();
            if self.block_index(&key).is_none() {
                return key;
            }
        }
    }

    /// The key the next inserted entity receives: one past the highest
    /// key, or the lowest unused key once the highest is `u32::MAX`.
    pub(crate) fn next_entity_key(&self) -> Option<EntityKey> {
        let Some(last) = self.entities.keys().next_back() else {
            return Some(EntityKey(0));
        };
        if let Some(next) = last.0.checked_add(1) {
            return Some(EntityKey(next));
        }
        let mut candidate = 0u32;
        for key in self.entities.keys() {
            if key.0 != candidate {
                return Some(EntityKey(candidate));
            }
            candidate = candidate.checked_add(1)?;
        }
        None
    }

    /// Drop entities that no block range refers to any more.
    pub(crate) fn retain_referenced_entities(&mut self) {
        let referenced: BTreeSet<EntityKey> = self
            .blocks
            .iter()
            .flat_map(|b| b.entities.iter().map(|e| e.key))
            .collect();
        self.entities.retain(|key, _| referenced.contains(key));
    }
}

use serde_json::{Map, Value};
use std::fmt;
use std::ops::Range;

use super::entity::EntityKey;
use super::offsets::utf16_len;

/// Highest heading level a header block can carry.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Deepest list nesting the editor allows.
pub const MAX_LIST_DEPTH: u8 = 4;

const HEADER_TYPES: [&str; MAX_HEADING_LEVEL as usize] = [
    "header-one",
    "header-two",
    "header-three",
    "header-four",
    "header-five",
    "header-six",
];

/// Identifier of a block, unique within its document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// A random five character key in the style the rich editor produces.
    pub fn generate() -> Self {
        let id = uuid::Uuid::new_v4().simple().to_string();
        Self(id[..5].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for BlockKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Kind of a content block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Unstyled,
    /// Heading with level 1..=6
    Header(u8),
    UnorderedListItem,
    OrderedListItem,
    Blockquote,
    CodeBlock,
    /// Block holding a single embedded entity such as an image
    Atomic,
}

impl BlockKind {
    /// Parse the block type name used in stored content.
    pub fn from_wire(name: &str) -> Option<Self> {
        if let Some(level) = HEADER_TYPES.iter().position(|t| *t == name) {
            return Some(BlockKind::Header(level as u8 + 1));
        }
        match name {
            "unstyled" | "paragraph" => Some(BlockKind::Unstyled),
            "unordered-list-item" => Some(BlockKind::UnorderedListItem),
            "ordered-list-item" => Some(BlockKind::OrderedListItem),
            "blockquote" => Some(BlockKind::Blockquote),
            "code-block" => Some(BlockKind::CodeBlock),
            "atomic" => Some(BlockKind::Atomic),
            _ => None,
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            BlockKind::Unstyled => "unstyled",
            BlockKind::Header(level) => {
                HEADER_TYPES[(level.clamp(1, MAX_HEADING_LEVEL) - 1) as usize]
            }
            BlockKind::UnorderedListItem => "unordered-list-item",
            BlockKind::OrderedListItem => "ordered-list-item",
            BlockKind::Blockquote => "blockquote",
            BlockKind::CodeBlock => "code-block",
            BlockKind::Atomic => "atomic",
        }
    }

    pub fn is_list(self) -> bool {
        matches!(
            self,
            BlockKind::UnorderedListItem | BlockKind::OrderedListItem
        )
    }
}

/// Inline style tag applied over a text range.
///
/// Declaration order is the canonical order of style ranges in a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Superscript,
    Subscript,
    /// Editor specific style (colour, font size, ...) kept verbatim
    Other(String),
}

impl InlineStyle {
    pub fn from_wire(name: &str) -> Self {
        match name {
            "BOLD" => InlineStyle::Bold,
            "ITALIC" => InlineStyle::Italic,
            "UNDERLINE" => InlineStyle::Underline,
            "STRIKETHROUGH" => InlineStyle::Strikethrough,
            "CODE" => InlineStyle::Code,
            "SUPERSCRIPT" => InlineStyle::Superscript,
            "SUBSCRIPT" => InlineStyle::Subscript,
            other => InlineStyle::Other(other.to_string()),
        }
    }

    /// `Other` holding a known style's name becomes that style.
    pub fn canonical(self) -> Self {
        match self {
            InlineStyle::Other(name) => InlineStyle::from_wire(&name),
            known => known,
        }
    }

    pub fn wire_name(&self) -> &str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::Italic => "ITALIC",
            InlineStyle::Underline => "UNDERLINE",
            InlineStyle::Strikethrough => "STRIKETHROUGH",
            InlineStyle::Code => "CODE",
            InlineStyle::Superscript => "SUPERSCRIPT",
            InlineStyle::Subscript => "SUBSCRIPT",
            InlineStyle::Other(name) => name,
        }
    }
}

/// A style over a UTF-16 range of block text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRange {
    pub style: InlineStyle,
    pub range: Range<usize>,
}

/// An entity reference over a UTF-16 range of block text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRange {
    pub key: EntityKey,
    pub range: Range<usize>,
}

/// One paragraph, heading, list item, quote, code block or atomic unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub(crate) key: BlockKey,
    pub(crate) kind: BlockKind,
    pub(crate) depth: u8,
    pub(crate) text: String,
    pub(crate) styles: Vec<StyleRange>,
    pub(crate) entities: Vec<EntityRange>,
    pub(crate) data: Map<String, Value>,
}

impl Block {
    pub fn new(key: impl Into<BlockKey>, kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            depth: 0,
            text: text.into(),
            styles: Vec::new(),
            entities: Vec::new(),
            data: Map::new(),
        }
    }

    /// An empty unstyled block with a fresh key.
    pub fn empty() -> Self {
        Self::new(BlockKey::generate(), BlockKind::Unstyled, "")
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_style(mut self, style: InlineStyle, range: Range<usize>) -> Self {
        self.styles.push(StyleRange { style, range });
        self
    }

    pub fn with_entity(mut self, key: EntityKey, range: Range<usize>) -> Self {
        self.entities.push(EntityRange { key, range });
        self
    }

    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn styles(&self) -> &[StyleRange] {
        &self.styles
    }

    pub fn entity_ranges(&self) -> &[EntityRange] {
        &self.entities
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Text length in UTF-16 code units
    pub fn len(&self) -> usize {
        utf16_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `style` covers every unit of `range`.
    pub fn has_style_over(&self, style: &InlineStyle, range: &Range<usize>) -> bool {
        self.styles
            .iter()
            .any(|s| s.style == *style && s.range.start <= range.start && s.range.end >= range.end)
    }

    /// Put ranges into canonical form: per style sorted and merged, entity
    /// ranges sorted, empty ranges dropped.
    pub(crate) fn normalize(&mut self) {
        self.styles = normalize_styles(std::mem::take(&mut self.styles));
        self.entities.retain(|e| e.range.start < e.range.end);
        self.entities.sort_by_key(|e| (e.range.start, e.range.end));
    }
}

fn normalize_styles(styles: Vec<StyleRange>) -> Vec<StyleRange> {
    let mut styles: Vec<StyleRange> = styles
        .into_iter()
        .filter(|s| s.range.start < s.range.end)
        .map(|s| StyleRange {
            style: s.style.canonical(),
            range: s.range,
        })
        .collect();
    styles.sort_by(|a, b| {
        a.style
            .cmp(&b.style)
            .then(a.range.start.cmp(&b.range.start))
            .then(a.range.end.cmp(&b.range.end))
    });

    let mut merged: Vec<StyleRange> = Vec::with_capacity(styles.len());
    for next in styles {
        match merged.last_mut() {
            Some(last) if last.style == next.style && next.range.start <= last.range.end => {
                last.range.end = last.range.end.max(next.range.end);
            }
            _ => merged.push(next),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("unstyled", BlockKind::Unstyled)]
    #[case("header-one", BlockKind::Header(1))]
    #[case("header-six", BlockKind::Header(6))]
    #[case("unordered-list-item", BlockKind::UnorderedListItem)]
    #[case("ordered-list-item", BlockKind::OrderedListItem)]
    #[case("blockquote", BlockKind::Blockquote)]
    #[case("code-block", BlockKind::CodeBlock)]
    #[case("atomic", BlockKind::Atomic)]
    fn test_block_kind_wire_names(#[case] name: &str, #[case] kind: BlockKind) {
        assert_eq!(BlockKind::from_wire(name), Some(kind));
        assert_eq!(kind.wire_name(), name);
    }

    #[test]
    fn test_unknown_block_kind() {
        assert_eq!(BlockKind::from_wire("header-seven"), None);
        assert_eq!(BlockKind::from_wire("table"), None);
    }

    #[test]
    fn test_other_styles_keep_their_name() {
        let style = InlineStyle::from_wire("color-rgb(97,189,109)");
        assert_eq!(
            style,
            InlineStyle::Other("color-rgb(97,189,109)".to_string())
        );
        assert_eq!(style.wire_name(), "color-rgb(97,189,109)");
    }

    #[test]
    fn test_normalize_merges_same_style_only() {
        let mut block = Block::new("a1b2c", BlockKind::Unstyled, "Hello world")
            .with_style(InlineStyle::Italic, 6..11)
            .with_style(InlineStyle::Bold, 3..5)
            .with_style(InlineStyle::Bold, 0..3)
            .with_style(InlineStyle::Italic, 2..4)
            .with_style(InlineStyle::Bold, 8..8);
        block.normalize();

        assert_eq!(
            block.styles(),
            &[
                StyleRange {
                    style: InlineStyle::Bold,
                    range: 0..5
                },
                StyleRange {
                    style: InlineStyle::Italic,
                    range: 2..4
                },
                StyleRange {
                    style: InlineStyle::Italic,
                    range: 6..11
                },
            ]
        );
    }

    #[test]
    fn test_has_style_over() {
        let mut block =
            Block::new("k", BlockKind::Unstyled, "Hello").with_style(InlineStyle::Bold, 0..3);
        block.normalize();

        assert!(block.has_style_over(&InlineStyle::Bold, &(0..3)));
        assert!(block.has_style_over(&InlineStyle::Bold, &(1..2)));
        assert!(!block.has_style_over(&InlineStyle::Bold, &(2..4)));
        assert!(!block.has_style_over(&InlineStyle::Italic, &(0..1)));
    }

    #[test]
    fn test_generated_keys_are_short() {
        let key = BlockKey::generate();
        assert_eq!(key.as_str().len(), 5);
    }
}

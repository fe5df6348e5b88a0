//! Inline rendering: style delimiters and entity output within one block.

use std::cmp::Reverse;
use std::ops::Range;

use crate::content::offsets::byte_range;
use crate::content::{Block, Document, Entity, EntityKind, InlineStyle};

/// Opening and closing Markdown for a style, `None` for styles Markdown
/// cannot express.
fn delimiters(style: &InlineStyle) -> Option<(&'static str, &'static str)> {
    match style {
        InlineStyle::Bold => Some(("**", "**")),
        InlineStyle::Italic => Some(("*", "*")),
        InlineStyle::Code => Some(("`", "`")),
        InlineStyle::Strikethrough => Some(("~~", "~~")),
        InlineStyle::Underline => Some(("__", "__")),
        InlineStyle::Superscript => Some(("<sup>", "</sup>")),
        InlineStyle::Subscript => Some(("<sub>", "</sub>")),
        InlineStyle::Other(_) => None,
    }
}

/// Lower values nest further out when ranges coincide.
fn priority(style: &InlineStyle) -> u8 {
    match style {
        InlineStyle::Italic => 0,
        InlineStyle::Bold => 1,
        InlineStyle::Strikethrough => 2,
        InlineStyle::Underline => 3,
        InlineStyle::Superscript => 4,
        InlineStyle::Subscript => 5,
        InlineStyle::Code => 6,
        InlineStyle::Other(_) => 7,
    }
}

struct Mark<'a> {
    style: &'a InlineStyle,
    range: Range<usize>,
    open: &'static str,
    close: &'static str,
}

impl Mark<'_> {
    /// Order in which simultaneously open marks nest, outermost first.
    ///
    /// Code always sits innermost since nothing inside a code span is
    /// parsed. Otherwise a mark opened earlier stays outside later ones,
    /// the longer of two marks opening together goes outside, and style
    /// priority settles exact ties.
    fn nesting_key(&self) -> (bool, usize, Reverse<usize>, u8) {
        (
            *self.style == InlineStyle::Code,
            self.range.start,
            Reverse(self.range.end),
            priority(self.style),
        )
    }
}

/// Render the block's text with its styles and entities.
pub(crate) fn render_inline(block: &Block, doc: &Document, out: &mut String) {
    let mut cursor = 0;
    for entity_range in block.entity_ranges() {
        render_styled(block, cursor..entity_range.range.start, out);
        match doc.entity(entity_range.key) {
            Some(entity) => render_entity(block, entity, &entity_range.range, out),
            None => render_styled(block, entity_range.range.clone(), out),
        }
        cursor = entity_range.range.end;
    }
    render_styled(block, cursor..block.len(), out);
}

/// Render only the entities of the block, used for atomic blocks whose
/// text is a placeholder.
pub(crate) fn render_entities(block: &Block, doc: &Document, out: &mut String) {
    for entity_range in block.entity_ranges() {
        if let Some(entity) = doc.entity(entity_range.key) {
            render_entity(block, entity, &entity_range.range, out);
        }
    }
}

fn render_entity(block: &Block, entity: &Entity, range: &Range<usize>, out: &mut String) {
    match entity.kind {
        EntityKind::Link | EntityKind::Mention => {
            out.push('[');
            render_styled(block, range.clone(), out);
            out.push_str("](");
            out.push_str(entity.data_str("url").unwrap_or_default());
            out.push(')');
        }
        EntityKind::Image => {
            out.push_str("![");
            out.push_str(entity.data_str("alt").unwrap_or_default());
            out.push_str("](");
            out.push_str(entity.data_str("src").unwrap_or_default());
            out.push(')');
        }
        EntityKind::EmbeddedLink => {
            let attr = |key: &str| entity.data_text(key).unwrap_or_else(|| "auto".to_string());
            let width = attr("width");
            let height = attr("height");
            let src = entity.data_str("src").unwrap_or_default();
            out.push_str(&format!(
                r#"<iframe width="{}" height="{}" src="{}" frameBorder="0"></iframe>"#,
                html_escape::encode_double_quoted_attribute(&width),
                html_escape::encode_double_quoted_attribute(&height),
                html_escape::encode_double_quoted_attribute(src),
            ));
        }
    }
}

/// Render `piece` of the block text wrapped in style delimiters.
///
/// The piece is cut at every point where a style starts or ends. Between
/// two cuts the wanted stack of open marks is recomputed; the shared prefix
/// with the currently open stack stays open, the rest is closed innermost
/// first and the missing marks opened, so the output is always well nested.
fn render_styled(block: &Block, piece: Range<usize>, out: &mut String) {
    if piece.start >= piece.end {
        return;
    }

    let marks: Vec<Mark<'_>> = block
        .styles()
        .iter()
        .filter_map(|s| {
            let (open, close) = delimiters(&s.style)?;
            let start = s.range.start.max(piece.start);
            let end = s.range.end.min(piece.end);
            (start < end).then_some(Mark {
                style: &s.style,
                range: start..end,
                open,
                close,
            })
        })
        .collect();

    let mut cuts: Vec<usize> = marks
        .iter()
        .flat_map(|m| [m.range.start, m.range.end])
        .chain([piece.start, piece.end])
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut open: Vec<usize> = Vec::new();
    for window in cuts.windows(2) {
        let (from, to) = (window[0], window[1]);
        let mut wanted: Vec<usize> = (0..marks.len())
            .filter(|&i| marks[i].range.start <= from && marks[i].range.end >= to)
            .collect();
        wanted.sort_by_key(|&i| marks[i].nesting_key());

        let keep = open
            .iter()
            .zip(&wanted)
            .take_while(|(a, b)| a == b)
            .count();
        for &i in open[keep..].iter().rev() {
            out.push_str(marks[i].close);
        }
        open.truncate(keep);
        for &i in &wanted[keep..] {
            out.push_str(marks[i].open);
            open.push(i);
        }

        push_text(block, from..to, out);
    }
    for &i in open.iter().rev() {
        out.push_str(marks[i].close);
    }
}

fn push_text(block: &Block, range: Range<usize>, out: &mut String) {
    if let Some(bytes) = byte_range(block.text(), &range) {
        out.push_str(&block.text()[bytes]);
    }
}

//! Wire shape of stored answer content.
//!
//! Field names and nesting match what the answer API has always stored in
//! the `answer` column, so existing records decode unchanged.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::content::Mutability;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContent {
    pub blocks: Vec<RawBlock>,
    pub entity_map: BTreeMap<String, RawEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawBlock {
    #[serde(default)]
    pub key: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEntity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub mutability: Mutability,
    #[serde(default)]
    pub data: Map<String, Value>,
}

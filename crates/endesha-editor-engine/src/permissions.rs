//! Route permissions granted to the signed-in user.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const CATEGORIES_PATH: &str = "/endesha/categories";
pub const QUESTIONS_PATH: &str = "/endesha/questions";
pub const ANSWERS_PATH: &str = "/endesha/answers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP verb `{0}`")]
pub struct UnknownVerb(pub String);

impl FromStr for Verb {
    type Err = UnknownVerb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "PATCH" => Ok(Verb::Patch),
            "DELETE" => Ok(Verb::Delete),
            _ => Err(UnknownVerb(s.to_string())),
        }
    }
}

/// One grant: `verb` may be used on `path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permission {
    pub path: String,
    pub verb: Verb,
}

impl Permission {
    pub fn new(path: impl Into<String>, verb: Verb) -> Self {
        Self {
            path: path.into(),
            verb,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.path)
    }
}

pub trait Permissions {
    fn can_perform(&self, path: &str, verb: Verb) -> bool;
}

/// Grants held by a user. Paths match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    grants: BTreeSet<Permission>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, permission: Permission) {
        self.grants.insert(permission);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.grants.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Grants from `catalogue` this set does not hold, in catalogue order.
    pub fn unassigned<'a>(&self, catalogue: &'a [Permission]) -> Vec<&'a Permission> {
        catalogue
            .iter()
            .filter(|p| !self.grants.contains(*p))
            .collect()
    }
}

impl Permissions for PermissionSet {
    fn can_perform(&self, path: &str, verb: Verb) -> bool {
        self.grants.iter().any(|p| p.path == path && p.verb == verb)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            grants: iter.into_iter().collect(),
        }
    }
}

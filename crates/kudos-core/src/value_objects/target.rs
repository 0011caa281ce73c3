//! Polymorphic vote target - a closed tagged union instead of a generic foreign key

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Snowflake;

/// The kinds of entities that can receive votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Content,
    Comment,
    KnowledgePath,
    Publication,
    ContentSuggestion,
}

impl EntityKind {
    /// Stable integer representation for storage
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::Content => 1,
            Self::Comment => 2,
            Self::KnowledgePath => 3,
            Self::Publication => 4,
            Self::ContentSuggestion => 5,
        }
    }

    /// Decode the storage representation; unknown discriminants are rejected
    #[must_use]
    pub const fn from_i16(raw: i16) -> Option<Self> {
        match raw {
            1 => Some(Self::Content),
            2 => Some(Self::Comment),
            3 => Some(Self::KnowledgePath),
            4 => Some(Self::Publication),
            5 => Some(Self::ContentSuggestion),
            _ => None,
        }
    }

    /// Human-readable name used in logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Comment => "comment",
            Self::KnowledgePath => "knowledge_path",
            Self::Publication => "publication",
            Self::ContentSuggestion => "content_suggestion",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to the entity being voted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub kind: EntityKind,
    pub id: Snowflake,
}

impl TargetRef {
    /// Create a new target reference
    #[must_use]
    pub const fn new(kind: EntityKind, id: Snowflake) -> Self {
        Self { kind, id }
    }

    #[must_use]
    pub const fn content(id: Snowflake) -> Self {
        Self::new(EntityKind::Content, id)
    }

    #[must_use]
    pub const fn comment(id: Snowflake) -> Self {
        Self::new(EntityKind::Comment, id)
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Optional topic partition of a vote; `None` is the global scope
pub type Scope = Option<Snowflake>;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of game object that can host auxiliary data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Character,
    Room,
    Item,
    Account,
    Connection,
    Zone,
    World,
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OwnerKind::Character => "character",
            OwnerKind::Room => "room",
            OwnerKind::Item => "item",
            OwnerKind::Account => "account",
            OwnerKind::Connection => "connection",
            OwnerKind::Zone => "zone",
            OwnerKind::World => "world",
        };
        f.write_str(name)
    }
}

/// Tag set describing which owner kinds an auxiliary type applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerKinds(Vec<OwnerKind>);

impl OwnerKinds {
    pub fn new(kinds: impl IntoIterator<Item = OwnerKind>) -> Self {
        let mut set = Vec::new();
        for kind in kinds {
            if !set.contains(&kind) {
                set.push(kind);
            }
        }
        OwnerKinds(set)
    }

    /// Applies to every owner kind.
    pub fn all() -> Self {
        Self::new([
            OwnerKind::Character,
            OwnerKind::Room,
            OwnerKind::Item,
            OwnerKind::Account,
            OwnerKind::Connection,
            OwnerKind::Zone,
            OwnerKind::World,
        ])
    }

    pub fn contains(&self, kind: OwnerKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<OwnerKind> for OwnerKinds {
    fn from(kind: OwnerKind) -> Self {
        OwnerKinds(vec![kind])
    }
}

impl From<&[OwnerKind]> for OwnerKinds {
    fn from(kinds: &[OwnerKind]) -> Self {
        Self::new(kinds.iter().copied())
    }
}

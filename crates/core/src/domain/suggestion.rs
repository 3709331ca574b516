use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::domain::item::{ClothingItem, ItemId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Top,
    Bottom,
    Outer,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Self::Top, Self::Bottom, Self::Outer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Outer => "outer",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outfit proposal. `None` in a slot means "no match", not a failure.
///
/// Two suggestions are equal when every slot holds the same item id (or both
/// are empty), regardless of when they were produced.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Suggestion {
    pub top: Option<ClothingItem>,
    pub bottom: Option<ClothingItem>,
    pub outer: Option<ClothingItem>,
}

impl Suggestion {
    pub fn get(&self, slot: Slot) -> Option<&ClothingItem> {
        match slot {
            Slot::Top => self.top.as_ref(),
            Slot::Bottom => self.bottom.as_ref(),
            Slot::Outer => self.outer.as_ref(),
        }
    }

    /// Slots that hold an item, in top, bottom, outer order.
    pub fn filled(&self) -> impl Iterator<Item = (Slot, &ClothingItem)> + '_ {
        Slot::ALL.into_iter().filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.filled().next().is_none()
    }

    pub fn key(&self) -> [Option<ItemId>; 3] {
        Slot::ALL.map(|slot| self.get(slot).map(|item| item.id))
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Suggestion {}

impl Hash for Suggestion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::item::ItemId;
use crate::domain::suggestion::Suggestion;

/// A favorited closet item (by id) or outfit (by slot contents).
///
/// Suggestions compare by value, so favoriting a fresh recommendation that
/// picks the same items matches an earlier favorite.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FavoriteKind {
    Item(ItemId),
    Suggestion(Suggestion),
}

impl From<ItemId> for FavoriteKind {
    fn from(id: ItemId) -> Self {
        Self::Item(id)
    }
}

impl From<Suggestion> for FavoriteKind {
    fn from(suggestion: Suggestion) -> Self {
        Self::Suggestion(suggestion)
    }
}

#[derive(Clone, Debug, Default)]
pub struct FavoritesTracker {
    entries: Vec<FavoriteKind>,
}

impl FavoritesTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership and returns the new state.
    pub fn toggle(&mut self, entry: impl Into<FavoriteKind>) -> bool {
        let entry = entry.into();
        let entry_kind = match &entry {
            FavoriteKind::Item(_) => "item",
            FavoriteKind::Suggestion(_) => "suggestion",
        };
        let now_favorite = match self.position(&entry) {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.push(entry);
                true
            }
        };

        debug!(
            event_name = "favorites.toggled",
            entry_kind,
            favorite = now_favorite,
            total = self.entries.len(),
            "favorite toggled"
        );
        now_favorite
    }

    pub fn is_favorite(&self, entry: &FavoriteKind) -> bool {
        self.position(entry).is_some()
    }

    pub fn is_item_favorite(&self, id: ItemId) -> bool {
        self.is_favorite(&FavoriteKind::Item(id))
    }

    /// Favorites in the order they were marked.
    pub fn list(&self) -> impl Iterator<Item = &FavoriteKind> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, entry: &FavoriteKind) -> Option<usize> {
        self.entries.iter().position(|existing| existing == entry)
    }
}

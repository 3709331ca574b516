use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::item::{ClothingItem, ClothingItemInput, ItemId};
use crate::errors::ValidationError;

/// Ordered, append-only collection of clothing items.
///
/// Ids are handed out sequentially starting at 1, so id order and insertion
/// order always agree.
#[derive(Clone, Debug, Default)]
pub struct ClosetStore {
    items: Vec<ClothingItem>,
    next_id: u64,
}

impl ClosetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: ClothingItemInput) -> Result<ClothingItem, ValidationError> {
        let validated = match input.validate() {
            Ok(validated) => validated,
            Err(error) => {
                warn!(
                    event_name = "closet.item.rejected",
                    item_type = %input.kind,
                    error = %error,
                    "clothing item rejected"
                );
                return Err(error);
            }
        };

        self.next_id += 1;
        let item = ClothingItem {
            id: ItemId(self.next_id),
            name: validated.name,
            kind: validated.kind,
            thickness: validated.thickness,
            image_ref: input.image_ref,
            added_at: Utc::now(),
        };
        self.items.push(item.clone());

        debug!(
            event_name = "closet.item.added",
            item_id = item.id.0,
            item_type = item.kind.as_str(),
            has_image = item.image_ref.is_some(),
            "clothing item added"
        );
        Ok(item)
    }

    pub fn get(&self, id: ItemId) -> Option<&ClothingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn all(&self) -> impl Iterator<Item = &ClothingItem> + '_ {
        self.items.iter()
    }

    /// Borrowed view of the collection in insertion order.
    pub fn snapshot(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn search<'a>(&'a self, query: &str) -> SearchResults<'a> {
        SearchResults { items: &self.items, needle: query.to_lowercase() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Case-insensitive substring match over item name or type.
///
/// Nothing is filtered until iterated, and every call to `iter` starts over
/// from the first item.
#[derive(Clone, Debug)]
pub struct SearchResults<'a> {
    items: &'a [ClothingItem],
    needle: String,
}

impl<'a> SearchResults<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a ClothingItem> + '_ {
        self.items.iter().filter(move |item| self.matches(item))
    }

    pub fn query(&self) -> &str {
        &self.needle
    }

    fn matches(&self, item: &ClothingItem) -> bool {
        self.needle.is_empty()
            || item.name.to_lowercase().contains(&self.needle)
            || item.kind.as_str().contains(&self.needle)
    }
}

impl<'a, 's> IntoIterator for &'s SearchResults<'a> {
    type Item = &'a ClothingItem;
    type IntoIter = Box<dyn Iterator<Item = &'a ClothingItem> + 's>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

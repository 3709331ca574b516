pub mod item;
pub mod suggestion;
pub mod weather;

pub use item::{ClothingItem, ClothingItemInput, ClothingType, ImageRef, ItemId, Thickness};
pub use suggestion::{Slot, Suggestion};
pub use weather::{WeatherCondition, WeatherReading};

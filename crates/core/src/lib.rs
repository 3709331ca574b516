pub mod closet;
pub mod collaborators;
pub mod config;
pub mod domain;
pub mod errors;
pub mod favorites;
pub mod recommend;
pub mod session;

pub use closet::{ClosetStore, SearchResults};
pub use collaborators::{
    DigestImageUploader, ImageUploader, StaticWeatherProvider, UnavailableWeatherProvider,
    UploadError, WeatherError, WeatherProvider,
};
pub use domain::{
    ClothingItem, ClothingItemInput, ClothingType, ImageRef, ItemId, Slot, Suggestion, Thickness,
    WeatherCondition, WeatherReading,
};
pub use errors::{
    ApplicationError, DomainError, InterfaceError, InvalidInputError, ValidationError,
};
pub use favorites::{FavoriteKind, FavoritesTracker};
pub use recommend::{
    recommend, Conditions, DeterministicRecommendationEngine, RecommendationEngine,
    TemperatureBand, TemperatureBands,
};
pub use session::{WardrobeSession, WeatherState};

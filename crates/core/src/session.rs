use tracing::{info, warn};
use uuid::Uuid;

use crate::closet::{ClosetStore, SearchResults};
use crate::collaborators::WeatherError;
use crate::domain::item::{ClothingItem, ClothingItemInput, ItemId};
use crate::domain::suggestion::Suggestion;
use crate::domain::weather::{WeatherCondition, WeatherReading};
use crate::errors::{ApplicationError, DomainError, ValidationError};
use crate::favorites::{FavoriteKind, FavoritesTracker};
use crate::recommend::{Conditions, DeterministicRecommendationEngine, RecommendationEngine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WeatherState {
    Loading,
    Ready(WeatherReading),
    Unavailable(WeatherError),
}

/// Single-user wardrobe state: the closet, favorites, the latest weather and
/// the latest suggestion. Callers in a multi-threaded host must serialize
/// access themselves.
pub struct WardrobeSession<E = DeterministicRecommendationEngine> {
    session_id: Uuid,
    engine: E,
    closet: ClosetStore,
    favorites: FavoritesTracker,
    weather: WeatherState,
    current_suggestion: Option<Suggestion>,
}

impl Default for WardrobeSession<DeterministicRecommendationEngine> {
    fn default() -> Self {
        Self::new(DeterministicRecommendationEngine::default())
    }
}

impl<E: RecommendationEngine> WardrobeSession<E> {
    pub fn new(engine: E) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            engine,
            closet: ClosetStore::new(),
            favorites: FavoritesTracker::new(),
            weather: WeatherState::Loading,
            current_suggestion: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn closet(&self) -> &ClosetStore {
        &self.closet
    }

    pub fn favorites(&self) -> &FavoritesTracker {
        &self.favorites
    }

    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    pub fn current_suggestion(&self) -> Option<&Suggestion> {
        self.current_suggestion.as_ref()
    }

    pub fn add_item(&mut self, input: ClothingItemInput) -> Result<ClothingItem, ValidationError> {
        self.closet.add(input)
    }

    pub fn search(&self, query: &str) -> SearchResults<'_> {
        self.closet.search(query)
    }

    /// Records the outcome of a weather lookup.
    pub fn apply_weather(&mut self, outcome: Result<WeatherReading, WeatherError>) {
        self.weather = match outcome {
            Ok(reading) => {
                info!(
                    event_name = "session.weather.ready",
                    session_id = %self.session_id,
                    temperature = reading.temperature,
                    weather = reading.condition.as_str(),
                    "weather reading applied"
                );
                WeatherState::Ready(reading)
            }
            Err(error) => {
                warn!(
                    event_name = "session.weather.unavailable",
                    session_id = %self.session_id,
                    error = %error,
                    "weather reading unavailable"
                );
                WeatherState::Unavailable(error)
            }
        };
    }

    /// Lets the user override the reported condition. Has no effect unless a
    /// reading is available; returns whether the override was applied.
    pub fn select_weather(&mut self, condition: WeatherCondition) -> bool {
        match &mut self.weather {
            WeatherState::Ready(reading) => {
                reading.condition = condition;
                true
            }
            WeatherState::Loading | WeatherState::Unavailable(_) => false,
        }
    }

    /// Generates a fresh suggestion from the current weather. Never consults the
    /// engine while weather is loading or unavailable.
    pub fn suggest(&mut self) -> Result<&Suggestion, ApplicationError> {
        let reading = match &self.weather {
            WeatherState::Ready(reading) => *reading,
            WeatherState::Loading => {
                return Err(ApplicationError::WeatherUnavailable(WeatherError::FetchFailed(
                    "weather reading still loading".to_string(),
                )))
            }
            WeatherState::Unavailable(error) => {
                return Err(ApplicationError::WeatherUnavailable(error.clone()))
            }
        };

        let suggestion = self.engine.recommend(Conditions::from(reading), self.closet.snapshot());
        info!(
            event_name = "session.suggestion.generated",
            session_id = %self.session_id,
            filled_slots = suggestion.filled().count(),
            "suggestion ready"
        );
        let suggestion = self.current_suggestion.insert(suggestion);
        Ok(&*suggestion)
    }

    pub fn toggle_item_favorite(&mut self, id: ItemId) -> Result<bool, ApplicationError> {
        if self.closet.get(id).is_none() {
            return Err(DomainError::UnknownItem(id).into());
        }
        Ok(self.favorites.toggle(id))
    }

    /// Toggles the latest suggestion by value; `None` when nothing was suggested yet.
    pub fn favorite_current_suggestion(&mut self) -> Option<bool> {
        let suggestion = self.current_suggestion.clone()?;
        Some(self.favorites.toggle(suggestion))
    }

    pub fn is_current_suggestion_favorite(&self) -> bool {
        self.current_suggestion.as_ref().is_some_and(|suggestion| {
            self.favorites.is_favorite(&FavoriteKind::Suggestion(suggestion.clone()))
        })
    }
}

//! Weather-driven outfit recommendation.
//!
//! The engine is a pure function of the conditions and the closet contents.
//! Each slot is resolved by one scan of the closet in insertion order; the
//! first item satisfying the slot's predicate wins and an unmatched slot is
//! left empty.

pub mod bands;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::item::{ClothingItem, ClothingType, Thickness};
use crate::domain::suggestion::Suggestion;
use crate::domain::weather::{WeatherCondition, WeatherReading};
use crate::errors::InvalidInputError;

pub use bands::{TemperatureBand, TemperatureBands};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    pub temperature: i32,
    pub weather: WeatherCondition,
}

impl Conditions {
    pub fn new(temperature: i32, weather: WeatherCondition) -> Self {
        Self { temperature, weather }
    }

    /// Parses raw form values. Only whole base-10 integers are accepted as a
    /// temperature; `"12.5"` or `"12C"` are rejected instead of truncated.
    pub fn parse(temperature: &str, weather: &str) -> Result<Self, InvalidInputError> {
        let temperature = temperature
            .trim()
            .parse::<i32>()
            .map_err(|_| InvalidInputError::Temperature(temperature.to_string()))?;
        let weather = weather.parse::<WeatherCondition>()?;
        Ok(Self { temperature, weather })
    }
}

impl From<WeatherReading> for Conditions {
    fn from(reading: WeatherReading) -> Self {
        Self { temperature: reading.temperature, weather: reading.condition }
    }
}

pub trait RecommendationEngine: Send + Sync {
    fn recommend(&self, conditions: Conditions, closet: &[ClothingItem]) -> Suggestion;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicRecommendationEngine {
    bands: TemperatureBands,
}

impl DeterministicRecommendationEngine {
    pub fn new(bands: TemperatureBands) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> TemperatureBands {
        self.bands
    }
}

impl RecommendationEngine for DeterministicRecommendationEngine {
    fn recommend(&self, conditions: Conditions, closet: &[ClothingItem]) -> Suggestion {
        let band = self.bands.classify(conditions.temperature);
        let suggestion = match band {
            TemperatureBand::Cold => Suggestion {
                top: first(closet, |item| item.is(ClothingType::Top, Thickness::Thick)),
                bottom: first(closet, |item| item.is(ClothingType::Bottom, Thickness::Thick)),
                outer: first(closet, |item| item.kind == ClothingType::Outer),
            },
            TemperatureBand::Mild => Suggestion {
                top: first(closet, |item| item.is(ClothingType::Top, Thickness::Medium)),
                bottom: first(closet, |item| item.kind == ClothingType::Bottom),
                outer: match conditions.weather {
                    WeatherCondition::Rainy => {
                        first(closet, |item| item.kind == ClothingType::Outer)
                    }
                    WeatherCondition::Sunny | WeatherCondition::Cloudy => None,
                },
            },
            TemperatureBand::Warm => Suggestion {
                top: first(closet, |item| item.is(ClothingType::Top, Thickness::Thin)),
                bottom: first(closet, |item| item.is(ClothingType::Bottom, Thickness::Thin)),
                outer: None,
            },
        };

        debug!(
            event_name = "recommendation.generated",
            temperature = conditions.temperature,
            weather = conditions.weather.as_str(),
            band = ?band,
            filled_slots = suggestion.filled().count(),
            closet_size = closet.len(),
            "outfit suggestion generated"
        );
        suggestion
    }
}

fn first(
    closet: &[ClothingItem],
    predicate: impl Fn(&ClothingItem) -> bool,
) -> Option<ClothingItem> {
    closet.iter().find(|item| predicate(item)).cloned()
}

/// Recommends from raw temperature and weather strings using the default bands.
pub fn recommend(
    temperature: &str,
    weather: &str,
    closet: &[ClothingItem],
) -> Result<Suggestion, InvalidInputError> {
    let conditions = Conditions::parse(temperature, weather)?;
    Ok(DeterministicRecommendationEngine::default().recommend(conditions, closet))
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidInputError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Sunny,
    Rainy,
    Cloudy,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rainy => "rainy",
            Self::Cloudy => "cloudy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Rainy => "Rain",
            Self::Cloudy => "Cloudy",
        }
    }

    /// Icon name shown next to the temperature.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Sunny => "sun",
            Self::Rainy => "cloud-rain",
            Self::Cloudy => "cloud",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherCondition {
    type Err = InvalidInputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sunny" => Ok(Self::Sunny),
            "rainy" => Ok(Self::Rainy),
            "cloudy" => Ok(Self::Cloudy),
            _ => Err(InvalidInputError::Weather(value.to_string())),
        }
    }
}

/// Already-resolved output of a weather provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: i32,
    pub condition: WeatherCondition,
}

impl WeatherReading {
    pub fn new(temperature: i32, condition: WeatherCondition) -> Self {
        Self { temperature, condition }
    }
}

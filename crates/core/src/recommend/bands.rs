use serde::{Deserialize, Serialize};

pub const DEFAULT_COLD_BELOW: i32 = 15;
pub const DEFAULT_WARM_FROM: i32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    Cold,
    Mild,
    Warm,
}

/// Band boundaries in °C: cold is `temp < cold_below`, warm is
/// `temp >= warm_from`, everything in between is mild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureBands {
    pub cold_below: i32,
    pub warm_from: i32,
}

impl Default for TemperatureBands {
    fn default() -> Self {
        Self { cold_below: DEFAULT_COLD_BELOW, warm_from: DEFAULT_WARM_FROM }
    }
}

impl TemperatureBands {
    pub fn new(cold_below: i32, warm_from: i32) -> Option<Self> {
        (cold_below < warm_from).then_some(Self { cold_below, warm_from })
    }

    pub fn classify(&self, temperature: i32) -> TemperatureBand {
        if temperature < self.cold_below {
            TemperatureBand::Cold
        } else if temperature < self.warm_from {
            TemperatureBand::Mild
        } else {
            TemperatureBand::Warm
        }
    }
}

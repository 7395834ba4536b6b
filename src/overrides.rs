//! Operator overrides: fixed readings and assessments for named cities,
//! consulted before any live lookup.

use std::collections::HashMap;

use crate::risk::{RiskAssessment, RiskLevel};
use crate::weather::WeatherReading;

/// Canned result for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityOverride {
    pub reading: WeatherReading,
    pub assessment: RiskAssessment,
    /// SMS body sent every time the override fires
    pub notification: String,
}

#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, CityOverride>,
}

impl OverrideTable {
    /// Empty table; every city goes to the live path.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// The Guwahati demo entry.
    pub fn demo() -> Self {
        let assessment = RiskAssessment {
            level: RiskLevel::High,
            alert: "⚠️ High Flood Risk in this city! Immediate precautions are advised.".to_string(),
            score: 100.0,
        };
        let notification = format!("Guwahati Flood Alert! 🚨 Risk Level: {}", assessment.level);

        Self::default().with(
            "guwahati",
            CityOverride {
                // max_temp is fixed here, not derived from the offset
                reading: WeatherReading {
                    temperature: 28.0,
                    max_temp: 32.0,
                    humidity: 90.0,
                    wind_speed: 5.0,
                    rainfall: 50.0,
                },
                assessment,
                notification,
            },
        )
    }

    pub fn with(mut self, city: &str, entry: CityOverride) -> Self {
        self.entries.insert(normalize(city), entry);
        self
    }

    pub fn lookup(&self, city: &str) -> Option<&CityOverride> {
        self.entries.get(&normalize(city))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}

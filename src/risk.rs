//! Flood risk scoring.
//!
//! Current conditions and forecast days are scored with two separate linear
//! formulas and two separate threshold sets. They are kept apart on purpose
//! and must not be merged.

use serde::{Deserialize, Serialize};

use crate::constants::{CHANCE_BIAS, CHANCE_MAX};
use crate::weather::{ForecastDay, WeatherReading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Alert shown for a live current-conditions assessment
    pub fn alert(&self) -> &'static str {
        match self {
            Self::Low => "✅ Flood risk is low. Stay Cool.",
            Self::Medium => "⚠️ Flood risk is medium. Stay Safe.",
            Self::High => "🚨 Flood risk is high! Move to safe place immediately.",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🔴",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub alert: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRiskAssessment {
    /// e.g. "Friday, 16 Oct"
    pub date_label: String,
    pub level: RiskLevel,
    /// Percentage, at most 100
    pub chance: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

/// Score the current conditions: `rain*0.5 + humidity*0.3 + wind*0.2`.
pub fn score_current(reading: &WeatherReading) -> RiskAssessment {
    let score = reading.rainfall * 0.5 + reading.humidity * 0.3 + reading.wind_speed * 0.2;
    let level = current_level(score);

    RiskAssessment {
        level,
        alert: level.alert().to_string(),
        score,
    }
}

fn current_level(score: f64) -> RiskLevel {
    if score < 50.0 {
        RiskLevel::Low
    } else if score < 100.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Score each forecast day independently, preserving order.
pub fn score_forecast(days: &[ForecastDay]) -> Vec<ForecastRiskAssessment> {
    days.iter().map(score_forecast_day).collect()
}

fn score_forecast_day(day: &ForecastDay) -> ForecastRiskAssessment {
    let score = day.rainfall * 0.6 + day.humidity * 0.3 + day.temperature * 0.1;

    ForecastRiskAssessment {
        date_label: day.date.format("%A, %d %b").to_string(),
        level: forecast_level(score),
        chance: chance_of_flood(score),
        temperature: day.temperature,
        humidity: day.humidity,
        rainfall: day.rainfall,
    }
}

fn forecast_level(score: f64) -> RiskLevel {
    if score < 40.0 {
        RiskLevel::Low
    } else if score < 70.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// `min(100, round(score) + 5)`; no lower clamp.
fn chance_of_flood(score: f64) -> i64 {
    (score.round() as i64 + CHANCE_BIAS).min(CHANCE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(rainfall: f64, humidity: f64, wind_speed: f64) -> WeatherReading {
        WeatherReading::new(25.0, humidity, wind_speed, rainfall)
    }

    fn day(rainfall: f64, humidity: f64, temperature: f64) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            temperature,
            humidity,
            rainfall,
        }
    }

    #[test]
    fn test_current_low() {
        let result = score_current(&reading(0.0, 80.0, 5.0));
        assert_eq!(result.score, 80.0 * 0.3 + 5.0 * 0.2);
        assert_eq!(result.level, RiskLevel::Low);
        assert_eq!(result.alert, "✅ Flood risk is low. Stay Cool.");
    }

    #[test]
    fn test_current_thresholds_are_lower_inclusive() {
        // 100mm rain alone scores exactly 50
        assert_eq!(score_current(&reading(100.0, 0.0, 0.0)).level, RiskLevel::Medium);
        assert_eq!(score_current(&reading(99.0, 0.0, 0.0)).level, RiskLevel::Low);
        // 200mm rain alone scores exactly 100
        assert_eq!(score_current(&reading(200.0, 0.0, 0.0)).level, RiskLevel::High);
        assert_eq!(score_current(&reading(198.0, 0.0, 0.0)).level, RiskLevel::Medium);
    }

    #[test]
    fn test_current_alerts_follow_level() {
        assert_eq!(
            score_current(&reading(120.0, 0.0, 0.0)).alert,
            "⚠️ Flood risk is medium. Stay Safe."
        );
        assert_eq!(
            score_current(&reading(180.0, 90.0, 10.0)).alert,
            "🚨 Flood risk is high! Move to safe place immediately."
        );
    }

    #[test]
    fn test_current_is_idempotent() {
        let r = reading(12.5, 91.0, 7.3);
        assert_eq!(score_current(&r), score_current(&r));
    }

    #[test]
    fn test_forecast_thresholds() {
        let scored = score_forecast(&[
            day(0.0, 100.0, 0.0),    // 30
            day(0.0, 100.0, 100.0),  // 40
            day(50.0, 100.0, 0.0),   // 60
            day(50.0, 100.0, 100.0), // 70
        ]);
        let levels: Vec<RiskLevel> = scored.iter().map(|s| s.level).collect();
        assert_eq!(
            levels,
            vec![RiskLevel::Low, RiskLevel::Medium, RiskLevel::Medium, RiskLevel::High]
        );
    }

    #[test]
    fn test_forecast_chance() {
        // 0.3*70 + 0.1*25 = 23.5 -> rounds to 24
        assert_eq!(score_forecast(&[day(0.0, 70.0, 25.0)])[0].chance, 29);
        // 0.6*10 + 0.3*80 + 0.1*30 = 33
        assert_eq!(score_forecast(&[day(10.0, 80.0, 30.0)])[0].chance, 38);
    }

    #[test]
    fn test_forecast_chance_clamped_at_100() {
        assert_eq!(score_forecast(&[day(150.0, 95.0, 30.0)])[0].chance, 100);
        assert_eq!(score_forecast(&[day(0.0, 316.0, 0.0)])[0].chance, 100);
    }

    #[test]
    fn test_forecast_chance_not_clamped_below() {
        // -100 degrees scores -10 -> chance -5
        assert_eq!(score_forecast(&[day(0.0, 0.0, -100.0)])[0].chance, -5);
    }

    #[test]
    fn test_forecast_preserves_order_and_source_values() {
        let input = [day(1.0, 60.0, 20.0), day(80.0, 90.0, 24.0)];
        let scored = score_forecast(&input);

        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].rainfall, 1.0);
        assert_eq!(scored[1].rainfall, 80.0);
        assert_eq!(scored[1].humidity, 90.0);
        assert_eq!(scored[1].temperature, 24.0);
        assert_eq!(score_forecast(&input), scored);
    }

    #[test]
    fn test_forecast_date_label() {
        let scored = score_forecast(&[day(0.0, 0.0, 0.0)]);
        assert_eq!(scored[0].date_label, "Friday, 16 Oct");
    }

    #[test]
    fn test_forecast_empty() {
        assert!(score_forecast(&[]).is_empty());
    }
}

use crate::cities::CityMarker;
use crate::constants::HELP_HISTORY_SHOWN;
use crate::help::{HelpSession, HelpState, FAQ_CATALOG};
use crate::risk::{ForecastRiskAssessment, RiskAssessment};
use crate::weather::WeatherReading;

/// Formats the risk headline and current weather cards
pub fn format_assessment(city: &str, reading: &WeatherReading, assessment: &RiskAssessment) -> String {
    format!(
        "Flood Risk for {}\n\
         Flood Risk Level: {}\n\
         Risk Score: {:.1}\n\
         {}\n\n\
         Current Weather Details:\n  \
         Temperature: {}\u{00b0}C\n  \
         Max Temp: {}\u{00b0}C\n  \
         Humidity: {}%\n  \
         Wind Speed: {} m/s\n  \
         Rainfall: {} mm\n",
        city,
        assessment.level,
        assessment.score,
        assessment.alert,
        reading.temperature,
        reading.max_temp,
        reading.humidity,
        reading.wind_speed,
        reading.rainfall
    )
}

/// Formats the per-day forecast list; days listed in `expand` get a detail line
pub fn format_forecast(days: &[ForecastRiskAssessment], expand: &[usize]) -> String {
    if days.is_empty() {
        return "⚠️ Flood forecast data not available.\n".to_string();
    }

    let mut output = format!("{}-Day Flood Prediction Forecast:\n\n", days.len());
    for (i, day) in days.iter().enumerate() {
        output.push_str(&format!(
            "{} - {} {} ({}% chance)\n",
            day.date_label,
            day.level.emoji(),
            day.level,
            day.chance
        ));
        if expand.contains(&i) {
            output.push_str(&format!(
                "  Temp: {}\u{00b0}C | Humidity: {}% | Rain: {} mm\n",
                day.temperature, day.humidity, day.rainfall
            ));
        }
    }
    output
}

/// Formats map markers as one line per city
pub fn format_markers(markers: &[CityMarker]) -> String {
    if markers.is_empty() {
        return "No cities available for the map.".to_string();
    }

    let mut output = String::from("Map Cities (id: city @ lat, lng):\n\n");
    for m in markers {
        output.push_str(&format!("{}: {} @ {:.4}, {:.4}\n", m.id, m.city, m.lat, m.lng));
    }
    output
}

/// Formats the help assistant view for a session
pub fn format_help(session: &HelpSession) -> String {
    let mut output = String::new();

    match &session.state {
        HelpState::NoCategory => {
            output.push_str("Select a Category:\n");
            for category in FAQ_CATALOG {
                output.push_str(&format!("  - {}\n", category.name));
            }
        }
        HelpState::Category(name) => {
            output.push_str(&format!("Category: {}\nSelect a Question:\n", name));
            if let Some(category) = crate::help::find_category(name) {
                for faq in category.entries {
                    output.push_str(&format!("  - {}\n", faq.question));
                }
            }
        }
        HelpState::Question { question, .. } => {
            output.push_str(&format!("Question: {}\n", question));
        }
    }

    if let Some(answer) = session.answer() {
        output.push_str(&format!("\nAnswer:\n{}\n", answer));
    }

    if !session.history.is_empty() {
        output.push_str("\nYour Selection History:\n");
        let skip = session.history.len().saturating_sub(HELP_HISTORY_SHOWN);
        for entry in &session.history[skip..] {
            output.push_str(&format!("  - {}\n", entry));
        }
    }
    output
}

/// Static flood safety guidance
pub fn format_safety_tips() -> String {
    String::from(
        "Flood Safety & Precaution Tips\n\n\
         Before a Flood:\n  \
         - Prepare emergency kit with essentials.\n  \
         - Keep important documents in waterproof bags.\n  \
         - Stay informed about local weather alerts.\n\n\
         During a Flood:\n  \
         - Move to higher ground immediately.\n  \
         - Avoid walking or driving through flood waters.\n  \
         - Keep listening to official updates.\n\n\
         After a Flood:\n  \
         - Don't return home until authorities say it's safe.\n  \
         - Avoid contact with flood water; it may be contaminated.\n  \
         - Clean and disinfect everything that got wet.\n",
    )
}

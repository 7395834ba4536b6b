use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub main: MainData,
    pub wind: WindData,
    #[serde(default)]
    pub rain: Option<RainData>,
}

#[derive(Debug, Deserialize)]
pub struct MainData {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct WindData {
    pub speed: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RainData {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h")]
    pub three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    /// "YYYY-MM-DD HH:MM:SS"
    pub dt_txt: String,
    pub main: MainData,
    #[serde(default)]
    pub rain: Option<RainData>,
}

// ============================================================================
// Twilio API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TwilioErrorResponse {
    pub message: Option<String>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AssessCityRequest {
    /// Free-text city name, e.g. "Mumbai"
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct FloodForecastRequest {
    pub city: String,
    /// Number of sampled days, defaults to 10
    #[serde(default)]
    pub days: Option<usize>,
    /// Zero-based day indices whose weather details should be expanded
    #[serde(default)]
    pub expand: Vec<usize>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AssessMapCityRequest {
    /// Marker id as returned by `list_map_cities`
    pub city_id: u32,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct HelpAssistantRequest {
    pub session_id: String,
    #[serde(default)]
    pub action: HelpAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HelpAction {
    #[default]
    Show,
    SelectCategory { category: String },
    SelectQuestion { question: String },
    Reset,
}

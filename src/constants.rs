/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-flood-risk-server/0.1.0";

/// OpenWeatherMap API base URL
pub const OPENWEATHER_API_BASE: &str = "http://api.openweathermap.org/data/2.5";

/// Twilio REST API base URL
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Public IP echo endpoint used for the visit log
pub const IP_LOOKUP_URL: &str = "https://api.ipify.org";

/// Fixed offset added to the current temperature for the "max temp" card
pub const MAX_TEMP_OFFSET: f64 = 3.3;

/// Raw forecast entries per sampled day (provider emits 3-hour steps)
pub const FORECAST_SAMPLE_STRIDE: usize = 8;

/// Default number of forecast days requested
pub const DEFAULT_FORECAST_DAYS: usize = 10;

/// Fixed bias added to the rounded forecast score to form the chance percentage
pub const CHANCE_BIAS: i64 = 5;

/// Upper clamp for the chance percentage
pub const CHANCE_MAX: i64 = 100;

/// Number of help-assistant history entries shown back to the user
pub const HELP_HISTORY_SHOWN: usize = 10;

/// User-facing message for any failed weather lookup
pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found or weather API error.";

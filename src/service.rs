use anyhow::Result;
use parking_lot::Mutex;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::cities::CityDirectory;
use crate::config::Config;
use crate::constants::{CITY_NOT_FOUND_MESSAGE, DEFAULT_FORECAST_DAYS};
use crate::formatters::{format_assessment, format_forecast, format_help, format_markers, format_safety_tips};
use crate::help::HelpSession;
use crate::models::{
    AssessCityRequest, AssessMapCityRequest, FloodForecastRequest, HelpAction, HelpAssistantRequest,
};
use crate::notify::{Notifier, TwilioNotifier};
use crate::overrides::OverrideTable;
use crate::risk::{score_current, score_forecast, ForecastRiskAssessment, RiskAssessment};
use crate::visit_log::VisitLog;
use crate::weather::{WeatherClient, WeatherReading};

/// Result of sending the override notification
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationOutcome {
    Sent,
    Failed(String),
}

impl NotificationOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Sent => "SMS sent successfully ✅".to_string(),
            Self::Failed(e) => format!("SMS failed ❌: {}", e),
        }
    }
}

/// What a city lookup produced
#[derive(Debug, Clone, PartialEq)]
pub enum CityAssessment {
    /// Fixed data from the override table
    Override {
        reading: WeatherReading,
        assessment: RiskAssessment,
        notification: NotificationOutcome,
    },
    Live {
        reading: WeatherReading,
        assessment: RiskAssessment,
    },
    NotFound,
}

/// Flood risk service that handles MCP requests
#[derive(Clone)]
pub struct FloodRisk {
    weather: WeatherClient,
    notifier: Arc<dyn Notifier>,
    overrides: Arc<OverrideTable>,
    visit_log: Option<VisitLog>,
    cities: Arc<CityDirectory>,
    help_sessions: Arc<Mutex<HashMap<String, HelpSession>>>,
    tool_router: ToolRouter<Self>,
}

impl FloodRisk {
    /// Wires up the live collaborators from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let weather = WeatherClient::with_base_url(
            config.weather_api_key.clone(),
            config.weather_base_url.clone(),
            config.http_timeout,
        )?;
        let notifier = TwilioNotifier::new(config.twilio.clone(), config.http_timeout)?;
        let visit_log = VisitLog::new(
            config.ip_lookup_url.clone(),
            config.visit_log_path.clone(),
            config.http_timeout,
        )?;
        let overrides = if config.demo_overrides {
            OverrideTable::demo()
        } else {
            OverrideTable::disabled()
        };
        if !overrides.is_empty() {
            tracing::info!("Demo city overrides enabled");
        }
        let cities = match CityDirectory::load(&config.cities_csv_path, &config.map_country) {
            Ok(cities) => cities,
            Err(e) => {
                tracing::warn!(
                    "Map disabled, could not load {}: {}",
                    config.cities_csv_path.display(),
                    e
                );
                CityDirectory::default()
            }
        };
        if cities.is_empty() {
            tracing::warn!("No map cities for country {:?}", config.map_country);
        }

        Ok(Self::from_parts(
            weather,
            Arc::new(notifier),
            overrides,
            Some(visit_log),
            cities,
        ))
    }

    pub fn from_parts(
        weather: WeatherClient,
        notifier: Arc<dyn Notifier>,
        overrides: OverrideTable,
        visit_log: Option<VisitLog>,
        cities: CityDirectory,
    ) -> Self {
        Self {
            weather,
            notifier,
            overrides: Arc::new(overrides),
            visit_log,
            cities: Arc::new(cities),
            help_sessions: Arc::new(Mutex::new(HashMap::new())),
            tool_router: Self::tool_router(),
        }
    }

    /// Override table first, then live weather and scoring
    pub async fn assess(&self, city: &str) -> CityAssessment {
        if let Some(entry) = self.overrides.lookup(city) {
            tracing::info!("Override matched for {:?}", city);
            let notification = match self.notifier.send(&entry.notification).await {
                Ok(()) => NotificationOutcome::Sent,
                Err(e) => {
                    tracing::warn!("Override notification failed: {}", e);
                    NotificationOutcome::Failed(e.to_string())
                }
            };
            return CityAssessment::Override {
                reading: entry.reading.clone(),
                assessment: entry.assessment.clone(),
                notification,
            };
        }

        self.assess_live(city).await
    }

    async fn assess_live(&self, city: &str) -> CityAssessment {
        match self.weather.get_current_weather(city).await {
            Ok(reading) => {
                let assessment = score_current(&reading);
                CityAssessment::Live { reading, assessment }
            }
            Err(e) => {
                tracing::info!("No weather for {:?}: {}", city, e);
                CityAssessment::NotFound
            }
        }
    }

    /// Scored forecast, or `None` when the provider has nothing for `city`
    pub async fn flood_forecast(&self, city: &str, days: usize) -> Option<Vec<ForecastRiskAssessment>> {
        match self.weather.get_forecast(city, days).await {
            Ok(days) => Some(score_forecast(&days)),
            Err(e) => {
                tracing::info!("No forecast for {:?}: {}", city, e);
                None
            }
        }
    }

    /// Forecast list for `city`, `days` defaulting to 10
    pub async fn forecast_report(&self, city: &str, days: Option<usize>, expand: &[usize]) -> String {
        let days = days.unwrap_or(DEFAULT_FORECAST_DAYS);
        match self.flood_forecast(city, days).await {
            Some(forecast) => format_forecast(&forecast, expand),
            None => CITY_NOT_FOUND_MESSAGE.to_string(),
        }
    }

    /// Live assessment for a map marker; `None` for an unknown id.
    /// Map clicks never consult the override table or write the visit log.
    pub async fn map_city_report(&self, city_id: u32) -> Option<String> {
        let Some(marker) = self.cities.resolve(city_id) else {
            tracing::debug!("No map city with id {}", city_id);
            return None;
        };
        tracing::info!("Assessing map city: {}", marker.city);

        let text = match self.assess_live(&marker.city).await {
            CityAssessment::Live { assessment, .. } => format!(
                "City: {}\nFlood Risk Level: {}\n{}\n",
                marker.city, assessment.level, assessment.alert
            ),
            _ => "Weather data not available for this city".to_string(),
        };
        Some(text)
    }

    /// Full text for the city page: headline, cards, and forecast section.
    /// An override report has no forecast section.
    pub async fn city_report(&self, city: &str) -> String {
        if let Some(log) = &self.visit_log {
            log.record(city).await;
        }

        match self.assess(city).await {
            CityAssessment::Override {
                reading,
                assessment,
                notification,
            } => format!(
                "{}\n{}",
                format_assessment(city, &reading, &assessment),
                notification.message()
            ),
            CityAssessment::Live { reading, assessment } => {
                let forecast = self
                    .flood_forecast(city, DEFAULT_FORECAST_DAYS)
                    .await
                    .unwrap_or_default();
                format!(
                    "{}\n{}",
                    format_assessment(city, &reading, &assessment),
                    format_forecast(&forecast, &[])
                )
            }
            CityAssessment::NotFound => CITY_NOT_FOUND_MESSAGE.to_string(),
        }
    }

    /// Applies one help action to the stored session and renders the result
    pub fn help(&self, session_id: &str, action: &HelpAction) -> String {
        let mut sessions = self.help_sessions.lock();
        let session = sessions.remove(session_id).unwrap_or_default().apply(action);
        let rendered = format_help(&session);
        sessions.insert(session_id.to_string(), session);
        rendered
    }
}

#[tool_handler]
impl ServerHandler for FloodRisk {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-flood-risk".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Flood risk assessment for Indian cities powered by OpenWeatherMap. \
                Scores current conditions and the multi-day forecast, and offers an offline help assistant."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl FloodRisk {
    /// Assesses flood risk for a city from its current weather
    #[tool(description = "Get the flood risk level, alert, current weather and multi-day flood forecast for a city (e.g. 'Mumbai', 'Patna').")]
    async fn assess_city(
        &self,
        Parameters(request): Parameters<AssessCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Assessing city: {}", request.city);

        let report = self.city_report(&request.city).await;

        Ok(CallToolResult::success(vec![Content::text(report)]))
    }

    /// Scores each sampled forecast day
    #[tool(description = "Get the per-day flood risk forecast for a city. Optional 'days' (default 10) and 'expand', a list of zero-based day indices to show weather details for.")]
    async fn get_flood_forecast(
        &self,
        Parameters(request): Parameters<FloodForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting flood forecast for: {}", request.city);

        let text = self
            .forecast_report(&request.city, request.days, &request.expand)
            .await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Lists the map markers
    #[tool(description = "List the cities available on the map, each with the id to pass to assess_map_city.")]
    async fn list_map_cities(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("Listing {} map cities", self.cities.markers().len());

        Ok(CallToolResult::success(vec![Content::text(format_markers(
            self.cities.markers(),
        ))]))
    }

    /// Assesses the city behind a clicked map marker
    #[tool(description = "Get the flood risk for a map city by its id from list_map_cities.")]
    async fn assess_map_city(
        &self,
        Parameters(request): Parameters<AssessMapCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.map_city_report(request.city_id).await {
            Some(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            None => Ok(CallToolResult::success(vec![])),
        }
    }

    /// Steps the help assistant for a session
    #[tool(description = "Offline flood help assistant. Pass a session_id and an action: {\"type\":\"show\"}, {\"type\":\"select_category\",\"category\":...}, {\"type\":\"select_question\",\"question\":...} or {\"type\":\"reset\"}.")]
    async fn help_assistant(
        &self,
        Parameters(request): Parameters<HelpAssistantRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Help assistant {:?} for session {}", request.action, request.session_id);

        let text = self.help(&request.session_id, &request.action);

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Returns static flood safety guidance
    #[tool(description = "Get flood safety and precaution tips for before, during and after a flood.")]
    async fn safety_tips(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(format_safety_tips())]))
    }
}

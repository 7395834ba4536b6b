//! Flood risk MCP server: OpenWeatherMap ingestion, heuristic flood risk
//! scoring, map city lookup and an offline help assistant.

pub mod cities;
pub mod config;
pub mod constants;
pub mod formatters;
pub mod help;
pub mod models;
pub mod notify;
pub mod overrides;
pub mod risk;
pub mod service;
pub mod visit_log;
pub mod weather;

pub use config::Config;
pub use service::FloodRisk;

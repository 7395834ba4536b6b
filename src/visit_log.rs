//! Append-only visit log: one `ip,date,time,city` row per city query.
//! Nothing here ever surfaces an error to the caller.

use chrono::{DateTime, Local};
use reqwest::Client;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::constants::USER_AGENT;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitRecord {
    pub ip: String,
    pub date: String,
    pub time: String,
    pub city: String,
}

impl VisitRecord {
    pub fn new(ip: String, at: DateTime<Local>, city: &str) -> Self {
        Self {
            ip,
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H:%M:%S").to_string(),
            city: city.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisitLog {
    client: Arc<Client>,
    ip_lookup_url: String,
    path: PathBuf,
}

impl VisitLog {
    pub fn new(ip_lookup_url: String, path: PathBuf, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            ip_lookup_url,
            path,
        })
    }

    /// Look up the public IP and append a row for `city`.
    pub async fn record(&self, city: &str) {
        if let Err(e) = self.try_record(city).await {
            tracing::debug!("Visit log skipped: {}", e);
        }
    }

    async fn try_record(&self, city: &str) -> anyhow::Result<()> {
        let ip = self
            .client
            .get(&self.ip_lookup_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let record = VisitRecord::new(ip.trim().to_string(), Local::now(), city);
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || append_record(&path, &record)).await?
    }
}

/// Append one headerless CSV row to `path`, creating the file if needed.
pub fn append_record(path: &Path, record: &VisitRecord) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

use crate::config::Settings;
use crate::domain::snapshot::Snapshot;
use crate::ingest::error::FetchError;
use crate::ingest::SnapshotSource;
use anyhow::Context;
use std::time::Duration;

const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSnapshotSource {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(settings.base_url(), settings.timeout())
    }

    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build dashboard http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, DASHBOARD_PATH)
    }
}

#[async_trait::async_trait]
impl SnapshotSource for HttpSnapshotSource {
    fn source_name(&self) -> &'static str {
        "http_dashboard"
    }

    async fn fetch_snapshot(&self, force: bool) -> Result<Snapshot, FetchError> {
        let mut req = self.http.get(self.url());
        if force {
            req = req.query(&[("refresh", "true")]);
        }

        let res = req
            .send()
            .await
            .map_err(|e| FetchError::new("request", e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| FetchError::new("body", e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::new("http", format!("status={status} body={text}")));
        }

        serde_json::from_str::<Snapshot>(&text)
            .map_err(|e| FetchError::new("decode", format!("{e}: {text}")))
    }
}

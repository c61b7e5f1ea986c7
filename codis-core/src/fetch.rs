use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::error::FetchError;
use crate::payload::{QueryKind, QueryPayload};
use crate::station::StationType;
use crate::token::{ConfigToken, SessionTokenProvider};
use crate::transport::{ApiTransport, HttpTransport};
use crate::window::{self, DateWindow};

/// Outcome of one fetch attempt, the sole contract handed to callers.
///
/// Expected failure modes never cross this boundary as errors; they land in
/// `reason`, which callers surface verbatim. On success `path` names the file
/// that now exists on disk.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub success: bool,
    pub reason: String,
    pub path: Option<PathBuf>,
}

impl DownloadResult {
    fn succeeded(path: PathBuf) -> Self {
        Self {
            success: true,
            reason: "download succeeded".to_string(),
            path: Some(path),
        }
    }

    fn failed(err: FetchError) -> Self {
        Self {
            success: false,
            reason: err.to_string(),
            path: None,
        }
    }
}

/// Downloads station observations and persists them as JSON files.
///
/// Both collaborators are injected: the token provider owns credential
/// mechanics, the transport owns the wire. The fetcher itself is stateless
/// across calls; every attempt builds a fresh payload, asks for a token once,
/// makes a single POST and either writes one file or reports why not. No
/// retries at any stage.
#[derive(Debug)]
pub struct Fetcher {
    tokens: Box<dyn SessionTokenProvider>,
    transport: Box<dyn ApiTransport>,
}

impl Fetcher {
    pub fn new(tokens: Box<dyn SessionTokenProvider>, transport: Box<dyn ApiTransport>) -> Self {
        Self { tokens, transport }
    }

    /// Production wiring: cookie from the on-disk config, real HTTP client.
    pub fn from_config() -> anyhow::Result<Self> {
        Ok(Self::new(
            Box::new(ConfigToken::from_disk()?),
            Box::new(HttpTransport::new()?),
        ))
    }

    /// Download one calendar month of observations for a station.
    ///
    /// `date` is `YYYY-MM-DD`; the day component must be present but is
    /// ignored. The output lands at `{YYYY}{MM}_{station}.json` under
    /// `output_dir` — a pure function of the inputs, so a repeated call
    /// overwrites the same file.
    pub fn fetch_monthly(&self, station_id: &str, date: &str, output_dir: &Path) -> DownloadResult {
        let attempt = || -> Result<PathBuf, FetchError> {
            let (year, month) = window::parse_year_month(date)?;
            let win = DateWindow::month(year, month)?;
            let payload = QueryPayload::new(
                station_id,
                StationType::classify(station_id),
                win,
                QueryKind::ReportMonth,
            );
            let path = output_dir.join(format!("{year:04}{month:02}_{station_id}.json"));
            self.run(&payload, path)
        };

        match attempt() {
            Ok(path) => DownloadResult::succeeded(path),
            Err(err) => DownloadResult::failed(err),
        }
    }

    /// Download one calendar year of observations for a station.
    ///
    /// Output file is `{YYYY}_{station}.json` under `output_dir`.
    pub fn fetch_yearly(&self, station_id: &str, year: &str, output_dir: &Path) -> DownloadResult {
        let attempt = || -> Result<PathBuf, FetchError> {
            let year = window::parse_year(year)?;
            let win = DateWindow::year(year)?;
            let payload = QueryPayload::new(
                station_id,
                StationType::classify(station_id),
                win,
                QueryKind::ReportYear,
            );
            let path = output_dir.join(format!("{year}_{station_id}.json"));
            self.run(&payload, path)
        };

        match attempt() {
            Ok(path) => DownloadResult::succeeded(path),
            Err(err) => DownloadResult::failed(err),
        }
    }

    /// The pipeline: token, POST, status check, parse, shape check, persist.
    /// Single attempt; the first failing stage short-circuits.
    fn run(&self, payload: &QueryPayload, output_path: PathBuf) -> Result<PathBuf, FetchError> {
        let token = self
            .tokens
            .valid_token()
            .map_err(|e| FetchError::TokenAcquisition(format!("{e:#}")))?;

        let reply = self.transport.post(payload, &token)?;

        if !reply.is_success() {
            return Err(FetchError::Http(format!(
                "status {}: {}",
                reply.status,
                truncate_body(&reply.body)
            )));
        }

        let parsed: Value =
            serde_json::from_str(&reply.body).map_err(|_| FetchError::MalformedResponse)?;

        let records = extract_observations(&parsed)?;
        if records.is_empty() {
            return Err(FetchError::EmptyContent);
        }
        debug!("extracted {} observation records", records.len());

        // Serialize fully before touching the file so a failure never leaves
        // a partial write behind.
        let content = serde_json::to_string_pretty(records).map_err(io::Error::other)?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, content)?;

        info!(
            "wrote {} records for station {} to {}",
            records.len(),
            payload.stn_id,
            output_path.display()
        );
        Ok(output_path)
    }
}

/// Pull the observation array out of a reply.
///
/// The service wraps records as `{"data": [{"dts": [...], ...}]}`; anything
/// else counts as an unexpected shape. An empty `dts` is left to the caller
/// to distinguish, since it means the request itself worked.
fn extract_observations(parsed: &Value) -> Result<&Vec<Value>, FetchError> {
    let first = parsed
        .as_object()
        .and_then(|obj| obj.get("data"))
        .and_then(Value::as_array)
        .and_then(|data| data.first())
        .ok_or(FetchError::UnexpectedShape)?;

    first
        .get("dts")
        .and_then(Value::as_array)
        .ok_or(FetchError::UnexpectedShape)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

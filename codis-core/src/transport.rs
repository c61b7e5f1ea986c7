use std::fmt::Debug;

use anyhow::{Context, Result};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::error::FetchError;
use crate::payload::QueryPayload;
use crate::token::SessionToken;

/// The single CODiS station-data endpoint.
pub const API_URL: &str = "https://codis.cwa.gov.tw/api/station";

/// What came back from one POST: status plus the raw body, undecoded.
///
/// Status interpretation and body parsing are the pipeline's job, so a test
/// double can fabricate replies without speaking HTTP.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One synchronous POST to the station endpoint, credential attached.
///
/// Implementations own connection handling; they report transport-level
/// failures (DNS, TLS, connect, read) as [`FetchError::Network`] and hand any
/// HTTP response back untouched, whatever its status.
pub trait ApiTransport: Debug {
    fn post(&self, payload: &QueryPayload, token: &SessionToken) -> Result<ApiReply, FetchError>;
}

/// Production transport over `reqwest::blocking`.
///
/// The browser-identity headers are fixed at client construction; only the
/// `Cookie` header varies, overlaid per request so no header state is shared
/// mutably across calls.
#[derive(Debug)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .default_headers(base_headers())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http })
    }
}

impl ApiTransport for HttpTransport {
    fn post(&self, payload: &QueryPayload, token: &SessionToken) -> Result<ApiReply, FetchError> {
        debug!(
            "POST {API_URL} type={} stn_ID={} window={}..{}",
            payload.kind, payload.stn_id, payload.start, payload.end
        );

        let response = self
            .http
            .post(API_URL)
            .header(header::COOKIE, token.as_str())
            .form(payload)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(ApiReply { status, body })
    }
}

/// The header set the service expects from a browser session. The values are
/// not semantically meaningful but requests without them are rejected.
fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-TW,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
    );
    headers.insert(
        header::ORIGIN,
        HeaderValue::from_static("https://codis.cwa.gov.tw"),
    );
    headers.insert(
        header::REFERER,
        HeaderValue::from_static("https://codis.cwa.gov.tw/StationData"),
    );
    headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("empty"));
    headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("cors"));
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("same-origin"));
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        "X-Requested-With",
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static("\"Not;A=Brand\";v=\"99\", \"Google Chrome\";v=\"139\", \"Chromium\";v=\"139\""),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers
}

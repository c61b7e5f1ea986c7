use serde::Serialize;

use crate::station::StationType;
use crate::window::DateWindow;

/// Which report shape the API should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    ReportMonth,
    ReportYear,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::ReportMonth => "report_month",
            QueryKind::ReportYear => "report_year",
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form-encoded body of one station query, built fresh per call.
///
/// Field names match the wire format exactly (`type` and `stn_ID` via serde
/// renames). `more` and `item` are always empty but the service requires
/// their presence.
#[derive(Debug, Clone, Serialize)]
pub struct QueryPayload {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "stn_ID")]
    pub stn_id: String,
    pub stn_type: String,
    pub more: String,
    pub start: String,
    pub end: String,
    pub item: String,
}

impl QueryPayload {
    pub fn new(station_id: &str, stn_type: StationType, window: DateWindow, kind: QueryKind) -> Self {
        Self {
            date: window.request_date(),
            kind: kind.as_str().to_string(),
            stn_id: station_id.to_string(),
            stn_type: stn_type.as_str().to_string(),
            more: String::new(),
            start: window.start_str(),
            end: window.end_str(),
            item: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QueryPayload {
        let window = DateWindow::month(2024, 3).unwrap();
        QueryPayload::new("466920", StationType::Cwb, window, QueryKind::ReportMonth)
    }

    #[test]
    fn payload_carries_the_window_and_station() {
        let p = sample();
        assert_eq!(p.date, "2024-03-01T00:00:00.000+08:00");
        assert_eq!(p.kind, "report_month");
        assert_eq!(p.stn_id, "466920");
        assert_eq!(p.stn_type, "cwb");
        assert_eq!(p.start, "2024-03-01T00:00:00");
        assert_eq!(p.end, "2024-03-31T00:00:00");
        assert!(p.more.is_empty() && p.item.is_empty());
    }

    #[test]
    fn wire_names_use_api_spelling() {
        let encoded = serde_urlencoded_like(&sample());
        assert!(encoded.contains("type=report_month"));
        assert!(encoded.contains("stn_ID=466920"));
        assert!(encoded.contains("stn_type=cwb"));
    }

    // Enough of a form encoding to check the serde renames without pulling
    // serde_urlencoded in as a dev-dependency; reqwest does the real one.
    fn serde_urlencoded_like(p: &QueryPayload) -> String {
        let value = serde_json::to_value(p).unwrap();
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| format!("{k}={}", v.as_str().unwrap()))
            .collect::<Vec<_>>()
            .join("&")
    }
}

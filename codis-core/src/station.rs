use log::debug;

/// Station category as understood by the CODiS query API.
///
/// The upstream service routes a query differently depending on the kind of
/// station being asked about, and expects the category as the `stn_type` form
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationType {
    /// Conventional (manned) CWA station, ids starting with `46`.
    Cwb,
    /// Automatic station, `C0` id series.
    AutoC0,
    /// Automatic station, `C1` id series.
    AutoC1,
    /// Agricultural station; also the catch-all for unrecognized prefixes.
    Agr,
}

impl StationType {
    /// Classify a station id by its prefix. First match wins.
    ///
    /// Total: ids with an unknown prefix fall back to [`StationType::Agr`],
    /// which is what the upstream API expects for agricultural stations. An
    /// unanticipated station series would land there too, so the fallback is
    /// logged rather than silent.
    pub fn classify(station_id: &str) -> Self {
        if station_id.starts_with("46") {
            StationType::Cwb
        } else if station_id.starts_with("C0") {
            StationType::AutoC0
        } else if station_id.starts_with("C1") {
            StationType::AutoC1
        } else {
            debug!("station id '{station_id}' has no known prefix, classified as agr");
            StationType::Agr
        }
    }

    /// The literal `stn_type` value sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            StationType::Cwb => "cwb",
            StationType::AutoC0 => "auto_C0",
            StationType::AutoC1 => "auto_C1",
            StationType::Agr => "agr",
        }
    }

    pub const fn all() -> &'static [StationType] {
        &[
            StationType::Cwb,
            StationType::AutoC0,
            StationType::AutoC1,
            StationType::Agr,
        ]
    }
}

impl std::fmt::Display for StationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_stations_share_the_46_prefix() {
        for id in ["466920", "467490", "46A123"] {
            assert_eq!(StationType::classify(id), StationType::Cwb);
        }
    }

    #[test]
    fn automatic_series_are_distinguished() {
        assert_eq!(StationType::classify("C0A520"), StationType::AutoC0);
        assert_eq!(StationType::classify("C1F941"), StationType::AutoC1);
    }

    #[test]
    fn unknown_prefix_falls_back_to_agr() {
        for id in ["72C440", "A0K420", ""] {
            assert_eq!(StationType::classify(id), StationType::Agr);
        }
    }

    #[test]
    fn classify_is_stable_per_prefix() {
        // Same prefix, arbitrary suffixes: always the same category.
        let base = StationType::classify("C0X000");
        for suffix in ["C0X001", "C0Z999", "C00000"] {
            assert_eq!(StationType::classify(suffix), base);
        }
    }

    #[test]
    fn as_str_matches_api_vocabulary() {
        let values: Vec<&str> = StationType::all().iter().map(|t| t.as_str()).collect();
        assert_eq!(values, ["cwb", "auto_C0", "auto_C1", "agr"]);
    }
}

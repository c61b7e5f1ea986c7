use thiserror::Error;

/// Everything that can go wrong during one fetch attempt.
///
/// Every variant describes an expected, non-fatal condition. The fetch
/// pipeline converts these into [`crate::fetch::DownloadResult`] reasons at
/// its boundary; nothing here is retried internally, and callers are expected
/// to surface the message verbatim. The `Display` strings therefore *are* the
/// reason vocabulary.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Malformed input date or year, rejected before any network activity.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The credential provider could not supply a usable session token.
    #[error("token acquisition failed: {0}")]
    TokenAcquisition(String),

    /// The request never produced an HTTP response (DNS, TLS, connect, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("http error: {0}")]
    Http(String),

    /// Body was not parseable JSON. CODiS rejects a stale session cookie by
    /// answering with an HTML error page, so this usually means the
    /// credential needs refreshing.
    #[error("malformed response, possibly invalid/expired credential")]
    MalformedResponse,

    /// Parsed fine but the `data[0].dts` structure was not there.
    #[error("unexpected response shape")]
    UnexpectedShape,

    /// Well-formed response with zero observation records for the window.
    #[error("empty content")]
    EmptyContent,

    /// Directory creation or file write failed; environment trouble rather
    /// than a data condition.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_are_distinguishable() {
        let errors = [
            FetchError::InvalidDate("x".into()),
            FetchError::TokenAcquisition("x".into()),
            FetchError::Network("x".into()),
            FetchError::Http("x".into()),
            FetchError::MalformedResponse,
            FetchError::UnexpectedShape,
            FetchError::EmptyContent,
        ];

        let mut seen = std::collections::HashSet::new();
        for e in &errors {
            assert!(seen.insert(e.to_string()), "duplicate reason: {e}");
        }
    }

    #[test]
    fn token_failure_reason_carries_detail() {
        let e = FetchError::TokenAcquisition("no cookie configured".into());
        assert_eq!(e.to_string(), "token acquisition failed: no cookie configured");
    }
}

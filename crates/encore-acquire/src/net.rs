//! Transport seam for acquisition fetches.
//!
//! The pipeline never talks to an HTTP client directly; it goes through
//! [`RemoteTransport`] so tests can substitute scripted responses and
//! errors. The production implementation is [`ReqwestTransport`] behind
//! the `reqwest` feature.

use std::future::Future;

use bytes::Bytes;
use chrono::{DateTime, FixedOffset};

/// A fully-buffered response body plus the provenance metadata the
/// pipeline cares about.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    pub bytes: Bytes,
    /// Parsed `Last-Modified` response header, when present and valid
    /// RFC 2822. Used as the persisted artifact's modification time.
    pub last_modified: Option<DateTime<FixedOffset>>,
}

/// Asynchronous remote fetch abstraction.
///
/// Implementations own their timeout policy; a timed-out or non-2xx
/// response is an error, not a body. No retries at this layer.
pub trait RemoteTransport: Send + Sync {
    type Error: std::error::Error + Send + 'static;

    /// Fetch a URL to completion, including the supplied request headers.
    fn fetch(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<FetchedBody, Self::Error>> + Send;
}

/// Parse a `Last-Modified` header value. RFC 2822 per the servers'
/// behavior; anything else is treated as absent rather than an error.
pub fn parse_last_modified(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(value).ok()
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use std::time::Duration;

    /// Production transport using `reqwest` with a bounded per-request
    /// timeout. Timeouts surface as transport errors like any other
    /// network failure.
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            Ok(Self { client })
        }
    }

    impl RemoteTransport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn fetch(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> Result<FetchedBody, Self::Error> {
            let mut request = self.client.get(url);
            for (key, value) in headers {
                request = request.header(key, value);
            }

            let response = request.send().await?.error_for_status()?;

            let last_modified = response
                .headers()
                .get(reqwest::header::LAST_MODIFIED)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_last_modified);

            let bytes = response.bytes().await?;
            Ok(FetchedBody {
                bytes,
                last_modified,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestTransport;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_last_modified_rfc2822() {
        let parsed = parse_last_modified("Tue, 12 Aug 2025 04:30:00 GMT").unwrap();
        assert_eq!(parsed.timestamp(), 1754973000);
    }

    #[test]
    fn test_parse_last_modified_garbage_is_absent() {
        assert!(parse_last_modified("five minutes ago").is_none());
        assert!(parse_last_modified("").is_none());
    }
}

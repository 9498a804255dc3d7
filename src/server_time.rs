//! CloudFormation API server time
//!
//! Reads the `Date` header of a plain GET against the API endpoint. Useful
//! for comparing stack event timestamps against the API's clock instead of
//! the local one.
//!
//! Failures are reported immediately; wrap the call with
//! [`with_retry`](crate::retry::with_retry) if retrying is wanted.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime};
use reqwest::header::DATE;

use crate::config::ServerTimeConfig;
use crate::error::{CfnSphereError, Result};

/// Anything that can produce the raw `Date` header of the remote endpoint
#[cfg_attr(test, mockall::automock)]
pub trait DateHeaderSource {
    /// Fetch the header value; `Ok(None)` if the response carried none
    fn fetch_date_header(&self) -> Result<Option<String>>;
}

/// Blocking HTTP implementation of [`DateHeaderSource`]
pub struct HttpDateHeaderSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpDateHeaderSource {
    pub fn new(config: &ServerTimeConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DateHeaderSource for HttpDateHeaderSource {
    fn fetch_date_header(&self) -> Result<Option<String>> {
        tracing::debug!("Fetching server time from {}", self.endpoint);

        // Any status will do, only the header matters
        let response = self.client.get(&self.endpoint).send()?;

        match response.headers().get(DATE) {
            Some(value) => value.to_str().map(|v| Some(v.to_string())).map_err(|e| {
                CfnSphereError::TimestampUnavailable(format!("unreadable Date header: {}", e))
            }),
            None => Ok(None),
        }
    }
}

/// Current time of the default CloudFormation endpoint, as naive UTC
pub fn get_remote_time() -> Result<NaiveDateTime> {
    let source = HttpDateHeaderSource::new(&ServerTimeConfig::default())?;
    remote_time_from(&source)
}

/// Current time reported by `source`, as naive UTC
pub fn remote_time_from<S>(source: &S) -> Result<NaiveDateTime>
where
    S: DateHeaderSource + ?Sized,
{
    let header = source.fetch_date_header()?.unwrap_or_default();
    if header.trim().is_empty() {
        return Err(CfnSphereError::TimestampUnavailable(
            "response carried no Date header".to_string(),
        ));
    }

    parse_http_date(&header)
}

/// Parse an HTTP date (`Mon, 21 Sep 2015 17:17:26 GMT`) into naive UTC
pub fn parse_http_date(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .map(|timestamp| timestamp.naive_utc())
        .map_err(|source| CfnSphereError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

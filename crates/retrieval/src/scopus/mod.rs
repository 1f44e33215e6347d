//! Scopus-backed document source
//!
//! Talks to the Elsevier content APIs: abstract retrieval by EID and author
//! publication listing via the Scopus search endpoint. Quota information is
//! read off the rate-limit response headers on every call.

mod parse;

use crate::source::DocumentSource;
use async_trait::async_trait;
use chrono::DateTime;
use citenetx_common::config::ScopusConfig;
use citenetx_common::model::{AuthorRecord, DocumentRecord, QuotaSnapshot};
use citenetx_common::{Eid, Error, Result};
use reqwest::header::{HeaderMap, ACCEPT};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the Scopus content APIs
pub struct ScopusClient {
    client: reqwest::Client,
    config: ScopusConfig,
}

impl ScopusClient {
    pub fn new(config: ScopusConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Issue a GET, map non-success statuses to typed errors, and capture
    /// the quota headers regardless of parse outcome.
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        id: &str,
    ) -> Result<(Value, QuotaSnapshot)> {
        let mut request = self.client.get(url).query(query).header(ACCEPT, "application/json");
        if let Some(api_key) = &self.config.api_key {
            request = request.header("X-ELS-APIKey", api_key);
        }

        let response = request.send().await?;
        let quota = quota_from_headers(response.headers());
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => Error::Unauthorized { message },
                404 => Error::RecordNotFound { id: id.to_string() },
                429 => Error::RateLimited { message },
                code => Error::Upstream { status: code, message },
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| Error::MalformedResponse { message: e.to_string() })?;
        Ok((body, quota))
    }
}

#[async_trait]
impl DocumentSource for ScopusClient {
    async fn fetch_document(&self, eid: &Eid) -> Result<DocumentRecord> {
        let url = format!("{}/content/abstract/eid/{}", self.config.base_url, eid);
        debug!(eid = %eid, "fetching abstract");

        let (body, quota) = self.get_json(&url, &[("view", "FULL")], eid.as_str()).await?;
        parse::document_record(&body, quota)
    }

    async fn fetch_author(&self, auid: &str) -> Result<AuthorRecord> {
        let url = format!("{}/content/search/scopus", self.config.base_url);
        let query = format!("AU-ID({auid})");
        debug!(auid, "fetching author publications");

        let mut document_eids = Vec::new();
        let mut start = 0usize;
        loop {
            let count = self.config.page_size.to_string();
            let start_param = start.to_string();
            let (body, _quota) = self
                .get_json(
                    &url,
                    &[
                        ("query", query.as_str()),
                        ("field", "eid"),
                        ("count", count.as_str()),
                        ("start", start_param.as_str()),
                    ],
                    auid,
                )
                .await?;

            let (page, total) = parse::author_documents(&body)?;
            if page.is_empty() {
                break;
            }
            start += page.len();
            document_eids.extend(page);
            if start >= total as usize {
                break;
            }
        }

        Ok(AuthorRecord { auid: auid.to_string(), document_eids })
    }
}

/// Read the remaining-call budget and reset time off the response headers.
/// Missing or unparsable headers yield unknown fields, never errors.
fn quota_from_headers(headers: &HeaderMap) -> QuotaSnapshot {
    let remaining = headers
        .get("X-RateLimit-Remaining")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok());

    let reset_at = headers
        .get("X-RateLimit-Reset")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    QuotaSnapshot { remaining, reset_at }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_quota_headers_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("8211"));
        headers.insert("X-RateLimit-Reset", HeaderValue::from_static("1722902400"));

        let quota = quota_from_headers(&headers);
        assert_eq!(quota.remaining, Some(8211));
        assert_eq!(quota.reset_at.unwrap().timestamp(), 1722902400);
    }

    #[test]
    fn test_quota_headers_absent() {
        let quota = quota_from_headers(&HeaderMap::new());
        assert_eq!(quota.remaining, None);
        assert_eq!(quota.reset_at, None);
    }

    #[test]
    fn test_quota_headers_garbage_is_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("soon"));

        let quota = quota_from_headers(&headers);
        assert_eq!(quota.remaining, None);
    }
}

use super::domain::JobRecord;
use super::store::ListingSink;
use crate::config::FeedConfig;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Error enumeration for listing feed failures.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("feed responded with status {status}")]
    Status { status: u16 },
    #[error("feed payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unable to read feed file: {0}")]
    Io(#[from] std::io::Error),
}

/// One decoded response from a feed.
#[derive(Debug, Clone, Default)]
pub struct FeedBatch {
    pub records: Vec<JobRecord>,
    pub total_count: Option<u64>,
    /// Entries discarded because they could not be read as a record.
    pub dropped: usize,
}

/// Source of the listing batch loaded at startup.
pub trait JobFeed {
    fn fetch(&self) -> impl Future<Output = Result<FeedBatch, FeedError>> + Send;
}

#[derive(Debug, Serialize)]
struct FeedRequest {
    limit: u32,
    offset: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedResponse {
    jd_list: Vec<serde_json::Value>,
    #[serde(default)]
    total_count: Option<u64>,
}

/// Decodes a feed response body. The envelope must be well formed; individual
/// entries that fail to decode are skipped and counted.
pub fn decode_batch(body: &[u8]) -> Result<FeedBatch, FeedError> {
    let response: FeedResponse = serde_json::from_slice(body)?;
    let mut batch = FeedBatch {
        records: Vec::with_capacity(response.jd_list.len()),
        total_count: response.total_count,
        dropped: 0,
    };

    for (index, entry) in response.jd_list.into_iter().enumerate() {
        match serde_json::from_value::<JobRecord>(entry) {
            Ok(record) => batch.records.push(record),
            Err(err) => {
                warn!(index, error = %err, "skipping malformed job record");
                batch.dropped += 1;
            }
        }
    }

    Ok(batch)
}

/// Posts `{"limit", "offset"}` to the configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpJobFeed {
    client: reqwest::Client,
    config: FeedConfig,
}

impl HttpJobFeed {
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: FeedConfig) -> Self {
        Self { client, config }
    }
}

impl JobFeed for HttpJobFeed {
    async fn fetch(&self) -> Result<FeedBatch, FeedError> {
        let request = FeedRequest {
            limit: self.config.limit,
            offset: self.config.offset,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        decode_batch(&body)
    }
}

/// Reads a saved feed response from disk.
#[derive(Debug, Clone)]
pub struct JsonFileJobFeed {
    path: PathBuf,
}

impl JsonFileJobFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl JobFeed for JsonFileJobFeed {
    async fn fetch(&self) -> Result<FeedBatch, FeedError> {
        let body = tokio::fs::read(&self.path).await?;
        decode_batch(&body)
    }
}

/// Runs one fetch. Failures are logged and reported as `None`.
pub async fn fetch_listing<F: JobFeed>(feed: &F) -> Option<FeedBatch> {
    match feed.fetch().await {
        Ok(batch) => {
            info!(
                records = batch.records.len(),
                dropped = batch.dropped,
                total = ?batch.total_count,
                "job listing fetched"
            );
            Some(batch)
        }
        Err(err) => {
            error!(error = %err, "failed to fetch job listings");
            None
        }
    }
}

/// Fetches once and, on success, performs exactly one load into `sink`. On
/// failure the sink keeps whatever it held. Returns whether a load happened.
pub async fn load_listing<F, S>(feed: &F, sink: &mut S) -> bool
where
    F: JobFeed,
    S: ListingSink,
{
    match fetch_listing(feed).await {
        Some(batch) => {
            sink.load(batch.records);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_skips_entries_without_identifier() {
        let body = br#"{
            "jdList": [
                { "jdUid": "a", "companyName": "Acme" },
                { "companyName": "No Id" },
                "not even an object",
                { "jdUid": "b" }
            ],
            "totalCount": 947
        }"#;

        let batch = decode_batch(body).expect("envelope decodes");
        let ids: Vec<&str> = batch.records.iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(batch.dropped, 2);
        assert_eq!(batch.total_count, Some(947));
    }

    #[test]
    fn decode_requires_the_listing_field() {
        let err = decode_batch(br#"{ "jobs": [] }"#).expect_err("envelope rejected");
        assert!(matches!(err, FeedError::Decode(_)));
    }
}

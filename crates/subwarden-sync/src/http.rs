//! HTTP client for the remote application table.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use subwarden_core::{ApplicationRecord, RecordId, StoredApplication, fields};
use tracing::{debug, info, warn};

use crate::{RecordStore, RemoteConfig, RemoteError};

/// Error bodies longer than this are cut before they reach [`RemoteError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for the remote record store's table endpoint.
pub struct RecordStoreClient {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    fields: &'a Map<String, Value>,
}

#[derive(Deserialize)]
struct CreateResponse {
    id: String,
}

#[derive(Deserialize)]
struct ListResponse {
    records: Vec<RemoteRow>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Deserialize)]
struct RemoteRow {
    id: String,
    #[serde(default)]
    fields: Map<String, Value>,
    #[serde(rename = "createdTime", default)]
    created_time: Option<DateTime<Utc>>,
}

impl RecordStoreClient {
    /// Build a client for the table described by `config`.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        if config.base_id.trim().is_empty() || config.token.trim().is_empty() {
            return Err(RemoteError::NotConfigured);
        }
        let mut endpoint = Url::parse(config.api_url.trim_end_matches('/'))
            .map_err(|e| RemoteError::InvalidConfig(format!("api url: {e}")))?;
        endpoint
            .path_segments_mut()
            .map_err(|()| RemoteError::InvalidConfig("api url cannot be a base".into()))?
            .pop_if_empty()
            .push(&config.base_id)
            .push(&config.table);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            token: config.token,
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn check(&self, resp: Response) -> Result<Vec<u8>, RemoteError> {
        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(text) => text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                Err(e) => {
                    debug!(status = status.as_u16(), error = %e, "could not read error body");
                    String::new()
                }
            };
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| RemoteError::from_reqwest(e, self.timeout))?;
        Ok(bytes.to_vec())
    }

    async fn fetch_page(&self, offset: Option<&str>) -> Result<ListResponse, RemoteError> {
        let mut request = self.client.get(self.endpoint.clone()).bearer_auth(&self.token);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| RemoteError::from_reqwest(e, self.timeout))?;
        let body = self.check(resp).await?;
        serde_json::from_slice(&body).map_err(|e| RemoteError::Malformed(e.to_string()))
    }
}

fn decode_row(row: RemoteRow) -> Result<StoredApplication, RemoteError> {
    let id = RecordId::remote(&row.id)
        .ok_or_else(|| RemoteError::Malformed(format!("unusable record id {:?}", row.id)))?;
    let record = fields::from_external(&row.fields, row.created_time)
        .map_err(|e| RemoteError::Malformed(format!("record {}: {e}", row.id)))?;
    let submitted_at = row.created_time.unwrap_or_else(|| record.created_at());
    Ok(StoredApplication::new(id, record, submitted_at))
}

#[async_trait]
impl RecordStore for RecordStoreClient {
    async fn create(&self, record: &ApplicationRecord) -> Result<RecordId, RemoteError> {
        let fields = fields::to_external(record);
        debug!(endpoint = %self.endpoint, ?fields, "creating remote record");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&CreateRequest { fields: &fields })
            .send()
            .await
            .map_err(|e| RemoteError::from_reqwest(e, self.timeout))?;
        let body = self.check(resp).await?;

        let created: CreateResponse =
            serde_json::from_slice(&body).map_err(|e| RemoteError::Malformed(e.to_string()))?;
        let id = RecordId::remote(&created.id).ok_or_else(|| {
            RemoteError::Malformed(format!("unusable record id {:?}", created.id))
        })?;
        info!(id = %id, "created remote record");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<StoredApplication>, RemoteError> {
        let mut out = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let page = self.fetch_page(offset.as_deref()).await?;
            debug!(rows = page.records.len(), "fetched remote page");
            for row in page.records {
                let id = row.id.clone();
                match decode_row(row) {
                    Ok(entry) => out.push(entry),
                    Err(e) => warn!(id = %id, error = %e, "skipping undecodable remote record"),
                }
            }
            match page.offset {
                Some(next) if offset.as_deref() == Some(next.as_str()) => {
                    return Err(RemoteError::Malformed(format!(
                        "pagination offset {next:?} repeated"
                    )));
                }
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        info!(count = out.len(), "listed remote records");
        Ok(out)
    }
}

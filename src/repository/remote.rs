//! Remote spreadsheet endpoint
//!
//! Reads are `GET <endpoint>?sheet=<name>&t=<epoch-ms>` returning a JSON array
//! of flat rows. Writes are `POST <endpoint>` with `{sheet, action, data}`;
//! the endpoint's reply carries nothing we rely on.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::{json, Value};

use super::{Collection, CollectionStore};
use crate::error::{AppError, AppResult};

/// Build the HTTP client shared by remote storage calls
pub fn build_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("medequip-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Action {
    Add,
    Update,
    Delete,
}

#[derive(Serialize)]
struct Mutation<'a> {
    sheet: &'a str,
    action: Action,
    data: &'a Value,
}

pub struct RemoteStore {
    client: Client,
    endpoint: Url,
}

impl RemoteStore {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    fn list_url(&self, collection: Collection) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("sheet", collection.as_str())
            .append_pair("t", &chrono::Utc::now().timestamp_millis().to_string());
        url
    }

    async fn post(&self, collection: Collection, action: Action, data: &Value) -> AppResult<()> {
        let body = Mutation { sheet: collection.as_str(), action, data };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("{:?} {} failed: {}", action, collection, e)))?;

        if !response.status().is_success() {
            tracing::warn!(
                "Remote endpoint answered {} to {:?} on {}",
                response.status(),
                action,
                collection
            );
        }
        Ok(())
    }
}

/// Anything other than an array is read as an empty sheet
fn rows_from_body(body: Value) -> Vec<Value> {
    match body {
        Value::Array(rows) => rows,
        other => {
            tracing::warn!("Remote endpoint returned a non-array body: {}", other);
            Vec::new()
        }
    }
}

#[async_trait]
impl CollectionStore for RemoteStore {
    async fn list(&self, collection: Collection) -> AppResult<Vec<Value>> {
        let response = self
            .client
            .get(self.list_url(collection))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Transport(format!("Fetching {} failed: {}", collection, e)))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Reading {} failed: {}", collection, e)))?;
        Ok(rows_from_body(body))
    }

    async fn create(&self, collection: Collection, record: Value) -> AppResult<Value> {
        self.post(collection, Action::Add, &record).await?;
        Ok(record)
    }

    async fn update(&self, collection: Collection, record: Value) -> AppResult<Value> {
        self.post(collection, Action::Update, &record).await?;
        Ok(record)
    }

    async fn delete(&self, collection: Collection, id: &str) -> AppResult<()> {
        self.post(collection, Action::Delete, &json!({ "id": id })).await
    }
}

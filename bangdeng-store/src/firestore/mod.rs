//! Firestore document store over the REST v1 API.
//!
//! Authenticates with a bearer access token (for example from
//! `gcloud auth print-access-token`). When an emulator host is configured,
//! requests go to the emulator over plain HTTP without a token.

mod value;

pub use value::{decode_fields, encode_fields, from_firestore, to_firestore};

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::document::{Document, Fields, Write, WriteBatch};
use crate::error::StoreError;
use crate::store::DocumentStore;

const PRODUCTION_BASE: &str = "https://firestore.googleapis.com/v1";
const DEFAULT_DATABASE: &str = "(default)";
const PAGE_SIZE: u32 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    pub access_token: Option<String>,
    /// `host:port` of a local emulator
    pub emulator_host: Option<String>,
    pub timeout: Duration,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            access_token: None,
            emulator_host: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// `…/projects/{p}/databases/{db}/documents`
    pub fn documents_root(&self) -> String {
        let base = match &self.emulator_host {
            Some(host) => format!("http://{host}/v1"),
            None => PRODUCTION_BASE.to_string(),
        };
        format!("{base}/{}", resource_root(&self.project_id, &self.database))
    }
}

/// Resource name prefix used inside request bodies.
fn resource_root(project_id: &str, database: &str) -> String {
    format!("projects/{project_id}/databases/{database}/documents")
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RemoteDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl RemoteDocument {
    fn into_document(self) -> Document {
        let id = self.name.rsplit('/').next().unwrap_or_default().to_string();
        Document::new(id, decode_fields(&self.fields))
    }
}

pub struct FirestoreStore {
    http: reqwest::blocking::Client,
    config: FirestoreConfig,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> Result<Self, StoreError> {
        if config.project_id.trim().is_empty() {
            return Err(StoreError::config("Firestore project id is not set"));
        }
        if config.emulator_host.is_none() && config.access_token.is_none() {
            return Err(StoreError::config(
                "Firestore access token is not set (FIRESTORE_ACCESS_TOKEN)",
            ));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bangdeng/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }

    fn authorize(&self, req: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        match (&self.config.emulator_host, &self.config.access_token) {
            (None, Some(token)) => req.bearer_auth(token),
            _ => req,
        }
    }

    fn send(&self, req: reqwest::blocking::RequestBuilder) -> Result<String, StoreError> {
        let resp = self.authorize(req).send()?;
        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(text)
    }
}

/// The `error.message` of a Firestore error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

/// Body for `documents:commit`. Document names are full resource names.
pub(crate) fn commit_body(project_id: &str, database: &str, batch: &WriteBatch) -> Value {
    let root = resource_root(project_id, database);
    let writes: Vec<Value> = batch
        .writes()
        .iter()
        .map(|w| match w {
            Write::Set {
                collection,
                id,
                fields,
            } => json!({
                "update": {
                    "name": format!("{root}/{collection}/{id}"),
                    "fields": encode_fields(fields),
                }
            }),
            Write::Delete { collection, id } => json!({
                "delete": format!("{root}/{collection}/{id}"),
            }),
        })
        .collect();
    json!({ "writes": writes })
}

/// Body for a `POST` that creates a document with a server-assigned id.
pub(crate) fn add_body(fields: &Fields) -> Value {
    json!({ "fields": encode_fields(fields) })
}

/// Id of the document returned by a create call.
pub(crate) fn parse_added(body: &str) -> Result<String, StoreError> {
    let doc: RemoteDocument = serde_json::from_str(body)?;
    Ok(doc.into_document().id)
}

pub(crate) fn parse_list_page(body: &str) -> Result<(Vec<Document>, Option<String>), StoreError> {
    let page: ListResponse = serde_json::from_str(body)?;
    let docs = page
        .documents
        .into_iter()
        .map(RemoteDocument::into_document)
        .collect();
    let token = page.next_page_token.filter(|t| !t.is_empty());
    Ok((docs, token))
}

impl DocumentStore for FirestoreStore {
    fn backend_name(&self) -> &'static str {
        "firestore"
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}/{collection}", self.config.documents_root());
        let mut docs = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .http
                .get(&url)
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token)]);
            }
            let (page, next) = parse_list_page(&self.send(req)?)?;
            log::debug!("Listed {} documents from {collection}", page.len());
            docs.extend(page);

            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(docs)
    }

    fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = format!("{}/{collection}", self.config.documents_root());
        let text = self.send(self.http.post(&url).json(&add_body(&fields)))?;
        parse_added(&text)
    }

    fn commit(&self, batch: &WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let url = format!("{}:commit", self.config.documents_root());
        let body = commit_body(&self.config.project_id, &self.config.database, batch);
        self.send(self.http.post(&url).json(&body))?;
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{collection}/{id}", self.config.documents_root());
        self.send(self.http.delete(&url))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/firestore_tests.rs"]
mod tests;

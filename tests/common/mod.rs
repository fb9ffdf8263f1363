//! Shared in-memory connection for integration tests.
//!
//! `MockConnection` serves scripted collections with real paging semantics
//! (`page`/`limit` query params, empty page past the end) and records every
//! call so tests can assert on URLs, verbs, and payloads. Specific responses
//! and failures can be canned per `VERB url` key.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use bigcommerce_api::{Connection, ConnectionError};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub verb: Verb,
    pub url: String,
    pub query: Option<HashMap<String, String>>,
    pub body: Option<Value>,
}

/// A scripted failure for a canned response slot.
#[derive(Debug, Clone, Copy)]
pub enum CannedError {
    NotFound,
    Empty,
    Http(u16),
}

impl CannedError {
    fn into_error(self, url: &str) -> ConnectionError {
        match self {
            Self::NotFound => ConnectionError::NotFound {
                url: url.to_string(),
            },
            Self::Empty => ConnectionError::EmptyResponse {
                url: url.to_string(),
            },
            Self::Http(code) => ConnectionError::Http {
                code,
                url: url.to_string(),
                message: String::new(),
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct MockConnection {
    collections: HashMap<String, Vec<Value>>,
    canned: Mutex<HashMap<String, VecDeque<Result<Value, CannedError>>>>,
    calls: Mutex<Vec<Call>>,
    next_id: Mutex<u64>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(1000),
            ..Self::default()
        }
    }

    /// Registers a collection served with paging at `url`.
    pub fn with_collection(mut self, url: impl Into<String>, items: Vec<Value>) -> Self {
        self.collections.insert(url.into(), items);
        self
    }

    /// Cans one response for a `"VERB url"` key, e.g. `"PUT /products/32"`.
    /// Multiple responses for the same key are served in order.
    pub fn respond(&self, key: impl Into<String>, response: Result<Value, CannedError>) {
        self.canned
            .lock()
            .unwrap()
            .entry(key.into())
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, verb: Verb, url: &str, query: Option<&HashMap<String, String>>, body: Option<&Value>) {
        self.calls.lock().unwrap().push(Call {
            verb,
            url: url.to_string(),
            query: query.cloned(),
            body: body.cloned(),
        });
    }

    fn canned_response(&self, key: &str, url: &str) -> Option<Result<Value, ConnectionError>> {
        let mut canned = self.canned.lock().unwrap();
        let slot = canned.get_mut(key)?;
        let response = slot.pop_front()?;
        Some(response.map_err(|error| error.into_error(url)))
    }

    fn serve_page(
        items: &[Value],
        url: &str,
        query: &HashMap<String, String>,
    ) -> Result<Value, ConnectionError> {
        let page: usize = query.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
        let limit: usize = query
            .get("limit")
            .and_then(|v| v.parse().ok())
            .unwrap_or(items.len().max(1));
        let start = (page - 1) * limit;
        let end = (start + limit).min(items.len());
        if start >= items.len() {
            return Err(ConnectionError::EmptyResponse {
                url: url.to_string(),
            });
        }
        Ok(Value::Array(items[start..end].to_vec()))
    }

    fn find_record(&self, url: &str) -> Option<Value> {
        for (base, items) in &self.collections {
            if let Some(id) = url.strip_prefix(&format!("{base}/")) {
                let found = items
                    .iter()
                    .find(|item| item.get("id").map(ToString::to_string) == Some(id.to_string()));
                if let Some(record) = found {
                    return Some(record.clone());
                }
            }
        }
        None
    }
}

impl Connection for MockConnection {
    fn get(
        &self,
        url: &str,
        query: Option<&HashMap<String, String>>,
    ) -> Result<Value, ConnectionError> {
        self.record(Verb::Get, url, query, None);
        if let Some(response) = self.canned_response(&format!("GET {url}"), url) {
            return response;
        }
        if let Some(base) = url.strip_suffix("/count") {
            if let Some(items) = self.collections.get(base) {
                return Ok(json!({ "count": items.len() }));
            }
        }
        if let Some(items) = self.collections.get(url) {
            let empty = HashMap::new();
            return Self::serve_page(items, url, query.unwrap_or(&empty));
        }
        if let Some(record) = self.find_record(url) {
            return Ok(record);
        }
        Err(ConnectionError::NotFound {
            url: url.to_string(),
        })
    }

    fn create(&self, url: &str, data: &Value) -> Result<Value, ConnectionError> {
        self.record(Verb::Create, url, None, Some(data));
        if let Some(response) = self.canned_response(&format!("POST {url}"), url) {
            return response;
        }
        let mut record = data.as_object().cloned().unwrap_or_default();
        let mut next_id = self.next_id.lock().unwrap();
        record.insert("id".to_string(), json!(*next_id));
        *next_id += 1;
        Ok(Value::Object(record))
    }

    fn update(&self, url: &str, data: &Value) -> Result<Value, ConnectionError> {
        self.record(Verb::Update, url, None, Some(data));
        if let Some(response) = self.canned_response(&format!("PUT {url}"), url) {
            return response;
        }
        let mut record = data.as_object().cloned().unwrap_or_default();
        if let Some(id) = url.rsplit('/').next().and_then(|id| id.parse::<u64>().ok()) {
            record.insert("id".to_string(), json!(id));
        }
        Ok(Value::Object(record))
    }

    fn delete(&self, url: &str) -> Result<(), ConnectionError> {
        self.record(Verb::Delete, url, None, None);
        if let Some(response) = self.canned_response(&format!("DELETE {url}"), url) {
            return response.map(|_| ());
        }
        Ok(())
    }

    fn resource_url(&self, name: &str) -> String {
        format!("/{name}")
    }
}

/// Builds `count` records with 1-based ids and a name field.
pub fn numbered_items(count: u64) -> Vec<Value> {
    (1..=count)
        .map(|id| json!({ "id": id, "name": format!("item {id}") }))
        .collect()
}

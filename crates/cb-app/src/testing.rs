//! Fixtures shared by the use-case tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cb_core::ports::{FetchPort, HttpResponse, HttpTransportPort};
use cb_core::TransportError;
use cb_infra::http::{DedupFetcher, DEFAULT_REQUEST_TIMEOUT};
use serde_json::{json, Value};
use tokio::sync::Notify;

/// Transport answering from a fixed route table. Unknown URLs get a 404.
#[derive(Default)]
pub(crate) struct StaticTransport {
    routes: Mutex<HashMap<String, HttpResponse>>,
    hits: Mutex<Vec<String>>,
    held: Mutex<HashMap<String, Arc<Notify>>>,
}

impl StaticTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn route(&self, url: &str, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), HttpResponse::ok(body.to_string()));
    }

    pub(crate) fn route_status(&self, url: &str, status: u16) {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            HttpResponse {
                status,
                body: String::new(),
            },
        );
    }

    /// Park requests for `url` until [`StaticTransport::release`] is called.
    pub(crate) fn hold(&self, url: &str) {
        self.held
            .lock()
            .unwrap()
            .insert(url.to_string(), Arc::new(Notify::new()));
    }

    pub(crate) fn release(&self, url: &str) {
        if let Some(gate) = self.held.lock().unwrap().remove(url) {
            gate.notify_one();
        }
    }

    pub(crate) fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl HttpTransportPort for StaticTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.hits.lock().unwrap().push(url.to_string());
        let gate = self.held.lock().unwrap().get(url).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self
            .routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or(HttpResponse {
                status: 404,
                body: r#"{"detail":"Not found"}"#.to_string(),
            }))
    }
}

pub(crate) fn fetcher(transport: &Arc<StaticTransport>) -> Arc<dyn FetchPort> {
    Arc::new(DedupFetcher::new(
        Arc::clone(transport) as Arc<dyn HttpTransportPort>,
        DEFAULT_REQUEST_TIMEOUT,
    ))
}

pub(crate) fn person(id: u32, name: &str) -> Value {
    json!({
        "name": name,
        "url": format!("https://swapi.dev/api/people/{id}/"),
    })
}

pub(crate) fn page(count: u64, next: Option<&str>, results: Vec<Value>) -> Value {
    json!({
        "count": count,
        "next": next,
        "previous": null,
        "results": results,
    })
}

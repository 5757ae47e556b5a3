//! HttpObserver -- concrete [`ObserverService`] over the telemetry hub's
//! HTTP API.
//!
//! `analyze` and `storeEvent` POST JSON bodies; `getEvents` and
//! `getReferences` translate their parameter object into query string
//! pairs, matching how the observer exposes its read endpoints.

use serde_json::Value;

use vigil_core::service::{BoxFuture, DispatchResult, ObserverService};

use super::{build_client, decode, query_value, transport};

pub struct HttpObserver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpObserver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: Value) -> DispatchResult {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn get(&self, path: &str, params: Value) -> DispatchResult {
        let mut request = self.client.get(self.url(path));
        if let Value::Object(map) = &params {
            let pairs: Vec<(String, String)> = map
                .iter()
                .map(|(k, v)| (k.clone(), query_value(v)))
                .collect();
            request = request.query(&pairs);
        }
        let response = request.send().await.map_err(transport)?;
        decode(response).await
    }
}

impl ObserverService for HttpObserver {
    fn analyze(&self, params: Value) -> BoxFuture<'_, DispatchResult> {
        Box::pin(self.post("/api/analyze", params))
    }

    fn get_events(&self, params: Value) -> BoxFuture<'_, DispatchResult> {
        Box::pin(self.get("/api/events", params))
    }

    fn get_references(&self, params: Value) -> BoxFuture<'_, DispatchResult> {
        Box::pin(self.get("/api/references", params))
    }

    fn store_event(&self, event: Value) -> BoxFuture<'_, DispatchResult> {
        Box::pin(self.post("/api/events", event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_path() {
        let observer = HttpObserver::new("http://127.0.0.1:3002");
        assert_eq!(observer.url("/api/events"), "http://127.0.0.1:3002/api/events");
    }
}

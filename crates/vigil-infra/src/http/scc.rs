//! HttpScc -- concrete [`SccService`] for the SCC desktop app.

use serde_json::Value;

use vigil_core::service::{BoxFuture, DispatchResult, SccService};

use super::{build_client, decode, transport};

pub struct HttpScc {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScc {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SccService for HttpScc {
    fn send_feedback(&self, params: Value) -> BoxFuture<'_, DispatchResult> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url("/api/feedback"))
                .json(&params)
                .send()
                .await
                .map_err(transport)?;
            decode(response).await
        })
    }

    fn get_health(&self) -> BoxFuture<'_, DispatchResult> {
        Box::pin(async {
            let response = self
                .client
                .get(self.url("/health"))
                .send()
                .await
                .map_err(transport)?;
            decode(response).await
        })
    }
}

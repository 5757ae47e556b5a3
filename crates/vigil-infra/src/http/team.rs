//! HttpTeam -- concrete [`TeamService`] over the team coordination hub.
//!
//! Tracks hub reachability with a connected flag updated after every
//! call, so the health surface can report `disconnected` without issuing
//! another probe.

use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{json, Value};

use vigil_core::service::{BoxFuture, DispatchResult, TeamService};

use super::{build_client, decode, transport};

pub struct HttpTeam {
    client: reqwest::Client,
    base_url: String,
    connected: AtomicBool,
}

impl HttpTeam {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
            connected: AtomicBool::new(false),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: Value) -> DispatchResult {
        let result = async {
            let response = self
                .client
                .post(self.url(path))
                .json(&body)
                .send()
                .await
                .map_err(transport)?;
            decode(response).await
        }
        .await;
        self.connected.store(result.is_ok(), Ordering::Relaxed);
        result
    }
}

impl TeamService for HttpTeam {
    fn broadcast(&self, message: &str, category: &str) -> BoxFuture<'_, DispatchResult> {
        let body = json!({ "message": message, "category": category });
        Box::pin(self.post("/api/broadcast", body))
    }

    fn ask_team(&self, question: &str, target: Option<&str>) -> BoxFuture<'_, DispatchResult> {
        let body = json!({ "question": question, "target": target });
        Box::pin(self.post("/api/ask", body))
    }

    fn get_status(&self) -> BoxFuture<'_, DispatchResult> {
        Box::pin(async {
            let result = async {
                let response = self
                    .client
                    .get(self.url("/api/status"))
                    .send()
                    .await
                    .map_err(transport)?;
                decode(response).await
            }
            .await;
            self.connected.store(result.is_ok(), Ordering::Relaxed);
            result
        })
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

//! BridgeBrowser -- concrete [`BrowserService`] reached through the team
//! hub's webhook.
//!
//! The browser extension has no inbound HTTP surface of its own; commands
//! are wrapped in a `BROWSER_COMMAND` envelope and relayed by the hub to
//! the connected extension socket.

use serde_json::{json, Value};

use vigil_core::service::{BoxFuture, BrowserService, DispatchResult};

use super::{build_client, decode, transport};

pub struct BridgeBrowser {
    client: reqwest::Client,
    webhook_url: String,
}

impl BridgeBrowser {
    /// `hub_url` is the team hub base; the webhook path is fixed.
    pub fn new(hub_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            webhook_url: format!("{}/webhook", hub_url.into()),
        }
    }

    fn envelope(action: &str, params: Value) -> Value {
        json!({
            "type": "BROWSER_COMMAND",
            "action": action,
            "params": params,
        })
    }
}

impl BrowserService for BridgeBrowser {
    fn command(&self, action: &str, params: Value) -> BoxFuture<'_, DispatchResult> {
        let body = Self::envelope(action, params);
        Box::pin(async move {
            let response = self
                .client
                .post(&self.webhook_url)
                .json(&body)
                .send()
                .await
                .map_err(transport)?;
            decode(response).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_action_and_params() {
        let body = BridgeBrowser::envelope("navigate", json!({ "url": "https://x" }));
        assert_eq!(body["type"], "BROWSER_COMMAND");
        assert_eq!(body["action"], "navigate");
        assert_eq!(body["params"]["url"], "https://x");
    }

    #[test]
    fn webhook_url_fixed_path() {
        let browser = BridgeBrowser::new("http://127.0.0.1:3005");
        assert_eq!(browser.webhook_url, "http://127.0.0.1:3005/webhook");
    }
}

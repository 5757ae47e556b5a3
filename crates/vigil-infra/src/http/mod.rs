//! HTTP dispatchers for the collaborator services.
//!
//! Each client is a thin reqwest wrapper implementing one of the service
//! ports from `vigil-core`. They share the error mapping in [`decode`]:
//! transport failures, non-2xx statuses, and undecodable bodies all fold
//! into [`DispatchError`] so the step runner treats every remote the same
//! way.

use std::time::Duration;

use serde_json::Value;

use vigil_types::error::DispatchError;

pub mod browser;
pub mod observer;
pub mod scc;
pub mod team;

pub use browser::BridgeBrowser;
pub use observer::HttpObserver;
pub use scc::HttpScc;
pub use team::HttpTeam;

/// Connect timeout applied to every dispatcher client. The per-step
/// deadline lives in the step runner; this only bounds socket setup.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .expect("failed to create reqwest client")
}

/// Map a reqwest response into a dispatch result.
///
/// Non-2xx responses carry the body text for diagnostics; bodies that are
/// not valid JSON surface as payload errors.
pub(crate) async fn decode(response: reqwest::Response) -> Result<Value, DispatchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DispatchError::Status {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json::<Value>()
        .await
        .map_err(|e| DispatchError::Payload(e.to_string()))
}

pub(crate) fn transport(e: reqwest::Error) -> DispatchError {
    DispatchError::Transport(e.to_string())
}

/// Render a JSON value as a query-string parameter.
pub(crate) fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_value_strings_stay_bare() {
        assert_eq!(query_value(&json!("scc")), "scc");
        assert_eq!(query_value(&json!(100)), "100");
        assert_eq!(query_value(&json!(true)), "true");
    }
}

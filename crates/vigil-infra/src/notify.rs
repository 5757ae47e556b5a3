//! Team-hub-backed notification sink.
//!
//! Engine lifecycle notices become team broadcasts. Delivery failures are
//! logged and swallowed: a notice must never fail the step it annotates.

use std::sync::Arc;

use vigil_core::service::{BoxFuture, Notifier, TeamService, WorkflowNotice};

pub struct TeamNotifier {
    team: Arc<dyn TeamService>,
}

impl TeamNotifier {
    pub fn new(team: Arc<dyn TeamService>) -> Self {
        Self { team }
    }
}

impl Notifier for TeamNotifier {
    fn notify(&self, notice: WorkflowNotice) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            let message = notice.message();
            let category = notice.category().to_string();
            if let Err(e) = self.team.broadcast(&message, &category).await {
                tracing::warn!(error = %e, category = category.as_str(), "notice delivery failed");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vigil_core::service::DispatchResult;
    use vigil_types::error::DispatchError;

    struct UnreachableTeam {
        attempts: AtomicUsize,
    }

    impl TeamService for UnreachableTeam {
        fn broadcast(&self, _m: &str, _c: &str) -> BoxFuture<'_, DispatchResult> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Err(DispatchError::Transport("connection refused".to_string())) })
        }
        fn ask_team(&self, _q: &str, _t: Option<&str>) -> BoxFuture<'_, DispatchResult> {
            Box::pin(async { Ok(Value::Null) })
        }
        fn get_status(&self) -> BoxFuture<'_, DispatchResult> {
            Box::pin(async { Ok(json!({})) })
        }
        fn is_connected(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn delivery_failure_is_swallowed() {
        let team = Arc::new(UnreachableTeam {
            attempts: AtomicUsize::new(0),
        });
        let notifier = TeamNotifier::new(team.clone());

        notifier
            .notify(WorkflowNotice::WorkflowStarted {
                workflow: "anomaly-monitor".to_string(),
            })
            .await;

        assert_eq!(team.attempts.load(Ordering::SeqCst), 1);
    }
}

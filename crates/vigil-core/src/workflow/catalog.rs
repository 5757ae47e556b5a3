//! Predefined workflow definitions.
//!
//! These ship as literal definitions rather than configuration. Custom
//! workflows can still be submitted inline; the catalog just covers the
//! two runs operators trigger most.

use serde_json::{json, Map, Value};

use vigil_types::error::WorkflowError;
use vigil_types::workflow::{Step, StepKind, Workflow};

/// Milliseconds to let an EHR page settle before capturing it.
const ATHENA_SETTLE_MS: u64 = 2000;

pub struct WorkflowCatalog;

impl WorkflowCatalog {
    /// Workflow ids available through `get`.
    pub fn ids() -> &'static [&'static str] {
        &["athena-capture-analyze", "anomaly-monitor"]
    }

    /// Build a predefined workflow seeded with the caller's context.
    ///
    /// Context keys the definition depends on are enforced here so a
    /// misconfigured invocation fails before any step runs.
    pub fn get(id: &str, context: Map<String, Value>) -> Result<Workflow, WorkflowError> {
        let mut workflow = match id {
            "athena-capture-analyze" => athena_capture_analyze(),
            "anomaly-monitor" => anomaly_monitor(),
            other => return Err(WorkflowError::UnknownWorkflow(other.to_string())),
        };
        for key in required_keys(id) {
            if !context.contains_key(*key) {
                return Err(WorkflowError::MissingContextKey {
                    workflow: id.to_string(),
                    key: key.to_string(),
                });
            }
        }
        workflow.context = context;
        Ok(workflow)
    }
}

fn required_keys(id: &str) -> &'static [&'static str] {
    match id {
        "athena-capture-analyze" => &["athenaUrl", "patientId"],
        _ => &[],
    }
}

/// Capture a patient page from the Athena EHR and run an AI pass over it.
fn athena_capture_analyze() -> Workflow {
    Workflow {
        name: "athena-capture-analyze".to_string(),
        steps: vec![
            Step::new(StepKind::ClaudeTeam, "Announce capture")
                .action("broadcast")
                .params(json!({
                    "message": "Starting Athena capture for patient {{patientId}}",
                }))
                .optional(),
            Step::new(StepKind::Browser, "Open Athena")
                .action("navigate")
                .params(json!({ "url": "{{athenaUrl}}" })),
            Step::new(StepKind::Delay, "Wait for page").params(json!({ "ms": ATHENA_SETTLE_MS })),
            Step::new(StepKind::Browser, "Capture patient data")
                .action("athenaCapture")
                .params(json!({ "patientId": "{{patientId}}" })),
            Step::new(StepKind::Observer, "Analyze capture")
                .action("analyze")
                .params(json!({
                    "provider": "claude",
                    "analysisType": "athena-patient",
                    "maxEvents": 10,
                    "filters": { "patientId": "{{patientId}}" },
                })),
            Step::new(StepKind::ClaudeTeam, "Report analysis")
                .action("broadcast")
                .params(json!({
                    "message": "Athena analysis complete for patient {{patientId}}",
                }))
                .optional(),
        ],
        context: Map::new(),
    }
}

/// Sweep recent telemetry for anomalies and report the scan to the team.
fn anomaly_monitor() -> Workflow {
    Workflow {
        name: "anomaly-monitor".to_string(),
        steps: vec![
            Step::new(StepKind::Observer, "Fetch recent events")
                .action("getEvents")
                .params(json!({ "limit": 100 })),
            Step::new(StepKind::Observer, "Scan for anomalies")
                .action("analyze")
                .params(json!({
                    "provider": "claude",
                    "analysisType": "anomalies",
                    "maxEvents": 100,
                })),
            Step::new(StepKind::Condition, "Events present").params(json!({
                "field": "total",
                "operator": "exists",
            })),
            Step::new(StepKind::ClaudeTeam, "Report scan")
                .action("broadcast")
                .params(json!({
                    "message": "Anomaly scan finished: {{total}} events reviewed",
                })),
        ],
        context: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_rejected() {
        let err = WorkflowCatalog::get("no-such-workflow", Map::new()).unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownWorkflow(id) if id == "no-such-workflow"));
    }

    #[test]
    fn athena_requires_context_keys() {
        let mut context = Map::new();
        context.insert("athenaUrl".to_string(), json!("https://athena.example"));

        let err = WorkflowCatalog::get("athena-capture-analyze", context.clone()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::MissingContextKey { ref key, .. } if key == "patientId"
        ));

        context.insert("patientId".to_string(), json!("p-42"));
        let wf = WorkflowCatalog::get("athena-capture-analyze", context).unwrap();
        assert_eq!(wf.steps.len(), 6);
        assert_eq!(wf.context["patientId"], json!("p-42"));
    }

    #[test]
    fn anomaly_monitor_needs_no_context() {
        let wf = WorkflowCatalog::get("anomaly-monitor", Map::new()).unwrap();
        assert_eq!(wf.steps.len(), 4);
        assert!(wf.context.is_empty());
        assert_eq!(wf.steps[0].kind, StepKind::Observer);
        assert_eq!(wf.steps[2].kind, StepKind::Condition);
    }

    #[test]
    fn ids_match_definitions() {
        for id in WorkflowCatalog::ids() {
            let mut context = Map::new();
            for key in required_keys(id) {
                context.insert(key.to_string(), json!("x"));
            }
            assert!(WorkflowCatalog::get(id, context).is_ok());
        }
    }
}

//! Sequential workflow engine with halt-on-failure semantics.
//!
//! One run owns one mutable context. Steps execute strictly in order;
//! each successful object-shaped result is shallow-merged into the context
//! for later steps to interpolate. The first non-optional failure (or any
//! configuration error) halts the run; everything completed so far is
//! still returned in the report. Step failures never escape as errors --
//! callers always get a structured `WorkflowReport`.

use std::sync::Arc;

use serde_json::Value;

use vigil_types::error::WorkflowError;
use vigil_types::workflow::{StepRecord, Workflow, WorkflowReport};

use crate::service::{Notifier, WorkflowNotice};

use super::step_runner::StepRunner;

/// Runs workflows against the injected step runner and notification sink.
///
/// Stateless across runs: concurrent `execute` calls are fully independent.
pub struct WorkflowEngine {
    runner: StepRunner,
    notifier: Arc<dyn Notifier>,
}

impl WorkflowEngine {
    pub fn new(runner: StepRunner, notifier: Arc<dyn Notifier>) -> Self {
        Self { runner, notifier }
    }

    /// Execute a workflow and return its report.
    ///
    /// `Err` only for engine-level misuse (empty step list); every
    /// step-level failure is captured into the report instead.
    pub async fn execute(&self, workflow: &Workflow) -> Result<WorkflowReport, WorkflowError> {
        if workflow.steps.is_empty() {
            return Err(WorkflowError::EmptySteps);
        }

        let mut context = workflow.context.clone();
        let mut results: Vec<StepRecord> = Vec::with_capacity(workflow.steps.len());

        tracing::info!(
            workflow = workflow.name.as_str(),
            steps = workflow.steps.len(),
            "starting workflow"
        );
        self.notifier
            .notify(WorkflowNotice::WorkflowStarted {
                workflow: workflow.name.clone(),
            })
            .await;

        for step in &workflow.steps {
            tracing::debug!(
                step = step.name.as_str(),
                kind = %step.kind,
                "starting step"
            );
            self.notifier
                .notify(WorkflowNotice::StepStarted {
                    workflow: workflow.name.clone(),
                    step: step.name.clone(),
                })
                .await;

            match self.runner.run(step, &context).await {
                Ok(result) => {
                    // Object results merge into the context; later keys
                    // overwrite earlier ones.
                    if let Value::Object(map) = &result {
                        for (k, v) in map {
                            context.insert(k.clone(), v.clone());
                        }
                    }
                    results.push(StepRecord::ok(&step.name, result));
                    self.notifier
                        .notify(WorkflowNotice::StepCompleted {
                            workflow: workflow.name.clone(),
                            step: step.name.clone(),
                        })
                        .await;
                }
                Err(err) => {
                    let message = err.to_string();
                    tracing::warn!(
                        step = step.name.as_str(),
                        error = message.as_str(),
                        "step failed"
                    );
                    results.push(StepRecord::failed(&step.name, &message));
                    self.notifier
                        .notify(WorkflowNotice::StepFailed {
                            workflow: workflow.name.clone(),
                            step: step.name.clone(),
                            error: message,
                        })
                        .await;

                    // Config errors indicate a malformed definition and
                    // halt regardless of the optional flag.
                    if err.is_config() || !step.optional {
                        self.notifier
                            .notify(WorkflowNotice::WorkflowHalted {
                                workflow: workflow.name.clone(),
                                step: step.name.clone(),
                            })
                            .await;
                        let completed_steps = results.len();
                        return Ok(WorkflowReport {
                            success: false,
                            completed_steps,
                            results,
                            context: None,
                            error: Some(format!("Workflow stopped at step: {}", step.name)),
                        });
                    }
                }
            }
        }

        let completed_steps = results.len();
        self.notifier
            .notify(WorkflowNotice::WorkflowCompleted {
                workflow: workflow.name.clone(),
                completed_steps,
            })
            .await;
        tracing::info!(
            workflow = workflow.name.as_str(),
            completed_steps,
            "workflow completed"
        );

        Ok(WorkflowReport {
            success: true,
            completed_steps,
            results,
            context: Some(context),
            error: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

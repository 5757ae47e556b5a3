//! Workflow CLI commands: `vgl run` and `vgl workflows`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use console::style;
use serde_json::{Map, Value};

use vigil_core::workflow::catalog::WorkflowCatalog;
use vigil_types::workflow::{Workflow, WorkflowReport};

use crate::state::AppState;

/// Run a workflow and render its report.
pub async fn run(
    state: &AppState,
    workflow_id: Option<&str>,
    file: Option<&Path>,
    context_args: &[String],
    json: bool,
) -> Result<()> {
    let context = parse_context(context_args)?;

    let workflow = match (workflow_id, file) {
        (Some(id), None) => WorkflowCatalog::get(id, context)?,
        (None, Some(path)) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut workflow: Workflow = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            for (k, v) in context {
                workflow.context.insert(k, v);
            }
            workflow
        }
        _ => bail!("provide a workflow id or --file"),
    };

    let report = state.engine.execute(&workflow).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    render_report(&workflow.name, &report);
    Ok(())
}

/// List the predefined workflow ids.
pub fn list(json: bool) -> Result<()> {
    let ids = WorkflowCatalog::ids();
    if json {
        println!("{}", serde_json::to_string_pretty(&ids)?);
        return Ok(());
    }
    println!();
    println!("  {} Predefined workflows", style("⚙").bold());
    println!();
    for id in ids {
        println!("  {}", style(id).cyan());
    }
    println!();
    Ok(())
}

fn render_report(name: &str, report: &WorkflowReport) {
    println!();
    println!(
        "  {} Workflow '{}'",
        style(if report.success { "✓" } else { "✗" }).bold(),
        style(name).cyan()
    );
    println!();
    for record in &report.results {
        if record.success {
            println!("  {} {}", style("✓").green(), record.step);
        } else {
            println!(
                "  {} {} {}",
                style("✗").red(),
                record.step,
                style(record.error.as_deref().unwrap_or("failed")).dim()
            );
        }
    }
    println!();
    if let Some(error) = &report.error {
        println!("  {}", style(error).red());
    } else {
        println!(
            "  {} steps completed",
            style(report.completed_steps).bold()
        );
    }
    println!();
}

/// Parse repeated `key=value` pairs into a context map.
///
/// Values that parse as JSON keep their type; everything else is a string.
fn parse_context(args: &[String]) -> Result<Map<String, Value>> {
    let mut context = Map::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("invalid context argument '{arg}', expected KEY=VALUE");
        };
        let value = serde_json::from_str::<Value>(value)
            .unwrap_or_else(|_| Value::String(value.to_string()));
        context.insert(key.to_string(), value);
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn context_values_keep_json_types() {
        let context = parse_context(&[
            "patientId=p-42".to_string(),
            "limit=100".to_string(),
            "dry=true".to_string(),
        ])
        .unwrap();
        assert_eq!(context["patientId"], json!("p-42"));
        assert_eq!(context["limit"], json!(100));
        assert_eq!(context["dry"], json!(true));
    }

    #[test]
    fn malformed_pair_rejected() {
        assert!(parse_context(&["no-equals-sign".to_string()]).is_err());
    }
}

//! `vgl services` -- collaborator health dashboard.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, Table};
use console::style;

use vigil_types::workflow::ServiceStatus;

use crate::state::AppState;

pub async fn services(state: &AppState, json: bool) -> Result<()> {
    let health = state.prober.probe().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Service", "Status"]);
    for (service, status) in &health {
        let color = match status {
            ServiceStatus::Connected => Color::Green,
            ServiceStatus::Error => Color::Yellow,
            ServiceStatus::Offline | ServiceStatus::Disconnected => Color::Red,
        };
        table.add_row(vec![
            Cell::new(service),
            Cell::new(format!("{status:?}").to_lowercase()).fg(color),
        ]);
    }

    println!();
    println!("  {} Collaborator services", style("⚡").bold());
    println!();
    println!("{table}");
    println!();
    Ok(())
}

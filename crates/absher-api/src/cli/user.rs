//! Synthetic user listing command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use absher_infra::config::resolve_dataset_path;
use absher_types::service::ServiceType;

use crate::state::AppState;

/// List users of one service partition with their selection index.
pub fn list_users(state: &AppState, tag: &str, limit: usize, json: bool) -> Result<()> {
    let service: ServiceType = tag.parse().map_err(anyhow::Error::msg)?;
    let users = state.directory.by_service(service);

    if json {
        let shown: Vec<_> = users.iter().take(limit).collect();
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if users.is_empty() {
        println!();
        println!(
            "  {} No {} data available. Place the dataset at {}",
            style("i").blue().bold(),
            service.holder_label(),
            style(resolve_dataset_path(&state.config, &state.data_dir).display()).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("User").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Status").fg(Color::White),
    ]);

    for (index, user) in users.iter().take(limit).enumerate() {
        let id = user
            .masked_id()
            .map(|(kind, id)| format!("{kind}: {id}"))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(index).fg(Color::DarkGrey),
            Cell::new(user.label()).fg(Color::Cyan),
            Cell::new(id),
            Cell::new(user.field_or_empty("status")),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} of {} {}s shown",
        style(limit.min(users.len())).bold(),
        users.len(),
        service.holder_label()
    );
    println!();

    Ok(())
}

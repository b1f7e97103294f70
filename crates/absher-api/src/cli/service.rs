//! Catalog and comparison commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use absher_core::comparison::comparison;
use absher_types::service::ServiceType;

use crate::state::AppState;

/// List every service in the catalog.
pub fn list_services(state: &AppState, json: bool) -> Result<()> {
    let services = state.catalog.all();

    if json {
        println!("{}", serde_json::to_string_pretty(services)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Tag").fg(Color::White),
        Cell::new("Service").fg(Color::White),
        Cell::new("الخدمة").fg(Color::White),
        Cell::new("Cost").fg(Color::White),
        Cell::new("Processing Time").fg(Color::White),
    ]);

    for service in services {
        table.add_row(vec![
            Cell::new(service.service_type.tag()).fg(Color::Cyan),
            Cell::new(&service.name_en),
            Cell::new(&service.name_ar),
            Cell::new(&service.cost).fg(Color::Yellow),
            Cell::new(&service.processing_time).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!("  {} services", style(services.len()).bold());
    println!();

    Ok(())
}

/// Show one service: documents, workflow and eligibility checks.
pub fn show_service(state: &AppState, tag: &str, json: bool) -> Result<()> {
    let service_type: ServiceType = tag.parse().map_err(anyhow::Error::msg)?;
    let service = state.catalog.get(service_type);

    if json {
        println!("{}", serde_json::to_string_pretty(service)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(&service.name_en).cyan().bold(),
        style(format!("({})", service.name_ar)).dim()
    );
    println!("  {}", style(&service.description_en).dim());
    println!();
    println!("  {} {}", style("Processing Time:").bold(), service.processing_time);
    println!("  {} {}", style("Cost:").bold(), service.cost);
    println!();

    println!("  {}", style("── Required Documents ──").dim());
    for (i, doc) in service.required_documents.iter().enumerate() {
        println!("  {}. {doc}", i + 1);
    }
    println!();

    println!("  {}", style("── Workflow ──").dim());
    for step in &service.workflow {
        println!("  {} {step}", style("•").dim());
    }
    println!();

    println!("  {}", style("── Eligibility Checks ──").dim());
    for check in &service.eligibility_checks {
        println!("  {} {check}", style("✓").green());
    }
    println!();

    Ok(())
}

/// Print the traditional vs assisted comparison.
pub fn compare(json: bool) -> Result<()> {
    let c = comparison();

    if json {
        println!("{}", serde_json::to_string_pretty(&c)?);
        return Ok(());
    }

    println!();
    for summary in [&c.traditional, &c.assisted] {
        println!("  {}", style(summary.title).bold());
        for (i, step) in summary.steps.iter().enumerate() {
            println!("    {}. {step}", i + 1);
        }
        println!(
            "    {} {}   {} {}",
            style("Total time:").dim(),
            summary.total_time,
            style("Satisfaction:").dim(),
            summary.satisfaction
        );
        println!();
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").fg(Color::White),
        Cell::new("Traditional").fg(Color::White),
        Cell::new("AI-Enhanced").fg(Color::White),
    ]);
    for row in c.metrics {
        table.add_row(vec![
            Cell::new(row.metric),
            Cell::new(row.traditional).fg(Color::Red),
            Cell::new(row.assisted).fg(Color::Green),
        ]);
    }
    println!("{table}");
    println!();

    Ok(())
}

//! One-shot chat commands: intent classification and single questions.

use anyhow::Result;
use comfy_table::{Cell, Color, Table, presets};
use console::style;

use absher_core::llm::gateway::reply_text;

use crate::state::AppState;

/// Classify `query` and print the per-service keyword scores.
pub fn classify(state: &AppState, query: &str, json: bool) -> Result<()> {
    let intent = state.router.classify(query);
    let scores = state.router.scores(query);

    if json {
        let out = serde_json::json!({
            "query": query,
            "service": intent.service,
            "score": intent.score,
            "scores": scores
                .iter()
                .map(|(service, score)| (service.tag(), *score))
                .collect::<std::collections::BTreeMap<_, _>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Service").fg(Color::White),
        Cell::new("Keyword hits").fg(Color::White),
    ]);
    for (service, score) in &scores {
        let cell = Cell::new(service.tag());
        let cell = if intent.service == Some(*service) {
            cell.fg(Color::Green)
        } else {
            cell
        };
        table.add_row(vec![cell, Cell::new(score)]);
    }

    println!();
    println!("{table}");
    println!();
    match intent.service {
        Some(service) => println!(
            "  {} {} (score {})",
            style("→").green().bold(),
            style(state.catalog.get(service).name_en.as_str()).cyan(),
            intent.score
        ),
        None => println!(
            "  {} No service matched; the general Q&A answers this one",
            style("i").blue().bold()
        ),
    }
    println!();

    Ok(())
}

/// Ask one question in a throwaway session.
///
/// With `llm`, the question goes to the hosted model; failures are printed
/// as the reply, the same way the API returns them.
pub async fn ask(state: &AppState, query: &str, llm: bool, json: bool) -> Result<()> {
    let mut session = state.new_session();

    let reply = if llm {
        let reply = reply_text(state.gateway.ask(query, &state.shutdown).await);
        session.conversation.record_exchange(query, &reply);
        reply
    } else {
        session.conversation.process_query(query)
    };

    if json {
        let out = serde_json::json!({
            "query": query,
            "reply": reply,
            "current_service": session.conversation.current_service(),
            "turns": session.conversation.turns(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("You:").bold(), query);
    println!();
    for line in reply.lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}

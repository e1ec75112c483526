//! `bharatai providers`: show every configured chain.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

pub fn list_providers(state: &AppState, json: bool) -> Result<()> {
    let providers = state.providers.as_ref();

    if json {
        println!("{}", serde_json::to_string_pretty(providers)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("Provider Chains").bold());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Domain").fg(Color::White),
        Cell::new("Priority").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Kind").fg(Color::White),
        Cell::new("Model").fg(Color::White),
        Cell::new("Enabled").fg(Color::White),
        Cell::new("Key").fg(Color::White),
    ]);

    for provider in providers {
        let enabled_cell = if provider.enabled {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::Red)
        };
        let key_cell = if provider.has_credential {
            Cell::new("set").fg(Color::Green)
        } else {
            Cell::new("missing").fg(Color::Yellow)
        };
        let model = if provider.model.is_empty() { "-" } else { provider.model.as_str() };

        table.add_row(vec![
            Cell::new(provider.domain).fg(Color::White),
            Cell::new(provider.priority).fg(Color::Cyan),
            Cell::new(&provider.name).fg(Color::White),
            Cell::new(provider.kind).fg(Color::DarkGrey),
            Cell::new(model).fg(Color::DarkGrey),
            enabled_cell,
            key_cell,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} provider{} configured",
        style(providers.len()).bold(),
        if providers.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

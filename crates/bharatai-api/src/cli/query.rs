//! One-shot queries from the command line: `bharatai ask`, `bharatai market`.
//!
//! Ctrl+C cancels the in-flight provider call instead of killing the
//! process mid-request.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use tokio_util::sync::CancellationToken;

use bharatai_core::request::{RawPayload, normalize};
use bharatai_core::router::orchestrator::Resolution;
use bharatai_types::envelope::EnvelopeBody;
use bharatai_types::error::RouterError;
use bharatai_types::provider::FailureRecord;

use crate::state::AppState;

/// `bharatai ask <prompt>`
pub async fn ask(state: &AppState, prompt: String, json: bool) -> Result<()> {
    run(state, RawPayload::Text { prompt }, json).await
}

/// `bharatai market <location>`
pub async fn market(state: &AppState, location: String, json: bool) -> Result<()> {
    run(state, RawPayload::Market { location }, json).await
}

async fn run(state: &AppState, payload: RawPayload, json: bool) -> Result<()> {
    let query = normalize(payload.domain(), payload)?;

    let cancel = CancellationToken::new();
    let resolve = state.orchestrator.resolve_with_cancel(&query, &cancel);
    tokio::pin!(resolve);

    let result = tokio::select! {
        result = &mut resolve => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            cancel.cancel();
            resolve.await
        }
    };

    match result {
        Ok(resolution) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&resolution.envelope)?);
            } else {
                print_resolution(&resolution);
            }
            Ok(())
        }
        Err(RouterError::Cancelled { .. }) => {
            eprintln!("  {} Cancelled", style("x").red().bold());
            Ok(())
        }
        Err(err) => {
            if !json {
                print_failures(err.failures());
            }
            anyhow::bail!("{err}")
        }
    }
}

fn print_resolution(resolution: &Resolution) {
    let envelope = &resolution.envelope;

    println!();
    let source = if envelope.is_fallback {
        style(format!("{} (static data)", envelope.source)).yellow()
    } else {
        style(envelope.source.clone()).cyan()
    };
    println!("  {} {}", style("Source:").dim(), source);
    println!();

    match &envelope.body {
        EnvelopeBody::Reply(text) => {
            for line in text.lines() {
                println!("  {line}");
            }
        }
        EnvelopeBody::Data(records) if records.is_empty() => {
            println!("  {}", style("No records for this location.").dim());
        }
        EnvelopeBody::Data(records) => {
            let mut table = Table::new();
            table.load_preset(presets::UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec![
                Cell::new("Crop").fg(Color::White),
                Cell::new("Price").fg(Color::White),
                Cell::new("Market").fg(Color::White),
                Cell::new("District").fg(Color::White),
            ]);
            for record in records {
                table.add_row(vec![
                    Cell::new(&record.crop).fg(Color::Cyan),
                    Cell::new(&record.price).fg(Color::Green),
                    Cell::new(&record.market).fg(Color::White),
                    Cell::new(&record.district).fg(Color::DarkGrey),
                ]);
            }
            println!("{table}");
        }
    }

    if !resolution.failures.is_empty() {
        println!();
        print_failures(&resolution.failures);
    }
    println!();
}

fn print_failures(failures: &[FailureRecord]) {
    for failure in failures {
        println!(
            "  {} {} {} {}",
            style("!").yellow().bold(),
            style(&failure.provider_name).cyan(),
            style(failure.error_kind.to_string()).yellow(),
            style(&failure.message).dim()
        );
    }
}

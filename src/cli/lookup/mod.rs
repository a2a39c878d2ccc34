//! Lookup command - resolves one term and prints the response envelope

use clap::Args;
use tracing::info;

use crate::domain::{LookupResponse, Term};

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    /// Dictionary term, used verbatim
    pub term: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Looks up a term and waits for write-back before exiting
pub async fn run(args: LookupArgs) -> anyhow::Result<()> {
    let config = super::load_config()?;
    let term = Term::new(args.term)?;

    let stores = crate::create_stores(&config).await?;
    let service = crate::create_sentence_service(&config, &stores)?;

    let lookup = service.lookup(&term).await?;
    info!(term = %term, origin = %lookup.origin, count = lookup.examples.len(), "Lookup finished");

    let envelope = LookupResponse::from_examples(lookup.examples);
    println!("{}", render(&envelope, args.pretty)?);

    if let Some(handle) = lookup.reconciliation {
        let report = handle.await?;
        info!(
            ledger_written = report.ledger_written,
            examples_written = report.examples_written,
            examples_failed = report.examples_failed,
            "Write-back finished"
        );
    }

    stores.close().await;
    Ok(())
}

fn render(envelope: &LookupResponse, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(envelope)
    } else {
        serde_json::to_string(envelope)
    }
}

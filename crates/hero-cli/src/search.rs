//! # Live search
//!
//! `hero search <NAME>` queries the API and prints the validated response
//! as JSON (wire spelling). `--raw` prints the undecoded reply instead.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use hero_client::{ClientError, SuperheroClient};

/// Arguments for `hero search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Hero name to search for.
    pub name: String,

    /// Print status and body without validating.
    #[arg(long)]
    pub raw: bool,
}

/// Execute `hero search`.
pub async fn run_search(
    args: &SearchArgs,
    client: &SuperheroClient,
    out: &mut impl Write,
) -> Result<u8> {
    if args.raw {
        let reply = client.search_raw(&args.name).await?;
        writeln!(out, "{}", serde_json::to_string_pretty(&reply)?)?;
        return Ok(0);
    }

    match client.search(&args.name).await {
        Ok(resp) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&resp)?)?;
            Ok(0)
        }
        Err(ClientError::Api { shape, .. }) => {
            writeln!(out, "error: {shape}")?;
            Ok(1)
        }
        Err(ClientError::Validation(e)) => {
            writeln!(out, "invalid response: {e}")?;
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

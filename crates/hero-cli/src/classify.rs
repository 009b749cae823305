//! # Error body classification
//!
//! `hero classify <FILE>` prints which known error shape a saved body
//! matches. Exit code `0` for a recognized shape, `1` for `unrecognized`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hero_schema::classify_error;

/// Arguments for `hero classify`.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Path to a saved response body (JSON).
    pub file: PathBuf,
}

/// Execute `hero classify`.
pub fn run_classify(args: &ClassifyArgs, out: &mut impl Write) -> Result<u8> {
    let body = crate::read_json(&args.file)?;
    let shape = classify_error(&body);
    match shape.message() {
        Some(message) => writeln!(out, "{shape}: {message}")?,
        None => writeln!(out, "{shape}")?,
    }
    Ok(if shape.is_known() { 0 } else { 1 })
}

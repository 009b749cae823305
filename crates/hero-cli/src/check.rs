//! # Offline body check
//!
//! Validates a saved search response without touching the network.
//!
//! ```bash
//! hero check batman.json              # first violation, or a summary
//! hero check batman.json --all        # every violation
//! hero check batman.json --contract   # JSON Schema wire contract
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use hero_schema::{
    collect_violations, validate_hero_search_response, ContractError, ContractValidator,
};

/// Arguments for `hero check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to a saved search response body (JSON).
    pub file: PathBuf,

    /// List every violation instead of stopping at the first.
    #[arg(long)]
    pub all: bool,

    /// Also check the body against the wire contract schema.
    #[arg(long)]
    pub contract: bool,
}

/// Execute `hero check`.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let body = crate::read_json(&args.file)?;
    let mut ok = if args.all {
        report_all(&body, out)?
    } else {
        report_first(&body, out)?
    };
    if args.contract {
        ok &= report_contract(&body, out)?;
    }
    Ok(if ok { 0 } else { 1 })
}

fn report_first(body: &Value, out: &mut impl Write) -> Result<bool> {
    match validate_hero_search_response(body) {
        Ok(resp) => {
            writeln!(
                out,
                "OK: {} heroes for '{}'",
                resp.results.len(),
                resp.results_for
            )?;
            for hero in &resp.results {
                writeln!(out, "  {:>5}  {}", hero.id, hero.name)?;
            }
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "FAIL: {e}")?;
            Ok(false)
        }
    }
}

fn report_all(body: &Value, out: &mut impl Write) -> Result<bool> {
    let violations = collect_violations(body);
    if violations.is_empty() {
        writeln!(out, "OK: no violations")?;
        return Ok(true);
    }
    for v in &violations {
        writeln!(out, "  [{:?}] {v}", v.class())?;
    }
    writeln!(out, "FAIL: {} violations", violations.len())?;
    Ok(false)
}

fn report_contract(body: &Value, out: &mut impl Write) -> Result<bool> {
    let validator = ContractValidator::new()?;
    match validator.check(body) {
        Ok(()) => {
            writeln!(out, "contract: OK")?;
            Ok(true)
        }
        Err(ContractError::Broken { drift }) => {
            writeln!(out, "contract: {} violations", drift.len())?;
            for d in &drift {
                writeln!(out, "  {d}")?;
            }
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hero(name: &str) -> Value {
        json!({
            "id": "1", "name": name,
            "powerstats": {"intelligence": "1", "strength": "2", "speed": "3",
                           "durability": "4", "power": "5", "combat": "6"},
            "biography": {"full-name": "X", "alter-egos": "-", "aliases": ["-"],
                          "place-of-birth": "-", "first-appearance": "-",
                          "publisher": "P", "alignment": "good"},
            "appearance": {"gender": "Female", "race": "-", "height": ["5'5"],
                           "weight": ["120 lb"], "eye-color": "-", "hair-color": "-"},
            "work": {"occupation": "-", "base": "-"},
            "connections": {"group-affiliation": "-", "relatives": "-"},
            "image": {"url": "https://www.superherodb.com/pictures2/portraits/10/100/1.jpg"}
        })
    }

    fn write_body(dir: &tempfile::TempDir, body: &Value) -> PathBuf {
        let path = dir.path().join("body.json");
        std::fs::write(&path, serde_json::to_vec(body).unwrap()).unwrap();
        path
    }

    fn run(file: PathBuf, all: bool, contract: bool) -> (u8, String) {
        let args = CheckArgs {
            file,
            all,
            contract,
        };
        let mut out = Vec::new();
        let code = run_check(&args, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn valid_body_passes_with_summary() {
        let dir = tempfile::tempdir().unwrap();
        let body = json!({
            "response": "success",
            "results-for": "storm",
            "results": [hero("Storm")]
        });
        let file = write_body(&dir, &body);
        let (code, text) = run(file, false, true);
        assert_eq!(code, 0, "{text}");
        assert!(text.contains("OK: 1 heroes for 'storm'"));
        assert!(text.contains("Storm"));
        assert!(text.contains("contract: OK"));
    }

    #[test]
    fn first_violation_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = hero("Storm");
        h["appearance"]["gender"] = json!("female");
        let body = json!({"response": "success", "results-for": "storm", "results": [h]});
        let file = write_body(&dir, &body);
        let (code, text) = run(file, false, false);
        assert_eq!(code, 1);
        assert!(text.contains("FAIL: results[0].appearance.gender"), "{text}");
    }

    #[test]
    fn all_lists_every_violation() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = hero("");
        h["work"]["base"] = json!("");
        let body = json!({"response": "success", "results-for": "", "results": [h]});
        let file = write_body(&dir, &body);
        let (code, text) = run(file, true, false);
        assert_eq!(code, 1);
        assert!(text.contains("results[0].work.base"));
        assert!(text.contains("results[0].name"));
        assert!(text.contains("results_for"));
        assert!(text.contains("FAIL: 3 violations"), "{text}");
    }

    #[test]
    fn contract_failure_fails_an_otherwise_valid_body() {
        let dir = tempfile::tempdir().unwrap();
        let body = json!({"response": "success", "results_for": "storm", "results": []});
        let file = write_body(&dir, &body);
        let (code, text) = run(file, false, true);
        assert_eq!(code, 1);
        assert!(text.contains("OK: 0 heroes"));
        assert!(text.contains("contract: "), "{text}");
        assert!(!text.contains("contract: OK"));
    }
}

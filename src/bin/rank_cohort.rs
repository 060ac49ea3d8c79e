//! Batch ranking of a cohort read from JSON.
//!
//! Input is a JSON array of observations:
//!
//! ```json
//! [{"neuro_activity": 4, "respiratory_rate": 16, "oxygen_saturation": 96,
//!   "heart_rate": 80, "systolic_bp": 105, "diastolic_bp": 70, "body_temperature": 37}]
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin rank_cohort -- --input <file.json|-> [--format table|json] [--export-dir <dir>]
//! ```
//!
//! Patients are numbered P1, P2, ... in input order. Diagnostics go to stderr.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use vitalrank::adapters::json::JsonReportExporter;
use vitalrank::application::{CohortSnapshot, TriageService};
use vitalrank::domain::PatientObservation;

const USAGE: &str =
    "Usage: rank_cohort --input <file.json|-> [--format table|json] [--export-dir <dir>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

fn usage_error(message: &str) -> ! {
    eprintln!("{message}\n{USAGE}");
    std::process::exit(2);
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

fn render_table(snapshot: &CohortSnapshot) -> String {
    let mut out = format!(
        "{:<5} {:<6} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}  {:<20} {:<16} {}\n",
        "Rank", "ID", "P", "N", "U", "D+", "D-", "Csi", "Criticality", "Risk", "Uncertainty"
    );
    for r in &snapshot.ranked {
        out.push_str(&format!(
            "{:<5} {:<6} {:>7.4} {:>7.4} {:>7.4} {:>7.4} {:>7.4} {:>7.4}  {:<20} {:<16} {}\n",
            r.rank,
            r.id,
            r.aggregated.positive,
            r.aggregated.negative,
            r.aggregated.neutral,
            r.distance_to_best,
            r.distance_to_worst,
            r.closeness,
            r.labels.criticality.label(),
            r.labels.risk.label(),
            r.labels.uncertainty.label(),
        ));
    }
    if let Some(ideal) = &snapshot.ideal {
        out.push_str(&format!("\nPIS {}\nNIS {}\n", ideal.best, ideal.worst));
    }
    out
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let mut input: Option<String> = None;
    let mut format = OutputFormat::Table;
    let mut export_dir: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" | "-i" => {
                let p = args.next().unwrap_or_default();
                if p.is_empty() {
                    usage_error("--input needs a path");
                }
                input = Some(p);
            }
            "--format" | "-f" => {
                format = match args.next().as_deref() {
                    Some("table") => OutputFormat::Table,
                    Some("json") => OutputFormat::Json,
                    Some(other) => usage_error(&format!("Unknown format: {other}")),
                    None => usage_error("--format needs a value"),
                };
            }
            "--export-dir" => {
                let p = args.next().unwrap_or_default();
                if p.is_empty() {
                    usage_error("--export-dir needs a path");
                }
                export_dir = Some(PathBuf::from(p));
            }
            "-h" | "--help" => {
                println!(
                    "{USAGE}\n\nScores every observation, ranks the cohort (rank 1 = most urgent) and prints the result. With --export-dir, also writes a JSON cohort report there."
                );
                return Ok(());
            }
            _ => usage_error(&format!("Unknown arg: {arg}")),
        }
    }

    let Some(input) = input else {
        usage_error("Missing --input");
    };

    let raw = read_input(&input)?;
    let observations: Vec<PatientObservation> =
        serde_json::from_str(&raw).context("Input must be a JSON array of observations")?;
    if observations.is_empty() {
        bail!("Input contains no observations");
    }

    let exporter = Arc::new(JsonReportExporter::new(
        export_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
    ));
    let service = TriageService::new(exporter);

    for (i, observation) in observations.into_iter().enumerate() {
        service
            .add_patient(observation)
            .with_context(|| format!("Observation #{} rejected", i + 1))?;
    }

    let snapshot = service.snapshot()?;
    match format {
        OutputFormat::Table => print!("{}", render_table(&snapshot)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot.ranked)?),
    }

    if export_dir.is_some() {
        let receipt = service.export()?;
        eprintln!("Wrote {} bytes to {}", receipt.bytes, receipt.location);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_orders_by_rank() {
        let temp = tempfile::tempdir().expect("tempdir");
        let service = TriageService::new(Arc::new(JsonReportExporter::new(temp.path())));
        service
            .add_patient(PatientObservation::stable_sample())
            .expect("Should add");
        service
            .add_patient(PatientObservation::critical_sample())
            .expect("Should add");

        let table = render_table(&service.snapshot().expect("Should snapshot"));
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Rank"));
        assert!(lines[1].starts_with("1     P2"));
        assert!(lines[1].contains("very critical"));
        assert!(lines[2].starts_with("2     P1"));
        assert!(table.contains("PIS "));
    }

    #[test]
    fn test_parses_observation_array() {
        let raw = r#"[{"neuro_activity": 1, "respiratory_rate": 4, "oxygen_saturation": 60,
            "heart_rate": 20, "systolic_bp": 60, "diastolic_bp": 30, "body_temperature": 33}]"#;
        let parsed: Vec<PatientObservation> = serde_json::from_str(raw).expect("Valid input");
        assert_eq!(parsed, vec![PatientObservation::critical_sample()]);
    }
}

//! CLI for inspecting posture report populations offline.
//!
//! Subcommands:
//! - `list`: Load reports, apply filters, print annotated verdicts.
//! - `stats`: Print snapshot percentages and the calendar-day trend.
//! - `export`: Write the report population as CSV.
//!
//! Exit codes: 0 = success, 1 = validation/query error, 2 = I/O or store
//! error.

use std::fs;
use std::process;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use posturewatch_common::ReportPayload;
use posturewatch_engine::query::{QueryParams, ReportQuery};
use posturewatch_engine::{EngineError, MemoryReportStore, ReportService};

#[derive(Parser)]
#[command(name = "posturewatch", about = "Endpoint posture compliance toolkit")]
struct Cli {
    /// Path to a JSON array of report payloads.
    #[arg(long, global = true, default_value = "reports.json")]
    reports: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List reports with derived verdicts.
    List {
        /// Platform filter (e.g. windows, darwin, linux).
        #[arg(long)]
        platform: Option<String>,
        /// Status filter: compliant or non-compliant.
        #[arg(long)]
        status: Option<String>,
        /// Maximum number of reports to print.
        #[arg(long)]
        limit: Option<String>,
    },
    /// Print fleet compliance statistics.
    Stats {
        /// Anchor date for the trend (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        today: Option<String>,
    },
    /// Export all reports as CSV.
    Export {
        /// Output path. Prints to stdout when omitted.
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let service = match load_service(&cli.reports) {
        Ok(service) => service,
        Err(code) => process::exit(code),
    };

    let exit_code = match cli.command {
        Commands::List {
            platform,
            status,
            limit,
        } => run_list(&service, platform, status, limit),
        Commands::Stats { today } => run_stats(&service, today.as_deref()),
        Commands::Export { output } => run_export(&service, output.as_deref()),
    };

    process::exit(exit_code);
}

fn load_service(path: &str) -> Result<ReportService<MemoryReportStore>, i32> {
    let content = fs::read_to_string(path).map_err(|e| {
        eprintln!("Failed to read {}: {}", path, e);
        2
    })?;
    let payloads: Vec<ReportPayload> = serde_json::from_str(&content).map_err(|e| {
        eprintln!("Failed to parse {}: {}", path, e);
        2
    })?;

    let service = ReportService::new(MemoryReportStore::new());
    for payload in payloads {
        if let Err(e) = service.ingest(payload) {
            eprintln!("Rejected report: {}", e);
            return Err(1);
        }
    }
    Ok(service)
}

fn run_list(
    service: &ReportService<MemoryReportStore>,
    platform: Option<String>,
    status: Option<String>,
    limit: Option<String>,
) -> i32 {
    let params = QueryParams {
        platform,
        status,
        limit,
        start_date: None,
        end_date: None,
    };
    let query = match ReportQuery::from_params(&params) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    match service.list(&query) {
        Ok(reports) => {
            for annotated in &reports {
                let failing = annotated.verdict.failing_controls();
                let detail = if failing.is_empty() {
                    "compliant".to_string()
                } else {
                    let labels: Vec<&str> = failing.iter().map(|c| c.label()).collect();
                    format!("failing: {}", labels.join(", "))
                };
                println!(
                    "{}  {}  {}  {}",
                    annotated.report.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    annotated.platform,
                    annotated.report.machine_id,
                    detail
                );
            }
            println!("{} report(s)", reports.len());
            0
        }
        Err(e) => exit_code_for(&e),
    }
}

fn run_stats(service: &ReportService<MemoryReportStore>, today: Option<&str>) -> i32 {
    let anchor = match today {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                eprintln!("Invalid --today '{}', expected YYYY-MM-DD", raw);
                return 1;
            }
        },
        None => Utc::now().date_naive(),
    };

    match service.stats(anchor) {
        Ok(stats) => {
            for point in &stats.pie_data {
                println!("{}: {:.1}%", point.name, point.value);
            }
            println!();
            println!("date        encryption antivirus updates sleep");
            for point in &stats.line_data {
                println!(
                    "{}  {:>9.1}% {:>8.1}% {:>6.1}% {:>4.1}%",
                    point.date, point.encryption, point.antivirus, point.updates, point.sleep
                );
            }
            0
        }
        Err(e) => exit_code_for(&e),
    }
}

fn run_export(service: &ReportService<MemoryReportStore>, output: Option<&str>) -> i32 {
    let csv = match service.export_csv() {
        Ok(csv) => csv,
        Err(e) => return exit_code_for(&e),
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &csv) {
                eprintln!("Failed to write {}: {}", path, e);
                return 2;
            }
            println!("Exported to {}", path);
            0
        }
        None => {
            print!("{}", csv);
            0
        }
    }
}

fn exit_code_for(error: &EngineError) -> i32 {
    eprintln!("{}", error);
    match error {
        EngineError::Validation { .. } | EngineError::Query { .. } => 1,
        EngineError::Store { .. } | EngineError::Serialization { .. } => 2,
    }
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "ringdeque workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the deque benchmarks and summarize them against std
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const BENCH_NAME: &str = "deque_benchmark";

/// Benchmark id prefixes and their report labels, in column order.
const IMPLEMENTATIONS: &[(&str, &str)] = &[
    ("ring_deque_", "ring_deque"),
    ("std_vec_deque_", "std_vec_deque"),
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    // Build first to avoid measuring build time
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["build", "--bench", BENCH_NAME, "--release"])
        .status()?;
    if !status.success() {
        anyhow::bail!("Failed to compile benchmarks");
    }

    println!("\n>>> Running {}", BENCH_NAME);
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0");
    cmd.arg("bench").arg("--bench").arg(BENCH_NAME);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        // Aggressive settings for CI to avoid timeouts
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().context("Failed to run benchmarks")?;
    if !status.success() {
        anyhow::bail!("Benchmark run failed");
    }
    println!("Finished in {:.2?}", start.elapsed());

    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let mut results: HashMap<String, HashMap<String, f64>> = HashMap::new();

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    collect_results(criterion_dir, &mut results);

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }

    use std::io::Write;
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Deque Benchmark Report")?;

    let mut workloads: Vec<_> = results.keys().cloned().collect();
    workloads.sort();

    // Header
    write!(file, "| Workload |")?;
    for (_, label) in IMPLEMENTATIONS {
        write!(file, " {} (Ops/s) |", label)?;
    }
    writeln!(file, " vs std |")?;

    // Separator
    write!(file, "|---|")?;
    for _ in IMPLEMENTATIONS {
        write!(file, "---|")?;
    }
    writeln!(file, "---|")?;

    // Rows
    for workload in workloads {
        let row = &results[&workload];
        write!(file, "| {} |", workload)?;

        for (_, label) in IMPLEMENTATIONS {
            if let Some(ops) = row.get(*label) {
                write!(file, " {} |", format_ops(*ops))?;
            } else {
                write!(file, " N/A |")?;
            }
        }

        match (row.get("ring_deque"), row.get("std_vec_deque")) {
            (Some(ours), Some(std_ops)) if *std_ops > 0.0 => {
                writeln!(file, " **{:.2}x** |", ours / std_ops)?;
            }
            _ => writeln!(file, " - |")?,
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{:.0}", ops)
    }
}

fn collect_results(dir: &Path, results: &mut HashMap<String, HashMap<String, f64>>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(&path, results);
        } else if path.file_name().and_then(|s| s.to_str()) == Some("estimates.json") {
            // Structure: .../<benchmark id>/<baseline>/estimates.json
            let Some(baseline_dir) = path.parent() else {
                continue;
            };
            let baseline = baseline_dir
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            if baseline != "new" {
                continue;
            }
            let Some(bench_dir) = baseline_dir.parent() else {
                continue;
            };
            let bench_name = bench_dir.file_name().and_then(|s| s.to_str()).unwrap_or("");
            if bench_name.is_empty() || bench_name == "report" {
                continue;
            }
            let Some((label, workload)) = classify(bench_name) else {
                continue;
            };

            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) {
                    if let Some(mean) = json.get("mean").and_then(|m| m.get("point_estimate")) {
                        let time_ns = mean.as_f64().unwrap_or(0.0);
                        if time_ns > 0.0 {
                            results
                                .entry(workload.to_string())
                                .or_default()
                                .insert(label.to_string(), 1e9 / time_ns);
                        }
                    }
                }
            }
        }
    }
}

/// Splits a benchmark id into its implementation label and workload name.
fn classify(bench_name: &str) -> Option<(&'static str, &str)> {
    for &(prefix, label) in IMPLEMENTATIONS {
        if let Some(workload) = bench_name.strip_prefix(prefix) {
            return Some((label, workload));
        }
    }
    None
}

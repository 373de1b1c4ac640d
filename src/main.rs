use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use valorant_report::batch::{self, ConvertOptions, DEFAULT_OUTPUT_PREFIX};
use valorant_report::{MatchReport, Team, export};

#[derive(Parser, Debug)]
#[command(
    name = "valorant-report",
    about = "Convert captured VALORANT match-history responses into match reports",
    version
)]
struct Cli {
    /// Capture file or directory of `*.json` captures
    #[arg(default_value = "./jsons_rbw")]
    input: PathBuf,

    /// Output file, or output directory for batch runs
    #[arg(default_value = "./matches/outputs")]
    output: PathBuf,

    /// File name prefix for generated reports
    #[arg(long, default_value = DEFAULT_OUTPUT_PREFIX)]
    prefix: String,

    /// Write single-line JSON instead of indented JSON
    #[arg(long)]
    compact: bool,

    /// Worker threads for directory input
    #[arg(long)]
    jobs: Option<usize>,

    /// Also write per-player stats of all converted matches to this CSV file
    #[arg(long = "stats-csv")]
    stats_csv: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when at least one capture failed to convert.
fn run(args: &Cli) -> Result<bool> {
    let opts = ConvertOptions {
        output_prefix: args.prefix.clone(),
        pretty: !args.compact,
        jobs: args.jobs,
    };

    println!("{}", "=".repeat(60));
    println!("VALORANT match report converter");
    println!("{}", "=".repeat(60));

    let all_ok = if args.input.is_file() {
        run_single(args, &opts)?
    } else if args.input.is_dir() {
        run_batch(args, &opts)?
    } else {
        bail!("input path does not exist: {}", args.input.display());
    };

    print_notes();
    Ok(all_ok)
}

fn run_single(args: &Cli, opts: &ConvertOptions) -> Result<bool> {
    println!("\nMode: single file");
    let output = batch::output_path_for(&args.input, &args.output, opts);
    println!("Reading {}", args.input.display());

    let report = match batch::convert_file(&args.input, &output, opts) {
        Ok(report) => report,
        Err(err) => {
            println!("x Failed: {}", args.input.display());
            println!("  error: {}", err);
            return Ok(false);
        }
    };
    println!("Saved to {}", output.display());

    if let Some(csv_path) = &args.stats_csv {
        let source = args
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        export::write_stats_csv([(source.as_str(), &report)], csv_path)
            .with_context(|| format!("writing stats CSV {}", csv_path.display()))?;
        println!("Stats CSV written to {}", csv_path.display());
    }

    print_report(&report);
    Ok(true)
}

fn run_batch(args: &Cli, opts: &ConvertOptions) -> Result<bool> {
    println!("\nMode: directory batch");
    println!("Input directory:  {}", args.input.display());
    println!("Output directory: {}", args.output.display());

    let summary = batch::convert_dir(&args.input, &args.output, opts)
        .with_context(|| format!("converting directory {}", args.input.display()))?;

    if summary.total() == 0 {
        println!("\nx No JSON files found");
        return Ok(true);
    }

    println!("\nFound {} JSON files", summary.total());
    for (idx, outcome) in summary.outcomes.iter().enumerate() {
        println!(
            "[{}/{}] {}",
            idx + 1,
            summary.total(),
            outcome.source_name()
        );
        match &outcome.result {
            Ok(_) => println!(
                "  ok -> {}",
                outcome
                    .output
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            ),
            Err(err) => println!("  x failed: {}", err),
        }
    }

    if let Some(csv_path) = &args.stats_csv {
        let reports = summary.reports();
        let rows = export::write_stats_csv(
            reports.iter().map(|(source, report)| (source.as_str(), *report)),
            csv_path,
        )
        .with_context(|| format!("writing stats CSV {}", csv_path.display()))?;
        println!("\nStats CSV: {} rows -> {}", rows, csv_path.display());
    }

    let failed = summary.failed().count();
    println!("\n{}", "=".repeat(60));
    println!("Total files: {}", summary.total());
    println!("Succeeded:   {}", summary.succeeded());
    println!("Failed:      {}", failed);
    println!("Output dir:  {}", args.output.display());

    Ok(failed == 0)
}

fn print_report(report: &MatchReport) {
    println!("\nMap: {}", report.map);
    println!("Score: {} - {}", report.team_a().score, report.team_b().score);
    print_team(report.team_a());
    print_team(report.team_b());
}

fn print_team(team: &Team) {
    println!("\n{}:", team.team_name);
    for player in &team.players {
        let agent = player.agents.first().map(String::as_str).unwrap_or("");
        println!(
            "  {:<20} {:<10} K/D/A: {}/{}/{} Rating: {}",
            player.name, agent, player.stats.k, player.stats.d, player.stats.a, player.stats.rating
        );
    }
}

fn print_notes() {
    println!("\n{}", "=".repeat(60));
    println!("Notes:");
    println!("  - nationality is set to 'cn'");
    println!("  - kast is the placeholder '0%'");
    println!("  - fd (first deaths) is the placeholder 0");
    println!("  - round_history is filled with 'none'");
    println!("  - rating is an unofficial estimate");
    println!("{}", "=".repeat(60));
}

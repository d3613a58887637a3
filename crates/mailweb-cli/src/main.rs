//! Mailweb CLI — find the people holding an email network together.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use mailweb_core::config::AnalysisConfig;
use mailweb_core::graph::query::describe;
use mailweb_core::output::{write_connectors, write_output};
use mailweb_core::pipeline::{self, PipelineOutput};
use mailweb_core::session::{format_footprint, run_query_session};

#[derive(Parser)]
#[command(
    name = "mailweb",
    about = "Mailweb - Find the connectors in an email network"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the contact graph from a mail folder and list its connectors
    Analyze {
        /// Root folder of the mail corpus
        path: PathBuf,

        /// Write connectors to this file, one address per line
        #[arg(short, long)]
        output: Option<String>,

        /// Write a JSON report to this file
        #[arg(long)]
        json: Option<String>,

        /// File or folder names to skip (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Skip message files larger than this many bytes
        #[arg(long, default_value = "10000000")]
        max_file_size: u64,

        /// Exit after the analysis instead of prompting for addresses
        #[arg(long)]
        no_interactive: bool,

        /// Show per-phase timing breakdown and debug logs
        #[arg(long)]
        verbose: bool,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },
    /// Print the footprint of one or more addresses
    Query {
        /// Root folder of the mail corpus
        path: PathBuf,

        /// Addresses to look up
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("MAILWEB_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            output,
            json,
            exclude,
            max_file_size,
            no_interactive,
            verbose,
            quiet,
        } => {
            let mail_path = path.canonicalize().unwrap_or(path);

            let config = AnalysisConfig {
                mail_path: mail_path.to_string_lossy().to_string(),
                output_path: output,
                json_path: json,
                exclude_patterns: exclude,
                max_file_size,
                verbose,
                quiet,
            };
            init_logging(config.verbose);

            let out = if config.quiet {
                run_quiet(&config)
            } else {
                run_with_progress(&config)
            };

            write_files(&config, &out);

            if !no_interactive && !config.quiet {
                let stdin = std::io::stdin();
                if let Err(e) = run_query_session(&out.graph, stdin.lock(), std::io::stdout()) {
                    eprintln!("Error reading input: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Query { path, addresses } => {
            init_logging(false);
            let config = AnalysisConfig {
                mail_path: path.to_string_lossy().to_string(),
                ..Default::default()
            };
            let graph = match pipeline::build_graph(&config) {
                Ok(g) => g,
                Err(e) => {
                    eprintln!("Analysis failed: {e}");
                    std::process::exit(1);
                }
            };
            for address in &addresses {
                let fp = describe(&graph, address.trim());
                if fp.present {
                    print!("{}", format_footprint(&fp));
                } else {
                    println!("Email address ({}) not found in the dataset.", fp.identity);
                }
            }
        }
    }
}

fn run_quiet(config: &AnalysisConfig) -> PipelineOutput {
    match pipeline::run_pipeline(config, None) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run_with_progress(config: &AnalysisConfig) -> PipelineOutput {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Initialising...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |_name, label| {
            pb.set_message(label.to_string());
        })
    };

    let start = Instant::now();
    let out = match pipeline::run_pipeline(config, Some(progress)) {
        Ok(o) => o,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    };
    pb.finish_and_clear();

    let result = &out.result;
    println!(
        "\n{}  Mailweb Analysis: {}",
        style("✓").green().bold(),
        style(
            std::path::Path::new(&config.mail_path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        )
        .bold()
    );
    println!("  {:<14} {}", "Files:", result.stat("files"));
    println!("  {:<14} {}", "Messages:", result.stat("messages"));
    println!("  {:<14} {}", "Identities:", result.stat("identities"));
    println!("  {:<14} {}", "Edges:", result.stat("edges"));
    println!("  {:<14} {}", "Components:", result.stat("components"));
    println!("  {:<14} {}", "Connectors:", result.stat("connectors"));

    let duration = start.elapsed();
    println!(
        "  {:<14} {:.1}ms",
        "Duration:",
        duration.as_secs_f64() * 1000.0
    );

    if config.verbose {
        if let Some(serde_json::Value::Object(timings)) = result.metadata.get("phase_timings") {
            println!("\n  Phase Timings:");
            for (phase, secs) in timings {
                if let Some(val) = secs.as_f64() {
                    println!("    {:<14} {:.1}ms", phase, val * 1000.0);
                }
            }
        }
    }

    if !out.report.connectors.is_empty() {
        println!();
        for connector in &out.report.connectors {
            println!("  {} {}", style("Connector:").cyan(), connector);
        }
    }

    out
}

fn write_files(config: &AnalysisConfig, out: &PipelineOutput) {
    if let Some(ref path) = config.output_path {
        if let Err(e) = write_connectors(&out.report.connectors, path) {
            eprintln!("Error writing output: {e}");
            std::process::exit(1);
        }
        if !config.quiet {
            println!("\n  {} {}", style("Connectors written to:").green(), path);
        }
    }

    if let Some(ref path) = config.json_path {
        if let Err(e) = write_output(&out.result, path) {
            eprintln!("Error writing output: {e}");
            std::process::exit(1);
        }
        if !config.quiet {
            println!("  {} {}", style("Report written to:").green(), path);
        }
    }
}

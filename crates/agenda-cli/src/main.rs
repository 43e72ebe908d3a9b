//! `agenda` CLI — compute bookable slots from a JSON agenda configuration.
//!
//! ## Usage
//!
//! ```sh
//! # Compute slots (stdin → stdout, JSON)
//! cat agenda.json | agenda slots
//!
//! # From file to file
//! agenda slots -i agenda.json -o slots.json
//!
//! # Human-readable table
//! agenda slots -i agenda.json --format table
//!
//! # Validate a configuration without searching
//! agenda check -i agenda.json
//!
//! # Trace the search on stderr
//! agenda -v slots -i agenda.json
//! ```

use std::io::{self, Read};

use agenda_engine::{render_ranges, AgendaConfig, RangeReport};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "agenda",
    version,
    about = "Bookable slot calculator for business-hours calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log the search to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the bookable slots of a configuration
    Slots {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Validate a configuration without computing slots
    Check {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            Cli::parse_from(["agenda", "--help"]);
            unreachable!();
        }
    };

    match command {
        Commands::Slots {
            input,
            output,
            format,
        } => {
            let json = read_input(input.as_deref())?;
            let config = AgendaConfig::from_json(&json).context("Failed to parse configuration")?;
            let timezone = config.timezone().context("Invalid configuration")?;
            let calculator = config
                .into_agenda()
                .and_then(|agenda| agenda.build())
                .context("Invalid configuration")?;

            let ranges = calculator.calculate();
            info!(count = ranges.len(), "computed bookable ranges");

            let reports = render_ranges(&ranges, timezone).context("Failed to render slots")?;
            let rendered = match format {
                Format::Json => {
                    let mut out = serde_json::to_string_pretty(&reports)?;
                    out.push('\n');
                    out
                }
                Format::Table => render_table(&reports),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { input } => {
            let json = read_input(input.as_deref())?;
            let config = AgendaConfig::from_json(&json).context("Failed to parse configuration")?;
            config.timezone().context("Invalid configuration")?;
            let calculator = config
                .into_agenda()
                .and_then(|agenda| agenda.build())
                .context("Invalid configuration")?;
            println!(
                "OK: horizon {}, {} minute slots, {} events, {} resources",
                calculator.horizon(),
                calculator.duration().num_minutes(),
                calculator.events().len(),
                calculator.resources().len()
            );
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` selects debug and `-vv` trace.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// One line per slot: `start  end  [resources]`.
fn render_table(reports: &[RangeReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&report.start);
        out.push_str("  ");
        out.push_str(&report.end);
        if let Some(resources) = &report.resources {
            let ids: Vec<String> = resources.iter().map(|id| id.to_string()).collect();
            out.push_str(&format!("  [{}]", ids.join(", ")));
        }
        out.push('\n');
    }
    out
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

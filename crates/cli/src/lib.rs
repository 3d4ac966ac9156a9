pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use trendwatch_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "trendwatch",
    about = "Trendwatch digest operator CLI",
    long_about = "Extract opportunities from agent digest output, answer approval replies, and inspect saved digests.",
    after_help = "Examples:\n  trendwatch extract --date 2026-02-02 --homelab homelab.md --work work.md\n  trendwatch reply --date 2026-02-02 \"approve H1, W1 brief\"\n  trendwatch show --date 2026-02-02"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Override storage.output_dir")]
    output_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Extract opportunities from both agent outputs and save the digest snapshot")]
    Extract {
        #[arg(long, value_parser = parse_digest_date)]
        date: String,
        #[arg(long, help = "Homelab agent output (markdown)")]
        homelab: PathBuf,
        #[arg(long, help = "Work agent output (markdown)")]
        work: PathBuf,
        #[arg(long, help = "Timestamp of the posted digest message")]
        message_ts: Option<String>,
    },
    #[command(about = "Attach the posted digest message timestamp to a saved snapshot")]
    RecordTs {
        #[arg(long, value_parser = parse_digest_date)]
        date: String,
        message_ts: String,
    },
    #[command(about = "Handle an approval reply against a saved digest")]
    Reply {
        #[arg(long, value_parser = parse_digest_date)]
        date: String,
        text: String,
    },
    #[command(about = "Print a saved digest")]
    Show {
        #[arg(long, value_parser = parse_digest_date)]
        date: String,
        #[arg(long, help = "Emit the Block Kit payload instead of formatted text")]
        blocks: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let overrides = ConfigOverrides { output_dir: cli.output_dir, ..ConfigOverrides::default() };

    if let Ok(config) =
        AppConfig::load(LoadOptions { overrides: overrides.clone(), ..LoadOptions::default() })
    {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Extract { date, homelab, work, message_ts } => commands::extract::run(
            commands::extract::ExtractArgs {
                digest_date: &date,
                homelab: &homelab,
                work: &work,
                message_ts: message_ts.as_deref(),
            },
            overrides,
        ),
        Command::RecordTs { date, message_ts } => {
            commands::record_ts::run(&date, &message_ts, overrides)
        }
        Command::Reply { date, text } => commands::reply::run(&date, &text, overrides),
        Command::Show { date, blocks } => commands::show::run(&date, blocks, overrides),
        Command::Config => commands::config::run(overrides),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout stays a single JSON outcome.
fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder =
        tracing_subscriber::fmt().with_target(false).with_max_level(log_level).with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn parse_digest_date(raw: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|error| format!("expected a YYYY-MM-DD digest date: {error}"))
}

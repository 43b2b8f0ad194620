#![forbid(unsafe_code)]
//! frost-gen Command Line Interface

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use console::style;

use frost::commands::{execute_generate, GenerateOptions, GenerateStatus};
use frost::Config;

#[derive(Parser)]
#[command(name = "frost-gen")]
#[command(about = "Generate frost reflection metadata from annotated C++ headers")]
#[command(version)]
struct Cli {
    /// C++ header to scan
    input: PathBuf,

    /// Write the generated header here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file path (defaults to .frost.config.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compare against --output instead of writing; exit 1 when stale
    #[arg(long, requires = "output")]
    check: bool,

    /// Print the resolved declarations as JSON instead of the header
    #[arg(long, conflicts_with = "check")]
    dump_json: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn run(cli: Cli) -> anyhow::Result<GenerateStatus> {
    init_tracing(cli.verbose)?;

    let config = Config::resolve(cli.config.as_deref())?;

    let options = GenerateOptions {
        input: cli.input,
        output: cli.output,
        check: cli.check,
        dump_json: cli.dump_json,
    };
    execute_generate(options, config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(GenerateStatus::Done) => ExitCode::SUCCESS,
        Ok(GenerateStatus::Stale) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{} {:#}", style("✗").red(), error);
            ExitCode::FAILURE
        }
    }
}

mod report;

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use codespan_reporting::term::termcolor::ColorChoice;
use tracing::info;
use tracing_subscriber::EnvFilter;

use converter::{Config, ConvertError};

use crate::report::Reporter;

#[derive(Parser)]
#[command(
    name = "roam2md",
    version,
    about = "Convert a Roam Research JSON export into markdown files"
)]
struct Cli {
    /// Roam JSON export to convert
    #[arg(short, long)]
    input: PathBuf,

    /// Directory to write markdown into (defaults to the current directory)
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Disable colored diagnostic output
    #[arg(long)]
    no_color: bool,

    /// Hide progress bars
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Usage errors exit 1 like every other failure; help and version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            let code = match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            process::exit(code);
        }
    };

    if let Err(error) = do_run(cli) {
        eprintln!("error: {}", error);
        eprintln!("{}", Cli::command().render_usage());
        process::exit(1);
    }
}

fn do_run(cli: Cli) -> Result<(), ConvertError> {
    let color_choice = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let config = Config::new(cli.input, cli.out_dir)?;

    let mut reporter = Reporter::new(cli.quiet, color_choice);
    let summary = converter::run(&config, &mut reporter)?;

    info!(
        written = summary.pages_written,
        daily = summary.daily_pages,
        referenced = summary.referenced_blocks,
        unresolved = summary.diagnostics.len(),
        out_dir = %config.out_dir.display(),
        "conversion finished"
    );
    Ok(())
}

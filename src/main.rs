mod input;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use textcal_core::{DocumentAssembler, RunContext, TextcalConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use render::Render;

#[derive(Parser)]
#[command(name = "textcal")]
#[command(about = "Convert plain-text agenda files into a single iCalendar document")]
#[command(version)]
struct Cli {
    /// Agenda files, converted in order ("-" reads standard input)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write the calendar to this file instead of standard output
    /// (overrides `output` in the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to ~/.config/textcal/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Leave run timestamps out of the UID digest so UIDs match between runs
    #[arg(long)]
    stable_uids: bool,

    /// Log how every line was classified
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(rust_log.as_deref(), verbose))
        .init();
}

/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "warn" };

    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

/// Convert every input file. Returns whether a calendar was written.
fn run(cli: Cli) -> Result<bool> {
    let mut config = TextcalConfig::load(cli.config.as_deref())?;
    if cli.stable_uids {
        config.stable_uids = true;
    }

    // The only clock sample of the run
    let ctx = RunContext::capture();
    let mut assembler = DocumentAssembler::new(ctx, &config);

    for path in &cli.files {
        let name = input::display_name(path);
        match input::read_source(path) {
            Ok(contents) => {
                debug!(file = %name, bytes = contents.len(), "converting");
                let event_lines = assembler.feed_source(&name, &contents);
                debug!(file = %name, event_lines, "converted");
            }
            Err(err) => assembler.file_unreadable(&name, err.to_string()),
        }
    }

    let conversion = assembler.finish();

    for diagnostic in &conversion.diagnostics {
        eprintln!("{}", diagnostic.render());
    }
    eprintln!("{}", conversion.render());

    match conversion.document {
        Some(ref document) => {
            let output = cli.output.or_else(|| config.output_path());
            input::write_output(output.as_deref(), document)?;
            info!(events = conversion.event_count, "calendar written");
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["textcal"]).is_err());
    }

    #[test]
    fn parses_files_and_flags() {
        let cli = Cli::try_parse_from([
            "textcal",
            "-o",
            "out.ics",
            "--stable-uids",
            "home.txt",
            "work.txt",
        ])
        .unwrap();

        assert_eq!(cli.files, [PathBuf::from("home.txt"), PathBuf::from("work.txt")]);
        assert_eq!(cli.output, Some(PathBuf::from("out.ics")));
        assert!(cli.stable_uids);
        assert!(!cli.verbose);
    }

    #[test]
    fn rust_log_is_not_overridden() {
        let filter = log_filter(Some("debug"), false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = log_filter(Some("error"), true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn verbose_picks_default_level_without_rust_log() {
        assert_eq!(log_filter(None, false).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(None, true).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some(" "), false).max_level_hint(), Some(LevelFilter::WARN));
    }
}

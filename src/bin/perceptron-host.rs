//! Headless bridge that keeps a training session for a host document over stdio.
//!
//! Startup probes the host and picks up the saved state; afterwards every
//! stdin line is a host request answered on stdout.

use std::path::PathBuf;

use perceptron_trainer::dataset;
use perceptron_trainer::host::{self, JsonLinesTransport};
use perceptron_trainer::logging;
use perceptron_trainer::session::TrainingSession;
use perceptron_trainer::settings::{self, AppSettings};
use tracing::{info, warn};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init_file_only() {
        eprintln!("Logging disabled: {err}");
    }
    let settings = settings::load_or_default().unwrap_or_else(|err| {
        warn!("Using default settings: {err}");
        AppSettings::default()
    });
    let dataset = match &options.dataset {
        Some(path) => dataset::load_file(path).map_err(|err| err.to_string())?,
        None => dataset::sample_dataset(),
    };
    let mut session = new_session(&settings);

    let stdin = std::io::stdin();
    let mut transport = JsonLinesTransport::new(stdin.lock(), std::io::stdout().lock());
    let saved = host::connect(&mut transport, settings.retry()).map_err(|err| err.to_string())?;
    if let Some(state) = &saved {
        session.restore(state);
    }
    session.load_examples(dataset.examples);
    info!(dataset = %dataset.name, "Serving host requests");

    let (reader, writer) = transport.into_parts();
    host::serve_json_lines(&mut session, reader, writer).map_err(|err| err.to_string())
}

fn new_session(settings: &AppSettings) -> TrainingSession {
    let mut session = TrainingSession::new(settings.default_model(), settings.learning_rate);
    let display = session.display_mut();
    display.show_all_cases = settings.display.show_all_cases;
    display.show_error = settings.display.show_error;
    session
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    dataset: Option<PathBuf>,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--dataset" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--dataset requires a value".to_string())?;
                options.dataset = Some(PathBuf::from(value));
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn help_text() -> String {
    [
        "perceptron-host",
        "",
        "Keep a training session for a host document, speaking JSON lines on stdio.",
        "",
        "Usage:",
        "  perceptron-host [--dataset <file.json>]",
        "",
        "Retry behaviour comes from the [host] section of config.toml.",
        "Logs go to the log directory only; stdout carries the protocol.",
    ]
    .join("\n")
}

//! CLI utility to render one training view to SVG without a window.

use std::io::Write;
use std::path::PathBuf;

use perceptron_trainer::dataset;
use perceptron_trainer::geometry::Viewport;
use perceptron_trainer::perceptron::Model;
use perceptron_trainer::render::{self, svg};
use perceptron_trainer::session::{DEFAULT_LEARNING_RATE, InteractionState, TrainingSession};

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
    let dataset = match &options.dataset {
        Some(path) => dataset::load_file(path).map_err(|err| err.to_string())?,
        None => dataset::sample_dataset(),
    };
    let mut session = TrainingSession::new(Model::DEFAULT, DEFAULT_LEARNING_RATE);
    if let Some(path) = &options.state {
        let state = InteractionState::load(path).map_err(|err| err.to_string())?;
        session.restore(&state);
    }
    session.load_examples(dataset.examples);

    let viewport = Viewport::new(options.width, options.height, Viewport::DEFAULT.pad);
    let document = svg::to_svg(&render::render(&session, viewport), viewport);
    match &options.out {
        Some(path) => std::fs::write(path, document)
            .map_err(|err| format!("Failed to write {}: {err}", path.display()))?,
        None => std::io::stdout()
            .write_all(document.as_bytes())
            .map_err(|err| format!("Failed to write SVG to stdout: {err}"))?,
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
struct Options {
    dataset: Option<PathBuf>,
    state: Option<PathBuf>,
    width: f64,
    height: f64,
    out: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dataset: None,
            state: None,
            width: Viewport::DEFAULT.width,
            height: Viewport::DEFAULT.height,
            out: None,
        }
    }
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
            "--state" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--state requires a value".to_string())?;
                options.state = Some(PathBuf::from(value));
            }
            "--width" => {
                idx += 1;
                options.width = parse_dimension("--width", args.get(idx))?;
            }
            "--height" => {
                idx += 1;
                options.height = parse_dimension("--height", args.get(idx))?;
            }
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                options.out = Some(PathBuf::from(value));
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    let floor = 2.0 * Viewport::DEFAULT.pad + 1.0;
    if options.width < floor || options.height < floor {
        return Err(format!("--width and --height must be at least {floor}"));
    }
    Ok(Some(options))
}

fn parse_dimension(flag: &str, value: Option<&String>) -> Result<f64, String> {
    let value = value.ok_or_else(|| format!("{flag} requires a value"))?;
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| format!("Invalid {flag} value: {value}"))
}

fn help_text() -> String {
    [
        "perceptron-render",
        "",
        "Render the trainer's plot for one session state as SVG.",
        "",
        "Usage:",
        "  perceptron-render [--dataset <file.json>] [--state <session.json>] [--width <px>] [--height <px>] [--out <file.svg>]",
        "",
        "Without --dataset the embedded sample dataset is used.",
        "Without --out the SVG is written to stdout.",
    ]
    .join("\n")
}

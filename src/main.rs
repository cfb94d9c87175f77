#![deny(missing_docs)]

//! Entry point for the egui perceptron trainer.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::path::PathBuf;

use eframe::egui;
use perceptron_trainer::app_dirs;
use perceptron_trainer::dataset::{self, Dataset};
use perceptron_trainer::egui_app::controller::{TrainerController, read_saved_state};
use perceptron_trainer::egui_app::ui::{MIN_VIEWPORT_SIZE, TrainerApp};
use perceptron_trainer::logging;
use perceptron_trainer::settings::{self, AppSettings};
use tracing::warn;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = settings::load_or_default().unwrap_or_else(|err| {
        warn!("Using default settings: {err}");
        AppSettings::default()
    });
    let dataset = load_dataset(dataset_arg(std::env::args().skip(1)))?;

    let session_path = match app_dirs::session_path() {
        Ok(path) => Some(path),
        Err(err) => {
            warn!("Session will not be saved: {err}");
            None
        }
    };
    let saved = session_path.as_deref().and_then(read_saved_state);
    let mut controller = TrainerController::new(&settings, dataset, saved);
    if let Some(path) = session_path {
        controller = controller.with_session_path(path);
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title("Perceptron Trainer")
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Perceptron Trainer",
        native_options,
        Box::new(move |_cc| Ok(Box::new(TrainerApp::new(controller)))),
    )?;
    Ok(())
}

/// Value of `--dataset <path>` or `--dataset=<path>`, if given.
fn dataset_arg(args: impl IntoIterator<Item = String>) -> Option<PathBuf> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--dataset" {
            return args.next().map(PathBuf::from);
        }
        if let Some(value) = arg.strip_prefix("--dataset=") {
            return Some(PathBuf::from(value));
        }
    }
    None
}

fn load_dataset(path: Option<PathBuf>) -> Result<Dataset, dataset::DatasetError> {
    match path {
        Some(path) => dataset::load_file(&path),
        None => Ok(dataset::sample_dataset()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn dataset_flag_accepts_both_spellings() {
        assert_eq!(
            dataset_arg(args(&["--dataset", "reviews.json"])),
            Some(PathBuf::from("reviews.json"))
        );
        assert_eq!(
            dataset_arg(args(&["--dataset=cases.json"])),
            Some(PathBuf::from("cases.json"))
        );
        assert_eq!(dataset_arg(args(&["--dataset"])), None);
        assert_eq!(dataset_arg(args(&[])), None);
    }

    #[test]
    fn sample_dataset_is_the_fallback() {
        let dataset = load_dataset(None).unwrap();
        assert_eq!(dataset.examples.len(), 9);
    }
}

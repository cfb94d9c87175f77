mod support;

use perceptron_trainer::app_dirs::{self, APP_DIR_NAME};
use perceptron_trainer::dataset::sample_dataset;
use perceptron_trainer::egui_app::controller::{TrainerController, read_saved_state};
use perceptron_trainer::session::Verdict;
use perceptron_trainer::settings::{self, AppSettings};
use support::config_env::ConfigHomeGuard;

#[test]
fn settings_live_under_the_configured_home() {
    let temp = tempfile::tempdir().unwrap();
    let _env = ConfigHomeGuard::set(temp.path().to_path_buf());

    assert_eq!(settings::load_or_default().unwrap(), AppSettings::default());

    let mut custom = AppSettings::default();
    custom.learning_rate = 0.5;
    custom.model.c = 1.0;
    settings::save(&custom).unwrap();

    let path = settings::config_path().unwrap();
    assert_eq!(path, temp.path().join(APP_DIR_NAME).join("config.toml"));
    assert_eq!(settings::load_or_default().unwrap(), custom);
}

#[test]
fn session_file_carries_progress_between_launches() {
    let temp = tempfile::tempdir().unwrap();
    let _env = ConfigHomeGuard::set(temp.path().to_path_buf());
    let path = app_dirs::session_path().unwrap();
    assert!(read_saved_state(&path).is_none());

    let settings = AppSettings::default();
    let mut first = TrainerController::new(&settings, sample_dataset(), None)
        .with_session_path(path.clone());
    first.judge(Verdict::Correct);
    first.judge(Verdict::Mistake);
    first.acknowledge();
    first.save_session().unwrap();

    let second = TrainerController::new(&settings, sample_dataset(), read_saved_state(&path));
    assert_eq!(second.session().current_index(), 2);
    assert_eq!(second.session().model(), first.session().model());
    assert!(!second.session().is_awaiting_ack());
}

//! User settings persisted as TOML in the app root.

mod io;
mod types;

pub(crate) use io::atomic_write;
pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save, save_to_path};
pub use types::{
    AppSettings, DisplaySettings, HostSettings, MAX_LEARNING_RATE, MIN_LEARNING_RATE,
    ModelSettings, PlotSettings, SettingsError,
};

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::AppDirError;
use crate::geometry::Viewport;
use crate::host::RetryConfig;
use crate::perceptron::Model;

pub const MIN_LEARNING_RATE: f64 = 0.01;
pub const MAX_LEARNING_RATE: f64 = 1.0;

/// Everything read from `config.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub plot: PlotSettings,
    #[serde(default)]
    pub host: HostSettings,
}

/// Rule a fresh session starts from and reset restores.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_w1")]
    pub w1: f64,
    #[serde(default = "default_w2")]
    pub w2: f64,
    #[serde(default = "default_c")]
    pub c: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub show_all_cases: bool,
    #[serde(default)]
    pub show_error: bool,
}

/// Canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotSettings {
    #[serde(default = "default_plot_width")]
    pub width: f64,
    #[serde(default = "default_plot_height")]
    pub height: f64,
    #[serde(default = "default_plot_pad")]
    pub pad: f64,
}

/// Probe behaviour when connecting to a host document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            model: ModelSettings::default(),
            display: DisplaySettings::default(),
            plot: PlotSettings::default(),
            host: HostSettings::default(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            w1: default_w1(),
            w2: default_w2(),
            c: default_c(),
        }
    }
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            width: default_plot_width(),
            height: default_plot_height(),
            pad: default_plot_pad(),
        }
    }
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl AppSettings {
    /// Pull out-of-range values back into their valid ranges.
    pub fn normalized(mut self) -> Self {
        self.learning_rate = if self.learning_rate.is_finite() {
            self.learning_rate.clamp(MIN_LEARNING_RATE, MAX_LEARNING_RATE)
        } else {
            default_learning_rate()
        };
        let model_defaults = ModelSettings::default();
        for (value, fallback) in [
            (&mut self.model.w1, model_defaults.w1),
            (&mut self.model.w2, model_defaults.w2),
            (&mut self.model.c, model_defaults.c),
        ] {
            if !value.is_finite() {
                *value = fallback;
            }
        }
        self.plot = self.plot.normalized();
        self.host.max_attempts = self.host.max_attempts.max(1);
        self
    }

    pub fn default_model(&self) -> Model {
        Model::new(self.model.w1, self.model.w2, self.model.c)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.plot.width, self.plot.height, self.plot.pad)
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.host.max_attempts,
            delay: Duration::from_millis(self.host.retry_delay_ms),
        }
    }
}

impl PlotSettings {
    fn normalized(self) -> Self {
        let pad = if self.pad.is_finite() {
            self.pad.max(0.0)
        } else {
            default_plot_pad()
        };
        let floor = 2.0 * pad + 1.0;
        let dimension = |value: f64, fallback: f64| {
            if value.is_finite() { value.max(floor) } else { fallback.max(floor) }
        };
        Self {
            width: dimension(self.width, default_plot_width()),
            height: dimension(self.height, default_plot_height()),
            pad,
        }
    }
}

fn default_learning_rate() -> f64 {
    crate::session::DEFAULT_LEARNING_RATE
}

fn default_w1() -> f64 {
    Model::DEFAULT.w1
}

fn default_w2() -> f64 {
    Model::DEFAULT.w2
}

fn default_c() -> f64 {
    Model::DEFAULT.c
}

fn default_plot_width() -> f64 {
    Viewport::DEFAULT.width
}

fn default_plot_height() -> f64 {
    Viewport::DEFAULT.height
}

fn default_plot_pad() -> f64 {
    Viewport::DEFAULT.pad
}

fn default_max_attempts() -> usize {
    RetryConfig::default().max_attempts
}

fn default_retry_delay_ms() -> u64 {
    u64::try_from(RetryConfig::default().delay.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error(transparent)]
    AppDir(#[from] AppDirError),
}

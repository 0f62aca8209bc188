// Configuration loading

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{
    PreviewSettings, SettingsValidation, ENFORCE_LABEL, INVALID_SETTINGS_MESSAGE,
};

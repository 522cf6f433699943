//! Settings and package manager configuration

pub mod package_manager;
pub mod settings;

pub use package_manager::PackageManager;
pub use settings::{Settings, SettingsFile, SETTINGS_FILE};

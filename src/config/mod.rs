mod database;
mod logging;
mod settings;

pub use database::{init_database, migrate_database};
pub use logging::init_logging;
pub use settings::{AppSettings, SettingsError};

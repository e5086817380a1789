pub mod config_store;

pub use config_store::{ConfigFormat, ConfigStore, DEFAULT_CONFIG_FILE};

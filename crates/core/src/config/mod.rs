//! Configuration loading from the `.agent-console/` directory.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::{config_dir, load_config, CONFIG_DIR};
pub use models::AppConfig;

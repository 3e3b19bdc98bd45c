pub mod config;
pub mod logging;

pub use config::{Environment, env_or};
pub use logging::setup_logging;

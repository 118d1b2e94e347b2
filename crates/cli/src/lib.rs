pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use cli::Cli;
pub use config::{Config, ConfigError};
pub use error::PipelineError;

//! ReviewSight Core: review data model, configuration, error types.

pub mod config;
pub mod error;
pub mod types;

pub use config::{data_dir_from_env, DataPaths, ExtractionStrategy, PipelineConfig};
pub use error::{Error, Result};
pub use types::*;

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, MergeConfig, MergeSettings};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use core::{engine::MergeEngine, pipeline::MergePipeline};
pub use utils::error::{MergeError, Result};

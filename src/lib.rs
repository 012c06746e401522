pub mod adapters;
pub mod config;
pub mod content;
pub mod domain;
pub mod services;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::LocalStorage;
pub use config::AppConfig;
pub use content::{ImageEnv, ImageResolver};
pub use services::{SubmissionService, TracingNotifier};
pub use utils::error::{ContentError, Result};

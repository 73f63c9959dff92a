pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::{lambda::LambdaConfig, toml_config::MenuConfig};

pub use core::{
    engine::MenuEngine, export::OutputFormat, parser::GridParser, sample::RotatingSampleProvider,
    source::SmuMenuSource,
};
pub use domain::model::{DailyFeed, MealType, MenuItem, MenuRecord, Restaurant, WeeklyFeed};
pub use utils::error::{MenuError, Result};

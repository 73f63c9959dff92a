pub mod assembler;
pub mod classifier;
pub mod dates;
pub mod engine;
pub mod export;
pub mod parser;
pub mod sample;
pub mod segmenter;
pub mod source;
pub mod table;

pub use crate::domain::model::{
    DailyFeed, MealType, MenuItem, MenuRecord, MenuSlot, Restaurant, WeeklyFeed,
};
pub use crate::domain::ports::{ConfigProvider, MenuSource, SampleMenuProvider};
pub use crate::utils::error::Result;

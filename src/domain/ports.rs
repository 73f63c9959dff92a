use crate::domain::model::{MenuRecord, MenuSlot};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait ConfigProvider: Send + Sync {
    fn menu_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_ms(&self) -> u64;
    fn user_agent(&self) -> &str;
    fn table_index(&self) -> usize;
    fn staff_marker(&self) -> &str;
    fn extra_keywords(&self) -> &[String];
}

/// A live upstream that yields menu records for the week around a reference date.
#[async_trait]
pub trait MenuSource: Send + Sync {
    fn name(&self) -> &str;

    /// Slots this source is expected to fill; sample data replaces them when
    /// the source fails or yields nothing.
    fn slots(&self) -> Vec<MenuSlot>;

    async fn fetch_week(&self, reference: NaiveDate) -> Result<Vec<MenuRecord>>;
}

/// Deterministic placeholder menus. Must be pure and infallible.
pub trait SampleMenuProvider: Send + Sync {
    fn sample_week(&self, reference: NaiveDate, slots: &[MenuSlot]) -> Vec<MenuRecord>;
}

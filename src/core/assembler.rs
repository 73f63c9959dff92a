use crate::core::dates::WeekWindow;
use crate::domain::model::{MenuRecord, WeeklyFeed};
use crate::utils::error::{MenuError, Result};
use chrono::NaiveDate;

/// Merges live and sample records and narrows them to one Monday–Friday window.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyAssembler {
    window: WeekWindow,
}

impl WeeklyAssembler {
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            window: WeekWindow::containing(reference),
        }
    }

    pub fn window(&self) -> WeekWindow {
        self.window
    }

    /// Concatenates live records with synthesized ones.
    ///
    /// Live records outside the window are expected (the upstream grid may show
    /// a neighbouring week) and are dropped later by [`Self::filter`]. A
    /// synthesized record outside the window can only come from a generator
    /// defect and fails the merge.
    pub fn merge(&self, live: Vec<MenuRecord>, synthesized: Vec<MenuRecord>) -> Result<Vec<MenuRecord>> {
        if let Some(stray) = synthesized.iter().find(|r| !self.window.contains(r.date())) {
            return Err(MenuError::AssemblyFailure {
                message: format!(
                    "sample record for {} {} dated {} is outside {}..={}",
                    stray.restaurant(),
                    stray.meal_type(),
                    stray.date(),
                    self.window.monday,
                    self.window.friday
                ),
            });
        }

        let mut merged = live;
        merged.extend(synthesized);
        Ok(merged)
    }

    pub fn filter(&self, records: Vec<MenuRecord>) -> Vec<MenuRecord> {
        let before = records.len();
        let kept: Vec<MenuRecord> = records
            .into_iter()
            .filter(|r| self.window.contains(r.date()))
            .collect();

        if kept.len() < before {
            tracing::debug!(
                "Dropped {} records outside {}..={}",
                before - kept.len(),
                self.window.monday,
                self.window.friday
            );
        }
        kept
    }

    pub fn assemble(&self, live: Vec<MenuRecord>, synthesized: Vec<MenuRecord>) -> Result<Vec<MenuRecord>> {
        let merged = self.merge(live, synthesized)?;
        Ok(self.filter(merged))
    }

    /// Wraps [`Self::assemble`] into the externally visible feed. Only an
    /// assembly failure produces `success: false`.
    pub fn feed(&self, live: Vec<MenuRecord>, synthesized: Vec<MenuRecord>) -> WeeklyFeed {
        match self.assemble(live, synthesized) {
            Ok(records) => WeeklyFeed::ok(records),
            Err(e) => {
                tracing::error!("❌ {}", e);
                WeeklyFeed::failed(e.to_string())
            }
        }
    }
}

use crate::core::classifier::RowClassifier;
use crate::core::dates::infer_date;
use crate::core::segmenter::{dedup_items, segment, KeywordTable};
use crate::core::table::{MenuGrid, PositionalTableLocator, TableLocator};
use crate::domain::model::MenuRecord;
use crate::utils::error::{MenuError, Result};
use chrono::NaiveDate;
use scraper::Html;

/// Turns the upstream menu page into menu records.
///
/// Row 0 of the grid holds `요일(MM.DD)` headers; every other row starts with a
/// label cell followed by one cell per date column.
pub struct GridParser {
    locator: Box<dyn TableLocator>,
    classifier: RowClassifier,
    keywords: KeywordTable,
}

impl GridParser {
    pub fn new(
        locator: Box<dyn TableLocator>,
        classifier: RowClassifier,
        keywords: KeywordTable,
    ) -> Self {
        Self {
            locator,
            classifier,
            keywords,
        }
    }

    pub fn parse(&self, html: &str, reference: NaiveDate) -> Result<Vec<MenuRecord>> {
        let document = Html::parse_document(html);
        let table = self
            .locator
            .locate(&document)
            .ok_or_else(|| MenuError::StructureNotFound {
                reason: "menu table is missing or has fewer than 2 rows".to_string(),
            })?;

        let grid = MenuGrid::read(table);
        Ok(self.records_from_grid(&grid, reference))
    }

    pub fn records_from_grid(&self, grid: &MenuGrid, reference: NaiveDate) -> Vec<MenuRecord> {
        let columns: Vec<(usize, NaiveDate)> = grid
            .header()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, text)| infer_date(reference, text).map(|date| (index, date)))
            .collect();

        if columns.is_empty() {
            tracing::warn!("⚠️ No (MM.DD) date headers found in menu table");
            return Vec::new();
        }

        let mut records = Vec::new();
        for (position, row) in grid.rows().iter().enumerate() {
            if row.len() < 2 {
                continue;
            }
            let Some(class) = self.classifier.classify(position, &row[0]) else {
                continue;
            };

            for &(column, date) in &columns {
                let Some(cell) = row.get(column) else {
                    continue;
                };
                let items = dedup_items(segment(cell, &self.keywords));
                if items.is_empty() {
                    continue;
                }
                records.push(MenuRecord::new(date, class.restaurant, class.meal_type, items));
            }
        }

        tracing::debug!(
            "Parsed {} records from {} rows x {} date columns",
            records.len(),
            grid.rows().len().saturating_sub(1),
            columns.len()
        );
        records
    }
}

impl Default for GridParser {
    fn default() -> Self {
        Self::new(
            Box::new(PositionalTableLocator::default()),
            RowClassifier::default(),
            KeywordTable::default(),
        )
    }
}

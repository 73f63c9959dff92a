use crate::domain::model::{DailyFeed, MenuRecord, WeeklyFeed};
use crate::utils::error::{MenuError, Result};
use serde::{Deserialize, Serialize};

const ITEM_SEPARATOR: &str = " / ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Tsv,
}

pub fn render_weekly(feed: &WeeklyFeed, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(feed)?),
        OutputFormat::Csv => render_delimited(&feed.data, b','),
        OutputFormat::Tsv => render_delimited(&feed.data, b'\t'),
    }
}

pub fn render_daily(feed: &DailyFeed, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(feed)?),
        OutputFormat::Csv => render_delimited(&feed.menus, b','),
        OutputFormat::Tsv => render_delimited(&feed.menus, b'\t'),
    }
}

/// One line per record; items are joined with `" / "`. The trailing label
/// columns are for spreadsheet readers.
fn render_delimited(records: &[MenuRecord], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record([
        "date",
        "restaurant",
        "meal_type",
        "items",
        "restaurant_name",
        "meal_name",
    ])?;
    for record in records {
        let items = record
            .items()
            .iter()
            .map(|item| item.name())
            .collect::<Vec<_>>()
            .join(ITEM_SEPARATOR);
        writer.write_record([
            record.date().format("%Y-%m-%d").to_string(),
            record.restaurant().id().to_string(),
            record.meal_type().as_str().to_string(),
            items,
            record.restaurant().english_label().to_string(),
            record.meal_type().korean_label().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MenuError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{MealType, MenuItem, Restaurant};
    use chrono::NaiveDate;

    fn feed() -> WeeklyFeed {
        WeeklyFeed::ok(vec![MenuRecord::new(
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            Restaurant::SeoulStudent,
            MealType::Lunch,
            vec![MenuItem::new("잡곡밥").unwrap(), MenuItem::new("된장찌개").unwrap()],
        )])
    }

    #[test]
    fn test_render_csv() {
        let output = render_weekly(&feed(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "date,restaurant,meal_type,items,restaurant_name,meal_name");
        assert_eq!(
            lines[1],
            "2025-03-03,서울_학생식당,lunch,잡곡밥 / 된장찌개,Seoul Student Cafeteria,중식"
        );
    }

    #[test]
    fn test_render_tsv() {
        let output = render_weekly(&feed(), OutputFormat::Tsv).unwrap();
        assert_eq!(
            output.lines().nth(1).unwrap(),
            "2025-03-03\t서울_학생식당\tlunch\t잡곡밥 / 된장찌개\tSeoul Student Cafeteria\t중식"
        );
    }

    #[test]
    fn test_render_json_round_trips() {
        let output = render_weekly(&feed(), OutputFormat::Json).unwrap();
        let parsed: WeeklyFeed = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, feed());
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 菜名最大長度（以字元計）
pub const MAX_ITEM_NAME_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MenuItemFields")]
pub struct MenuItem {
    name: String,
    // 缺值時輸出 null，不省略欄位
    price: Option<u32>,
    calories: Option<u32>,
}

/// Unchecked wire shape; converted through [`MenuItem::new`] rules.
#[derive(Deserialize)]
struct MenuItemFields {
    name: String,
    #[serde(default)]
    price: Option<u32>,
    #[serde(default)]
    calories: Option<u32>,
}

impl TryFrom<MenuItemFields> for MenuItem {
    type Error = String;

    fn try_from(fields: MenuItemFields) -> Result<Self, Self::Error> {
        let mut item = MenuItem::new(&fields.name)
            .ok_or_else(|| format!("menu item name '{}' is blank", fields.name))?;
        item.price = fields.price;
        item.calories = fields.calories;
        Ok(item)
    }
}

impl MenuItem {
    /// Builds an item without price or calorie data, truncating the name to
    /// [`MAX_ITEM_NAME_CHARS`] characters. Blank names yield `None`.
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: truncate_chars(name, MAX_ITEM_NAME_CHARS),
            price: None,
            calories: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Option<u32> {
        self.price
    }

    pub fn calories(&self) -> Option<u32> {
        self.calories
    }
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    pub fn korean_label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "조식",
            MealType::Lunch => "중식",
            MealType::Dinner => "석식",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Campus × cafeteria combinations served by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Restaurant {
    #[serde(rename = "서울_학생식당")]
    SeoulStudent,
    #[serde(rename = "서울_교직원식당")]
    SeoulFaculty,
    #[serde(rename = "천안_학생식당")]
    CheonanStudent,
    #[serde(rename = "천안_교직원식당")]
    CheonanFaculty,
}

impl Restaurant {
    /// Wire identifier, identical to the serde representation.
    pub fn id(&self) -> &'static str {
        match self {
            Restaurant::SeoulStudent => "서울_학생식당",
            Restaurant::SeoulFaculty => "서울_교직원식당",
            Restaurant::CheonanStudent => "천안_학생식당",
            Restaurant::CheonanFaculty => "천안_교직원식당",
        }
    }

    pub fn english_label(&self) -> &'static str {
        match self {
            Restaurant::SeoulStudent => "Seoul Student Cafeteria",
            Restaurant::SeoulFaculty => "Seoul Faculty Cafeteria",
            Restaurant::CheonanStudent => "Cheonan Student Cafeteria",
            Restaurant::CheonanFaculty => "Cheonan Faculty Cafeteria",
        }
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One restaurant/meal combination to be filled for every weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuSlot {
    pub restaurant: Restaurant,
    pub meal_type: MealType,
}

impl MenuSlot {
    pub const fn new(restaurant: Restaurant, meal_type: MealType) -> Self {
        Self {
            restaurant,
            meal_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRecord {
    date: NaiveDate,
    restaurant: Restaurant,
    meal_type: MealType,
    items: Vec<MenuItem>,
}

impl MenuRecord {
    pub fn new(
        date: NaiveDate,
        restaurant: Restaurant,
        meal_type: MealType,
        items: Vec<MenuItem>,
    ) -> Self {
        Self {
            date,
            restaurant,
            meal_type,
            items,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn restaurant(&self) -> Restaurant {
        self.restaurant
    }

    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn slot(&self) -> MenuSlot {
        MenuSlot::new(self.restaurant, self.meal_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyFeed {
    pub success: bool,
    pub data: Vec<MenuRecord>,
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WeeklyFeed {
    pub fn ok(data: Vec<MenuRecord>) -> Self {
        Self {
            success: true,
            data,
            message: None,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            message: None,
            error: Some(error.into()),
        }
    }

}

/// A weekly feed narrowed to one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFeed {
    pub success: bool,
    pub date: NaiveDate,
    pub menus: Vec<MenuRecord>,
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DailyFeed {
    pub fn from_weekly(feed: WeeklyFeed, date: NaiveDate) -> Self {
        let menus = feed
            .data
            .into_iter()
            .filter(|record| record.date() == date)
            .collect();

        Self {
            success: feed.success,
            date,
            menus,
            message: feed.message,
            error: feed.error,
        }
    }
}

use crate::core::dates::WeekWindow;
use crate::domain::model::{MealType, MenuItem, MenuRecord, MenuSlot, Restaurant};
use crate::domain::ports::SampleMenuProvider;
use chrono::NaiveDate;

/// Slots no live source provides; they are always synthesized.
pub const SYNTHESIZED_SLOTS: [MenuSlot; 5] = [
    MenuSlot::new(Restaurant::SeoulStudent, MealType::Breakfast),
    MenuSlot::new(Restaurant::SeoulStudent, MealType::Dinner),
    MenuSlot::new(Restaurant::CheonanStudent, MealType::Breakfast),
    MenuSlot::new(Restaurant::CheonanStudent, MealType::Lunch),
    MenuSlot::new(Restaurant::CheonanFaculty, MealType::Lunch),
];

const DEFAULT_ROTATION: &[&[&str]] = &[
    &["잡곡밥", "된장찌개", "제육볶음", "계란찜", "배추김치"],
    &["쌀밥", "김치찌개", "닭갈비", "샐러드", "깍두기"],
    &["잡곡밥", "순두부찌개", "돈까스", "스프", "배추김치"],
    &["잡곡밥", "국/찌개", "메인반찬", "부반찬", "김치"],
];

/// Fills every weekday of the reference week with a rotating set of generic
/// menus. Day `d` of slot `s` gets menu `(d + s) % rotation.len()`.
#[derive(Debug, Clone)]
pub struct RotatingSampleProvider {
    rotation: Vec<Vec<String>>,
}

impl RotatingSampleProvider {
    pub fn new(rotation: Vec<Vec<String>>) -> Self {
        Self { rotation }
    }

    fn menu_for(&self, index: usize) -> Vec<MenuItem> {
        if self.rotation.is_empty() {
            return Vec::new();
        }
        self.rotation[index % self.rotation.len()]
            .iter()
            .filter_map(|name| MenuItem::new(name))
            .collect()
    }
}

impl Default for RotatingSampleProvider {
    fn default() -> Self {
        Self::new(
            DEFAULT_ROTATION
                .iter()
                .map(|menu| menu.iter().map(|name| name.to_string()).collect())
                .collect(),
        )
    }
}

impl SampleMenuProvider for RotatingSampleProvider {
    fn sample_week(&self, reference: NaiveDate, slots: &[MenuSlot]) -> Vec<MenuRecord> {
        let window = WeekWindow::containing(reference);
        let mut records = Vec::with_capacity(slots.len() * 5);

        for (day_index, date) in window.weekdays().enumerate() {
            for (slot_index, slot) in slots.iter().enumerate() {
                records.push(MenuRecord::new(
                    date,
                    slot.restaurant,
                    slot.meal_type,
                    self.menu_for(day_index + slot_index),
                ));
            }
        }

        records
    }
}

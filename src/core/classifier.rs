use crate::domain::model::{MealType, Restaurant};

pub const DEFAULT_STAFF_MARKER: &str = "교직원";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClass {
    pub restaurant: Restaurant,
    pub meal_type: MealType,
}

/// Labels grid rows of one source with a restaurant and meal type.
///
/// The upstream page exposes a single meal column per day, so the meal type is
/// fixed per source; only the restaurant depends on the row label.
#[derive(Debug, Clone)]
pub struct RowClassifier {
    default_restaurant: Restaurant,
    staff_restaurant: Restaurant,
    staff_marker: String,
    meal_type: MealType,
}

impl RowClassifier {
    pub fn new(
        default_restaurant: Restaurant,
        staff_restaurant: Restaurant,
        staff_marker: impl Into<String>,
        meal_type: MealType,
    ) -> Self {
        Self {
            default_restaurant,
            staff_restaurant,
            staff_marker: staff_marker.into(),
            meal_type,
        }
    }

    /// Classifier for the Seoul campus page, which only lists lunch.
    pub fn seoul_lunch(staff_marker: impl Into<String>) -> Self {
        Self::new(
            Restaurant::SeoulStudent,
            Restaurant::SeoulFaculty,
            staff_marker,
            MealType::Lunch,
        )
    }

    /// `position` is the row index inside the table; row 0 is the date header
    /// and yields `None`.
    pub fn classify(&self, position: usize, label: &str) -> Option<RowClass> {
        if position == 0 {
            return None;
        }

        let marker = self.staff_marker.trim();
        let restaurant = if !marker.is_empty() && label.contains(marker) {
            self.staff_restaurant
        } else {
            self.default_restaurant
        };

        Some(RowClass {
            restaurant,
            meal_type: self.meal_type,
        })
    }
}

impl Default for RowClassifier {
    fn default() -> Self {
        Self::seoul_lunch(DEFAULT_STAFF_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_row_is_not_classified() {
        assert_eq!(RowClassifier::default().classify(0, "구분"), None);
    }

    #[test]
    fn test_default_restaurant_for_plain_label() {
        let class = RowClassifier::default().classify(1, "중식").unwrap();
        assert_eq!(class.restaurant, Restaurant::SeoulStudent);
        assert_eq!(class.meal_type, MealType::Lunch);
    }

    #[test]
    fn test_staff_marker_switches_restaurant() {
        let classifier = RowClassifier::default();
        let class = classifier.classify(2, "교직원 식당 (중식)").unwrap();
        assert_eq!(class.restaurant, Restaurant::SeoulFaculty);
        assert_eq!(class.meal_type, MealType::Lunch);
    }

    #[test]
    fn test_custom_marker_and_blank_marker() {
        let custom = RowClassifier::seoul_lunch("Staff");
        assert_eq!(
            custom.classify(1, "Staff lunch").unwrap().restaurant,
            Restaurant::SeoulFaculty
        );

        // 空白標記不應把每列都歸為教職員
        let blank = RowClassifier::seoul_lunch(" ");
        assert_eq!(
            blank.classify(1, "교직원").unwrap().restaurant,
            Restaurant::SeoulStudent
        );
    }
}

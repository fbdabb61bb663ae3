use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    #[default]
    FullBody,
    Powerlifting,
    Bodybuilding,
    Cardio,
}

/// The user's profile, saved wholesale on every onboarding or editor submit.
///
/// `allergies` and `groceries` keep the comma-separated text the user typed;
/// use [`Settings::allergy_list`] and [`Settings::grocery_list`] for the parsed sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[validate(range(min = 1, max = 6, message = "Meals per day must be between 1 and 6"))]
    #[serde(deserialize_with = "number_or_text")]
    pub meals_per_day: i32,

    #[validate(range(
        min = 1000,
        max = 6000,
        message = "Calorie goal must be between 1000 and 6000"
    ))]
    #[serde(deserialize_with = "number_or_text")]
    pub calorie_goal: i32,

    #[serde(default)]
    pub workout_type: WorkoutType,

    #[serde(default)]
    pub allergies: String,

    #[serde(default)]
    pub groceries: String,

    #[serde(default)]
    pub weekly_workouts: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            meals_per_day: 3,
            calorie_goal: 2200,
            workout_type: WorkoutType::FullBody,
            allergies: String::new(),
            groceries: String::new(),
            weekly_workouts: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn allergy_list(&self) -> Vec<String> {
        split_list(&self.allergies)
    }

    pub fn grocery_list(&self) -> Vec<String> {
        split_list(&self.groceries)
    }

    /// Exercises the user planned for `day`, one item per comma or line.
    pub fn custom_workout(&self, day: Weekday) -> Vec<String> {
        let Some(plan) = self.weekly_workouts.get(weekday_name(day)) else {
            return Vec::new();
        };

        plan.split([',', '\n'])
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}

/// Form inputs saved straight from the browser hold numbers as text (`"4"`).
fn number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_onboarding() {
        let settings = Settings::default();
        assert_eq!(settings.meals_per_day, 3);
        assert_eq!(settings.calorie_goal, 2200);
        assert_eq!(settings.workout_type, WorkoutType::FullBody);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_lists_are_trimmed_and_skip_blanks() {
        let settings = Settings {
            allergies: " peanuts, dairy ,,".into(),
            groceries: "eggs,chicken, rice".into(),
            ..Settings::default()
        };
        assert_eq!(settings.allergy_list(), vec!["peanuts", "dairy"]);
        assert_eq!(settings.grocery_list(), vec!["eggs", "chicken", "rice"]);
        assert!(Settings::default().allergy_list().is_empty());
    }

    #[test]
    fn test_validation_ranges() {
        let too_many_meals = Settings {
            meals_per_day: 7,
            ..Settings::default()
        };
        assert!(too_many_meals.validate().is_err());

        let too_few_calories = Settings {
            calorie_goal: 999,
            ..Settings::default()
        };
        assert!(too_few_calories.validate().is_err());

        let edge = Settings {
            meals_per_day: 6,
            calorie_goal: 6000,
            ..Settings::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_custom_workout_splits_commas_and_lines() {
        let mut settings = Settings::default();
        settings.weekly_workouts.insert(
            "Monday".into(),
            "4x10 bench press, 3x8 deadlift\n 5x5 squat ,".into(),
        );
        assert_eq!(
            settings.custom_workout(Weekday::Mon),
            vec!["4x10 bench press", "3x8 deadlift", "5x5 squat"]
        );
        assert!(settings.custom_workout(Weekday::Tue).is_empty());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = r#"{"mealsPerDay":4,"calorieGoal":1800,"workoutType":"cardio","allergies":"","groceries":"oats"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.meals_per_day, 4);
        assert_eq!(settings.workout_type, WorkoutType::Cardio);
        assert!(settings.weekly_workouts.is_empty());

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["calorieGoal"], 1800);
        assert!(value.get("weeklyWorkouts").is_some());
    }

    #[test]
    fn test_numbers_saved_as_form_text() {
        let json = r#"{"mealsPerDay":"4","calorieGoal":" 2500 ","workoutType":"full_body","allergies":"","groceries":""}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.meals_per_day, 4);
        assert_eq!(settings.calorie_goal, 2500);

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["mealsPerDay"], 4);

        let bad = r#"{"mealsPerDay":"four","calorieGoal":2200}"#;
        assert!(serde_json::from_str::<Settings>(bad).is_err());
    }

    #[test]
    fn test_weekday_name() {
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
    }
}

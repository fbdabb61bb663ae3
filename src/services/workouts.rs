use serde::Serialize;

use crate::models::settings::WorkoutType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub name: String,
    pub duration: u32,
    pub exercises: Vec<Exercise>,
    pub muscle_groups: Vec<String>,
}

/// Default session for a workout type when the user has no plan for today.
pub fn fetch_workout(workout_type: &WorkoutType) -> Workout {
    let name = match workout_type {
        WorkoutType::Powerlifting => "Powerlifting Routine",
        _ => "Full Body Workout",
    };

    let exercise = |name: &str, sets, reps| Exercise {
        name: name.to_string(),
        sets,
        reps,
    };

    Workout {
        name: name.to_string(),
        duration: 60,
        exercises: vec![
            exercise("Squat", 4, 8),
            exercise("Bench Press", 4, 8),
            exercise("Deadlift", 3, 5),
        ],
        muscle_groups: vec!["legs".into(), "chest".into(), "back".into()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_powerlifting_gets_its_own_name() {
        assert_eq!(
            fetch_workout(&WorkoutType::Powerlifting).name,
            "Powerlifting Routine"
        );
        for other in [
            WorkoutType::FullBody,
            WorkoutType::Bodybuilding,
            WorkoutType::Cardio,
        ] {
            assert_eq!(fetch_workout(&other).name, "Full Body Workout");
        }
    }

    #[test]
    fn test_fixed_plan_shape() {
        let workout = fetch_workout(&WorkoutType::FullBody);
        assert_eq!(workout.duration, 60);
        assert_eq!(workout.exercises.len(), 3);
        assert_eq!(workout.exercises[2].name, "Deadlift");
        assert_eq!(workout.exercises[2].sets, 3);
        assert_eq!(workout.exercises[2].reps, 5);

        let wire = serde_json::to_value(&workout).unwrap();
        assert_eq!(wire["muscleGroups"][0], "legs");
    }
}

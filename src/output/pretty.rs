use colored::Colorize;

use crate::api::{ExerciseDescriptor, Workout};

/// Format a list of workouts as a pretty table
pub fn format_workouts_pretty(workouts: &[Workout]) -> String {
    if workouts.is_empty() {
        return "Workouts (0)\n  No workouts found. Check back later for new workouts!".to_string();
    }

    let mut output = format!("Workouts ({})\n", workouts.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for workout in workouts {
        let mut line = format!("{} {}", format!("[{}]", workout.id).dimmed(), workout.name.bold());

        if let Some(duration) = workout.duration {
            line.push_str(&format!("  {}", format!("{duration} min").yellow()));
        }

        if let Some(rest) = workout.rest {
            line.push_str(&format!("  {}", format!("rest {rest}s").dimmed()));
        }

        output.push_str(&line);
        output.push('\n');

        if !workout.description.is_empty() {
            output.push_str(&format!("    {}\n", workout.description));
        }
    }

    output
}

/// Format a workout's exercises as a numbered list
pub fn format_exercises_pretty(workout_id: &str, exercises: &[ExerciseDescriptor]) -> String {
    if exercises.is_empty() {
        return format!("Workout {workout_id} (0 exercises)\n  No exercises");
    }

    let mut output = format!("Workout {workout_id} ({} exercises)\n", exercises.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for (i, exercise) in exercises.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {}\n",
            i + 1,
            exercise.name.bold()
        ));

        if !exercise.description.is_empty() {
            output.push_str(&format!("    {}\n", exercise.description));
        }

        let prescription = exercise.prescription();
        if !prescription.is_empty() {
            output.push_str(&format!("    {}\n", prescription.cyan()));
        }

        if let Some(link) = &exercise.link {
            output.push_str(&format!("    {}\n", link.dimmed()));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_workouts_pretty_empty() {
        let result = format_workouts_pretty(&[]);
        assert!(result.contains("Workouts (0)"));
        assert!(result.contains("No workouts found"));
    }

    #[test]
    fn test_format_workouts_pretty() {
        colored::control::set_override(false);
        let workouts = vec![Workout {
            id: "4".to_string(),
            name: "Legs".to_string(),
            duration: Some(50.0),
            description: "Squat focus".to_string(),
            rest: Some(120.0),
        }];

        let result = format_workouts_pretty(&workouts);
        assert!(result.contains("Workouts (1)"));
        assert!(result.contains("[4] Legs"));
        assert!(result.contains("50 min"));
        assert!(result.contains("rest 120s"));
        assert!(result.contains("Squat focus"));
    }

    #[test]
    fn test_format_exercises_pretty() {
        colored::control::set_override(false);
        let mut deadlift = ExerciseDescriptor::new("Deadlift", "Conventional");
        deadlift.sets = Some(3);
        deadlift.reps = Some(5);
        deadlift.weight = Some(140.0);
        deadlift.link = Some("https://example.com/deadlift".to_string());
        let plank = ExerciseDescriptor::new("Plank", "");

        let result = format_exercises_pretty("9", &[deadlift, plank]);
        assert!(result.contains("Workout 9 (2 exercises)"));
        assert!(result.contains(" 1. Deadlift"));
        assert!(result.contains("3 x 5, 140 kg"));
        assert!(result.contains("https://example.com/deadlift"));
        assert!(result.contains(" 2. Plank"));
    }

    #[test]
    fn test_format_exercises_pretty_empty() {
        let result = format_exercises_pretty("3", &[]);
        assert!(result.contains("No exercises"));
    }
}

use serde::{Deserialize, Deserializer, Serialize};

/// A workout as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    /// Planned length in minutes.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
    /// Rest between exercises in seconds.
    #[serde(default)]
    pub rest: Option<f64>,
}

/// One exercise of a workout. Identified only by its position in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDescriptor {
    pub name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    /// Load in kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Rest after the exercise in seconds.
    #[serde(default)]
    pub rest: Option<u32>,
    #[serde(default)]
    pub link: Option<String>,
}

impl ExerciseDescriptor {
    /// Create a descriptor with only a name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sets: None,
            reps: None,
            weight: None,
            rest: None,
            link: None,
        }
    }

    /// Short "3 x 10, 40 kg, rest 60s" style summary of the prescription.
    #[must_use]
    pub fn prescription(&self) -> String {
        let mut parts = Vec::new();

        match (self.sets, self.reps) {
            (Some(sets), Some(reps)) => parts.push(format!("{sets} x {reps}")),
            (Some(sets), None) => parts.push(format!("{sets} sets")),
            (None, Some(reps)) => parts.push(format!("{reps} reps")),
            (None, None) => {}
        }

        // zero weight and zero rest are shown as absent
        if let Some(weight) = self.weight.filter(|w| *w > 0.0) {
            parts.push(format!("{weight} kg"));
        }
        if let Some(rest) = self.rest.filter(|r| *r > 0) {
            parts.push(format!("rest {rest}s"));
        }

        parts.join(", ")
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Missing and null text both read as empty.
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_numeric_id() {
        let json = r#"{"id": 3, "name": "Legs", "duration": 45, "description": "Squats and more", "rest": 90}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();

        assert_eq!(workout.id, "3");
        assert_eq!(workout.duration, Some(45.0));
        assert_eq!(workout.rest, Some(90.0));
    }

    #[test]
    fn test_workout_string_id_and_missing_fields() {
        let json = r#"{"id": "abc", "name": "Core"}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();

        assert_eq!(workout.id, "abc");
        assert_eq!(workout.description, "");
        assert!(workout.duration.is_none());
    }

    #[test]
    fn test_exercise_optional_fields() {
        let json = r#"[
            {"name": "Squat", "description": "Back squat", "sets": 5, "reps": 5, "weight": 102.5, "rest": 180, "link": "https://example.com/squat"},
            {"name": "Plank", "description": "Hold", "sets": 3, "weight": null}
        ]"#;
        let exercises: Vec<ExerciseDescriptor> = serde_json::from_str(json).unwrap();

        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].weight, Some(102.5));
        assert_eq!(exercises[0].link.as_deref(), Some("https://example.com/squat"));
        assert!(exercises[1].reps.is_none());
        assert!(exercises[1].weight.is_none());
    }

    #[test]
    fn test_fractional_duration_does_not_fail_the_list() {
        let json = r#"[
            {"id": 1, "name": "Intervals", "duration": 7.5, "description": "Short", "rest": 12.5},
            {"id": 2, "name": "Long run", "duration": 60}
        ]"#;
        let workouts: Vec<Workout> = serde_json::from_str(json).unwrap();

        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].duration, Some(7.5));
        assert_eq!(workouts[0].rest, Some(12.5));
        assert_eq!(workouts[1].duration, Some(60.0));
    }

    #[test]
    fn test_null_description_reads_as_empty() {
        let workout: Workout =
            serde_json::from_str(r#"{"id": 4, "name": "Arms", "description": null}"#).unwrap();
        assert_eq!(workout.description, "");

        let exercises: Vec<ExerciseDescriptor> = serde_json::from_str(
            r#"[{"name": "Curl", "description": null}, {"name": "Dip"}]"#,
        )
        .unwrap();
        assert_eq!(exercises[0].description, "");
        assert_eq!(exercises[1].description, "");
    }

    #[test]
    fn test_prescription() {
        let mut ex = ExerciseDescriptor::new("Row", "Barbell row");
        assert_eq!(ex.prescription(), "");

        ex.sets = Some(3);
        ex.reps = Some(10);
        ex.weight = Some(40.0);
        ex.rest = Some(60);
        assert_eq!(ex.prescription(), "3 x 10, 40 kg, rest 60s");

        ex.weight = Some(0.0);
        ex.rest = Some(0);
        ex.reps = None;
        assert_eq!(ex.prescription(), "3 sets");
    }
}

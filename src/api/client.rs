use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::types::{ExerciseDescriptor, Workout};
use crate::config::ApiConfig;
use crate::error::WorkoutError;

/// Source of workouts and their exercises.
#[cfg_attr(test, mockall::automock)]
pub trait WorkoutSource {
    /// Fetch every workout.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::Fetch` on network, status or decode failure.
    fn load_workouts(&self) -> Result<Vec<Workout>, WorkoutError>;

    /// Fetch the ordered exercises of one workout.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::Fetch` on network, status or decode failure.
    fn load_exercises(&self, workout_id: &str) -> Result<Vec<ExerciseDescriptor>, WorkoutError>;
}

/// Blocking HTTP client for the workout backend.
#[derive(Clone, Debug)]
pub struct WorkoutClient {
    http: reqwest::blocking::Client,
    base: Url,
}

impl WorkoutClient {
    /// Build a client for the backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::Config` if the backend URL is empty or invalid,
    /// or the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, WorkoutError> {
        let backend_url = config.backend_url.trim().trim_end_matches('/');
        if backend_url.is_empty() {
            return Err(WorkoutError::Config("backend URL is not set".to_string()));
        }

        let base = Url::parse(backend_url)
            .map_err(|e| WorkoutError::Config(format!("Invalid backend URL {backend_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(WorkoutError::Config(format!(
                "Invalid backend URL {backend_url}: not an http(s) base URL"
            )));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WorkoutError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, base })
    }

    /// Backend URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    fn workouts_url(&self) -> Result<Url, WorkoutError> {
        self.endpoint(&["workout"])
    }

    fn exercises_url(&self, workout_id: &str) -> Result<Url, WorkoutError> {
        self.endpoint(&["workout", workout_id, "exercises"])
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, WorkoutError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                WorkoutError::Config(format!("Invalid backend URL {}", self.base_url()))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode a JSON body, mapping every failure to a fetch error
    /// prefixed with `what`.
    fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, WorkoutError> {
        debug!(%url, "GET");

        let response = self.http.get(url.clone()).send().map_err(|e| {
            warn!(%url, error = %e, "request failed");
            WorkoutError::fetch_with(format!("{what}: {e}"), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "backend returned an error status");
            return Err(WorkoutError::fetch(format!("{what} (HTTP {})", status.as_u16())));
        }

        response.json::<T>().map_err(|e| {
            warn!(%url, error = %e, "response body could not be decoded");
            WorkoutError::fetch_with(format!("{what}: invalid response body"), e)
        })
    }
}

impl WorkoutSource for WorkoutClient {
    fn load_workouts(&self) -> Result<Vec<Workout>, WorkoutError> {
        self.get_json(self.workouts_url()?, "Failed to fetch workouts")
    }

    fn load_exercises(&self, workout_id: &str) -> Result<Vec<ExerciseDescriptor>, WorkoutError> {
        self.get_json(self.exercises_url(workout_id)?, "Failed to fetch exercises")
    }
}

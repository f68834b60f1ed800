//! Route handlers and router assembly.
//!
//! The web layer owns HTTP concerns only: form-field extraction into the
//! raw strings the core expects, translating core errors into status
//! codes (client errors → 400, everything else → 500) and serializing
//! core values as JSON. All domain state sits behind a single mutex so
//! concurrent requests cannot interleave profile and log mutations.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use fitlog_core::{EntrySink, Error, JsonlJournal, ProfileInput, Tracker};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state: the tracker behind one lock plus the
/// persistence paths the handlers write through
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<Tracker>>,
    pub journal_path: PathBuf,
    pub profile_path: PathBuf,
}

impl AppState {
    fn lock(&self) -> Result<MutexGuard<'_, Tracker>, ApiError> {
        self.tracker
            .lock()
            .map_err(|_| ApiError(Error::Other("tracker lock poisoned".into())))
    }
}

/// Wrapper translating core errors into HTTP responses
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/profile", get(get_profile).post(save_profile))
        .route("/workouts", post(add_workout))
        .route("/summary", get(summary))
        .route("/progress", get(progress))
        .route("/report", get(report))
        .with_state(state)
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the Fitlog workout tracker" }))
}

/// Form fields for saving a profile. Missing fields default to empty
/// strings so the core names them in its validation error.
#[derive(Debug, Deserialize)]
struct ProfileForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    regn_id: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    height: String,
    #[serde(default)]
    weight: String,
}

async fn save_profile(
    State(state): State<AppState>,
    Form(form): Form<ProfileForm>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let input = ProfileInput {
        name: form.name,
        registration_id: form.regn_id,
        age: form.age,
        gender: form.gender,
        height_cm: form.height,
        weight_kg: form.weight,
    };

    let mut tracker = state.lock()?;
    let profile = tracker.save_profile(&input)?;
    tracker.profile_store().save(&state.profile_path)?;

    Ok(Json(json!(profile)))
}

async fn get_profile(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let tracker = state.lock()?;
    Ok(Json(json!({ "profile": tracker.profile() })))
}

#[derive(Debug, Deserialize)]
struct WorkoutForm {
    #[serde(default)]
    category: String,
    #[serde(default)]
    exercise: String,
    #[serde(default)]
    duration: String,
}

async fn add_workout(
    State(state): State<AppState>,
    Form(form): Form<WorkoutForm>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut tracker = state.lock()?;
    let entry = tracker.add_entry(&form.category, &form.exercise, &form.duration)?;

    JsonlJournal::new(&state.journal_path).append(&entry)?;

    Ok(Json(json!(entry)))
}

async fn summary(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let tracker = state.lock()?;
    match tracker.summarize() {
        Some(summary) => Ok(Json(json!(summary))),
        None => Ok(Json(json!({ "message": "No workouts logged yet." }))),
    }
}

async fn progress(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let tracker = state.lock()?;
    match tracker.lifetime_totals() {
        Some(totals) => Ok(Json(json!(totals))),
        None => Ok(Json(json!({ "message": "No workout data logged yet." }))),
    }
}

async fn report(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let tracker = state.lock()?;
    let report = tracker.export_report()?;
    Ok(Json(json!({
        "filename": report.suggested_filename(),
        "report": report,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn test_state(dir: &std::path::Path) -> AppState {
        AppState {
            tracker: Arc::new(Mutex::new(Tracker::default())),
            journal_path: dir.join("journal").join("entries.jsonl"),
            profile_path: dir.join("profile.json"),
        }
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const PROFILE_FORM: &str =
        "name=Full+Workflow+User&regn_id=999&age=25&gender=F&height=165&weight=60";

    #[tokio::test]
    async fn test_full_workflow() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = router(test_state(temp_dir.path()));

        // Save profile
        let response = app
            .clone()
            .oneshot(form_request("/profile", PROFILE_FORM))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let profile = body_json(response).await;
        assert_eq!(profile["weight_kg"], 60.0);
        assert_eq!(profile["bmi"], 22.04);

        // Add workout
        let response = app
            .clone()
            .oneshot(form_request(
                "/workouts",
                "category=Warm-up&exercise=Jumping+Jacks&duration=5",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let entry = body_json(response).await;
        assert_eq!(entry["exercise_name"], "Jumping Jacks");
        // MET 3.0, 5 min for a 60 kg user
        let calories = entry["calories"].as_f64().unwrap();
        assert!((calories - 15.75).abs() < 1e-9);

        // Summary
        let response = app.clone().oneshot(get_request("/summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summary = body_json(response).await;
        assert_eq!(summary["total_duration_minutes"], 5);

        // Progress
        let response = app.clone().oneshot(get_request("/progress")).await.unwrap();
        let progress = body_json(response).await;
        assert_eq!(progress["total_minutes"], 5);

        // Report
        let response = app.clone().oneshot(get_request("/report")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["filename"], "Full_Workflow_User_weekly_report.pdf");
        assert_eq!(report["report"]["rows"].as_array().unwrap().len(), 1);

        // Entry was journaled for the next restart
        let entries =
            fitlog_core::journal::read_entries(&temp_dir.path().join("journal/entries.jsonl"))
                .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_profile_returns_400() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = router(test_state(temp_dir.path()));

        let response = app
            .oneshot(form_request(
                "/profile",
                "name=X&regn_id=1&age=zero&gender=F&height=165&weight=60",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("age"));
    }

    #[tokio::test]
    async fn test_invalid_category_returns_400() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = router(test_state(temp_dir.path()));

        let response = app
            .oneshot(form_request(
                "/workouts",
                "category=Cardio&exercise=Running&duration=10",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("invalid category"));
    }

    #[tokio::test]
    async fn test_report_without_profile_returns_400() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = router(test_state(temp_dir.path()));

        let response = app.oneshot(get_request("/report")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("no profile"));
    }

    #[tokio::test]
    async fn test_empty_summary_placeholder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = router(test_state(temp_dir.path()));

        let response = app.clone().oneshot(get_request("/summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "No workouts logged yet.");

        let response = app.oneshot(get_request("/progress")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["message"], "No workout data logged yet.");
    }

    #[tokio::test]
    async fn test_absent_profile_is_null_not_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = router(test_state(temp_dir.path()));

        let response = app.oneshot(get_request("/profile")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["profile"].is_null());
    }

    #[tokio::test]
    async fn test_no_entry_recorded_on_validation_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = test_state(temp_dir.path());
        let app = router(state.clone());

        let response = app
            .clone()
            .oneshot(form_request(
                "/workouts",
                "category=Workout&exercise=Running&duration=-1",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let tracker = state.tracker.lock().unwrap();
        assert!(tracker.log().is_empty());
        assert!(!state.journal_path.exists());
    }
}

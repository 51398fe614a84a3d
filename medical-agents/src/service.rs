//! HTTP API over the patient tables and the agent pipeline.

use agent_flow::FlowError;
use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::{Next, from_fn},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Instrument, error, info};
use uuid::Uuid;

use crate::data::{PATIENTS, Patient, get_patient};
use crate::models::{AnalysisRequest, AnalysisResponse, PatientBasic};
use crate::workflow::Pipeline;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Patient {0} not found")]
    PatientNotFound(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(#[from] FlowError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::PatientNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AnalysisFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:3001"),
        ]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/patients", get(list_patients))
        .route("/api/patient/{patient_id}", get(get_patient_details))
        .route("/api/analyze", post(analyze_patient))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(correlation_id_middleware))
        .layer(cors)
        .with_state(state)
}

/// Tags every request with a fresh correlation id and runs it inside a span
/// carrying that id
async fn correlation_id_middleware(mut request: Request<axum::body::Body>, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&correlation_id).ok();

    if let Some(value) = &header {
        request.headers_mut().insert(CORRELATION_ID_HEADER, value.clone());
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = header {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Medical AI Assistant API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn list_patients() -> Json<Vec<PatientBasic>> {
    Json(PATIENTS.iter().map(PatientBasic::from).collect())
}

async fn get_patient_details(Path(patient_id): Path<String>) -> Result<Json<&'static Patient>, ApiError> {
    get_patient(&patient_id)
        .map(Json)
        .ok_or(ApiError::PatientNotFound(patient_id))
}

async fn analyze_patient(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let started = Instant::now();

    let Some(patient) = get_patient(&request.patient_id) else {
        info!(patient_id = %request.patient_id, "analysis requested for unknown patient");
        return Err(ApiError::PatientNotFound(request.patient_id));
    };

    info!(patient_id = %patient.id, "starting analysis");

    let report = state.pipeline.run(&request.patient_id).await.map_err(|e| {
        error!(patient_id = %patient.id, error = %e, "analysis failed");
        ApiError::from(e)
    })?;

    let processing_time = started.elapsed().as_secs_f64();
    info!(
        patient_id = %patient.id,
        processing_time,
        "analysis complete"
    );

    Ok(Json(AnalysisResponse::new(patient, report, processing_time)))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "patients_available": PATIENTS.len(),
        "timestamp": epoch_seconds(Utc::now())
    }))
}

/// Seconds since the Unix epoch with microsecond precision
fn epoch_seconds(now: DateTime<Utc>) -> f64 {
    now.timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use agent_flow::testing::ScriptedModel;
    use axum::body::{Body, to_bytes};
    use tower::ServiceExt;

    fn app(model: ScriptedModel) -> (Router, Arc<ScriptedModel>) {
        let model = Arc::new(model);
        let pipeline = Pipeline::new(model.clone(), PipelineConfig::default());
        let router = build_router(AppState {
            pipeline: Arc::new(pipeline),
        });
        (router, model)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Option<HeaderValue>, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let correlation = response.headers().get(CORRELATION_ID_HEADER).cloned();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, correlation, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn analyze(patient_id: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "patient_id": patient_id }).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_banner_and_correlation_header() {
        let (router, _) = app(ScriptedModel::new());

        let (status, correlation, body) = send(router, get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        let correlation = correlation.unwrap();
        assert!(Uuid::parse_str(correlation.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_list_patients() {
        let (router, _) = app(ScriptedModel::new());

        let (status, _, body) = send(router, get("/api/patients")).await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["P-1001", "P-1002", "P-1003", "P-1004"]);
        assert!(body[0].get("medications").is_none());
    }

    #[tokio::test]
    async fn test_patient_details_and_not_found() {
        let (router, _) = app(ScriptedModel::new());
        let (status, _, body) = send(router, get("/api/patient/P-1004")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["medications"][0], "warfarin 5mg daily");
        assert_eq!(body["recent_labs"]["INR"], "2.8");

        let (router, _) = app(ScriptedModel::new());
        let (status, _, body) = send(router, get("/api/patient/P-9999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Patient P-9999 not found" }));
    }

    #[tokio::test]
    async fn test_analyze_runs_pipeline() {
        let (router, model) = app(
            ScriptedModel::new()
                .then_text("Maria Garcia, 62F")
                .then_text("Suboptimal glycemic control")
                .then_text("Intensify therapy"),
        );

        let (status, _, body) = send(router, analyze("P-1001")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(model.call_count(), 3);
        assert_eq!(body["patient_info"]["id"], "P-1001");
        assert_eq!(body["intake_summary"], "Maria Garcia, 62F");
        assert_eq!(body["care_plan"], "Intensify therapy");
        assert_eq!(body["drug_interactions"], "");
        assert_eq!(body["search_results"], "");
        assert!(body["processing_time"].as_f64().unwrap() >= 0.0);
        assert_eq!(body["agent_logs"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_analyze_unknown_patient_skips_pipeline() {
        let (router, model) = app(ScriptedModel::new());

        let (status, _, body) = send(router, analyze("P-9999")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Patient P-9999 not found");
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_model_failure_is_500() {
        let (router, _) = app(ScriptedModel::new().then_fail("upstream timeout"));

        let (status, _, body) = send(router, analyze("P-1002")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "Analysis failed: Model unavailable: upstream timeout"
        );
    }

    #[test]
    fn test_epoch_seconds() {
        let instant = DateTime::parse_from_rfc3339("2025-01-01T00:00:00.250Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(epoch_seconds(instant), 1_735_689_600.25);
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _) = app(ScriptedModel::new());

        let (status, _, body) = send(router, get("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["patients_available"], 4);
        let timestamp = body["timestamp"].as_f64().unwrap();
        assert!((timestamp - epoch_seconds(Utc::now())).abs() < 60.0);
    }
}

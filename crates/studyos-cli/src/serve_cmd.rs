use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use studyos_core::profile::MAX_STUDY_HOURS;
use studyos_core::roadmap::{self, DailyTask, DailyTasksRequest, JourneyRequest, JourneyWeek};
use studyos_core::stages::Stage;
use studyos_core::{Pipeline, PipelineError, ResultBundle, StudentProfile};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidProfile(_) => Self::bad_request(err.to_string()),
            PipelineError::StageFailed { .. } => Self::bad_gateway(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub stages: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    pub total_weeks: u32,
    pub weeks: Vec<JourneyWeek>,
}

#[derive(Debug, Serialize)]
pub struct DailyTasksResponse {
    pub tasks: Vec<DailyTask>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(pipeline: Pipeline) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/process", post(process_student))
        .route("/api/journey", post(learning_journey))
        .route("/api/tasks/daily", post(daily_tasks))
        .layer(CorsLayer::permissive())
        .with_state(pipeline)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(pipeline: Pipeline, bind: &str, port: u16) -> Result<()> {
    let app = build_router(pipeline);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("studyos serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("studyos serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        status: "online",
        service: "StudyOS",
        version: env!("CARGO_PKG_VERSION"),
        stages: Stage::ALL.iter().map(|s| s.agent_name()).collect(),
    })
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn process_student(
    State(pipeline): State<Pipeline>,
    payload: Result<Json<StudentProfile>, JsonRejection>,
) -> Result<Json<ResultBundle>, AppError> {
    let Json(profile) = payload?;
    let bundle = pipeline.run(&profile).await.map_err(|e| {
        tracing::warn!("process request failed: {e}");
        AppError::from(e)
    })?;
    Ok(Json(bundle))
}

async fn learning_journey(
    payload: Result<Json<JourneyRequest>, JsonRejection>,
) -> Result<Json<JourneyResponse>, AppError> {
    let Json(req) = payload?;
    let weeks = roadmap::learning_journey(&req);
    Ok(Json(JourneyResponse {
        total_weeks: weeks.len() as u32,
        weeks,
    }))
}

async fn daily_tasks(
    payload: Result<Json<DailyTasksRequest>, JsonRejection>,
) -> Result<Json<DailyTasksResponse>, AppError> {
    let Json(req) = payload?;
    if !(1..=MAX_STUDY_HOURS).contains(&i64::from(req.study_hours)) {
        return Err(AppError::bad_request(format!(
            "study_hours must be between 1 and {MAX_STUDY_HOURS} (got {})",
            req.study_hours
        )));
    }
    Ok(Json(DailyTasksResponse {
        tasks: roadmap::daily_tasks(&req),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use studyos_core::{FailurePolicy, GenerationClient, PipelineConfig};
    use studyos_test_utils::{EchoClient, FailingClient, FixedClient, gate_profile_json};

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    fn pipeline(client: impl GenerationClient + 'static) -> super::Pipeline {
        super::Pipeline::new(Arc::new(client))
    }

    async fn get(pipeline: super::Pipeline, uri: &str) -> axum::response::Response {
        let app = super::build_router(pipeline);
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(
        pipeline: super::Pipeline,
        uri: &str,
        body: &str,
    ) -> axum::response::Response {
        let app = super::build_router(pipeline);
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_health() {
        let resp = get(pipeline(EchoClient), "/api/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_index_lists_stages() {
        let resp = get(pipeline(EchoClient), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "online");
        assert_eq!(
            json["stages"],
            serde_json::json!(["Context Agent", "Strategy Agent", "Planning Agent"])
        );
    }

    #[tokio::test]
    async fn test_process_returns_bundle() {
        let resp = post_json(pipeline(EchoClient), "/api/process", &gate_profile_json()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let tasks = json["tasks"].as_str().expect("tasks should be a string");
        assert!(tasks.contains("Calculus"));
        assert!(json["world_model"].is_string());
        assert!(json["strategy"].is_string());
        let logs = json["logs"].as_array().expect("logs should be an array");
        assert_eq!(logs.len(), 4);
        assert_eq!(logs[3]["agent"], "Orchestrator");
    }

    #[tokio::test]
    async fn test_process_with_failing_service_still_returns_bundle() {
        let resp = post_json(
            pipeline(FailingClient::new("boom")),
            "/api/process",
            &gate_profile_json(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["world_model"], "Error: boom");
        assert_eq!(json["tasks"], "Error: boom");
    }

    #[tokio::test]
    async fn test_process_missing_field_is_bad_request() {
        let body = r#"{"exam":"GATE","deadline":30,"subjects":["Math"],"study_hours":4}"#;
        let resp = post_json(pipeline(EchoClient), "/api/process", body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("weak_areas"));
        assert!(json.get("tasks").is_none(), "no partial bundle");
    }

    #[tokio::test]
    async fn test_process_malformed_json_is_bad_request() {
        let resp = post_json(pipeline(EchoClient), "/api/process", "{not json").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_process_invalid_profile_is_bad_request() {
        let body = r#"{"exam":"GATE","deadline":30,"subjects":[],"study_hours":4,"weak_areas":"Calculus"}"#;
        let resp = post_json(pipeline(FixedClient::new("x")), "/api/process", body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert_eq!(
            json["error"],
            "invalid student profile: at least one subject is required"
        );
    }

    #[tokio::test]
    async fn test_process_halt_policy_is_bad_gateway() {
        let halting = super::Pipeline::with_config(
            Arc::new(FailingClient::new("boom")),
            PipelineConfig {
                failure_policy: FailurePolicy::Halt,
            },
        );
        let resp = post_json(halting, "/api/process", &gate_profile_json()).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(resp).await["error"], "context stage failed: boom");
    }

    #[tokio::test]
    async fn test_process_accepts_blank_weak_areas() {
        let body = r#"{"exam":"GATE","deadline":30,"subjects":["Math"],"study_hours":4,"weak_areas":""}"#;
        let resp = post_json(pipeline(EchoClient), "/api/process", body).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert!(json["tasks"].as_str().unwrap().contains("none stated"));
    }

    #[tokio::test]
    async fn test_journey_for_long_deadline() {
        let body = r#"{"deadline":120,"subjects":["Math","Physics"],"study_style":"intensive"}"#;
        let resp = post_json(pipeline(FailingClient::new("unused")), "/api/journey", body).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["total_weeks"], 16);
        let weeks = json["weeks"].as_array().unwrap();
        assert_eq!(weeks.len(), 16);
        assert_eq!(weeks[0]["focus"], "Foundation: Math");
        assert_eq!(weeks[0]["status"], "current");
        assert_eq!(weeks[5]["intensity"], "Very High");
        assert_eq!(weeks[15]["focus"], "Final Prep & Rest");
    }

    #[tokio::test]
    async fn test_journey_defaults_to_balanced_style() {
        let body = r#"{"deadline":56,"subjects":["Math"]}"#;
        let resp = post_json(pipeline(EchoClient), "/api/journey", body).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["weeks"][0]["focus"], "Math Deep Dive");
        assert_eq!(json["weeks"][0]["intensity"], "Medium");
    }

    #[tokio::test]
    async fn test_journey_negative_deadline_is_bad_request() {
        let body = r#"{"deadline":-7,"subjects":["Math"]}"#;
        let resp = post_json(pipeline(EchoClient), "/api/journey", body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_daily_tasks_follow_weightages() {
        let body = r#"{"subjects":["Physics","Math"],"subject_weightages":{"Physics":40,"Math":60},"study_hours":5,"weak_areas":"physics"}"#;
        let resp = post_json(pipeline(FailingClient::new("unused")), "/api/tasks/daily", body).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let tasks = json["tasks"].as_array().unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0]["text"], "Math: Core concepts practice (180 min)");
        assert_eq!(tasks[0]["effort"], "High");
        assert_eq!(tasks[1]["reason"], "Identified as weak area");
        assert_eq!(tasks[2]["subject"], "Test");
        assert_eq!(tasks[2]["id"], 3);
    }

    #[tokio::test]
    async fn test_daily_tasks_reject_out_of_range_hours() {
        let body = r#"{"subjects":["Math"],"study_hours":0}"#;
        let resp = post_json(pipeline(EchoClient), "/api/tasks/daily", body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["error"],
            "study_hours must be between 1 and 24 (got 0)"
        );
    }
}

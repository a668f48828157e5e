//! # API REST
//!
//! REST API implementation for NeuralCare.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `neuralcare-core` for the diagnosis itself.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    ConditionEntry, DiagnoseReq, DiagnoseRes, ErrorRes, HealthRes, HealthService,
    ListConditionsRes, ListSymptomsRes, PatientReq, PatientSummary, SymptomEntry,
};
use neuralcare_core::{
    ConditionCatalog, DiagnosisEngine, DiagnosisError, PatientContext, SymptomCatalog,
};

/// Application state shared across REST API handlers.
///
/// The engine is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DiagnosisEngine>,
}

impl AppState {
    pub fn new(engine: DiagnosisEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_symptoms, list_conditions, diagnose),
    components(schemas(
        HealthRes,
        SymptomEntry,
        ListSymptomsRes,
        ConditionEntry,
        ListConditionsRes,
        PatientReq,
        PatientSummary,
        DiagnoseReq,
        DiagnoseRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/symptoms", get(list_symptoms))
        .route("/conditions", get(list_conditions))
        .route("/diagnose", post(diagnose))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint.
///
/// Always 200 while the process is up; `model_loaded` reports whether diagnoses can
/// currently succeed.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.engine.is_model_loaded()))
}

#[derive(Debug, Deserialize)]
struct SymptomQuery {
    q: Option<String>,
    #[serde(default)]
    sorted: bool,
}

#[utoipa::path(
    get,
    path = "/symptoms",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive substring filter"),
        ("sorted" = Option<bool>, Query, description = "Sort alphabetically instead of by index")
    ),
    responses(
        (status = 200, description = "Known symptoms", body = ListSymptomsRes)
    )
)]
/// List the symptom vocabulary, optionally filtered.
#[axum::debug_handler]
async fn list_symptoms(Query(query): Query<SymptomQuery>) -> Json<ListSymptomsRes> {
    let catalog = SymptomCatalog::get();
    let mut ids = match query.q.as_deref() {
        Some(q) => catalog.search(q),
        None => catalog.ids().to_vec(),
    };
    if query.sorted {
        ids.sort_unstable();
    }
    Json(ListSymptomsRes {
        symptoms: ids.into_iter().filter_map(SymptomEntry::from_id).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/conditions",
    responses(
        (status = 200, description = "Condition vocabulary", body = ListConditionsRes)
    )
)]
/// List every condition the classifier can predict.
#[axum::debug_handler]
async fn list_conditions() -> Json<ListConditionsRes> {
    Json(ListConditionsRes::from_catalog(ConditionCatalog::get()))
}

#[utoipa::path(
    post,
    path = "/diagnose",
    request_body = DiagnoseReq,
    responses(
        (status = 200, description = "Predicted condition and recommendations", body = DiagnoseRes),
        (status = 400, description = "No recognised symptoms or invalid patient details", body = ErrorRes),
        (status = 503, description = "Prediction model unavailable", body = ErrorRes),
        (status = 500, description = "Internal error", body = ErrorRes)
    )
)]
/// Predict a condition from a symptom selection.
///
/// # Errors
/// - `400 Bad Request` if no symptom is recognised or patient details are out of range.
/// - `503 Service Unavailable` if the model failed to load at startup.
/// - `500 Internal Server Error` if the classifier fails or returns an unknown code.
#[axum::debug_handler]
async fn diagnose(
    State(state): State<AppState>,
    Json(req): Json<DiagnoseReq>,
) -> Result<Json<DiagnoseRes>, (StatusCode, Json<ErrorRes>)> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("diagnose", %request_id);

    span.in_scope(|| {
        let patient = match req.patient {
            Some(p) => PatientContext::try_from(p).map_err(|e| {
                tracing::info!("rejected patient details: {}", e);
                (StatusCode::BAD_REQUEST, Json(ErrorRes::from(&e)))
            })?,
            None => PatientContext::default(),
        };

        match state.engine.diagnose(&patient, &req.symptoms) {
            Ok(diagnosis) => {
                tracing::info!(code = %diagnosis.code, "diagnosis complete");
                Ok(Json(DiagnoseRes::from_diagnosis(
                    diagnosis,
                    request_id.clone(),
                    chrono::Utc::now().to_rfc3339(),
                )))
            }
            Err(e) => {
                let status = status_for(&e);
                if status.is_server_error() && !matches!(e, DiagnosisError::ModelUnavailable { .. }) {
                    tracing::error!("Diagnose error: {:?}", e);
                } else {
                    tracing::warn!("Diagnose rejected: {}", e);
                }
                Err((status, Json(ErrorRes::from(&e))))
            }
        }
    })
}

fn status_for(e: &DiagnosisError) -> StatusCode {
    match e {
        DiagnosisError::NoSymptomsSelected => StatusCode::BAD_REQUEST,
        DiagnosisError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DiagnosisError::UnknownConditionCode(_) | DiagnosisError::Classifier(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use neuralcare_core::{
        ClassifierError, ClassifierHandle, ConditionClassifier, ConditionCode, FeatureVector,
        ReferenceStore, ReferenceTable, TableKind,
    };
    use tower::ServiceExt;

    struct Always(i64);

    impl ConditionClassifier for Always {
        fn predict(&self, _features: &FeatureVector) -> Result<ConditionCode, ClassifierError> {
            Ok(ConditionCode(self.0))
        }
    }

    fn app(classifier: ClassifierHandle) -> Router {
        let meds = ReferenceTable::from_reader(
            TableKind::Medications,
            "Disease,Medication\nFungal infection,\"['Fluconazole', 'Terbinafine']\"\n".as_bytes(),
        )
        .unwrap();
        let engine = DiagnosisEngine::new(classifier, ReferenceStore::from_tables([meds]));
        router(AppState::new(engine))
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_model_state() {
        let req = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(ClassifierHandle::unavailable("missing")), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model_loaded"], false);
    }

    #[tokio::test]
    async fn test_symptom_search() {
        let req = Request::get("/symptoms?q=skin%20rash").body(Body::empty()).unwrap();
        let (status, body) = send(app(ClassifierHandle::loaded(Always(15))), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symptoms"][0]["id"], "skin_rash");
        assert_eq!(body["symptoms"][0]["index"], 1);
        assert_eq!(body["symptoms"][0]["label"], "Skin Rash");
    }

    #[tokio::test]
    async fn test_diagnose_success() {
        let req = post_json(
            "/diagnose",
            serde_json::json!({
                "symptoms": ["itching", "skin_rash", "nodal_skin_eruptions", "bogus"],
                "patient": { "age": 30, "height_cm": 175.0, "weight_kg": 70.0 }
            }),
        );
        let (status, body) = send(app(ClassifierHandle::loaded(Always(15))), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["condition"], "Fungal infection");
        assert_eq!(body["medications"], serde_json::json!(["Fluconazole", "Terbinafine"]));
        assert_eq!(body["diet"], serde_json::json!(["No diet information available."]));
        assert_eq!(body["reported_symptoms"].as_array().unwrap().len(), 3);
        assert_eq!(body["patient"]["bmi_category"], "Normal");
        assert!(!body["request_id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_diagnose_without_symptoms_is_bad_request() {
        let req = post_json("/diagnose", serde_json::json!({ "symptoms": [] }));
        let (status, body) = send(app(ClassifierHandle::loaded(Always(15))), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "no_symptoms_selected");
        assert!(body["hint"].is_string());
    }

    #[tokio::test]
    async fn test_diagnose_without_model_is_unavailable() {
        let req = post_json("/diagnose", serde_json::json!({ "symptoms": ["itching"] }));
        let (status, body) = send(app(ClassifierHandle::unavailable("missing")), req).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "model_unavailable");
    }

    #[tokio::test]
    async fn test_diagnose_unknown_code_is_internal_error() {
        let req = post_json("/diagnose", serde_json::json!({ "symptoms": ["itching"] }));
        let (status, body) = send(app(ClassifierHandle::loaded(Always(999))), req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "unknown_condition_code");
        assert!(body.get("hint").is_none());
    }

    #[tokio::test]
    async fn test_diagnose_invalid_patient_is_bad_request() {
        let req = post_json(
            "/diagnose",
            serde_json::json!({ "symptoms": ["itching"], "patient": { "weight_kg": 900.0 } }),
        );
        let (status, body) = send(app(ClassifierHandle::loaded(Always(15))), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_patient");
    }
}

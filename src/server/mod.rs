//! HTTP server for predictions
//!
//! Exposes `GET /health` and `POST /predict`, translating domain error
//! kinds into fixed status codes.

mod error;
mod handlers;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, response::Response, Router};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::domain::PredictionService;

pub use error::{status_for, ApiError, ErrorResponse};
pub use handlers::{AppState, HealthResponse, PredictRequest, PredictResponse};
pub use routes::api_routes;

/// Build the application router with its middleware stack
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .merge(api_routes())
        .layer(DefaultBodyLimit::max(config.max_body_size));

    if let Some(timeout) = config.request_timeout() {
        app = app
            .layer(TimeoutLayer::new(timeout))
            .layer(middleware::map_response(move |response: Response| async move {
                error::timeout_response(response, timeout)
            }));
    }

    if config.cors_enabled {
        app = app.layer(cors_layer(config));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::panic_response))
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Start the HTTP prediction server
pub async fn start(
    service: Arc<dyn PredictionService>,
    service_name: String,
    config: ServerConfig,
) -> Result<()> {
    let state = Arc::new(AppState::new(service, service_name));
    let app = router(state, &config);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  POST /predict - Make prediction");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Application shutdown completed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::{DomainError, PredictionRequest, PredictionResponse};
    use crate::engine::PredictionPipeline;
    use crate::model::TorchModel;
    use crate::processing::{DefaultPostprocessor, DefaultPreprocessor};

    /// Service returning a canned result and counting calls
    struct StubService {
        result: Result<PredictionResponse, DomainError>,
        calls: AtomicUsize,
    }

    impl StubService {
        fn ok() -> Self {
            Self {
                result: Ok(PredictionResponse::new(
                    json!({"forecast": [150.0, 180.0, 200.0], "format": "json"}),
                    0.8,
                    "v1.0.0",
                )
                .unwrap()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: DomainError) -> Self {
            Self {
                result: Err(err),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PredictionService for StubService {
        async fn predict(
            &self,
            _request: PredictionRequest,
        ) -> Result<PredictionResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    struct PanickingService;

    #[async_trait]
    impl PredictionService for PanickingService {
        async fn predict(
            &self,
            _request: PredictionRequest,
        ) -> Result<PredictionResponse, DomainError> {
            panic!("model handle poisoned");
        }
    }

    struct SlowService;

    #[async_trait]
    impl PredictionService for SlowService {
        async fn predict(
            &self,
            _request: PredictionRequest,
        ) -> Result<PredictionResponse, DomainError> {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Err(DomainError::prediction_service("should have timed out"))
        }
    }

    fn app(service: Arc<dyn PredictionService>) -> Router {
        let state = Arc::new(AppState::new(service, "Test Service"));
        router(state, &ServerConfig::default())
    }

    fn post_predict(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    const FORECAST_BODY: &str = r#"{"features": {"product_id": "ABC123", "historical_sales": [100, 120, 95], "season": "Winter"}}"#;

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(Arc::new(StubService::ok())), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy", "service": "Test Service"}));
    }

    #[tokio::test]
    async fn test_predict_success() {
        let (status, body) = send(
            app(Arc::new(StubService::ok())),
            post_predict(r#"{"features": {"product_id": "ABC123"}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "prediction": {"forecast": [150.0, 180.0, 200.0], "format": "json"},
                "confidence": 0.8,
                "model_version": "v1.0.0"
            })
        );
    }

    #[tokio::test]
    async fn test_empty_features_never_reach_pipeline() {
        let service = Arc::new(StubService::ok());
        let (status, body) = send(app(service.clone()), post_predict(r#"{"features": {}}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidFeatureError");
        assert_eq!(body["message"], "Features dictionary cannot be empty");
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let service = Arc::new(StubService::ok());
        let (status, body) = send(app(service.clone()), post_predict(r#"{"feat"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidRequest");

        let (status, body) = send(app(service.clone()), post_predict(r#"{"inputs": {}}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "InvalidRequest");
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_domain_errors_map_to_status() {
        let cases = [
            (DomainError::preprocessing("bad input"), StatusCode::BAD_REQUEST),
            (DomainError::model_prediction("down"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::model_not_loaded("missing"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::postprocessing("garbled"), StatusCode::BAD_GATEWAY),
            (DomainError::prediction_service("oops"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let name = err.kind().name();
            let service = Arc::new(StubService::failing(err.with_details("cause")));
            let (status, body) = send(app(service), post_predict(FORECAST_BODY)).await;
            assert_eq!(status, expected, "{}", name);
            assert_eq!(body["error"], name);
            assert_eq!(body["details"], "cause");
        }
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let (status, body) = send(app(Arc::new(PanickingService)), post_predict(FORECAST_BODY)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "InternalServerError");
        assert_eq!(body["message"], "An unexpected error occurred");
    }

    #[tokio::test]
    async fn test_unavailable_model_returns_503() {
        let pipeline = PredictionPipeline::new(
            Box::new(TorchModel::new(
                PathBuf::from("/nonexistent/model.pt"),
                "v1.0.0".to_string(),
                "cpu".to_string(),
            )),
            Box::new(DefaultPreprocessor::default()),
            Box::new(DefaultPostprocessor::default()),
        );

        let (status, body) = send(app(Arc::new(pipeline)), post_predict(FORECAST_BODY)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "ModelPredictionError");
        assert_eq!(body["message"], "Failed to execute model prediction");
    }

    #[tokio::test]
    async fn test_missing_required_feature_returns_400() {
        let pipeline = PredictionPipeline::new(
            Box::new(TorchModel::new(
                PathBuf::from("/nonexistent/model.pt"),
                "v1.0.0".to_string(),
                "cpu".to_string(),
            )),
            Box::new(DefaultPreprocessor::default()),
            Box::new(DefaultPostprocessor::default()),
        );

        let (status, body) = send(
            app(Arc::new(pipeline)),
            post_predict(r#"{"features": {"season": "winter"}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "PreprocessingError");
        assert_eq!(body["details"], "Required feature missing: product_id");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let config = ServerConfig {
            max_body_size: 16,
            ..Default::default()
        };
        let state = Arc::new(AppState::new(Arc::new(StubService::ok()), "Test Service"));
        let (status, _) = send(router(state, &config), post_predict(FORECAST_BODY)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_timeout_returns_error_body() {
        let config = ServerConfig {
            request_timeout_secs: 1,
            ..Default::default()
        };
        let state = Arc::new(AppState::new(Arc::new(SlowService), "Test Service"));
        let (status, body) = send(router(state, &config), post_predict(FORECAST_BODY)).await;

        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["error"], "RequestTimeout");
        assert_eq!(body["message"], "Request timed out");
        assert_eq!(body["details"], "No response within 1s");
    }

    #[tokio::test]
    async fn test_fast_request_unaffected_by_timeout() {
        let config = ServerConfig {
            request_timeout_secs: 1,
            ..Default::default()
        };
        let state = Arc::new(AppState::new(Arc::new(StubService::ok()), "Test Service"));
        let (status, body) = send(router(state, &config), post_predict(FORECAST_BODY)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model_version"], "v1.0.0");
    }
}

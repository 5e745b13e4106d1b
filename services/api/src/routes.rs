use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use incident_ai::workflows::incident::{assessment_router, IncidentAnalyzer};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_incident_routes<A>(analyzer: Arc<A>) -> axum::Router
where
    A: IncidentAnalyzer + 'static,
{
    assessment_router(analyzer)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use incident_ai::workflows::incident::HeuristicAnalyzer;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        }
    }

    fn app(ready: bool) -> axum::Router {
        with_incident_routes(Arc::new(HeuristicAnalyzer::default())).layer(Extension(state(ready)))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(false)
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let initializing = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(initializing.status(), StatusCode::SERVICE_UNAVAILABLE);

        let ready = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(ready.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn assessment_routes_are_mounted() {
        let payload = json!({
            "basics": {
                "whatHappened": "Coworker shouted at a colleague during a shift handover",
                "involvedParties": ["Alex", "Jordan"],
                "location": "Loading dock",
                "datetime": "2025-03-04T14:30:00Z"
            },
            "qa": []
        });
        let response = app(true)
            .oneshot(
                Request::post("/api/v1/incidents/final-report/markdown")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/markdown; charset=utf-8")
        );
    }
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AppError;

use super::analyzer::{AnalysisError, IncidentAnalyzer};
use super::domain::{IncidentBasics, QA};
use super::report::render_markdown;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextQuestionsRequest {
    pub basics: IncidentBasics,
    #[serde(default)]
    pub history: Vec<QA>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalReportRequest {
    pub basics: IncidentBasics,
    #[serde(default)]
    pub qa: Vec<QA>,
}

/// Router exposing the two assessment operations plus a Markdown export.
pub fn assessment_router<A>(analyzer: Arc<A>) -> Router
where
    A: IncidentAnalyzer + 'static,
{
    Router::new()
        .route(
            "/api/v1/incidents/next-questions",
            post(next_questions_handler::<A>),
        )
        .route(
            "/api/v1/incidents/final-report",
            post(final_report_handler::<A>),
        )
        .route(
            "/api/v1/incidents/final-report/markdown",
            post(markdown_report_handler::<A>),
        )
        .with_state(analyzer)
}

pub(crate) async fn next_questions_handler<A>(
    State(analyzer): State<Arc<A>>,
    axum::Json(request): axum::Json<NextQuestionsRequest>,
) -> Response
where
    A: IncidentAnalyzer + 'static,
{
    match analyzer.next_questions(&request.basics, &request.history) {
        Ok(questions) => {
            info!(
                history = request.history.len(),
                served = questions.questions.len(),
                "next questions served"
            );
            (StatusCode::OK, axum::Json(questions)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn final_report_handler<A>(
    State(analyzer): State<Arc<A>>,
    axum::Json(request): axum::Json<FinalReportRequest>,
) -> Response
where
    A: IncidentAnalyzer + 'static,
{
    match analyzer.final_report(&request.basics, &request.qa) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn markdown_report_handler<A>(
    State(analyzer): State<Arc<A>>,
    axum::Json(request): axum::Json<FinalReportRequest>,
) -> Response
where
    A: IncidentAnalyzer + 'static,
{
    match analyzer.final_report(&request.basics, &request.qa) {
        Ok(report) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_markdown(&report),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AnalysisError) -> Response {
    warn!(%error, "assessment request rejected");
    AppError::from(error).into_response()
}

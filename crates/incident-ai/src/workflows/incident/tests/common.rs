use axum::response::Response;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::workflows::incident::analyzer::{AnalysisError, IncidentAnalyzer};
use crate::workflows::incident::domain::{Attachment, IncidentBasics, QA};
use crate::workflows::incident::questions::NextQuestions;
use crate::workflows::incident::report::IncidentReport;

pub(super) fn basics() -> IncidentBasics {
    IncidentBasics {
        what_happened: "Manager yelled and threatened to fire an employee over a scheduling dispute"
            .to_string(),
        involved_parties: vec!["Alex".to_string(), "Jordan".to_string()],
        location: "Warehouse office".to_string(),
        datetime: "2025-03-04T14:30:00Z".to_string(),
        attachments: Vec::new(),
    }
}

pub(super) fn basics_with(what_happened: &str) -> IncidentBasics {
    IncidentBasics {
        what_happened: what_happened.to_string(),
        ..basics()
    }
}

pub(super) fn scenario_answers() -> Vec<QA> {
    vec![
        QA::new(
            "Has anything similar happened before, either between these individuals or with others?",
            "Yes, the yelling has been repeated over the last two months.",
        ),
        QA::new(
            "What is the working relationship between the people involved, and does anyone report to anyone else?",
            "Jordan is Alex's direct supervisor.",
        ),
        QA::new(
            "How has this incident affected the people involved or their ability to do their work?",
            "Alex dreads coming in and the repeated outbursts make it hard to focus.",
        ),
    ]
}

pub(super) fn attachment() -> Attachment {
    Attachment {
        name: "Chat export".to_string(),
        url: "https://files.example.com/chat-export.txt".to_string(),
    }
}

pub(super) fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Primary analyzer whose backend is always down.
pub(super) struct OfflineAnalyzer;

impl IncidentAnalyzer for OfflineAnalyzer {
    fn next_questions(
        &self,
        _basics: &IncidentBasics,
        _history: &[QA],
    ) -> Result<NextQuestions, AnalysisError> {
        Err(AnalysisError::Upstream("model endpoint timed out".to_string()))
    }

    fn final_report(
        &self,
        _basics: &IncidentBasics,
        _qa: &[QA],
    ) -> Result<IncidentReport, AnalysisError> {
        Err(AnalysisError::Upstream("model endpoint timed out".to_string()))
    }
}

/// Primary analyzer that always answers with a canned question.
pub(super) struct CannedAnalyzer;

impl IncidentAnalyzer for CannedAnalyzer {
    fn next_questions(
        &self,
        basics: &IncidentBasics,
        _history: &[QA],
    ) -> Result<NextQuestions, AnalysisError> {
        basics.validate()?;
        Ok(NextQuestions {
            questions: vec!["Canned question?".to_string()],
            rationale: None,
        })
    }

    fn final_report(
        &self,
        _basics: &IncidentBasics,
        _qa: &[QA],
    ) -> Result<IncidentReport, AnalysisError> {
        Err(AnalysisError::Upstream("reports not supported".to_string()))
    }
}

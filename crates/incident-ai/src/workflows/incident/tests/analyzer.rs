use super::common::*;

use crate::workflows::incident::analyzer::{
    AnalysisError, FallbackAnalyzer, HeuristicAnalyzer, IncidentAnalyzer,
};
use crate::workflows::incident::domain::{BasicsField, ValidationError};
use crate::workflows::incident::scoring::RiskLevel;

#[test]
fn fallback_serves_heuristic_report_when_primary_is_offline() {
    let analyzer = FallbackAnalyzer::new(OfflineAnalyzer, HeuristicAnalyzer::default());
    let report = analyzer
        .final_report(&basics(), &scenario_answers())
        .expect("fallback report");
    assert_eq!(report.risk_level, RiskLevel::Moderate);
}

#[test]
fn fallback_prefers_primary_when_it_answers() {
    let analyzer = FallbackAnalyzer::new(CannedAnalyzer, HeuristicAnalyzer::default());
    let questions = analyzer
        .next_questions(&basics(), &[])
        .expect("primary questions");
    assert_eq!(questions.questions, vec!["Canned question?".to_string()]);

    let report = analyzer
        .final_report(&basics(), &[])
        .expect("fallback covers unsupported reports");
    assert_eq!(report.personalized_messages.len(), 2);
}

#[test]
fn fallback_passes_validation_errors_through() {
    let analyzer = FallbackAnalyzer::new(CannedAnalyzer, HeuristicAnalyzer::default());
    let mut basics = basics();
    basics.location.clear();

    match analyzer.next_questions(&basics, &[]) {
        Err(AnalysisError::Validation(ValidationError::MissingField(BasicsField::Location))) => {}
        other => panic!("expected location validation error, got {other:?}"),
    }
}

#[test]
fn seeded_heuristic_is_reproducible() {
    let first = HeuristicAnalyzer::with_seed(Some(42));
    let second = HeuristicAnalyzer::with_seed(Some(42));

    let a = first.next_questions(&basics(), &[]).expect("questions");
    let b = second.next_questions(&basics(), &[]).expect("questions");
    assert_eq!(a, b);
    assert_eq!(
        first.next_questions(&basics(), &[]).expect("questions"),
        a
    );
}

#[test]
fn heuristic_reports_are_deterministic_without_seed() {
    let analyzer = HeuristicAnalyzer::default();
    let a = analyzer
        .final_report(&basics(), &scenario_answers())
        .expect("report");
    let b = analyzer
        .final_report(&basics(), &scenario_answers())
        .expect("report");
    assert_eq!(a, b);
}

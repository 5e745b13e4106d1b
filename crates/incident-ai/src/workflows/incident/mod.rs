//! Workplace incident assessment: follow-up elicitation, weighted risk
//! scoring, party categorisation, next-step planning, and report assembly.
//!
//! Every operation is a pure function of its inputs. Session state such as
//! the current wizard step or question round belongs to the caller.

pub mod analyzer;
pub mod domain;
pub(crate) mod keywords;
pub mod parties;
pub mod planner;
pub mod questions;
pub mod report;
pub mod router;
pub mod scoring;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use analyzer::{AnalysisError, FallbackAnalyzer, HeuristicAnalyzer, IncidentAnalyzer};
pub use domain::{
    Attachment, BasicsField, IncidentBasics, IncidentTimestamp, ValidationError, QA,
    SKIPPED_ANSWER,
};
pub use parties::{categorize, CategorizedParties, PartyInfo, PartyRole};
pub use planner::{plan, EscalationTriggers, MAX_NEXT_STEPS};
pub use questions::{
    is_permitted_question, next_questions, next_questions_with_rng, NextQuestions, QuestionRound,
};
pub use report::{
    assemble, render_markdown, section_headings, IncidentReport, Message, ReportAssembler,
    RiskType,
};
pub use router::{assessment_router, FinalReportRequest, NextQuestionsRequest};
pub use scoring::{
    score, FactorKind, IncidentScore, IncidentScoreFactor, IncidentScorer, KeywordScorer,
    RiskLevel,
};
pub use wizard::WizardStep;

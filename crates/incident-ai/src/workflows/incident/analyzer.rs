use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use super::domain::{IncidentBasics, ValidationError, QA};
use super::questions::{next_questions_with_rng, NextQuestions};
use super::report::{IncidentReport, ReportAssembler};
use super::scoring::{IncidentScorer, KeywordScorer};

/// Errors an analyzer can raise.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("upstream analyzer unavailable: {0}")]
    Upstream(String),
}

/// Contract shared by the deterministic engine and any model-backed
/// replacement. Both HTTP operations go through it.
pub trait IncidentAnalyzer: Send + Sync {
    fn next_questions(
        &self,
        basics: &IncidentBasics,
        history: &[QA],
    ) -> Result<NextQuestions, AnalysisError>;

    fn final_report(
        &self,
        basics: &IncidentBasics,
        qa: &[QA],
    ) -> Result<IncidentReport, AnalysisError>;
}

/// Keyword heuristic engine. Holds no per-session state; a configured seed
/// only pins the question shuffle.
pub struct HeuristicAnalyzer<S = KeywordScorer> {
    assembler: ReportAssembler<S>,
    question_seed: Option<u64>,
}

impl Default for HeuristicAnalyzer<KeywordScorer> {
    fn default() -> Self {
        Self::new(KeywordScorer, None)
    }
}

impl HeuristicAnalyzer<KeywordScorer> {
    pub fn with_seed(question_seed: Option<u64>) -> Self {
        Self::new(KeywordScorer, question_seed)
    }
}

impl<S: IncidentScorer> HeuristicAnalyzer<S> {
    pub fn new(scorer: S, question_seed: Option<u64>) -> Self {
        Self {
            assembler: ReportAssembler::new(scorer),
            question_seed,
        }
    }
}

impl<S: IncidentScorer> IncidentAnalyzer for HeuristicAnalyzer<S> {
    fn next_questions(
        &self,
        basics: &IncidentBasics,
        history: &[QA],
    ) -> Result<NextQuestions, AnalysisError> {
        let questions = match self.question_seed {
            Some(seed) => next_questions_with_rng(basics, history, &mut StdRng::seed_from_u64(seed)),
            None => next_questions_with_rng(basics, history, &mut rand::thread_rng()),
        }?;
        Ok(questions)
    }

    fn final_report(
        &self,
        basics: &IncidentBasics,
        qa: &[QA],
    ) -> Result<IncidentReport, AnalysisError> {
        Ok(self.assembler.assemble(basics, qa)?)
    }
}

/// Wraps a primary analyzer and degrades to the heuristic engine when the
/// primary reports an upstream failure. Validation errors pass through.
pub struct FallbackAnalyzer<P> {
    primary: P,
    fallback: HeuristicAnalyzer,
}

impl<P: IncidentAnalyzer> FallbackAnalyzer<P> {
    pub fn new(primary: P, fallback: HeuristicAnalyzer) -> Self {
        Self { primary, fallback }
    }
}

impl<P: IncidentAnalyzer> IncidentAnalyzer for FallbackAnalyzer<P> {
    fn next_questions(
        &self,
        basics: &IncidentBasics,
        history: &[QA],
    ) -> Result<NextQuestions, AnalysisError> {
        match self.primary.next_questions(basics, history) {
            Err(AnalysisError::Upstream(reason)) => {
                warn!(%reason, "primary analyzer failed; serving heuristic questions");
                self.fallback.next_questions(basics, history)
            }
            other => other,
        }
    }

    fn final_report(
        &self,
        basics: &IncidentBasics,
        qa: &[QA],
    ) -> Result<IncidentReport, AnalysisError> {
        match self.primary.final_report(basics, qa) {
            Err(AnalysisError::Upstream(reason)) => {
                warn!(%reason, "primary analyzer failed; assembling heuristic report");
                self.fallback.final_report(basics, qa)
            }
            other => other,
        }
    }
}

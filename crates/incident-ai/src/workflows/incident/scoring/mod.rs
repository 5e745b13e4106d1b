mod factors;

pub use factors::FactorKind;

use serde::{Deserialize, Serialize};

use super::domain::{assessment_corpus, QA};

const LOW_RISK_CEILING: u8 = 45;
const MODERATE_RISK_CEILING: u8 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        }
    }

    pub const fn from_total(total: u8) -> Self {
        if total <= LOW_RISK_CEILING {
            Self::Low
        } else if total <= MODERATE_RISK_CEILING {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

/// One factor's contribution. `weighted_score = score * weight * 20`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentScoreFactor {
    pub factor: FactorKind,
    pub weight: f64,
    pub score: u8,
    pub weighted_score: f64,
    pub criteria: String,
}

impl IncidentScoreFactor {
    pub fn new(factor: FactorKind, score: u8) -> Self {
        let score = score.clamp(1, 5);
        let weight = factor.weight();
        Self {
            factor,
            weight,
            score,
            weighted_score: f64::from(score) * weight * 20.0,
            criteria: factor.criteria().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentScore {
    pub total_score: u8,
    pub risk_level: RiskLevel,
    pub factors: Vec<IncidentScoreFactor>,
    pub explanation: String,
}

impl IncidentScore {
    /// Sum the unrounded weighted scores, then round once.
    pub fn from_factors(factors: Vec<IncidentScoreFactor>, party_count: usize) -> Self {
        let sum: f64 = factors.iter().map(|factor| factor.weighted_score).sum();
        let total_score = sum.round().clamp(0.0, 100.0) as u8;
        let risk_level = RiskLevel::from_total(total_score);
        let explanation = explain(total_score, risk_level, &factors, party_count);

        Self {
            total_score,
            risk_level,
            factors,
            explanation,
        }
    }

    pub fn factor(&self, kind: FactorKind) -> Option<&IncidentScoreFactor> {
        self.factors.iter().find(|factor| factor.factor == kind)
    }
}

/// Seam for swapping the keyword heuristic for a model-backed classifier.
pub trait IncidentScorer: Send + Sync {
    fn score(&self, what_happened: &str, qa: &[QA], involved_parties: &[String]) -> IncidentScore;
}

/// Stateless keyword heuristic over the narrative and answered follow-ups.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScorer;

impl IncidentScorer for KeywordScorer {
    fn score(&self, what_happened: &str, qa: &[QA], involved_parties: &[String]) -> IncidentScore {
        let corpus = assessment_corpus(what_happened, qa);
        let factors = FactorKind::ordered()
            .into_iter()
            .map(|kind| IncidentScoreFactor::new(kind, kind.score(&corpus)))
            .collect();

        IncidentScore::from_factors(factors, involved_parties.len())
    }
}

/// Convenience entry point using the keyword heuristic.
pub fn score(what_happened: &str, qa: &[QA], involved_parties: &[String]) -> IncidentScore {
    KeywordScorer.score(what_happened, qa, involved_parties)
}

fn explain(
    total_score: u8,
    risk_level: RiskLevel,
    factors: &[IncidentScoreFactor],
    party_count: usize,
) -> String {
    let mut explanation = format!(
        "Weighted risk score of {total_score}/100 places this incident in the {} tier",
        risk_level.label()
    );
    explanation.push_str(&match party_count {
        0 => ".".to_string(),
        1 => " (1 party involved).".to_string(),
        count => format!(" ({count} parties involved)."),
    });

    let drivers: Vec<String> = factors
        .iter()
        .filter(|factor| factor.score >= 4)
        .map(|factor| format!("{} ({}/5)", factor.factor.label(), factor.score))
        .collect();

    if drivers.is_empty() {
        explanation.push_str(" No single factor scored in the elevated range.");
    } else {
        explanation.push_str(&format!(" Primary drivers: {}.", drivers.join(", ")));
    }

    explanation
}

//! Pure step transitions for the intake wizard. The caller owns the current
//! step and the Q&A history; these helpers only decide where it may go next.

use serde::{Deserialize, Serialize};

use super::domain::IncidentBasics;
use super::questions::NextQuestions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ApiConfig,
    Basics,
    AdditionalDetails,
    FollowUps,
    FinalReport,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ApiConfig,
            Self::Basics,
            Self::AdditionalDetails,
            Self::FollowUps,
            Self::FinalReport,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ApiConfig => "API Configuration",
            Self::Basics => "Incident Basics",
            Self::AdditionalDetails => "Additional Details",
            Self::FollowUps => "Follow-up Questions",
            Self::FinalReport => "Final Report",
        }
    }

    /// First step shown. API configuration is skipped when a model backend is
    /// not offered.
    pub const fn first(offer_api_config: bool) -> Self {
        if offer_api_config {
            Self::ApiConfig
        } else {
            Self::Basics
        }
    }

    /// Backward navigation, blocked on the first step of the flow.
    pub const fn previous(self, offer_api_config: bool) -> Option<Self> {
        match self {
            Self::ApiConfig => None,
            Self::Basics if offer_api_config => Some(Self::ApiConfig),
            Self::Basics => None,
            Self::AdditionalDetails => Some(Self::Basics),
            Self::FollowUps => Some(Self::AdditionalDetails),
            Self::FinalReport => Some(Self::FollowUps),
        }
    }

    /// Forward navigation. Leaving `Basics` needs the narrative, parties and
    /// location; leaving `AdditionalDetails` needs the datetime too. From
    /// `FollowUps` the move is automatic once the generator has nothing left.
    pub fn next(self, basics: &IncidentBasics, pending: Option<&NextQuestions>) -> Option<Self> {
        match self {
            Self::ApiConfig => Some(Self::Basics),
            Self::Basics => has_core_facts(basics).then_some(Self::AdditionalDetails),
            Self::AdditionalDetails => basics.validate().is_ok().then_some(Self::FollowUps),
            Self::FollowUps => pending
                .is_some_and(NextQuestions::is_complete)
                .then_some(Self::FinalReport),
            Self::FinalReport => None,
        }
    }

    /// Entering `FinalReport` assembles exactly once per session.
    pub const fn needs_report(self, report_present: bool) -> bool {
        matches!(self, Self::FinalReport) && !report_present
    }
}

fn has_core_facts(basics: &IncidentBasics) -> bool {
    !basics.what_happened.trim().is_empty()
        && !basics.location.trim().is_empty()
        && basics
            .involved_parties
            .iter()
            .any(|name| !name.trim().is_empty())
}

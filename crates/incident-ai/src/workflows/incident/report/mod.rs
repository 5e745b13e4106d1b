mod markdown;
mod messages;

pub use markdown::{render_markdown, section_headings};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{assessment_corpus, IncidentBasics, ValidationError, QA};
use super::keywords::mentions_any;
use super::parties::{categorize, CategorizedParties, CATEGORIZATION_NOTE};
use super::planner::{plan_for_corpus, EscalationTriggers};
use super::questions::{ADVERSE_ACTION_QUESTION, IMPACT_QUESTION};
use super::scoring::{FactorKind, IncidentScore, IncidentScorer, KeywordScorer, RiskLevel};

/// Terminal artifact of an assessment session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub general_information: GeneralInformation,
    pub incident_details: IncidentDetails,
    pub impact_consequences: ImpactConsequences,
    pub policy_cross_check: PolicyCrossCheck,
    pub incident_summary: String,
    pub detailed_account: String,
    pub risk_level: RiskLevel,
    pub risk_type: RiskType,
    pub incident_score: IncidentScore,
    pub categorized_parties: CategorizedParties,
    pub categorization_note: String,
    pub recommended_next_steps: Vec<String>,
    pub company_message: Message,
    pub personalized_messages: BTreeMap<String, Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_violations: Option<Vec<PolicyViolation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense_notes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<EvidenceItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_requirements: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralInformation {
    pub incident_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_time: Option<String>,
    pub reported_datetime: String,
    pub location: String,
    pub parties_involved: Vec<String>,
    pub attachment_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentDetails {
    pub description: String,
    pub location: String,
    pub follow_up: Vec<QA>,
    pub unanswered_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactConsequences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_changes: Option<String>,
    pub elevated_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyReference {
    pub title: String,
    pub section: String,
    pub relevance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyCrossCheck {
    pub policies_referenced: Vec<PolicyReference>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyViolation {
    pub policy: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskType {
    #[serde(rename = "Workplace Violence")]
    WorkplaceViolence,
    #[serde(rename = "Sexual Misconduct")]
    SexualMisconduct,
    Retaliation,
    Discrimination,
    Harassment,
    #[serde(rename = "Wage & Hour")]
    WageAndHour,
    #[serde(rename = "Interpersonal Conflict")]
    InterpersonalConflict,
    #[serde(rename = "General Misconduct")]
    GeneralMisconduct,
}

impl RiskType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WorkplaceViolence => "Workplace Violence",
            Self::SexualMisconduct => "Sexual Misconduct",
            Self::Retaliation => "Retaliation",
            Self::Discrimination => "Discrimination",
            Self::Harassment => "Harassment",
            Self::WageAndHour => "Wage & Hour",
            Self::InterpersonalConflict => "Interpersonal Conflict",
            Self::GeneralMisconduct => "General Misconduct",
        }
    }

    /// Most severe matching category wins.
    fn classify(corpus: &str, triggers: &EscalationTriggers) -> Self {
        if triggers.violence {
            Self::WorkplaceViolence
        } else if triggers.sexual_misconduct {
            Self::SexualMisconduct
        } else if mentions_any(corpus, &["retaliat*"]) {
            Self::Retaliation
        } else if mentions_any(corpus, &["discriminat*"]) {
            Self::Discrimination
        } else if mentions_any(corpus, &["harass*", "slur*", "offensive", "inappropriate"]) {
            Self::Harassment
        } else if mentions_any(corpus, &["wage", "wages", "unpaid", "overtime"]) {
            Self::WageAndHour
        } else if mentions_any(
            corpus,
            &["dispute*", "conflict*", "argu*", "yell*", "shout*", "disagree*"],
        ) {
            Self::InterpersonalConflict
        } else {
            Self::GeneralMisconduct
        }
    }
}

/// Placeholder handbook references attached to every report until a real
/// policy library is wired in.
fn placeholder_policies() -> Vec<PolicyReference> {
    [
        (
            "Code of Conduct",
            "Section 2: Respectful Workplace",
            "Baseline conduct expectations for all employees",
        ),
        (
            "Anti-Harassment and Non-Discrimination Policy",
            "Section 4: Reporting and Investigation",
            "Governs intake, investigation, and protection of reporting parties",
        ),
        (
            "Anti-Retaliation Policy",
            "Section 1: Protected Activity",
            "Prohibits adverse action against anyone who reports or participates",
        ),
        (
            "Workplace Violence Prevention Policy",
            "Section 3: Threats and Violent Conduct",
            "Defines prohibited conduct and mandatory safety escalation",
        ),
    ]
    .into_iter()
    .map(|(title, section, relevance)| PolicyReference {
        title: title.to_string(),
        section: section.to_string(),
        relevance: relevance.to_string(),
    })
    .collect()
}

/// Composes scoring, categorisation, and planning into one report.
pub struct ReportAssembler<S = KeywordScorer> {
    scorer: S,
}

impl Default for ReportAssembler<KeywordScorer> {
    fn default() -> Self {
        Self::new(KeywordScorer)
    }
}

impl<S: IncidentScorer> ReportAssembler<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Build the complete report or fail without a partial result.
    pub fn assemble(
        &self,
        basics: &IncidentBasics,
        qa: &[QA],
    ) -> Result<IncidentReport, ValidationError> {
        basics.validate()?;
        let occurred_at = basics.occurred_at()?;
        let party_names = basics.party_names();

        let incident_score = self.scorer.score(&basics.what_happened, qa, &party_names);
        let corpus = assessment_corpus(&basics.what_happened, qa);
        let triggers = EscalationTriggers::detect(&corpus);
        let risk_level = incident_score.risk_level;
        let risk_type = RiskType::classify(&corpus, &triggers);
        let categorized_parties = categorize(&party_names);
        let recommended_next_steps = plan_for_corpus(risk_level, &corpus);

        let general_information = GeneralInformation {
            incident_date: occurred_at.date_label(),
            incident_time: occurred_at.time_label(),
            reported_datetime: basics.datetime.trim().to_string(),
            location: basics.location.trim().to_string(),
            parties_involved: party_names.clone(),
            attachment_count: basics.attachments.len(),
        };

        let incident_details = IncidentDetails {
            description: basics.what_happened.trim().to_string(),
            location: basics.location.trim().to_string(),
            follow_up: qa.to_vec(),
            unanswered_questions: qa.iter().filter(|entry| entry.is_skipped()).count(),
        };

        let impact_consequences = ImpactConsequences {
            reported_impact: answer_to(qa, IMPACT_QUESTION),
            employment_changes: answer_to(qa, ADVERSE_ACTION_QUESTION),
            elevated_factors: incident_score
                .factors
                .iter()
                .filter(|factor| factor.score >= 4)
                .map(|factor| factor.factor.label().to_string())
                .collect(),
        };

        let policy_cross_check = PolicyCrossCheck {
            policies_referenced: placeholder_policies(),
            notes: "Policy references are standard placeholders; confirm section numbers \
                    against the current employee handbook before citing them."
                .to_string(),
        };

        let facts = messages::MessageFacts {
            date: &general_information.incident_date,
            location: &general_information.location,
            risk_level,
            risk_type,
        };
        let company_message = messages::company_message(&facts);
        let personalized_messages = categorized_parties
            .all()
            .map(|party| (party.name.clone(), messages::personal_message(party, &facts)))
            .collect();

        let report = IncidentReport {
            incident_summary: summary(basics, &party_names, risk_level, risk_type),
            detailed_account: detailed_account(basics, qa),
            policy_violations: non_empty(policy_violations(&corpus, &triggers)),
            defense_notes: non_empty(defense_notes(&incident_score)),
            evidence: non_empty(
                basics
                    .attachments
                    .iter()
                    .map(|attachment| EvidenceItem {
                        name: attachment.name.clone(),
                        url: attachment.url.clone(),
                    })
                    .collect(),
            ),
            notification_requirements: non_empty(notification_requirements(
                risk_level, &triggers,
            )),
            general_information,
            incident_details,
            impact_consequences,
            policy_cross_check,
            risk_level,
            risk_type,
            incident_score,
            categorized_parties,
            categorization_note: CATEGORIZATION_NOTE.to_string(),
            recommended_next_steps,
            company_message,
            personalized_messages,
        };

        info!(
            total_score = report.incident_score.total_score,
            risk_level = report.risk_level.label(),
            risk_type = report.risk_type.label(),
            next_steps = report.recommended_next_steps.len(),
            "incident report assembled"
        );

        Ok(report)
    }
}

/// Assemble with the keyword heuristic.
pub fn assemble(basics: &IncidentBasics, qa: &[QA]) -> Result<IncidentReport, ValidationError> {
    ReportAssembler::default().assemble(basics, qa)
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn answer_to(qa: &[QA], question: &str) -> Option<String> {
    qa.iter()
        .find(|entry| entry.question == question && !entry.is_skipped())
        .map(|entry| entry.answer.trim().to_string())
}

fn summary(
    basics: &IncidentBasics,
    party_names: &[String],
    risk_level: RiskLevel,
    risk_type: RiskType,
) -> String {
    format!(
        "{} incident reported at {} on {} involving {}. Assessed as {}.",
        risk_type.label(),
        basics.location.trim(),
        basics.datetime.trim(),
        party_names.join(", "),
        risk_level.label()
    )
}

fn detailed_account(basics: &IncidentBasics, qa: &[QA]) -> String {
    let mut account = format!(
        "Reported account: {}\n\nLocation: {}\nDate/time: {}",
        basics.what_happened.trim(),
        basics.location.trim(),
        basics.datetime.trim()
    );
    if !qa.is_empty() {
        account.push_str("\n\nFollow-up responses:");
        for (index, entry) in qa.iter().enumerate() {
            account.push_str(&format!(
                "\n{}. Q: {}\n   A: {}",
                index + 1,
                entry.question.trim(),
                entry.answer.trim()
            ));
        }
    }
    account
}

fn policy_violations(corpus: &str, triggers: &EscalationTriggers) -> Vec<PolicyViolation> {
    let mut violations = Vec::new();
    if triggers.violence || triggers.threats {
        violations.push(PolicyViolation {
            policy: "Workplace Violence Prevention Policy".to_string(),
            description: "Reported violent or threatening conduct".to_string(),
        });
    }
    if triggers.sexual_misconduct
        || mentions_any(corpus, &["harass*", "discriminat*", "slur*"])
    {
        violations.push(PolicyViolation {
            policy: "Anti-Harassment and Non-Discrimination Policy".to_string(),
            description: "Reported harassing, discriminatory, or sexual conduct".to_string(),
        });
    }
    if mentions_any(corpus, &["retaliat*"]) {
        violations.push(PolicyViolation {
            policy: "Anti-Retaliation Policy".to_string(),
            description: "Reported adverse treatment linked to a complaint or protected activity"
                .to_string(),
        });
    }
    violations
}

fn defense_notes(score: &IncidentScore) -> Vec<String> {
    let mut notes = Vec::new();
    if score
        .factor(FactorKind::DocumentationStrength)
        .is_some_and(|factor| factor.score == 1)
    {
        notes.push(
            "Documentation of the incident exists and should be preserved for the file"
                .to_string(),
        );
    }
    if score
        .factor(FactorKind::PolicyAlignment)
        .is_some_and(|factor| factor.score == 1)
    {
        notes.push("An applicable written policy covers the reported conduct".to_string());
    }
    if score
        .factor(FactorKind::AdverseAction)
        .is_some_and(|factor| factor.score == 1)
    {
        notes.push("No adverse employment action has been reported".to_string());
    }
    notes
}

fn notification_requirements(risk_level: RiskLevel, triggers: &EscalationTriggers) -> Vec<String> {
    let mut requirements = Vec::new();
    if triggers.requires_immediate_action() {
        requirements
            .push("Law enforcement, where a crime may have occurred or danger persists".to_string());
    }
    if triggers.requires_threat_consultation(risk_level) {
        requirements.push("Law enforcement consultation regarding threats".to_string());
    }
    if risk_level == RiskLevel::High {
        requirements.push("Senior leadership and legal counsel within 24 hours".to_string());
        if !triggers.violence {
            requirements.push("Employment practices liability insurance carrier".to_string());
        }
    }
    requirements
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{assessment_corpus, QA};
use super::keywords::mentions_any;
use super::scoring::{IncidentScore, RiskLevel};

pub const MAX_NEXT_STEPS: usize = 8;

pub const LAW_ENFORCEMENT_STEP: &str =
    "Contact law enforcement immediately if anyone is in danger or a crime may have occurred";
pub const IMMEDIATE_SAFETY_STEP: &str =
    "Ensure the immediate safety of everyone involved and secure the area";
pub const SEPARATE_PARTIES_STEP: &str =
    "Separate the involved parties pending the outcome of the investigation";
pub const THREAT_CONSULTATION_STEP: &str =
    "Consult law enforcement about the threatening statements and assess the credible risk of harm";
pub const FORMAL_INVESTIGATION_STEP: &str =
    "Open a formal HR investigation with a documented scope and timeline";
pub const INSURANCE_NOTICE_STEP: &str =
    "Notify the employment practices liability insurance carrier of a potential claim";

const HIGH_RISK_STEPS: [&str; 5] = [
    "Escalate to senior leadership and the head of HR within 24 hours",
    "Engage employment legal counsel before taking further action",
    "Consider placing the accused on paid administrative leave pending investigation",
    "Preserve all evidence, including emails, chat messages, and access logs",
    "Retain an external investigator to ensure an impartial investigation",
];

const MODERATE_RISK_STEPS: [&str; 5] = [
    FORMAL_INVESTIGATION_STEP,
    "Put interim separation measures in place if the parties work together",
    "Review the applicable workplace policies and any prior documentation involving the parties",
    "Interview all witnesses and record signed statements",
    "Apply progressive discipline if the allegations are substantiated",
];

const MODERATE_LEGAL_STEP: &str =
    "Consult employment counsel given the protected-class, harassment, or discrimination concerns";

const LOW_RISK_STEPS: [&str; 4] = [
    "Provide coaching to the employees involved on workplace conduct expectations",
    "Offer informal mediation between the parties",
    "Clarify expectations under the relevant workplace policy with the team",
    "Increase supervisory check-ins with the parties over the next 30 days",
];

const TRAILER_STEPS: [&str; 2] = [
    "Document every action taken and decision made in the case file",
    "Schedule a 30-day follow-up review with the complainant",
];

const VIOLENCE_TERMS: &[&str] = &[
    "violen*",
    "assault*",
    "weapon*",
    "gun",
    "guns",
    "firearm*",
    "knife",
    "knives",
    "punch*",
    "hit",
    "hitting",
    "struck",
    "shoved",
    "attack*",
    "chok*",
    "slap*",
    "kick*",
    "physical fight",
];

const SEXUAL_MISCONDUCT_TERMS: &[&str] = &[
    "sexual assault",
    "sexual misconduct",
    "sexual contact",
    "grope*",
    "groped",
    "groping",
    "rape*",
    "molest*",
    "unwanted touching",
    "indecent exposure",
];

const THREAT_TERMS: &[&str] = &[
    "threat*",
    "kill",
    "going to hurt",
    "hurt you",
    "get even",
    "watch your back",
];

const PROTECTED_CONCERN_TERMS: &[&str] = &[
    "harass*",
    "discriminat*",
    "protected",
    "race",
    "racial*",
    "racis*",
    "gender",
    "pregnan*",
    "disabilit*",
    "religio*",
    "national origin",
    "age",
];

const CUSTOMER_TERMS: &[&str] = &["customer*", "client*", "vendor*", "patient*"];
const SAFETY_TERMS: &[&str] = &["safety", "unsafe", "injur*", "hurt", "hazard*"];
const DIGITAL_TERMS: &[&str] = &[
    "social media",
    "online",
    "facebook",
    "instagram",
    "twitter",
    "tiktok",
    "linkedin",
    "text message*",
    "posted",
];

/// Keyword-detected conditions that force safety steps ahead of tier steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationTriggers {
    pub violence: bool,
    pub sexual_misconduct: bool,
    pub threats: bool,
}

impl EscalationTriggers {
    pub fn detect(corpus: &str) -> Self {
        Self {
            violence: mentions_any(corpus, VIOLENCE_TERMS),
            sexual_misconduct: mentions_any(corpus, SEXUAL_MISCONDUCT_TERMS),
            threats: mentions_any(corpus, THREAT_TERMS),
        }
    }

    /// Violence or sexual misconduct: immediate safety actions are mandatory.
    pub fn requires_immediate_action(&self) -> bool {
        self.violence || self.sexual_misconduct
    }

    /// Threats only warrant police consultation alongside high risk or violence.
    pub fn requires_threat_consultation(&self, risk_level: RiskLevel) -> bool {
        self.threats && (risk_level == RiskLevel::High || self.violence)
    }
}

/// Ordered, deduplicated next steps for an assessed incident.
pub fn plan(score: &IncidentScore, what_happened: &str, qa: &[QA]) -> Vec<String> {
    let corpus = assessment_corpus(what_happened, qa);
    plan_for_corpus(score.risk_level, &corpus)
}

pub(crate) fn plan_for_corpus(risk_level: RiskLevel, corpus: &str) -> Vec<String> {
    let triggers = EscalationTriggers::detect(corpus);
    let mut steps: Vec<&str> = Vec::new();

    if triggers.requires_immediate_action() {
        steps.extend([
            LAW_ENFORCEMENT_STEP,
            IMMEDIATE_SAFETY_STEP,
            SEPARATE_PARTIES_STEP,
        ]);
    }
    if triggers.requires_threat_consultation(risk_level) {
        steps.push(THREAT_CONSULTATION_STEP);
    }

    match risk_level {
        RiskLevel::High => {
            steps.extend(HIGH_RISK_STEPS);
            if !triggers.violence {
                steps.push(INSURANCE_NOTICE_STEP);
            }
        }
        RiskLevel::Moderate => {
            steps.extend(MODERATE_RISK_STEPS);
            if mentions_any(corpus, PROTECTED_CONCERN_TERMS) {
                steps.push(MODERATE_LEGAL_STEP);
            }
        }
        RiskLevel::Low => steps.extend(LOW_RISK_STEPS),
    }

    steps.extend(TRAILER_STEPS);

    if mentions_any(corpus, CUSTOMER_TERMS) {
        steps.push("Assess the business impact on affected customer or client relationships");
    }
    if mentions_any(corpus, SAFETY_TERMS) {
        steps.push("Review workplace safety protocols and any related injury reports");
    }
    if mentions_any(corpus, DIGITAL_TERMS) {
        steps.push("Monitor digital communications and social media activity tied to the incident");
    }

    // Safety actions lead the list and number at most four, so truncation
    // can only ever drop lower-priority steps.
    let mut seen = BTreeSet::new();
    steps
        .into_iter()
        .filter(|step| seen.insert(*step))
        .take(MAX_NEXT_STEPS)
        .map(str::to_string)
        .collect()
}

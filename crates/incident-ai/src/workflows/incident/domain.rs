use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Terminal answer recorded when the reporter skips a follow-up question.
pub const SKIPPED_ANSWER: &str = "I don't know or prefer not to answer";

/// Facts captured on the first wizard steps. Party order matters: the
/// first-named party is treated as the complainant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentBasics {
    pub what_happened: String,
    pub involved_parties: Vec<String>,
    pub location: String,
    pub datetime: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// Reference to supporting material. The engine never opens these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

/// One elicited follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub struct QA {
    pub question: String,
    pub answer: String,
}

impl QA {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn skipped(question: impl Into<String>) -> Self {
        Self::new(question, SKIPPED_ANSWER)
    }

    pub fn is_skipped(&self) -> bool {
        let answer = self.answer.trim();
        answer.is_empty() || answer.eq_ignore_ascii_case(SKIPPED_ANSWER)
    }
}

/// Required `IncidentBasics` fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicsField {
    WhatHappened,
    InvolvedParties,
    Location,
    Datetime,
}

impl BasicsField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WhatHappened => "whatHappened",
            Self::InvolvedParties => "involvedParties",
            Self::Location => "location",
            Self::Datetime => "datetime",
        }
    }
}

impl std::fmt::Display for BasicsField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Contract violations on the incident basics. Never defaulted away.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field `{0}` is missing or empty")]
    MissingField(BasicsField),
    #[error("involved party at position {0} has a blank name")]
    BlankPartyName(usize),
    #[error("involved party `{0}` is listed more than once")]
    DuplicateParty(String),
    #[error("datetime `{0}` is not an ISO-8601 timestamp")]
    InvalidDatetime(String),
}

impl IncidentBasics {
    /// Fail fast on anything the engine cannot assess.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.what_happened.trim().is_empty() {
            return Err(ValidationError::MissingField(BasicsField::WhatHappened));
        }
        if self.involved_parties.is_empty() {
            return Err(ValidationError::MissingField(BasicsField::InvolvedParties));
        }
        if self.location.trim().is_empty() {
            return Err(ValidationError::MissingField(BasicsField::Location));
        }
        if self.datetime.trim().is_empty() {
            return Err(ValidationError::MissingField(BasicsField::Datetime));
        }

        let mut seen = BTreeSet::new();
        for (index, name) in self.involved_parties.iter().enumerate() {
            let name = name.trim();
            if name.is_empty() {
                return Err(ValidationError::BlankPartyName(index));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(ValidationError::DuplicateParty(name.to_string()));
            }
        }

        self.occurred_at()?;
        Ok(())
    }

    pub fn occurred_at(&self) -> Result<IncidentTimestamp, ValidationError> {
        IncidentTimestamp::parse(&self.datetime)
    }

    /// Trimmed party names in reported order.
    pub fn party_names(&self) -> Vec<String> {
        self.involved_parties
            .iter()
            .map(|name| name.trim().to_string())
            .collect()
    }
}

/// Parsed incident time. Date-only inputs carry no time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentTimestamp {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

impl IncidentTimestamp {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::DateTime(parsed.naive_local()));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::DateTime(parsed));
            }
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self::Date)
            .map_err(|_| ValidationError::InvalidDatetime(raw.to_string()))
    }

    pub fn date_label(&self) -> String {
        match self {
            Self::DateTime(value) => value.format("%B %-d, %Y").to_string(),
            Self::Date(value) => value.format("%B %-d, %Y").to_string(),
        }
    }

    pub fn time_label(&self) -> Option<String> {
        match self {
            Self::DateTime(value) => Some(value.format("%H:%M").to_string()),
            Self::Date(_) => None,
        }
    }
}

/// Lower-cased text the scorer and planner inspect: the narrative plus every
/// answered follow-up. Skipped answers contribute nothing.
pub fn assessment_corpus(what_happened: &str, qa: &[QA]) -> String {
    let mut corpus = what_happened.to_lowercase();
    for entry in qa.iter().filter(|entry| !entry.is_skipped()) {
        corpus.push(' ');
        corpus.push_str(&entry.answer.to_lowercase());
    }
    corpus
}

use super::super::parties::{PartyInfo, PartyRole};
use super::super::scoring::RiskLevel;
use super::{Message, RiskType};

pub(super) struct MessageFacts<'a> {
    pub date: &'a str,
    pub location: &'a str,
    pub risk_level: RiskLevel,
    pub risk_type: RiskType,
}

/// Company-wide note. Names no individuals.
pub(super) fn company_message(facts: &MessageFacts<'_>) -> Message {
    let mut body = format!(
        "We are aware of a workplace matter reported on {} at {} and are reviewing it under our \
         standard process. Everyone is expected to treat colleagues with respect and to cooperate \
         fully if asked to assist. Retaliation against anyone who raises a concern or takes part \
         in a review is prohibited.",
        facts.date, facts.location
    );
    if facts.risk_level == RiskLevel::High || facts.risk_type == RiskType::WorkplaceViolence {
        body.push_str(
            " If you have safety concerns, contact HR or building security right away.",
        );
    }
    body.push_str(" Please direct questions to the HR team and keep details confidential.");

    Message {
        subject: "Reminder: Respectful Workplace Expectations".to_string(),
        body,
    }
}

/// Role-specific note for one party.
pub(super) fn personal_message(party: &PartyInfo, facts: &MessageFacts<'_>) -> Message {
    let (subject, detail) = match party.role {
        PartyRole::Complainant => (
            "Your report has been received",
            format!(
                "Thank you for reporting the {} matter from {}. HR is reviewing it and will follow \
                 up with next steps. You are protected from retaliation for raising this concern; \
                 tell HR immediately if you experience any adverse treatment.",
                facts.risk_type.label().to_lowercase(),
                facts.date
            ),
        ),
        PartyRole::AccusedSubject => (
            "Request to meet with HR",
            format!(
                "HR is reviewing a workplace matter from {} at {} and would like to meet with you to \
                 hear your account. No conclusions have been reached. Please keep this matter \
                 confidential and do not contact other people involved about it.",
                facts.date, facts.location
            ),
        ),
        PartyRole::Witness => (
            "Request for your input",
            format!(
                "HR is reviewing a workplace matter from {} at {} and understands you may have \
                 relevant information. We would like to schedule a short confidential conversation. \
                 Participation is protected from retaliation.",
                facts.date, facts.location
            ),
        ),
    };

    Message {
        subject: subject.to_string(),
        body: format!("Hi {},\n\n{}\n\nHR Team", party.name, detail),
    }
}

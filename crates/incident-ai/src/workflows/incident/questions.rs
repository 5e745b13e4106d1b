use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{IncidentBasics, ValidationError, QA};
use super::keywords::mentions_any;

/// Elicitation rounds in a session before the report is ready.
pub const FOLLOW_UP_ROUNDS: usize = 3;
const MIN_POOL: usize = 4;
const MAX_POOL: usize = 6;

/// Terms that must never appear in an elicitation question. Policies are
/// cross-checked by the report, not self-reported.
const BLOCKED_TERMS: [&str; 4] = ["policy", "training", "handbook", "procedure"];

/// Explicit elicitation round, derived from how many answers the caller holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionRound {
    Opening,
    Clarifying,
    Closing,
    Complete,
}

impl QuestionRound {
    pub const fn from_history_len(len: usize) -> Self {
        match len {
            0 => Self::Opening,
            1 => Self::Clarifying,
            2 => Self::Closing,
            _ => Self::Complete,
        }
    }

    /// Questions served in this round: 2, 2, 1, then none.
    pub const fn batch_size(self) -> usize {
        match self {
            Self::Opening | Self::Clarifying => 2,
            Self::Closing => 1,
            Self::Complete => 0,
        }
    }

    const fn ordinal(self) -> usize {
        match self {
            Self::Opening => 1,
            Self::Clarifying => 2,
            Self::Closing => 3,
            Self::Complete => 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextQuestions {
    pub questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl NextQuestions {
    pub fn is_complete(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Topic detected in the narrative and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Topic {
    Harassment,
    VerbalAltercation,
    PhysicalContact,
    PublicSetting,
}

impl Topic {
    const ALL: [Self; 4] = [
        Self::Harassment,
        Self::VerbalAltercation,
        Self::PhysicalContact,
        Self::PublicSetting,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Harassment => "the language or conduct reported",
            Self::VerbalAltercation => "the verbal exchange",
            Self::PhysicalContact => "the physical contact",
            Self::PublicSetting => "who else was present",
        }
    }

    const fn triggers(self) -> &'static [&'static str] {
        match self {
            Self::Harassment => &[
                "harass*",
                "discriminat*",
                "inappropriate",
                "offensive",
                "slur*",
                "comment*",
                "joke*",
                "remark*",
            ],
            Self::VerbalAltercation => &[
                "yell*",
                "shout*",
                "scream*",
                "argu*",
                "curs*",
                "swore",
                "raised voice*",
                "verbal*",
                "insult*",
            ],
            Self::PhysicalContact => &[
                "push*",
                "shov*",
                "hit",
                "hitting",
                "touch*",
                "grab*",
                "physical*",
                "punch*",
                "struck",
                "kick*",
            ],
            Self::PublicSetting => &[
                "break room",
                "breakroom",
                "lobby",
                "cafeteria",
                "meeting",
                "conference",
                "open office",
                "sales floor",
                "warehouse floor",
                "parking",
                "public",
                "kitchen",
                "hallway",
                "front desk",
            ],
        }
    }

    const fn questions(self) -> &'static [&'static str] {
        match self {
            Self::Harassment => &[
                "What specific words or comments were used, as closely as you can recall them?",
                "Did the comments or conduct relate to a personal characteristic such as race, gender, age, religion, or disability?",
            ],
            Self::VerbalAltercation => &[
                "How did the exchange begin, and how did it end?",
                "Did anyone else hear the exchange, and how would they describe the tone?",
            ],
            Self::PhysicalContact => &[
                "Describe exactly what physical contact occurred and who initiated it.",
                "Was anyone injured, and was medical attention sought or needed?",
            ],
            Self::PublicSetting => &[
                "Who else was present in the area when this happened?",
                "Are there cameras or other recordings that cover that location?",
            ],
        }
    }
}

const PATTERN_QUESTION: &str =
    "Has anything similar happened before, either between these individuals or with others?";
const RELATIONSHIP_QUESTION: &str =
    "What is the working relationship between the people involved, and does anyone report to anyone else?";
const DOCUMENTATION_QUESTION: &str =
    "Is there any documentation of the incident, such as emails, messages, photos, or notes?";
pub(crate) const ADVERSE_ACTION_QUESTION: &str =
    "Has anyone had a change in schedule, pay, duties, or employment status since the incident or the report?";
pub(crate) const IMPACT_QUESTION: &str =
    "How has this incident affected the people involved or their ability to do their work?";
const TIMING_QUESTION: &str = "When was this first reported, and to whom?";
const RESPONSE_QUESTION: &str = "What was done immediately after the incident, and by whom?";

/// True when a question is safe to ask during elicitation.
pub fn is_permitted_question(question: &str) -> bool {
    let lowered = question.to_lowercase();
    !BLOCKED_TERMS.iter().any(|term| lowered.contains(term))
}

/// Every candidate for these basics before dedup, filtering and shuffling.
pub fn candidate_questions(basics: &IncidentBasics) -> Vec<String> {
    let text = format!("{} {}", basics.what_happened, basics.location).to_lowercase();

    let mut candidates: Vec<&str> = Topic::ALL
        .iter()
        .filter(|topic| mentions_any(&text, topic.triggers()))
        .flat_map(|topic| topic.questions().iter().copied())
        .collect();

    candidates.push(PATTERN_QUESTION);
    if basics.involved_parties.len() > 1 {
        candidates.push(RELATIONSHIP_QUESTION);
    }
    candidates.extend([
        DOCUMENTATION_QUESTION,
        ADVERSE_ACTION_QUESTION,
        IMPACT_QUESTION,
        TIMING_QUESTION,
        RESPONSE_QUESTION,
    ]);

    candidates.into_iter().map(str::to_string).collect()
}

/// Drop blocked questions, exact duplicates, and anything already asked.
fn eligible_pool(candidates: Vec<String>, history: &[QA]) -> Vec<String> {
    let asked: BTreeSet<&str> = history.iter().map(|entry| entry.question.trim()).collect();
    let mut seen = BTreeSet::new();
    candidates
        .into_iter()
        .filter(|question| is_permitted_question(question))
        .filter(|question| !asked.contains(question.as_str()))
        .filter(|question| seen.insert(question.clone()))
        .collect()
}

/// Serve the next batch of follow-ups using the thread-local RNG.
pub fn next_questions(
    basics: &IncidentBasics,
    history: &[QA],
) -> Result<NextQuestions, ValidationError> {
    next_questions_with_rng(basics, history, &mut rand::thread_rng())
}

/// Serve the next batch of follow-ups with an injected random source.
///
/// The eligible pool is shuffled and truncated to 4..=6 candidates, then the
/// round derived from `history.len()` takes its batch from the front. Once
/// three answers are held the list is empty, signalling the report is ready.
pub fn next_questions_with_rng<R: Rng + ?Sized>(
    basics: &IncidentBasics,
    history: &[QA],
    rng: &mut R,
) -> Result<NextQuestions, ValidationError> {
    basics.validate()?;

    let round = QuestionRound::from_history_len(history.len());
    if round == QuestionRound::Complete {
        return Ok(NextQuestions {
            questions: Vec::new(),
            rationale: Some(
                "Enough detail has been gathered; the assessment is ready for a report."
                    .to_string(),
            ),
        });
    }

    let mut pool = eligible_pool(candidate_questions(basics), history);
    pool.shuffle(rng);
    let pool_size = rng.gen_range(MIN_POOL..=MAX_POOL);
    pool.truncate(pool_size);

    let questions: Vec<String> = pool.into_iter().take(round.batch_size()).collect();
    debug!(?round, served = questions.len(), "follow-up questions selected");

    Ok(NextQuestions {
        rationale: Some(rationale(basics, round)),
        questions,
    })
}

fn rationale(basics: &IncidentBasics, round: QuestionRound) -> String {
    let text = format!("{} {}", basics.what_happened, basics.location).to_lowercase();
    let topics: Vec<&str> = Topic::ALL
        .iter()
        .filter(|topic| mentions_any(&text, topic.triggers()))
        .map(|topic| topic.label())
        .collect();

    let focus = if topics.is_empty() {
        "the general circumstances of the incident".to_string()
    } else {
        topics.join(" and ")
    };

    format!(
        "Follow-up round {} of {}: clarifying {focus}.",
        round.ordinal(),
        FOLLOW_UP_ROUNDS
    )
}

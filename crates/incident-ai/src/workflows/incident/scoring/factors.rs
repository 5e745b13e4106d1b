use serde::{Deserialize, Serialize};

use super::super::keywords::tiered_score;

type Tiers = &'static [(u8, &'static [&'static str])];

/// The fixed factor set. Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorKind {
    #[serde(rename = "Legal Exposure Type")]
    LegalExposure,
    #[serde(rename = "Protected Class Involvement")]
    ProtectedClass,
    #[serde(rename = "Adverse Employment Action")]
    AdverseAction,
    #[serde(rename = "Pattern/Frequency")]
    PatternFrequency,
    #[serde(rename = "Role of Accused")]
    AccusedRole,
    #[serde(rename = "Documentation Strength")]
    DocumentationStrength,
    #[serde(rename = "Handbook Policy Alignment")]
    PolicyAlignment,
}

impl FactorKind {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::LegalExposure,
            Self::ProtectedClass,
            Self::AdverseAction,
            Self::PatternFrequency,
            Self::AccusedRole,
            Self::DocumentationStrength,
            Self::PolicyAlignment,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LegalExposure => "Legal Exposure Type",
            Self::ProtectedClass => "Protected Class Involvement",
            Self::AdverseAction => "Adverse Employment Action",
            Self::PatternFrequency => "Pattern/Frequency",
            Self::AccusedRole => "Role of Accused",
            Self::DocumentationStrength => "Documentation Strength",
            Self::PolicyAlignment => "Handbook Policy Alignment",
        }
    }

    pub const fn weight(self) -> f64 {
        match self {
            Self::LegalExposure => 0.25,
            Self::ProtectedClass => 0.20,
            Self::AdverseAction => 0.15,
            Self::PatternFrequency => 0.15,
            Self::AccusedRole => 0.10,
            Self::DocumentationStrength => 0.10,
            Self::PolicyAlignment => 0.05,
        }
    }

    /// Reverse-scored factors rate weakness: 5 means the organisation is
    /// poorly positioned, 1 means it is well positioned.
    pub const fn reverse_scored(self) -> bool {
        matches!(self, Self::DocumentationStrength | Self::PolicyAlignment)
    }

    pub const fn criteria(self) -> &'static str {
        match self {
            Self::LegalExposure => {
                "Type of legal claim the facts suggest: retaliation, systemic or statutory leave \
                 issues rate highest, followed by harassment, discrimination or wage claims, \
                 general complaints, and interpersonal disputes."
            }
            Self::ProtectedClass => {
                "Whether a legally protected characteristic is implicated (race, gender, \
                 pregnancy, disability highest; age, religion, national origin next)."
            }
            Self::AdverseAction => {
                "Severity of any employment action taken or threatened: termination or demotion, \
                 suspension or pay cuts, shift or bonus changes, warnings."
            }
            Self::PatternFrequency => {
                "Whether the conduct is isolated, recurring, or widespread across employees."
            }
            Self::AccusedRole => {
                "Seniority of the accused: executives and owners carry the most organisational \
                 exposure, followed by directors, managers, and team leads."
            }
            Self::DocumentationStrength => {
                "Reverse-scored. Missing documentation scores highest; partial records score \
                 mid-range; documented evidence scores lowest."
            }
            Self::PolicyAlignment => {
                "Reverse-scored. A policy gap scores highest; outdated policies or missing \
                 acknowledgments score mid-range; an applicable policy scores lowest."
            }
        }
    }

    fn tiers(self) -> Tiers {
        match self {
            Self::LegalExposure => LEGAL_EXPOSURE,
            Self::ProtectedClass => PROTECTED_CLASS,
            Self::AdverseAction => ADVERSE_ACTION,
            Self::PatternFrequency => PATTERN_FREQUENCY,
            Self::AccusedRole => ACCUSED_ROLE,
            Self::DocumentationStrength => DOCUMENTATION_STRENGTH,
            Self::PolicyAlignment => POLICY_ALIGNMENT,
        }
    }

    const fn fallback(self) -> u8 {
        if self.reverse_scored() {
            2
        } else {
            1
        }
    }

    /// Score 1..=5 for this factor against the lower-cased corpus.
    pub fn score(self, corpus: &str) -> u8 {
        tiered_score(corpus, self.tiers(), self.fallback())
    }
}

const LEGAL_EXPOSURE: Tiers = &[
    (
        5,
        &[
            "retaliat*",
            "systemic",
            "fmla",
            "family leave",
            "medical leave",
            "maternity leave",
            "paternity leave",
            "protected leave",
            "whistleblow*",
        ],
    ),
    (
        4,
        &[
            "harass*",
            "discriminat*",
            "wage",
            "wages",
            "unpaid",
            "overtime",
            "hostile work environment",
        ],
    ),
    (3, &["complaint*", "complained", "violation*", "violated"]),
    (2, &["dispute*", "conflict*", "disagree*"]),
];

const PROTECTED_CLASS: Tiers = &[
    (
        5,
        &[
            "race",
            "racial*",
            "racis*",
            "gender",
            "pregnan*",
            "disabilit*",
            "disabled",
        ],
    ),
    (
        4,
        &[
            "age",
            "ageis*",
            "religio*",
            "national origin",
            "ethnic*",
            "immigra*",
        ],
    ),
    (3, &["protected", "class"]),
];

const ADVERSE_ACTION: Tiers = &[
    (
        5,
        &[
            "terminat*",
            "fire",
            "fired",
            "firing",
            "demot*",
            "dismiss*",
            "let go",
        ],
    ),
    (
        4,
        &[
            "suspend*",
            "suspension",
            "pay cut",
            "pay-cut",
            "cut pay",
            "cut my pay",
            "pay reduction",
            "reduced pay",
        ],
    ),
    (
        3,
        &[
            "shift",
            "shifts",
            "bonus*",
            "opportunit*",
            "reassign*",
            "hours cut",
            "cut hours",
        ],
    ),
    (
        2,
        &["warning*", "warned", "disciplin*", "write-up", "written up"],
    ),
];

const PATTERN_FREQUENCY: Tiers = &[
    (
        5,
        &[
            "widespread",
            "systemic",
            "multiple employees",
            "several employees",
            "many employees",
            "other employees",
        ],
    ),
    (4, &["repeated*", "ongoing", "pattern*", "constant*"]),
    (3, &["several times", "multiple times", "before"]),
    (2, &["again", "similar"]),
];

const ACCUSED_ROLE: Tiers = &[
    (5, &["ceo", "executive*", "owner*", "founder*"]),
    (4, &["director*", "vp", "vice president"]),
    (3, &["manager*", "supervisor*", "boss"]),
    (2, &["lead", "team lead", "senior"]),
];

const DOCUMENTATION_STRENGTH: Tiers = &[
    (
        5,
        &[
            "no documentation",
            "no records",
            "no record",
            "not documented",
            "undocumented",
            "no evidence",
            "nothing in writing",
        ],
    ),
    (3, &["partial*", "incomplete", "some notes"]),
    (
        1,
        &[
            "documented",
            "documentation",
            "records",
            "evidence",
            "emails",
            "screenshot*",
            "written statement*",
            "recording*",
        ],
    ),
];

const POLICY_ALIGNMENT: Tiers = &[
    (5, &["no policy", "policy gap", "no handbook", "no written policy"]),
    (
        3,
        &[
            "outdated",
            "missing acknowledg*",
            "not acknowledged",
            "never signed",
        ],
    ),
    (1, &["policy", "policies", "handbook"]),
];

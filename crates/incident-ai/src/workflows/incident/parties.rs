use serde::{Deserialize, Serialize};

/// Explanation surfaced to report readers about how roles were assigned.
pub const CATEGORIZATION_NOTE: &str = "Roles are assigned by the order parties were listed: \
the first-named party is recorded as the complainant, the second as the accused/subject, \
and any others as witnesses. No inference is made from the incident narrative.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyRole {
    Complainant,
    #[serde(rename = "Accused/Subject")]
    AccusedSubject,
    Witness,
}

impl PartyRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Complainant => "Complainant",
            Self::AccusedSubject => "Accused/Subject",
            Self::Witness => "Witness",
        }
    }

    const fn relationship(self) -> &'static str {
        match self {
            Self::Complainant => "Reporting party",
            Self::AccusedSubject => "Subject of the report",
            Self::Witness => "Potential witness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyInfo {
    pub name: String,
    pub role: PartyRole,
    pub relationship: String,
}

impl PartyInfo {
    fn new(name: &str, role: PartyRole) -> Self {
        Self {
            name: name.trim().to_string(),
            role,
            relationship: role.relationship().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedParties {
    pub complainants: Vec<PartyInfo>,
    pub accused_subjects: Vec<PartyInfo>,
    pub witnesses: Vec<PartyInfo>,
}

impl CategorizedParties {
    /// Every party in role order: complainant, accused/subject, witnesses.
    pub fn all(&self) -> impl Iterator<Item = &PartyInfo> {
        self.complainants
            .iter()
            .chain(self.accused_subjects.iter())
            .chain(self.witnesses.iter())
    }

    pub fn len(&self) -> usize {
        self.complainants.len() + self.accused_subjects.len() + self.witnesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Positional role assignment. Index 0 is the complainant, index 1 the
/// accused/subject, everything after a witness in listed order.
pub fn categorize<S: AsRef<str>>(involved_parties: &[S]) -> CategorizedParties {
    let mut parties = CategorizedParties::default();
    for (index, name) in involved_parties.iter().enumerate() {
        let name = name.as_ref();
        match index {
            0 => parties
                .complainants
                .push(PartyInfo::new(name, PartyRole::Complainant)),
            1 => parties
                .accused_subjects
                .push(PartyInfo::new(name, PartyRole::AccusedSubject)),
            _ => parties
                .witnesses
                .push(PartyInfo::new(name, PartyRole::Witness)),
        }
    }
    parties
}

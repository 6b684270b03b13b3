// ********* Input data structures ***********

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The political alignment attached to a quiz option or to a candidate.
///
/// Labels are only used as an equality key. Parsing is total: known labels
/// are recognized case-insensitively, anything else is kept as its own label
/// (trimmed and lower-cased) so that two spellings of the same unknown label
/// still compare equal.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Alignment {
    Progressive,
    Moderate,
    Conservative,
    /// A label outside of the standard set.
    Other(String),
}

impl Alignment {
    pub fn parse(label: &str) -> Alignment {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "progressive" => Alignment::Progressive,
            "moderate" => Alignment::Moderate,
            "conservative" => Alignment::Conservative,
            _ => Alignment::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Alignment::Progressive => "progressive",
            Alignment::Moderate => "moderate",
            Alignment::Conservative => "conservative",
            Alignment::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for Alignment {
    fn from(s: String) -> Alignment {
        Alignment::parse(&s)
    }
}

impl From<&str> for Alignment {
    fn from(s: &str) -> Alignment {
        Alignment::parse(s)
    }
}

impl From<Alignment> for String {
    fn from(a: Alignment) -> String {
        a.as_str().to_string()
    }
}

impl Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The selection made by a user for one question of the quiz.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: String,
    pub option_id: String,
    pub alignment: Alignment,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub party: String,
    pub alignment: Alignment,
}

// ******** Output data structures *********

/// The match of one candidate against an answer sheet.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// 1-based position in the ranking.
    pub rank: u32,
    pub name: String,
    pub party: String,
    pub alignment: Alignment,
    /// Number of answers sharing the alignment of the candidate.
    pub matching: u32,
    /// Integer percentage, between 0 and 100.
    pub percentage: u32,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MatchSummary {
    /// Number of distinct questions that were answered.
    pub answered: u32,
    /// The candidates, best match first.
    pub ranking: Vec<MatchResult>,
}

impl MatchSummary {
    /// The best match, if the roster was not empty.
    ///
    /// When nothing was answered, every candidate is at 0% and this is simply
    /// the first candidate of the roster.
    pub fn top(&self) -> Option<&MatchResult> {
        self.ranking.first()
    }
}

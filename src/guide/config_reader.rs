use crate::guide::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub answered: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: Option<String>,
    pub alignment: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: Option<String>,
    pub options: Vec<QuizOption>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RosterCandidate {
    pub name: String,
    pub party: String,
    pub alignment: String,
    pub excluded: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    pub questions: Vec<QuizQuestion>,
    pub candidates: Vec<RosterCandidate>,
    #[serde(rename = "answerSources", default)]
    pub answer_sources: Vec<AnswerSource>,
}

impl QuizConfig {
    /// The candidates taking part in the match, in configuration order.
    pub fn roster(&self) -> Vec<Candidate> {
        self.candidates
            .iter()
            .filter(|c| !c.excluded.unwrap_or(false))
            .map(|c| Candidate {
                name: c.name.clone(),
                party: c.party.clone(),
                alignment: Alignment::parse(&c.alignment),
            })
            .collect()
    }

    pub fn find_option(&self, question_id: &str, option_id: &str) -> GuideResult<&QuizOption> {
        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .context(UnknownQuestionSnafu {
                question: question_id.to_string(),
            })?;
        question
            .options
            .iter()
            .find(|o| o.id == option_id)
            .context(UnknownOptionSnafu {
                question: question_id.to_string(),
                option: option_id.to_string(),
            })
    }
}

pub fn read_quiz_config(path: &str) -> GuideResult<QuizConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu { path })
}

pub fn read_extract_config(path: &str) -> GuideResult<ExtractConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu { path })
}

pub fn read_summary(path: &str) -> GuideResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu { path })
}

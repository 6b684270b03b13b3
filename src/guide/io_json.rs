use crate::guide::{io_common::make_default_id, *};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct JsonAnswer {
    #[serde(rename = "questionId")]
    question_id: String,
    #[serde(rename = "optionId")]
    option_id: String,
}

/// Reads answers from a JSON array of `{"questionId": .., "optionId": ..}` objects.
pub fn read_json_answers(path: &str) -> GuideResult<Vec<ParsedAnswer>> {
    let default_id = make_default_id(path);
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let answers: Vec<JsonAnswer> =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    Ok(answers
        .into_iter()
        .enumerate()
        .map(|(idx, a)| ParsedAnswer {
            id: default_id(idx + 1),
            question_id: a.question_id,
            option_id: a.option_id,
        })
        .collect())
}

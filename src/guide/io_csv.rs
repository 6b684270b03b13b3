// Primitives for reading CSV files.

use crate::guide::{io_common::make_default_id, *};

/// Reads answers from a CSV file with a header row and the columns
/// `questionId,optionId`. Extra columns are ignored.
pub fn read_csv_answers(path: &str) -> GuideResult<Vec<ParsedAnswer>> {
    let default_id = make_default_id(path);
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<ParsedAnswer> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_answers: lineno: {:?} row: {:?}", lineno, line);
        if line.iter().all(|s| s.is_empty()) {
            continue;
        }
        let question_id = line.get(0).context(CsvLineTooShortSnafu { lineno })?;
        let option_id = line.get(1).context(CsvLineTooShortSnafu { lineno })?;
        res.push(ParsedAnswer {
            id: default_id(lineno),
            question_id: question_id.to_string(),
            option_id: option_id.to_string(),
        });
    }
    Ok(res)
}

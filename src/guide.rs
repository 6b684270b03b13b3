use log::{debug, info, warn};

use candidate_match::*;
use plan_extract::{
    run_pipeline, ChatCompletionClient, CompletionError, DocumentContext, ExtractConfig,
    Extractor, PipelineOptions,
};
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::ExtractArgs;
use crate::guide::config_reader::*;

mod config_reader;
mod io_common;
mod io_csv;
mod io_json;

pub use crate::guide::config_reader::read_extract_config;

#[derive(Debug, Snafu)]
pub enum GuideError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error formatting the summary"))]
    FormattingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing a CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is too short: expected questionId,optionId"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Unknown answer provider {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Answer refers to unknown question {question:?}"))]
    UnknownQuestion { question: String },
    #[snafu(display("Question {question:?} has no option {option:?}"))]
    UnknownOption { question: String, option: String },
    #[snafu(display("Answer {id}: {source}"))]
    InvalidAnswer {
        id: String,
        #[snafu(source(from(GuideError, Box::new)))]
        source: Box<GuideError>,
    },
    #[snafu(display("Environment variable {var} with the API key is not set"))]
    MissingApiKey { var: String },
    #[snafu(display("Cannot create the completion client: {source}"))]
    CompletionClient { source: CompletionError },
    #[snafu(display("Cannot start the async runtime"))]
    Runtime { source: std::io::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type GuideResult<T> = Result<T, GuideError>;

/// An answer, as parsed by the readers.
/// This is before checking it against the questions of the quiz.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedAnswer {
    pub id: String,
    pub question_id: String,
    pub option_id: String,
}

fn read_answers(path: &str, provider: &str) -> GuideResult<Vec<ParsedAnswer>> {
    info!("Attempting to read answer file {:?} ({})", path, provider);
    match provider {
        "csv" => io_csv::read_csv_answers(path),
        "json" => io_json::read_json_answers(path),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

// Attaches the alignment of the selected option to every answer.
fn validate_answers(parsed: &[ParsedAnswer], config: &QuizConfig) -> GuideResult<Vec<QuizAnswer>> {
    let mut res: Vec<QuizAnswer> = Vec::new();
    for pa in parsed.iter() {
        let option = config
            .find_option(&pa.question_id, &pa.option_id)
            .context(InvalidAnswerSnafu { id: pa.id.clone() })?;
        debug!("Answer {:?}: {:?}", pa.id, option);
        res.push(QuizAnswer {
            question_id: pa.question_id.clone(),
            option_id: pa.option_id.clone(),
            alignment: Alignment::parse(&option.alignment),
        });
    }
    Ok(res)
}

fn build_summary_js(config: &QuizConfig, summary: &MatchSummary) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
        jurisdiction: config.output_settings.contest_jurisdiction.clone(),
        answered: summary.answered.to_string(),
    };
    let results: Vec<JSValue> = summary
        .ranking
        .iter()
        .map(|r| {
            json!({
                "rank": r.rank,
                "name": r.name,
                "party": r.party,
                "alignment": r.alignment,
                "matchingAnswers": r.matching,
                "matchPercentage": r.percentage,
            })
        })
        .collect();
    json!({
        "config": c,
        "results": results })
}

fn write_output(out: &Option<String>, contents: &str) -> GuideResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", contents);
            Ok(())
        }
        Some(path) => {
            info!("Writing output to {:?}", path);
            fs::write(path, contents).context(WritingFileSnafu { path })
        }
    }
}

/// Scores the answers of a quiz against the candidates of the configuration.
///
/// `input` and `input_type` replace the answer sources of the configuration when provided.
pub fn run_match(
    config_path: &str,
    input: Option<String>,
    input_type: Option<String>,
    out: Option<String>,
    check_summary_path: Option<String>,
) -> GuideResult<MatchSummary> {
    let config = read_quiz_config(config_path)?;
    info!("config: {:?}", config);

    // Paths from the configuration are relative to the configuration file.
    let root_p = Path::new(config_path)
        .parent()
        .context(MissingParentDirSnafu {})?;
    let sources: Vec<(PathBuf, String)> = match input {
        Some(path) => vec![(
            PathBuf::from(path),
            input_type.unwrap_or_else(|| "csv".to_string()),
        )],
        None => config
            .answer_sources
            .iter()
            .map(|s| (root_p.join(&s.file_path), s.provider.clone()))
            .collect(),
    };
    if sources.is_empty() {
        warn!("No answer source: all the candidates will be at 0%");
    }

    let mut parsed: Vec<ParsedAnswer> = Vec::new();
    for (p, provider) in sources.iter() {
        let mut file_data = read_answers(&p.display().to_string(), provider)?;
        parsed.append(&mut file_data);
    }

    let answers = validate_answers(&parsed, &config)?;
    let sheet = builder::AnswerSheet::from_answers(answers);
    let roster = config.roster();
    for (idx, c) in roster.iter().enumerate() {
        info!("Candidate: {}: {} ({}, {})", idx + 1, c.name, c.party, c.alignment);
    }

    let summary = run_matching(sheet.answers(), &roster);

    // Assemble the final json
    let result_js = build_summary_js(&config, &summary);
    let pretty_js_stats =
        serde_json::to_string_pretty(&result_js).context(FormattingJsonSnafu {})?;
    write_output(&out, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(&summary_p)?;
        info!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(FormattingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(summary)
}

/// Runs the extraction pipeline on a plain text electoral plan.
///
/// The API key is passed by the caller. Failed chunks do not make this function fail:
/// they are reported in the logs and as placeholders in the output.
pub fn run_extract(
    args: &ExtractArgs,
    config: &ExtractConfig,
    api_key: Option<String>,
) -> GuideResult<plan_extract::AggregatedDocument> {
    let document = fs::read_to_string(&args.input).context(OpeningFileSnafu {
        path: args.input.clone(),
    })?;

    let mut settings = config.completion.clone();
    if let Some(n) = args.max_concurrency {
        settings.max_concurrency = n;
    }
    info!(
        "Extracting {:?} with model {} at {} ({} concurrent calls)",
        args.input, settings.model, settings.endpoint, settings.max_concurrency
    );

    let api_key = api_key.context(MissingApiKeySnafu {
        var: settings.api_key_env.clone(),
    })?;
    let client = ChatCompletionClient::new(&settings, api_key).context(CompletionClientSnafu {})?;
    let extractor = Extractor::new(client, &settings);

    let context = DocumentContext {
        candidate_name: args.candidate.clone(),
        party_name: args.party.clone(),
    };
    let options = PipelineOptions {
        chunking: config.chunking,
        max_concurrency: settings.max_concurrency,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context(RuntimeSnafu {})?;
    let doc = runtime.block_on(run_pipeline(&document, &context, &extractor, &options));

    if doc.had_failures {
        warn!(
            "{} chunks could not be extracted, the output contains placeholders",
            doc.failed_chunks.len()
        );
    }
    write_output(&args.out, &doc.content)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn test_dir() -> String {
        format!("{}/tests", env!("CARGO_MANIFEST_DIR"))
    }

    fn run_match_test(test_name: &str) -> GuideResult<MatchSummary> {
        init();
        info!("Running test {}", test_name);
        let dir = test_dir();
        run_match(
            &format!("{}/{}/{}_config.json", dir, test_name, test_name),
            None,
            None,
            None,
            Some(format!(
                "{}/{}/{}_expected_summary.json",
                dir, test_name, test_name
            )),
        )
    }

    fn test_wrapper(test_name: &str) {
        if let Err(e) = run_match_test(test_name) {
            panic!("An error occured in {}: {}", test_name, e);
        }
    }

    #[test]
    fn quiz_basic() {
        test_wrapper("quiz_basic");
    }

    #[test]
    fn quiz_reanswer() {
        test_wrapper("quiz_reanswer");
    }

    #[test]
    fn quiz_json_answers() {
        test_wrapper("quiz_json_answers");
    }

    #[test]
    fn quiz_no_answers() {
        test_wrapper("quiz_no_answers");
    }

    #[test]
    fn quiz_excluded_candidate() {
        test_wrapper("quiz_excluded_candidate");
    }

    #[test]
    fn unknown_option_is_rejected() {
        match run_match_test("quiz_unknown_option") {
            Err(GuideError::InvalidAnswer { id, source }) => {
                assert_eq!(id, "answers.csv-00000003");
                assert!(matches!(*source, GuideError::UnknownOption { .. }));
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn reference_mismatch_fails() {
        let res = run_match_test("quiz_reference_mismatch");
        assert!(matches!(res, Err(GuideError::Whatever { .. })));
    }

    #[test]
    fn input_overrides_sources() {
        init();
        let dir = test_dir();
        let summary = run_match(
            &format!("{}/quiz_basic/quiz_basic_config.json", dir),
            Some(format!("{}/quiz_json_answers/answers.json", dir)),
            Some("json".to_string()),
            None,
            None,
        )
        .unwrap();
        assert_eq!(summary.answered, 2);
    }

    #[test]
    fn unknown_provider() {
        init();
        let dir = test_dir();
        let res = run_match(
            &format!("{}/quiz_basic/quiz_basic_config.json", dir),
            Some("answers.csv".to_string()),
            Some("xlsx".to_string()),
            None,
            None,
        );
        assert!(matches!(res, Err(GuideError::UnknownProvider { .. })));
    }

    #[test]
    fn extract_without_key() {
        init();
        let args = ExtractArgs {
            input: format!("{}/plan/plan.txt", test_dir()),
            candidate: "Alice Martin".to_string(),
            party: "Green Party".to_string(),
            config: None,
            out: None,
            max_concurrency: None,
        };
        let res = run_extract(&args, &ExtractConfig::default(), None);
        match res {
            Err(GuideError::MissingApiKey { var }) => assert_eq!(var, "OPENAI_API_KEY"),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn extract_config_file() {
        let config = read_extract_config(&format!("{}/plan/extract.json", test_dir())).unwrap();
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.completion.max_concurrency, 2);
        assert_eq!(config.chunking.max_chunk_chars, 40000);
        assert_eq!(config.chunking.boundary_window, 1000);
    }
}

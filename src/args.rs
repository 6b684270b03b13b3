use clap::{Parser, Subcommand};

/// Voter guide: matches quiz answers with candidates and extracts electoral plans.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, global = true, takes_value = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Ranks the candidates against the answers of a quiz.
    Match(MatchArgs),
    /// Extracts the proposals of an electoral plan with a text-completion service.
    Extract(ExtractArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct MatchArgs {
    /// (file path) The file containing the quiz, the candidates and the answer sources, in JSON.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path or empty) If specified, the answers are read from this file instead of the
    /// answer sources of the configuration.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or json.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the match will be written in
    /// JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided,
    /// voterguide will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    /// (file path) The electoral plan, as plain UTF-8 text.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// The name of the candidate presenting the plan.
    #[clap(long, value_parser)]
    pub candidate: String,

    /// The name of the party or organization of the candidate.
    #[clap(long, value_parser)]
    pub party: String,

    /// (file path, optional) Settings of the completion service and of the chunking, in JSON.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the extracted document. Defaults to stdout.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// Number of chunks sent at the same time to the service. Overrides the configuration.
    #[clap(long, value_parser)]
    pub max_concurrency: Option<usize>,
}

pub mod aggregator;
pub mod completion;
mod config;
pub mod extractor;
pub mod splitter;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

pub use crate::aggregator::{aggregate, AggregatedDocument};
pub use crate::completion::{
    ChatCompletionClient, Completion, CompletionError, CompletionRequest, CompletionResult,
};
pub use crate::config::*;
pub use crate::extractor::{ChunkContext, ExtractionResult, Extractor};
pub use crate::splitter::{split_document, TextChunk};

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub chunking: ChunkingOptions,
    /// Maximum number of chunks being extracted at the same time (at least 1).
    pub max_concurrency: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            chunking: ChunkingOptions::default(),
            max_concurrency: 1,
        }
    }
}

impl From<&ExtractConfig> for PipelineOptions {
    fn from(config: &ExtractConfig) -> Self {
        PipelineOptions {
            chunking: config.chunking,
            max_concurrency: config.completion.max_concurrency,
        }
    }
}

/// Splits the document, extracts every chunk and joins the results.
///
/// This never fails: a chunk that could not be extracted shows up as a placeholder
/// in the output and in `AggregatedDocument::failed_chunks`. The output keeps the
/// order of the document, whatever the concurrency.
pub async fn run_pipeline<C: Completion>(
    document: &str,
    context: &DocumentContext,
    extractor: &Extractor<C>,
    options: &PipelineOptions,
) -> AggregatedDocument {
    let chunks = split_document(document, &options.chunking);
    info!(
        "run_pipeline: {} ({}): {} chars in {} chunks",
        context.candidate_name,
        context.party_name,
        document.chars().count(),
        chunks.len()
    );
    for c in chunks.iter() {
        debug!(
            "run_pipeline: chunk {}: bytes {}..{}",
            c.index, c.start, c.end
        );
    }

    let concurrency = options.max_concurrency.max(1);
    let results: Vec<ExtractionResult> = stream::iter(chunks.iter())
        .map(|c| extractor.extract_chunk(c, context))
        .buffered(concurrency)
        .collect()
        .await;

    let doc = aggregate(&results);
    if doc.had_failures {
        warn!(
            "run_pipeline: {} of {} chunks failed: {:?}",
            doc.failed_chunks.len(),
            results.len(),
            doc.failed_chunks
        );
    } else {
        info!("run_pipeline: all {} chunks extracted", results.len());
    }
    doc
}

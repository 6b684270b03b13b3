use log::{debug, warn};
use std::time::Duration;

use crate::completion::{Completion, CompletionError, CompletionRequest};
use crate::config::{CompletionSettings, DocumentContext};
use crate::splitter::TextChunk;

pub const SYSTEM_PROMPT: &str = "You are an assistant that extracts the proposals of an \
electoral plan. Rewrite the given excerpt as structured Markdown: one `##` heading per \
topic (economy, health, education, security, environment, ...) followed by bullet points, \
one per concrete proposal. Keep the wording of the plan, do not add opinions or proposals \
that are not in the text. If the excerpt contains no proposal, answer with the single line `No proposals.`";

/// The position of a chunk in its document, and who the document is about.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ChunkContext<'a> {
    pub document: &'a DocumentContext,
    pub index: usize,
    pub total: usize,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExtractionResult {
    /// 0-based position of the chunk.
    pub index: usize,
    /// The extracted text, or a failure placeholder.
    pub content: String,
    pub success: bool,
    pub error: Option<String>,
}

/// Sends chunks to a completion service.
///
/// Failures never escape: they are turned into a placeholder that names the
/// chunk, so that the rest of the document can still be processed. Every chunk
/// gets exactly one attempt.
pub struct Extractor<C: Completion> {
    completion: C,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl<C: Completion> Extractor<C> {
    pub fn new(completion: C, settings: &CompletionSettings) -> Extractor<C> {
        Extractor {
            completion,
            model: settings.model.clone(),
            temperature: settings.temperature,
            timeout: settings.timeout(),
        }
    }

    pub fn completion(&self) -> &C {
        &self.completion
    }

    pub async fn extract(&self, text: &str, ctx: ChunkContext<'_>) -> ExtractionResult {
        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: user_prompt(text, &ctx),
            model: self.model.clone(),
            temperature: self.temperature,
        };
        let outcome = match tokio::time::timeout(self.timeout, self.completion.complete(&request))
            .await
        {
            Ok(Ok(content)) if content.trim().is_empty() => {
                Err(CompletionError::MissingContent {})
            }
            Ok(res) => res,
            Err(_) => Err(CompletionError::Timeout {
                secs: self.timeout.as_secs(),
            }),
        };
        match outcome {
            Ok(content) => {
                debug!(
                    "extract: part {} of {}: {} chars extracted",
                    ctx.index + 1,
                    ctx.total,
                    content.len()
                );
                ExtractionResult {
                    index: ctx.index,
                    content,
                    success: true,
                    error: None,
                }
            }
            Err(e) => {
                warn!("extract: part {} of {} failed: {}", ctx.index + 1, ctx.total, e);
                ExtractionResult {
                    index: ctx.index,
                    content: failure_placeholder(ctx.index, ctx.total, &e.to_string()),
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub async fn extract_chunk(
        &self,
        chunk: &TextChunk<'_>,
        document: &DocumentContext,
    ) -> ExtractionResult {
        let ctx = ChunkContext {
            document,
            index: chunk.index,
            total: chunk.total,
        };
        self.extract(chunk.text, ctx).await
    }
}

/// The text standing in for a chunk that could not be extracted. Parts are numbered from 1.
pub fn failure_placeholder(index: usize, total: usize, reason: &str) -> String {
    format!(
        "[Extraction failed for part {} of {}: {}]",
        index + 1,
        total,
        reason
    )
}

fn user_prompt(text: &str, ctx: &ChunkContext) -> String {
    format!(
        "Candidate: {}\nParty: {}\nThis is part {} of {} of the electoral plan.\n\n\
         Extract the proposals from the following excerpt:\n\n{}",
        ctx.document.candidate_name,
        ctx.document.party_name,
        ctx.index + 1,
        ctx.total,
        text
    )
}

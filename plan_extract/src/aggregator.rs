use crate::extractor::ExtractionResult;

pub const SEPARATOR: &str = "\n\n";

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AggregatedDocument {
    pub content: String,
    pub had_failures: bool,
    /// 0-based indices of the chunks that could not be extracted.
    pub failed_chunks: Vec<usize>,
}

/// Joins the extracted texts, in the given order.
pub fn aggregate(results: &[ExtractionResult]) -> AggregatedDocument {
    let content = results
        .iter()
        .map(|r| r.content.as_str())
        .collect::<Vec<&str>>()
        .join(SEPARATOR);
    let failed_chunks: Vec<usize> = results
        .iter()
        .filter(|r| !r.success)
        .map(|r| r.index)
        .collect();
    AggregatedDocument {
        content,
        had_failures: !failed_chunks.is_empty(),
        failed_chunks,
    }
}

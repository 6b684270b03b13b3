use log::debug;

use crate::config::ChunkingOptions;

const PARAGRAPH_BREAK: &str = "\n\n";
const SENTENCE_BREAK: &str = ". ";

/// A contiguous slice of a larger document.
///
/// Offsets are byte offsets into the original document and always fall on
/// character boundaries.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct TextChunk<'a> {
    /// 0-based position of this chunk in the document.
    pub index: usize,
    pub total: usize,
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

impl<'a> TextChunk<'a> {
    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Splits a document into chunks of at most `options.max_chunk_chars` characters.
///
/// Cuts are made preferably after a paragraph break, then after the end of a
/// sentence, looking back at most `options.boundary_window` characters from the
/// hard limit. Without such a boundary, the text is cut at the limit, possibly in
/// the middle of a word.
///
/// An empty document has no chunks. The chunks, put back together in order, are
/// the original document.
pub fn split_document<'a>(document: &'a str, options: &ChunkingOptions) -> Vec<TextChunk<'a>> {
    let max_chars = options.max_chunk_chars.max(1);

    // Byte offset of every character, and of the end of the document.
    let offsets: Vec<usize> = document
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(document.len()))
        .collect();
    let num_chars = offsets.len() - 1;

    if num_chars == 0 {
        return Vec::new();
    }

    // Character ranges first, the chunks are assembled once the total is known.
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut cur = 0;
    while cur < num_chars {
        let limit = (cur + max_chars).min(num_chars);
        let end = if limit < num_chars {
            find_cut(document, &offsets, cur, limit, options.boundary_window)
        } else {
            limit
        };
        debug!(
            "split_document: chunk {:?}: chars {:?}..{:?} (limit {:?})",
            ranges.len(),
            cur,
            end,
            limit
        );
        ranges.push((cur, end));
        cur = end;
    }

    let total = ranges.len();
    ranges
        .iter()
        .enumerate()
        .map(|(index, &(s, e))| {
            let (start, end) = (offsets[s], offsets[e]);
            TextChunk {
                index,
                total,
                start,
                end,
                text: &document[start..end],
            }
        })
        .collect()
}

// Returns the character index where the chunk starting at `cur` ends.
// Invariant: cur < result <= limit.
fn find_cut(
    document: &str,
    offsets: &[usize],
    cur: usize,
    limit: usize,
    window: usize,
) -> usize {
    let window_start = limit.saturating_sub(window).max(cur);
    let base = offsets[window_start];
    let slice = &document[base..offsets[limit]];

    for delim in [PARAGRAPH_BREAK, SENTENCE_BREAK] {
        if let Some(pos) = slice.rfind(delim) {
            let cut_byte = base + pos + delim.len();
            // Both delimiters are ASCII, the cut is on a character boundary.
            if let Ok(cut) = offsets.binary_search(&cut_byte) {
                if cut > cur {
                    return cut;
                }
            }
        }
    }
    limit
}

//! Sentence-aware text chunking with word overlap.

/// Split text into sentences.
///
/// A boundary is a run of whitespace directly after `.`, `!` or `?`. The
/// punctuation stays with the sentence it ends; the whitespace is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut boundary: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if boundary.is_none() && matches!(prev, Some('.' | '!' | '?')) {
                boundary = Some(idx);
            }
        } else if let Some(end) = boundary.take() {
            sentences.push(&text[start..end]);
            start = idx;
        }
        prev = Some(ch);
    }

    let tail = match boundary {
        Some(end) => &text[start..end],
        None => &text[start..],
    };
    if !tail.trim().is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Count whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Chunk text into word windows made of whole sentences.
///
/// A chunk is closed once the next sentence would push it past `chunk_size`
/// words, and the following chunk starts with the last `overlap` words of
/// the one just closed. A sentence longer than `chunk_size` on its own is
/// kept whole. Empty or whitespace-only input yields no chunks.
///
/// `chunk_size` is at least 1 and `overlap` is capped below it. Every closed
/// chunk also gives up at least one word, so the input always advances.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let overlap = overlap.min(chunk_size - 1);

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for sentence in split_sentences(text) {
        let words: Vec<&str> = sentence.split_whitespace().collect();

        if !current.is_empty() && current.len() + words.len() > chunk_size {
            chunks.push(current.join(" "));
            let keep = overlap.min(current.len() - 1);
            current.drain(..current.len() - keep);
        }

        current.extend(words);
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    tracing::debug!(
        "Chunked text into {} chunks (size: {}, overlap: {})",
        chunks.len(),
        chunk_size,
        overlap
    );

    chunks
}

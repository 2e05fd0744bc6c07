//! Document summarization for SummAIze.
//!
//! Text is split into overlapping, sentence-aligned chunks, summarized chunk
//! by chunk with a generation service, and, for long documents, summarized
//! once more from the chunk summaries. The final output always ends on a
//! complete sentence.

pub mod bundles;
pub mod chunker;
pub mod pdf;
pub mod repair;
pub mod rouge;
pub mod summarizer;

// Re-export main types
pub use chunker::{chunk_text, split_sentences, word_count};
pub use pdf::{extract_pdf_text, looks_like_pdf, NO_TEXT_PLACEHOLDER};
pub use repair::ensure_complete_sentence;
pub use rouge::{rouge_scores, RougeScore, RougeScores};
pub use summarizer::{SummarizeOptions, Summarizer, SummaryOutcome, SummaryPath};

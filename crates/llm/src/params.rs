//! Generation parameter bundles.

use serde::{Deserialize, Serialize};

/// Knobs passed to a generation service for one call.
///
/// Field names follow the usual sequence-to-sequence `generate` vocabulary.
/// Providers map what they support and ignore the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on output length (tokens)
    pub max_length: u32,

    /// Lower bound on output length (tokens)
    pub min_length: u32,

    /// Beam search width
    pub num_beams: u32,

    /// Exponent applied to sequence length during beam scoring; > 1 favors longer output
    pub length_penalty: f32,

    /// Stop beam search once enough finished candidates exist
    pub early_stopping: bool,

    /// Penalty for repeated tokens; 1.0 disables it
    pub repetition_penalty: f32,

    /// Forbid repeating n-grams of this size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_repeat_ngram_size: Option<u32>,

    /// Sample instead of decoding greedily / by beam
    pub do_sample: bool,

    /// Nucleus sampling mass (only with `do_sample`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Sampling temperature (only with `do_sample`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationParams {
    /// Create a deterministic bundle with the given length bounds.
    pub fn new(min_length: u32, max_length: u32) -> Self {
        Self {
            max_length,
            min_length,
            num_beams: 4,
            length_penalty: 1.0,
            early_stopping: false,
            repetition_penalty: 1.0,
            no_repeat_ngram_size: None,
            do_sample: false,
            top_p: None,
            temperature: None,
        }
    }

    /// Set the beam width.
    pub fn with_beams(mut self, num_beams: u32) -> Self {
        self.num_beams = num_beams;
        self
    }

    /// Set the length penalty.
    pub fn with_length_penalty(mut self, length_penalty: f32) -> Self {
        self.length_penalty = length_penalty;
        self
    }

    /// Set the repetition penalty.
    pub fn with_repetition_penalty(mut self, repetition_penalty: f32) -> Self {
        self.repetition_penalty = repetition_penalty;
        self
    }

    /// Forbid repeated n-grams of the given size.
    pub fn with_no_repeat_ngram_size(mut self, size: u32) -> Self {
        self.no_repeat_ngram_size = Some(size);
        self
    }

    /// Enable nucleus sampling.
    pub fn with_sampling(mut self, top_p: f32, temperature: f32) -> Self {
        self.do_sample = true;
        self.top_p = Some(top_p);
        self.temperature = Some(temperature);
        self
    }

    /// The bundle used for the single retry after an empty result.
    ///
    /// Fewer beams, 50 more tokens of headroom, no sampling. Everything else
    /// is kept so the retry still targets the same kind of output.
    pub fn relaxed(&self) -> Self {
        Self {
            max_length: self.max_length + 50,
            num_beams: self.num_beams.min(2),
            do_sample: false,
            top_p: None,
            temperature: None,
            ..self.clone()
        }
    }
}

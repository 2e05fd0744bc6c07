//! Generation parameter bundles, one per summarization path.

use summaize_llm::GenerationParams;

/// Single pass over a short document with the fine-tuned model.
pub fn short_direct() -> GenerationParams {
    GenerationParams::new(100, 500)
        .with_beams(6)
        .with_length_penalty(2.0)
        .with_repetition_penalty(1.0)
        .with_no_repeat_ngram_size(2)
        .with_sampling(0.95, 0.8)
}

/// Per-chunk pass when there are few chunks.
///
/// Lengths scale with the whole document: at least 150 and a quarter of the
/// words, at most 600 and half the words. When half the words is below 150
/// the minimum is lowered to match the maximum.
pub fn chunked_uniform(word_count: usize) -> GenerationParams {
    let max_length = (word_count / 2).min(600).max(1) as u32;
    let min_length = ((word_count / 4).max(150) as u32).min(max_length);

    GenerationParams::new(min_length, max_length)
        .with_beams(5)
        .with_length_penalty(1.5)
        .with_repetition_penalty(1.2)
        .with_no_repeat_ngram_size(3)
}

/// Per-chunk pass of hierarchical summarization.
pub fn first_level() -> GenerationParams {
    GenerationParams::new(100, 300)
        .with_beams(4)
        .with_length_penalty(1.2)
        .with_repetition_penalty(1.2)
}

/// Summary-of-summaries pass of hierarchical summarization.
pub fn second_level() -> GenerationParams {
    GenerationParams::new(200, 500)
        .with_beams(5)
        .with_length_penalty(1.5)
        .with_repetition_penalty(1.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_direct() {
        let params = short_direct();
        assert_eq!((params.min_length, params.max_length), (100, 500));
        assert_eq!(params.num_beams, 6);
        assert_eq!(params.no_repeat_ngram_size, Some(2));
        assert!(params.do_sample);
        assert_eq!(params.top_p, Some(0.95));
        assert_eq!(params.temperature, Some(0.8));
        assert!(!params.early_stopping);
    }

    #[test]
    fn test_chunked_uniform_scales_with_length() {
        let params = chunked_uniform(2000);
        assert_eq!((params.min_length, params.max_length), (500, 600));

        let params = chunked_uniform(800);
        assert_eq!((params.min_length, params.max_length), (200, 400));

        let params = chunked_uniform(400);
        assert_eq!((params.min_length, params.max_length), (150, 200));
        assert!(!params.do_sample);
        assert_eq!(params.no_repeat_ngram_size, Some(3));
    }

    #[test]
    fn test_chunked_uniform_short_input_clamps_min() {
        let params = chunked_uniform(120);
        assert_eq!((params.min_length, params.max_length), (60, 60));

        let params = chunked_uniform(1);
        assert_eq!((params.min_length, params.max_length), (1, 1));
    }

    #[test]
    fn test_hierarchical_levels() {
        let first = first_level();
        assert_eq!((first.min_length, first.max_length, first.num_beams), (100, 300, 4));
        assert_eq!(first.length_penalty, 1.2);

        let second = second_level();
        assert_eq!((second.min_length, second.max_length, second.num_beams), (200, 500, 5));
        assert_eq!(second.length_penalty, 1.5);
        assert_eq!(second.repetition_penalty, 1.2);
    }
}

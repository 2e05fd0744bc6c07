//! ROUGE overlap scores between a summary and its reference text.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Precision, recall and F1 for one ROUGE variant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RougeScore {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

impl RougeScore {
    fn from_counts(overlap: usize, candidate_total: usize, reference_total: usize) -> Self {
        if overlap == 0 || candidate_total == 0 || reference_total == 0 {
            return Self::default();
        }
        let precision = overlap as f64 / candidate_total as f64;
        let recall = overlap as f64 / reference_total as f64;
        Self {
            precision,
            recall,
            fmeasure: 2.0 * precision * recall / (precision + recall),
        }
    }
}

/// ROUGE-1, ROUGE-2 and ROUGE-L.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RougeScores {
    pub rouge1: RougeScore,
    pub rouge2: RougeScore,
    #[serde(rename = "rougeL")]
    pub rouge_l: RougeScore,
}

/// Lowercase alphanumeric tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if tokens.len() >= n {
        for gram in tokens.windows(n) {
            *counts.entry(gram).or_insert(0) += 1;
        }
    }
    counts
}

fn rouge_n(reference: &[String], candidate: &[String], n: usize) -> RougeScore {
    let reference_counts = ngram_counts(reference, n);
    let candidate_counts = ngram_counts(candidate, n);

    let overlap: usize = candidate_counts
        .iter()
        .map(|(gram, count)| (*count).min(reference_counts.get(gram).copied().unwrap_or(0)))
        .sum();

    RougeScore::from_counts(
        overlap,
        candidate.len().saturating_sub(n - 1),
        reference.len().saturating_sub(n - 1),
    )
}

/// Longest common subsequence length, two rows at a time.
fn lcs_len(a: &[String], b: &[String]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Score `candidate` against `reference`.
pub fn rouge_scores(reference: &str, candidate: &str) -> RougeScores {
    let reference = tokenize(reference);
    let candidate = tokenize(candidate);

    RougeScores {
        rouge1: rouge_n(&reference, &candidate, 1),
        rouge2: rouge_n(&reference, &candidate, 2),
        rouge_l: RougeScore::from_counts(
            lcs_len(&reference, &candidate),
            candidate.len(),
            reference.len(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_texts_score_one() {
        let scores = rouge_scores("The cat sat on the mat.", "the cat sat on the mat");
        assert!(close(scores.rouge1.fmeasure, 1.0));
        assert!(close(scores.rouge2.fmeasure, 1.0));
        assert!(close(scores.rouge_l.fmeasure, 1.0));
    }

    #[test]
    fn test_partial_overlap() {
        let scores = rouge_scores("the cat sat on the mat", "the cat ate");
        // Unigrams: "the", "cat" match out of 3 candidate and 6 reference tokens
        assert!(close(scores.rouge1.precision, 2.0 / 3.0));
        assert!(close(scores.rouge1.recall, 2.0 / 6.0));
        // Bigrams: "the cat" matches out of 2 candidate and 5 reference bigrams
        assert!(close(scores.rouge2.precision, 1.0 / 2.0));
        assert!(close(scores.rouge2.recall, 1.0 / 5.0));
        assert!(close(scores.rouge_l.precision, 2.0 / 3.0));
    }

    #[test]
    fn test_clipped_counts() {
        // "the" appears twice in the reference, three times in the candidate
        let scores = rouge_scores("the mat the", "the the the");
        assert!(close(scores.rouge1.precision, 2.0 / 3.0));
    }

    #[test]
    fn test_lcs_is_order_sensitive() {
        let scores = rouge_scores("a b c d", "d c b a");
        assert!(close(scores.rouge1.fmeasure, 1.0));
        assert!(close(scores.rouge_l.recall, 1.0 / 4.0));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(rouge_scores("", "anything"), RougeScores::default());
        assert_eq!(rouge_scores("anything", ""), RougeScores::default());
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_value(rouge_scores("a b", "a b")).unwrap();
        assert!(json.get("rouge1").is_some());
        assert!(json.get("rouge2").is_some());
        assert!(json["rougeL"].get("fmeasure").is_some());
    }
}

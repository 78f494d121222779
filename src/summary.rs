//! Ranking & Summary Builder
//!
//! Turns the raw class probability vector into the presentation-ready
//! result: ranked `(crop, probability, percentage)` triples, the headline
//! label, and the confidence score. Pure construction, no side effects.

use serde::Serialize;

use crate::error::RecommendError;
use crate::features::FeatureVector;
use crate::recommender::Decode;

/// One entry of the ranked probability table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCrop {
    pub crop: String,
    /// Full-precision probability, retained for computation.
    pub probability: f64,
    /// `probability * 100` rounded to 2 decimal places for display.
    pub percentage: f64,
}

/// Presentation-ready outcome of one pipeline run.
///
/// Immutable; one per successful run, held by the caller until the next
/// run supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_label: String,
    /// Probability mass of the most likely crop, as a percentage.
    pub confidence_percent: f64,
    /// Every known crop exactly once, sorted by descending probability.
    pub ranked_probabilities: Vec<RankedCrop>,
    pub input_snapshot: FeatureVector,
}

/// Round to 2 decimal places for display (half away from zero).
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Index of the maximum value; ties resolve to the lowest index.
pub fn argmax(proba: &[f64]) -> usize {
    let mut best = 0;
    for (i, &p) in proba.iter().enumerate().skip(1) {
        if p > proba[best] {
            best = i;
        }
    }
    best
}

/// Assemble the final result from one probability vector.
///
/// Every class index 0..K is paired with its crop name and probability,
/// then sorted descending; equal probabilities keep ascending index order
/// (the sort is stable), so the headline label always matches the first
/// ranked entry.
pub fn build_result<L: Decode>(
    proba: &[f64],
    labels: &L,
    input: FeatureVector,
) -> Result<PredictionResult, RecommendError> {
    let mut ranked = Vec::with_capacity(proba.len());
    for (index, &probability) in proba.iter().enumerate() {
        ranked.push(RankedCrop {
            crop: labels.decode(index)?.to_string(),
            probability,
            percentage: round2(probability * 100.0),
        });
    }
    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    let top = argmax(proba);
    let predicted_label = labels.decode(top)?.to_string();
    let confidence_percent = round2(proba[top] * 100.0);

    Ok(PredictionResult {
        predicted_label,
        confidence_percent,
        ranked_probabilities: ranked,
        input_snapshot: input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::RawMeasurements;
    use approx::assert_relative_eq;

    /// Minimal vocabulary standing in for the fitted codec.
    struct TestLabels(Vec<&'static str>);

    impl Decode for TestLabels {
        fn n_classes(&self) -> usize {
            self.0.len()
        }

        fn decode(&self, index: usize) -> Result<&str, RecommendError> {
            self.0
                .get(index)
                .copied()
                .ok_or(RecommendError::UnknownClassIndex {
                    index,
                    known: self.0.len(),
                })
        }
    }

    fn snapshot() -> FeatureVector {
        FeatureVector::build(&RawMeasurements::default()).unwrap()
    }

    #[test]
    fn test_ranking_is_descending() {
        let labels = TestLabels(vec!["apple", "maize", "rice"]);
        let result = build_result(&[0.2, 0.7, 0.1], &labels, snapshot()).unwrap();

        assert_eq!(result.predicted_label, "maize");
        let crops: Vec<&str> = result
            .ranked_probabilities
            .iter()
            .map(|e| e.crop.as_str())
            .collect();
        assert_eq!(crops, vec!["maize", "apple", "rice"]);

        for pair in result.ranked_probabilities.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
    }

    #[test]
    fn test_ties_break_by_ascending_index() {
        let labels = TestLabels(vec!["apple", "maize", "rice"]);
        let result = build_result(&[0.25, 0.25, 0.5], &labels, snapshot()).unwrap();

        let crops: Vec<&str> = result
            .ranked_probabilities
            .iter()
            .map(|e| e.crop.as_str())
            .collect();
        assert_eq!(crops, vec!["rice", "apple", "maize"]);
    }

    #[test]
    fn test_tied_maximum_picks_lowest_index() {
        let labels = TestLabels(vec!["apple", "maize"]);
        let result = build_result(&[0.5, 0.5], &labels, snapshot()).unwrap();

        assert_eq!(result.predicted_label, "apple");
        assert_eq!(result.ranked_probabilities[0].crop, "apple");
    }

    #[test]
    fn test_headline_matches_first_ranked_entry() {
        let labels = TestLabels(vec!["apple", "maize", "rice"]);
        let result = build_result(&[0.31, 0.29, 0.4], &labels, snapshot()).unwrap();

        assert_eq!(result.predicted_label, result.ranked_probabilities[0].crop);
        assert_relative_eq!(
            result.confidence_percent,
            result.ranked_probabilities[0].percentage
        );
    }

    #[test]
    fn test_percentage_rounding() {
        let labels = TestLabels(vec!["apple", "maize"]);
        let result = build_result(&[0.123456, 0.876544], &labels, snapshot()).unwrap();

        assert_relative_eq!(result.ranked_probabilities[0].percentage, 87.65);
        assert_relative_eq!(result.ranked_probabilities[1].percentage, 12.35);
        // Full precision is retained alongside the display value
        assert_relative_eq!(result.ranked_probabilities[1].probability, 0.123456);
    }

    #[test]
    fn test_confidence_rounds_after_max() {
        let labels = TestLabels(vec!["apple", "maize"]);
        let result = build_result(&[0.004999, 0.995001], &labels, snapshot()).unwrap();
        assert_relative_eq!(result.confidence_percent, 99.5);
    }

    #[test]
    fn test_argmax_tie_break() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.1, 0.8, 0.8]), 1);
        assert_eq!(argmax(&[0.9]), 0);
    }

    #[test]
    fn test_input_snapshot_preserved() {
        let labels = TestLabels(vec!["apple"]);
        let input = snapshot();
        let result = build_result(&[1.0], &labels, input).unwrap();
        assert_eq!(result.input_snapshot, input);
    }
}

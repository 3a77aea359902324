//! Aggregate effectiveness scoring.
//!
//! Single-pass weighted reduction of the full result set into one 0-100
//! score, a letter grade, and a summary sentence. Empty input is a
//! defined default, not an error.

use serde::{Deserialize, Serialize};

use crate::analyzer::{CorrelationResult, Direction};

/// Letter grade derived from the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Fixed cutoffs on the rounded score.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::A
        } else if score >= 65 {
            Self::B
        } else if score >= 50 {
            Self::C
        } else if score >= 35 {
            Self::D
        } else {
            Self::F
        }
    }
}

/// Aggregate efficacy of the user's current intervention set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessScore {
    /// 0-100, higher means the screened effects skew positive
    pub score: u8,
    pub grade: Grade,
    pub summary: String,
}

/// Reduce a result set to one effectiveness score.
///
/// Each result contributes its direction sign scaled by confidence,
/// weighted by significance tier. An empty result set yields the neutral
/// default of 50 / C.
#[must_use]
pub fn score(results: &[CorrelationResult]) -> EffectivenessScore {
    if results.is_empty() {
        return EffectivenessScore {
            score: 50,
            grade: Grade::C,
            summary: "Not enough data yet to judge your interventions. \
                      Keep logging for a clearer picture."
                .to_string(),
        };
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut positives = 0usize;
    let mut negatives = 0usize;

    for result in results {
        let signed = match result.direction {
            Direction::Positive => {
                positives += 1;
                1.0
            }
            Direction::Negative => {
                negatives += 1;
                -1.0
            }
            Direction::Neutral => 0.0,
        };
        let weight = result.significance.weight();
        weighted_sum += signed * f64::from(result.confidence) / 100.0 * weight;
        total_weight += weight;
    }

    let raw = (weighted_sum / total_weight + 1.0) * 50.0;
    let score = raw.clamp(0.0, 100.0).round() as u8;
    let grade = Grade::from_score(score);

    EffectivenessScore {
        score,
        grade,
        summary: summary(grade, positives, negatives),
    }
}

fn summary(grade: Grade, positives: usize, negatives: usize) -> String {
    match grade {
        Grade::A => format!(
            "Your interventions are working well: {positives} clear positive \
             effect(s) against {negatives} negative."
        ),
        Grade::B => format!(
            "Mostly positive: {positives} intervention effect(s) helping, \
             {negatives} worth watching."
        ),
        Grade::C => format!(
            "Mixed results: {positives} positive and {negatives} negative \
             effect(s). Consider adjusting what isn't working."
        ),
        Grade::D => format!(
            "More harm than help right now: {negatives} negative effect(s) \
             against {positives} positive. Review your routine."
        ),
        Grade::F => format!(
            "Your current interventions correlate with decline: {negatives} \
             negative effect(s), {positives} positive. Time for a reset."
        ),
    }
}

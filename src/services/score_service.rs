use serde::{Deserialize, Serialize};

/// Qualitative band for a percentage score, ordered from worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Poor,
    Fair,
    Good,
    Great,
    Excellent,
}

impl PerformanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::Poor => "poor",
            PerformanceTier::Fair => "fair",
            PerformanceTier::Good => "good",
            PerformanceTier::Great => "great",
            PerformanceTier::Excellent => "excellent",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Excellent! You're a quiz master!",
            PerformanceTier::Great => "Great job! You know your stuff!",
            PerformanceTier::Good => "Good effort! Keep learning!",
            PerformanceTier::Fair => "Not bad! There's room to improve!",
            PerformanceTier::Poor => "Keep practicing! You'll get better!",
        }
    }
}

pub struct ScoreService;

impl ScoreService {
    /// Integer percentage of correct answers, floored and clamped to [0, 100].
    /// A non-positive question count scores 0.
    pub fn calculate_score(correct_answers: i32, total_questions: i32) -> i32 {
        if total_questions <= 0 {
            return 0;
        }
        let score = (i64::from(correct_answers) * 100).div_euclid(i64::from(total_questions));
        score.clamp(0, 100) as i32
    }

    pub fn evaluate_performance(score: i32) -> PerformanceTier {
        match score {
            90.. => PerformanceTier::Excellent,
            70..=89 => PerformanceTier::Great,
            50..=69 => PerformanceTier::Good,
            30..=49 => PerformanceTier::Fair,
            _ => PerformanceTier::Poor,
        }
    }
}

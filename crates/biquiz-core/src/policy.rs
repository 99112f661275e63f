//! Result policy: the tier table that turns a final percentage into a
//! qualitative message, plus the marker put in front of wrong-answer feedback.
//!
//! The defaults reproduce the product copy of the Business Intelligence
//! course. Banks and config files can replace them.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// One bracket of the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTier {
    /// Inclusive lower bound, in percent.
    pub min_percent: u32,
    /// Short machine-friendly name (e.g. "mastery").
    #[serde(default)]
    pub label: String,
    /// Message shown when the session ends in this tier.
    pub message: String,
}

impl ResultTier {
    pub fn new(min_percent: u32, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            min_percent,
            label: label.into(),
            message: message.into(),
        }
    }
}

/// Scoring copy and thresholds for a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPolicy {
    /// Qualifier put in front of the explanation when an answer is wrong.
    #[serde(default = "default_incorrect_prefix")]
    pub incorrect_prefix: String,
    /// Result brackets; order in the table does not matter.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<ResultTier>,
}

fn default_incorrect_prefix() -> String {
    "Incorrecto.".to_string()
}

fn default_tiers() -> Vec<ResultTier> {
    vec![
        ResultTier::new(
            100,
            "mastery",
            "🎉 ¡Excelente! Dominas completamente los conceptos clave.",
        ),
        ResultTier::new(
            80,
            "strong",
            "👍 ¡Muy bien! Comprendes la mayoría de los conceptos de BI.",
        ),
        ResultTier::new(
            60,
            "partial",
            "📚 Buen avance. Revisa algunos temas y vuelve a intentarlo.",
        ),
        ResultTier::new(
            0,
            "retry",
            "📖 Sigue practicando. Repasa el módulo y realiza el quiz nuevamente.",
        ),
    ]
}

impl Default for ResultPolicy {
    fn default() -> Self {
        Self {
            incorrect_prefix: default_incorrect_prefix(),
            tiers: default_tiers(),
        }
    }
}

impl ResultPolicy {
    /// Check that every percentage in `0..=100` maps to exactly one tier.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.tiers.is_empty() {
            return Err(QuizError::InvalidPolicy("no result tiers defined".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for tier in &self.tiers {
            if tier.min_percent > 100 {
                return Err(QuizError::InvalidPolicy(format!(
                    "tier '{}' starts above 100% ({})",
                    tier.label, tier.min_percent
                )));
            }
            if !seen.insert(tier.min_percent) {
                return Err(QuizError::InvalidPolicy(format!(
                    "duplicate tier threshold: {}%",
                    tier.min_percent
                )));
            }
        }

        if !seen.contains(&0) {
            return Err(QuizError::InvalidPolicy(
                "no tier starts at 0%, low scores would have no message".into(),
            ));
        }

        Ok(())
    }

    /// The tier with the highest threshold not above `percentage`.
    pub fn tier_for(&self, percentage: u32) -> Option<&ResultTier> {
        self.tiers
            .iter()
            .filter(|t| t.min_percent <= percentage)
            .max_by_key(|t| t.min_percent)
    }

    /// Feedback text for an answered question.
    pub fn feedback_message(&self, explanation: &str, is_correct: bool) -> String {
        if is_correct || self.incorrect_prefix.is_empty() {
            return explanation.to_string();
        }
        if explanation.is_empty() {
            return self.incorrect_prefix.clone();
        }
        format!("{} {}", self.incorrect_prefix, explanation)
    }
}

/// `round(100 * part / whole)` with halves rounded up, in integer arithmetic.
///
/// Returns 0 when `whole` is 0.
pub fn round_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (part as u64, whole as u64);
    ((200 * part + whole) / (2 * whole)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        let policy = ResultPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.tiers.len(), 4);
        assert_eq!(policy.incorrect_prefix, "Incorrecto.");
    }

    #[test]
    fn tier_boundaries_belong_to_higher_tier() {
        let policy = ResultPolicy::default();
        let label = |p: u32| policy.tier_for(p).map(|t| t.label.as_str());
        assert_eq!(label(100), Some("mastery"));
        assert_eq!(label(99), Some("strong"));
        assert_eq!(label(80), Some("strong"));
        assert_eq!(label(79), Some("partial"));
        assert_eq!(label(60), Some("partial"));
        assert_eq!(label(59), Some("retry"));
        assert_eq!(label(0), Some("retry"));
    }

    #[test]
    fn tier_order_in_table_does_not_matter() {
        let policy = ResultPolicy {
            incorrect_prefix: String::new(),
            tiers: vec![
                ResultTier::new(0, "low", "low"),
                ResultTier::new(50, "high", "high"),
            ],
        };
        assert!(policy.validate().is_ok());
        assert_eq!(policy.tier_for(49).unwrap().label, "low");
        assert_eq!(policy.tier_for(50).unwrap().label, "high");
        assert_eq!(policy.tier_for(100).unwrap().label, "high");
    }

    #[test]
    fn validate_rejects_bad_tables() {
        let empty = ResultPolicy {
            tiers: vec![],
            ..ResultPolicy::default()
        };
        assert!(empty.validate().is_err());

        let no_floor = ResultPolicy {
            tiers: vec![ResultTier::new(50, "half", "half")],
            ..ResultPolicy::default()
        };
        let err = no_floor.validate().unwrap_err();
        assert!(err.to_string().contains("0%"));

        let duplicate = ResultPolicy {
            tiers: vec![
                ResultTier::new(0, "a", "a"),
                ResultTier::new(0, "b", "b"),
            ],
            ..ResultPolicy::default()
        };
        assert!(duplicate.validate().is_err());

        let too_high = ResultPolicy {
            tiers: vec![
                ResultTier::new(0, "a", "a"),
                ResultTier::new(101, "b", "b"),
            ],
            ..ResultPolicy::default()
        };
        assert!(matches!(
            too_high.validate(),
            Err(QuizError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn feedback_message_prefixes_only_wrong_answers() {
        let policy = ResultPolicy::default();
        assert_eq!(policy.feedback_message("Because.", true), "Because.");
        assert_eq!(
            policy.feedback_message("Because.", false),
            "Incorrecto. Because."
        );
        assert_eq!(policy.feedback_message("", false), "Incorrecto.");

        let bare = ResultPolicy {
            incorrect_prefix: String::new(),
            ..ResultPolicy::default()
        };
        assert_eq!(bare.feedback_message("Because.", false), "Because.");
    }

    #[test]
    fn round_percent_rounds_half_up() {
        assert_eq!(round_percent(0, 10), 0);
        assert_eq!(round_percent(1, 2), 50);
        assert_eq!(round_percent(1, 3), 33);
        assert_eq!(round_percent(2, 3), 67);
        assert_eq!(round_percent(1, 8), 13);
        assert_eq!(round_percent(7, 9), 78);
        assert_eq!(round_percent(10, 10), 100);
        assert_eq!(round_percent(3, 0), 0);
    }
}

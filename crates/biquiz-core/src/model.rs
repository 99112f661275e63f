//! Core data model types for biquiz.
//!
//! Questions are immutable content records supplied by a question bank.
//! The engine never edits them; a session only reads them.

use serde::{Deserialize, Serialize};

use crate::policy::ResultPolicy;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Text of the question.
    pub prompt: String,
    /// Answer choices, in display order.
    pub options: Vec<String>,
    /// The correct choice, matched against a selection by exact text.
    #[serde(rename = "answer")]
    pub correct_answer: String,
    /// Shown after answering, whether the answer was right or wrong.
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
            explanation: explanation.into(),
        }
    }

    /// Exact string comparison; no trimming or case folding.
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_answer
    }

    /// Look up an option by its 1-based position.
    pub fn option_by_number(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }
}

/// An ordered collection of questions, usually loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what the bank covers.
    #[serde(default)]
    pub description: String,
    /// Questions in the order they are asked.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Bank-specific result policy, overriding the configured one.
    #[serde(default)]
    pub policy: Option<ResultPolicy>,
}

impl QuestionBank {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The bank's own policy if it has one, otherwise `fallback`.
    pub fn effective_policy(&self, fallback: &ResultPolicy) -> ResultPolicy {
        self.policy.clone().unwrap_or_else(|| fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn etl() -> Question {
        Question::new(
            "What does ETL stand for?",
            ["Enterprise Technology Layer", "Extract, Transform, Load"],
            "Extract, Transform, Load",
            "ETL prepares data for analysis.",
        )
    }

    #[test]
    fn correctness_is_exact_match() {
        let q = etl();
        assert!(q.is_correct("Extract, Transform, Load"));
        assert!(!q.is_correct("extract, transform, load"));
        assert!(!q.is_correct(" Extract, Transform, Load"));
        assert!(!q.is_correct("Enterprise Technology Layer"));
    }

    #[test]
    fn option_numbers_are_one_based() {
        let q = etl();
        assert_eq!(q.option_by_number(1), Some("Enterprise Technology Layer"));
        assert_eq!(q.option_by_number(2), Some("Extract, Transform, Load"));
        assert_eq!(q.option_by_number(0), None);
        assert_eq!(q.option_by_number(3), None);
    }

    #[test]
    fn bank_policy_overrides_fallback() {
        let mut bank = QuestionBank {
            id: "b".into(),
            name: "B".into(),
            description: String::new(),
            questions: vec![etl()],
            policy: None,
        };
        let fallback = ResultPolicy::default();
        assert_eq!(bank.effective_policy(&fallback), fallback);

        let custom = ResultPolicy {
            incorrect_prefix: "Wrong.".into(),
            ..ResultPolicy::default()
        };
        bank.policy = Some(custom.clone());
        assert_eq!(bank.effective_policy(&fallback), custom);
        assert_eq!(bank.len(), 1);
        assert!(!bank.is_empty());
    }
}

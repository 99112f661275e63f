//! Question banks compiled into the binary.

use std::path::Path;

use anyhow::Result;

use crate::model::QuestionBank;
use crate::parser::parse_question_bank_str;

/// TOML source of the Business Intelligence course quiz.
pub const BUSINESS_INTELLIGENCE_TOML: &str = include_str!("../data/business-intelligence.toml");

/// The ten-question Business Intelligence self-check.
pub fn business_intelligence() -> Result<QuestionBank> {
    parse_question_bank_str(
        BUSINESS_INTELLIGENCE_TOML,
        Path::new("<builtin>/business-intelligence.toml"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::validate_question_bank;
    use crate::session::QuizSession;

    /// 1-based number of the correct option for each question.
    const ANSWER_KEY: [usize; 10] = [2, 3, 2, 3, 3, 2, 2, 2, 3, 1];

    #[test]
    fn builtin_bank_is_valid() {
        let bank = business_intelligence().unwrap();
        assert_eq!(bank.id, "business-intelligence");
        assert_eq!(bank.len(), 10);
        assert!(bank.policy.is_none());
        let warnings = validate_question_bank(&bank);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn answer_key_matches_bank() {
        let bank = business_intelligence().unwrap();
        for (q, &number) in bank.questions.iter().zip(ANSWER_KEY.iter()) {
            let option = q.option_by_number(number).unwrap();
            assert!(q.is_correct(option), "wrong key for: {}", q.prompt);
        }
    }

    #[test]
    fn eight_of_ten_is_strong() {
        let bank = business_intelligence().unwrap();
        let mut session = QuizSession::new(bank.questions.clone()).unwrap();
        for (i, &number) in ANSWER_KEY.iter().enumerate() {
            let q = session.current_question();
            let pick = if i < 8 { number } else { number % 4 + 1 };
            let option = q.option_by_number(pick).unwrap().to_string();
            session.select_answer(option);
            session.advance();
        }
        assert!(session.is_completed());
        assert_eq!(session.score(), 8);
        assert_eq!(session.percentage(), 80);
        assert_eq!(
            session.result_message(),
            Some("👍 ¡Muy bien! Comprendes la mayoría de los conceptos de BI.")
        );
    }
}

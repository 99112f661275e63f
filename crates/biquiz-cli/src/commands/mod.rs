pub mod init;
pub mod replay;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use biquiz_core::config::{apply_policy_overrides, load_config_from};
use biquiz_core::{builtin, parser, QuestionBank, QuizSession};

/// Resolve the bank (flag, then config, then built-in) and start a session on it.
pub(crate) fn open_session(
    bank_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<(QuestionBank, QuizSession)> {
    let config = load_config_from(config_path.as_deref())?;

    let bank = match bank_path.or(config.default_bank) {
        Some(path) => parser::parse_question_bank(&path)?,
        None => builtin::business_intelligence()?,
    };

    let policy = apply_policy_overrides(bank.effective_policy(&config.policy), |key| {
        std::env::var(key).ok()
    });
    let session = QuizSession::with_policy(bank.questions.clone(), policy).map_err(|e| {
        let context = if e.is_policy_error() {
            format!("question bank '{}' has an invalid [policy] table", bank.id)
        } else {
            format!("cannot start quiz '{}'", bank.id)
        };
        anyhow::Error::new(e).context(context)
    })?;
    tracing::info!(bank = %bank.id, session = %session.id(), "starting quiz");

    Ok((bank, session))
}

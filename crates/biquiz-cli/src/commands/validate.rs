//! The `biquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let (banks, failures) = biquiz_core::parser::load_banks_with_errors(&bank_path)?;

    let mut total_warnings = failures.len();

    for (path, e) in &failures {
        println!("[{}] WARNING: {e:#}", path.display());
    }

    for bank in &banks {
        println!("Question bank: {} ({} questions)", bank.name, bank.len());

        let warnings = biquiz_core::parser::validate_question_bank(bank);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [Q{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if banks.is_empty() && failures.is_empty() {
        println!("No question banks found.");
    } else if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

//! The `biquiz replay` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use biquiz_core::{Question, QuizSession, SessionSnapshot, Transition};

/// One scripted answer and how the engine scored it.
#[derive(Debug, Serialize)]
pub(crate) struct AnswerRecord {
    pub question: usize,
    pub prompt: String,
    pub answer: String,
    pub correct: bool,
}

#[derive(Debug, Serialize)]
struct ReplayOutput<'a> {
    bank: &'a str,
    answers: &'a [AnswerRecord],
    snapshot: SessionSnapshot,
}

pub fn execute(
    answers: String,
    bank_path: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let script = parse_script(&answers);
    anyhow::ensure!(!script.is_empty(), "no answers given");

    let (bank, mut session) = super::open_session(bank_path, config_path)?;
    let records = replay(&mut session, &script);

    if format == "json" {
        let output = ReplayOutput {
            bank: &bank.id,
            answers: &records,
            snapshot: session.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&bank.name, &records, &session);
    }

    Ok(())
}

fn parse_script(answers: &str) -> Vec<String> {
    answers
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A 1-based option number selects that option; anything else is used verbatim.
fn resolve_answer(question: &Question, token: &str) -> String {
    token
        .parse::<usize>()
        .ok()
        .and_then(|n| question.option_by_number(n))
        .unwrap_or(token)
        .to_string()
}

/// Answer and advance once per token, stopping when the session completes.
pub(crate) fn replay(session: &mut QuizSession, script: &[String]) -> Vec<AnswerRecord> {
    let mut records = Vec::new();

    for (i, token) in script.iter().enumerate() {
        if session.is_completed() {
            tracing::warn!(
                extra = script.len() - i,
                "session complete, ignoring remaining answers"
            );
            break;
        }

        let question = session.current_question();
        let answer = resolve_answer(question, token);
        let prompt = question.prompt.clone();
        let number = session.current_index() + 1;

        if let Transition::Answered { correct } = session.select_answer(answer.clone()) {
            records.push(AnswerRecord {
                question: number,
                prompt,
                answer,
                correct,
            });
        }
        session.advance();
    }

    records
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

fn print_summary(bank_name: &str, records: &[AnswerRecord], session: &QuizSession) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Answer", "Result"]);

    for r in records {
        table.add_row(vec![
            Cell::new(r.question),
            Cell::new(truncate(&r.prompt, 60)),
            Cell::new(truncate(&r.answer, 40)),
            Cell::new(if r.correct { "correct" } else { "wrong" }),
        ]);
    }

    println!("{bank_name}");
    println!("{table}");

    match session.result() {
        Some(result) => {
            println!(
                "Score: {}/{} ({}%)",
                result.score, result.total, result.percentage
            );
            println!("{}", result.message);
        }
        None => {
            println!(
                "Incomplete: answered {} of {} questions, score {} ({}% progress)",
                records.len(),
                session.total(),
                session.score(),
                session.progress_percent()
            );
        }
    }
}

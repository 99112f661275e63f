//! The `biquiz take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use biquiz_core::QuizSession;

const BAR_WIDTH: usize = 20;

pub fn execute(bank_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (bank, mut session) = super::open_session(bank_path, config_path)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut session, &bank.name, stdin.lock(), stdout.lock())
}

/// Drive a session from line-based input until it is abandoned or input ends.
pub(crate) fn run<R: BufRead, W: Write>(
    session: &mut QuizSession,
    title: &str,
    mut input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "{title} ({} questions)", session.total())?;

    loop {
        if session.is_completed() {
            render_result(session, &mut out)?;
            write!(out, "Retry the quiz? [y/N] ")?;
            out.flush()?;
            match read_line(&mut input)? {
                Some(line) if matches!(line.to_lowercase().as_str(), "y" | "yes") => {
                    session.restart();
                    continue;
                }
                _ => return Ok(()),
            }
        }

        render_question(session, &mut out)?;

        let option_count = session.current_question().options.len();
        while session.selection().is_none() {
            write!(out, "Your answer [1-{option_count}, q to quit]: ")?;
            out.flush()?;
            let Some(line) = read_line(&mut input)? else {
                return Ok(());
            };
            if line.eq_ignore_ascii_case("q") {
                writeln!(out, "Quiz abandoned.")?;
                return Ok(());
            }

            let picked = line
                .parse::<usize>()
                .ok()
                .and_then(|n| session.current_question().option_by_number(n))
                .map(str::to_string);
            match picked {
                Some(option) => {
                    session.select_answer(option);
                }
                None => writeln!(out, "Please enter a number between 1 and {option_count}.")?,
            }
        }

        render_feedback(session, &mut out)?;

        let next = if session.is_last_question() {
            "see your results"
        } else {
            "continue"
        };
        write!(out, "Press Enter to {next}, q to quit: ")?;
        out.flush()?;
        match read_line(&mut input)? {
            Some(line) if line.eq_ignore_ascii_case("q") => {
                writeln!(out, "Quiz abandoned.")?;
                return Ok(());
            }
            Some(_) => {
                session.advance();
            }
            None => return Ok(()),
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

fn progress_bar(percent: u32) -> String {
    let filled = (percent as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn render_question<W: Write>(session: &QuizSession, out: &mut W) -> Result<()> {
    let progress = session.progress_percent();
    let question = session.current_question();
    writeln!(out)?;
    writeln!(
        out,
        "Question {} of {} {} {progress}%",
        session.current_index() + 1,
        session.total(),
        progress_bar(progress)
    )?;
    writeln!(out, "{}", question.prompt)?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}. {option}", i + 1)?;
    }
    Ok(())
}

fn render_feedback<W: Write>(session: &QuizSession, out: &mut W) -> Result<()> {
    let Some(feedback) = session.feedback() else {
        return Ok(());
    };
    let question = session.current_question();
    let selection = session.selection().unwrap_or_default();

    if !feedback.is_correct {
        writeln!(out, "  Correct answer: {}", question.correct_answer)?;
    }
    let mark = if feedback.is_correct { "[OK]" } else { "[X]" };
    writeln!(out, "{mark} {}", feedback.message)?;
    tracing::debug!(selection, correct = feedback.is_correct, "feedback shown");
    Ok(())
}

fn render_result<W: Write>(session: &QuizSession, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Quiz complete {}", progress_bar(session.progress_percent()))?;
    writeln!(
        out,
        "Score: {}/{} ({}%)",
        session.score(),
        session.total(),
        session.percentage()
    )?;
    if let Some(message) = session.result_message() {
        writeln!(out, "{message}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use biquiz_core::Question;

    fn session() -> QuizSession {
        QuizSession::new(vec![
            Question::new("Pick B", ["A", "B"], "B", "B is right."),
            Question::new("Pick X", ["X", "Y"], "X", "X is right."),
        ])
        .unwrap()
    }

    fn play(session: &mut QuizSession, input: &str) -> String {
        let mut out = Vec::new();
        run(session, "Test quiz", input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_pass_prints_feedback_and_result() {
        let mut s = session();
        let out = play(&mut s, "2\n\n2\n\nn\n");

        assert!(out.contains("Test quiz (2 questions)"));
        assert!(out.contains("Question 1 of 2"));
        assert!(out.contains("[OK] B is right."));
        assert!(out.contains("Question 2 of 2"));
        assert!(out.contains("Correct answer: X"));
        assert!(out.contains("[X] Incorrecto. X is right."));
        assert!(out.contains("Score: 1/2 (50%)"));
        assert!(out.contains("Sigue practicando"));
        assert!(s.is_completed());
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn invalid_input_reprompts() {
        let mut s = session();
        let out = play(&mut s, "7\nabc\n2\n");
        assert_eq!(out.matches("Please enter a number between 1 and 2.").count(), 2);
        assert_eq!(s.selection(), Some("B"));
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn quit_abandons_session() {
        let mut s = session();
        let out = play(&mut s, "1\nq\n");
        assert!(out.contains("Quiz abandoned."));
        assert!(!s.is_completed());
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn retry_restarts_the_quiz() {
        let mut s = session();
        let out = play(&mut s, "2\n\n1\n\ny\n2\n\n1\n\n");
        assert_eq!(out.matches("Score: 2/2 (100%)").count(), 2);
        assert_eq!(out.matches("Question 1 of 2").count(), 2);
        assert!(out.contains("Excelente"));
    }

    #[test]
    fn progress_bar_width() {
        assert_eq!(progress_bar(0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(50).matches('#').count(), BAR_WIDTH / 2);
    }
}

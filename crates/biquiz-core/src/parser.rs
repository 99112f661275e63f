//! TOML question-bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionBank};
use crate::policy::ResultPolicy;

/// Intermediate TOML structure for parsing question-bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    policy: Option<ResultPolicy>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    options: Vec<String>,
    answer: String,
    #[serde(default)]
    explanation: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            prompt: q.prompt,
            options: q.options,
            correct_answer: q.answer,
            explanation: q.explanation,
        })
        .collect();

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
        policy: parsed.policy,
    })
}

/// A bank file that could not be read or parsed, with the reason.
pub type LoadFailure = (PathBuf, anyhow::Error);

/// Recursively load all `.toml` question-bank files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let (banks, failures) = collect_bank_directory(dir)?;
    for (path, e) in &failures {
        tracing::warn!("skipping {}: {:#}", path.display(), e);
    }
    Ok(banks)
}

/// Load a bank file, or every bank under a directory, keeping parse failures.
///
/// A single file that fails to parse is an error; inside a directory,
/// failures are returned next to the banks that did load.
pub fn load_banks_with_errors(path: &Path) -> Result<(Vec<QuestionBank>, Vec<LoadFailure>)> {
    if path.is_dir() {
        collect_bank_directory(path)
    } else {
        Ok((vec![parse_question_bank(path)?], Vec::new()))
    }
}

fn collect_bank_directory(dir: &Path) -> Result<(Vec<QuestionBank>, Vec<LoadFailure>)> {
    let mut banks = Vec::new();
    let mut failures = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            let (nested_banks, nested_failures) = collect_bank_directory(&path)?;
            banks.extend(nested_banks);
            failures.extend(nested_failures);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_bank(&path) {
                Ok(bank) => {
                    tracing::info!(
                        bank = %bank.id,
                        questions = bank.len(),
                        "loaded {}",
                        path.display()
                    );
                    banks.push(bank);
                }
                Err(e) => failures.push((path, e)),
            }
        }
    }

    Ok((banks, failures))
}

/// A warning from question-bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn bank(message: impl Into<String>) -> Self {
        Self {
            question: None,
            message: message.into(),
        }
    }

    fn question(number: usize, message: impl Into<String>) -> Self {
        Self {
            question: Some(number),
            message: message.into(),
        }
    }
}

/// Validate a question bank for content-authoring mistakes.
///
/// The engine itself accepts any of these; a bank with warnings still runs.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning::bank(
            "bank has no questions and cannot be taken",
        ));
    }

    if let Some(policy) = &bank.policy {
        if let Err(e) = policy.validate() {
            warnings.push(ValidationWarning::bank(e.to_string()));
        }
    }

    for (i, q) in bank.questions.iter().enumerate() {
        let number = i + 1;

        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::question(number, "prompt is empty"));
        }

        if q.options.len() < 2 {
            warnings.push(ValidationWarning::question(
                number,
                format!("only {} option(s); at least 2 expected", q.options.len()),
            ));
        }

        let mut seen = HashSet::new();
        for option in &q.options {
            if !seen.insert(option.as_str()) {
                warnings.push(ValidationWarning::question(
                    number,
                    format!("duplicate option: {option}"),
                ));
            }
        }

        if !q.options.contains(&q.correct_answer) {
            warnings.push(ValidationWarning::question(
                number,
                format!("answer is not one of the options: {}", q.correct_answer),
            ));
        }

        if q.explanation.trim().is_empty() {
            warnings.push(ValidationWarning::question(number, "explanation is empty"));
        }
    }

    warnings
}

//! Single-session quiz state machine.
//!
//! A [`QuizSession`] walks one question at a time through
//! `Unanswered -> Answered -> (next question | Complete)`. Disallowed
//! operations are tolerated: they leave the state untouched and report
//! [`Transition::Ignored`] instead of failing.
//!
//! Feedback, progress and the result message are computed from the
//! stored fields on every read, so they cannot drift from the score.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{Question, QuestionBank};
use crate::policy::{round_percent, ResultPolicy, ResultTier};

/// Where the session stands on the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Waiting for an answer to the current question.
    Unanswered,
    /// The current question has a selection; waiting for `advance`.
    Answered,
    /// Advanced past the last question. Only `restart` leaves this phase.
    Complete,
}

/// What an operation did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A guard suppressed the operation; nothing changed.
    Ignored,
    /// The selection was recorded.
    Answered { correct: bool },
    /// Moved on to the question at `index`.
    Advanced { index: usize },
    /// The last question was left; the session is complete.
    Completed { score: usize, total: usize },
    /// Back to the first question with a zero score.
    Restarted,
}

impl Transition {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Transition::Ignored)
    }
}

/// Feedback for the answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub is_correct: bool,
    pub message: String,
}

/// Final outcome, available once the session is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    /// `round(100 * score / total)`.
    pub percentage: u32,
    /// Label of the matched tier.
    pub tier: String,
    pub message: String,
}

/// Everything a front end needs to render the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub phase: Phase,
    /// Zero-based index of the current question.
    pub current_index: usize,
    pub total: usize,
    /// Prompt of the current question; `None` once complete.
    pub prompt: Option<String>,
    /// Options of the current question; empty once complete.
    pub options: Vec<String>,
    pub selection: Option<String>,
    pub feedback: Option<Feedback>,
    pub completed: bool,
    pub score: usize,
    pub progress_percent: u32,
    /// Only present once complete.
    pub result: Option<QuizResult>,
}

/// One attempt at a fixed question sequence.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    questions: Arc<[Question]>,
    policy: ResultPolicy,
    current_index: usize,
    score: usize,
    selection: Option<String>,
    completed: bool,
}

impl QuizSession {
    /// Start a session with the default result policy.
    pub fn new(questions: impl Into<Arc<[Question]>>) -> Result<Self, QuizError> {
        Self::with_policy(questions, ResultPolicy::default())
    }

    /// Start a session with a custom result policy.
    ///
    /// Fails if there are no questions or the policy does not cover every
    /// percentage.
    pub fn with_policy(
        questions: impl Into<Arc<[Question]>>,
        policy: ResultPolicy,
    ) -> Result<Self, QuizError> {
        let questions = questions.into();
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionBank);
        }
        policy.validate()?;

        let session = Self {
            id: Uuid::new_v4(),
            questions,
            policy,
            current_index: 0,
            score: 0,
            selection: None,
            completed: false,
        };
        tracing::debug!(
            session = %session.id,
            total = session.total(),
            "quiz session created"
        );
        Ok(session)
    }

    /// Start a session over a bank, using its own policy when it has one.
    pub fn from_bank(bank: &QuestionBank, fallback: &ResultPolicy) -> Result<Self, QuizError> {
        Self::with_policy(bank.questions.clone(), bank.effective_policy(fallback))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn policy(&self) -> &ResultPolicy {
        &self.policy
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question at the current index. After completion this is the last question.
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.total()
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Complete
        } else if self.selection.is_some() {
            Phase::Answered
        } else {
            Phase::Unanswered
        }
    }

    /// Record an answer for the current question.
    ///
    /// Any string is accepted; only an exact match with the correct answer
    /// scores. Ignored once the question already has a selection or the
    /// session is complete.
    pub fn select_answer(&mut self, option: impl Into<String>) -> Transition {
        if self.completed {
            tracing::debug!(session = %self.id, "ignoring selection: session complete");
            return Transition::Ignored;
        }
        if self.selection.is_some() {
            tracing::debug!(
                session = %self.id,
                index = self.current_index,
                "ignoring selection: question already answered"
            );
            return Transition::Ignored;
        }

        let option = option.into();
        let correct = self.current_question().is_correct(&option);
        if correct {
            self.score += 1;
        }
        self.selection = Some(option);

        tracing::debug!(
            session = %self.id,
            index = self.current_index,
            correct,
            score = self.score,
            "answer recorded"
        );
        Transition::Answered { correct }
    }

    /// Leave the current question. Ignored until it has been answered.
    pub fn advance(&mut self) -> Transition {
        if self.completed || self.selection.is_none() {
            tracing::debug!(
                session = %self.id,
                index = self.current_index,
                "ignoring advance: no answer for the current question"
            );
            return Transition::Ignored;
        }

        self.selection = None;

        if self.is_last_question() {
            self.completed = true;
            tracing::info!(
                session = %self.id,
                score = self.score,
                total = self.total(),
                percentage = self.percentage(),
                "quiz completed"
            );
            Transition::Completed {
                score: self.score,
                total: self.total(),
            }
        } else {
            self.current_index += 1;
            tracing::debug!(session = %self.id, index = self.current_index, "advanced");
            Transition::Advanced {
                index: self.current_index,
            }
        }
    }

    /// Back to the first question, discarding score and position.
    pub fn restart(&mut self) -> Transition {
        self.current_index = 0;
        self.score = 0;
        self.selection = None;
        self.completed = false;
        tracing::debug!(session = %self.id, "quiz restarted");
        Transition::Restarted
    }

    /// Feedback for the current selection, if any.
    pub fn feedback(&self) -> Option<Feedback> {
        let selection = self.selection.as_deref()?;
        let question = self.current_question();
        let is_correct = question.is_correct(selection);
        Some(Feedback {
            is_correct,
            message: self
                .policy
                .feedback_message(&question.explanation, is_correct),
        })
    }

    /// Share of questions left behind, for a progress bar. 100 once complete.
    pub fn progress_percent(&self) -> u32 {
        if self.completed {
            return 100;
        }
        round_percent(self.current_index, self.total())
    }

    /// `round(100 * score / total)`.
    pub fn percentage(&self) -> u32 {
        round_percent(self.score, self.total())
    }

    /// Matched result tier, only once complete.
    pub fn result_tier(&self) -> Option<&ResultTier> {
        if !self.completed {
            return None;
        }
        self.policy.tier_for(self.percentage())
    }

    pub fn result_message(&self) -> Option<&str> {
        self.result_tier().map(|t| t.message.as_str())
    }

    pub fn result(&self) -> Option<QuizResult> {
        self.result_tier().map(|tier| QuizResult {
            score: self.score,
            total: self.total(),
            percentage: self.percentage(),
            tier: tier.label.clone(),
            message: tier.message.clone(),
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (prompt, options) = if self.completed {
            (None, Vec::new())
        } else {
            let q = self.current_question();
            (Some(q.prompt.clone()), q.options.clone())
        };

        SessionSnapshot {
            session_id: self.id,
            phase: self.phase(),
            current_index: self.current_index,
            total: self.total(),
            prompt,
            options,
            selection: self.selection.clone(),
            feedback: self.feedback(),
            completed: self.completed,
            score: self.score,
            progress_percent: self.progress_percent(),
            result: self.result(),
        }
    }
}

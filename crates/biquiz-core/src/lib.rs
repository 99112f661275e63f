//! biquiz-core: Quiz engine, result policy, and question-bank loading.
//!
//! This crate defines the question data model, the single-session quiz
//! state machine, and the scoring policy that the `biquiz` CLI drives.

pub mod builtin;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod policy;
pub mod session;

pub use error::QuizError;
pub use model::{Question, QuestionBank};
pub use policy::{ResultPolicy, ResultTier};
pub use session::{Feedback, Phase, QuizSession, SessionSnapshot, Transition};

#![forbid(unsafe_code)]

pub mod badges;
pub mod generator;
pub mod level;
pub mod model;
pub mod scoring;
pub mod time;

pub use time::Clock;

pub use badges::BadgeEvaluator;
pub use generator::{ProblemGenerator, QUESTIONS_PER_LEVEL, QuestionSet};
pub use level::{AnswerFeedback, LevelError, LevelSession, SessionPhase};
pub use scoring::{Evaluation, ScoringEngine, ScoringError, Tally};

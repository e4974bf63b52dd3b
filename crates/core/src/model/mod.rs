mod badge;
mod grade;
mod problem;
mod profile;
mod report;
mod rules;

pub use badge::{Badge, BadgeError, BadgeId};
pub use grade::{Grade, GradeError};
pub use problem::{ANSWER_TOLERANCE, Archetype, Problem, Template};
pub use profile::{Avatar, PlayerProfile, ProfileError};
pub use report::{Encouragement, Headline, LevelReport, NEXT_LEVEL_ACCURACY, ReportError};
pub use rules::{BadgeRules, RulesError, ScoringRules};

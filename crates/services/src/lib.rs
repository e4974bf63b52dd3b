#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod presentation;
pub mod profile_service;
pub mod sessions;

pub use quest_core::Clock;

pub use config::QuestConfig;
pub use error::{ProfileServiceError, QuestError};
pub use presentation::{PresentationGateway, SilentPresenter};
pub use profile_service::ProfileService;
pub use sessions::{QuestAnswerResult, QuestLoopService, QuestionView, SessionProgress};

use quest_core::AnswerFeedback;
use quest_core::model::{LevelReport, PlayerProfile};

use crate::sessions::QuestionView;

/// Rendering seam between the quest loop and whatever draws it.
///
/// Implementations only display what they are handed; all state changes
/// happen in the services before a hook fires.
pub trait PresentationGateway: Send + Sync {
    fn show_question(&self, view: &QuestionView);

    fn show_hint(&self, hint: &str);

    fn show_feedback(&self, feedback: &AnswerFeedback);

    /// Inline message for unparseable answer text. The question stays put.
    fn show_input_error(&self, message: &str);

    fn show_results(&self, report: &LevelReport, profile: &PlayerProfile);
}

/// Presenter that draws nothing. Handy for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPresenter;

impl PresentationGateway for SilentPresenter {
    fn show_question(&self, _view: &QuestionView) {}

    fn show_hint(&self, _hint: &str) {}

    fn show_feedback(&self, _feedback: &AnswerFeedback) {}

    fn show_input_error(&self, _message: &str) {}

    fn show_results(&self, _report: &LevelReport, _profile: &PlayerProfile) {}
}

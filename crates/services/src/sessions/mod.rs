mod view;
mod workflow;

pub use view::{QuestionView, SessionProgress};
pub use workflow::{QuestAnswerResult, QuestLoopService};

//! Onboarding system — first-launch questionnaire.
//!
//! A fixed, ordered set of multiple-choice questions is answered one at a
//! time. The final answer persists the `AnswerSet` and the completion flag,
//! optionally asks for notification permission, and hands the user over to
//! the main app.

pub mod flow;
pub mod model;
pub mod state;

pub use flow::{
    CompletionObserver, CompletionReport, OnboardingDeps, OnboardingFlow, ReminderOutcome,
    SubmitOutcome,
};
pub use model::{AnswerSet, Question, QuestionSet};
pub use state::{OnboardingPhase, OnboardingState};

//! OnboardingFlow — drives one questionnaire session and runs the
//! completion side effects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{OnboardingError, PermissionError, StoreError};
use crate::platform::{
    Advisory, AdvisorySink, Navigator, NotificationPermissions, PermissionStatus, Route,
};
use crate::store::Preferences;

use super::model::{AnswerSet, Question, QuestionSet};
use super::state::{OnboardingPhase, OnboardingState};

/// Everything the flow talks to besides its own state.
#[derive(Clone)]
pub struct OnboardingDeps {
    pub preferences: Preferences,
    pub permissions: Arc<dyn NotificationPermissions>,
    pub navigator: Arc<dyn Navigator>,
    pub advisories: Arc<dyn AdvisorySink>,
    /// Receives the report of every completed session.
    pub observer: Option<Arc<dyn CompletionObserver>>,
}

/// Notified once per completed session, after navigation.
pub trait CompletionObserver: Send + Sync {
    fn on_completion(&self, report: &CompletionReport);
}

/// What happened to the reminders permission at completion.
#[derive(Debug, Clone)]
pub enum ReminderOutcome {
    /// The user did not opt into reminders.
    NotRequested,
    /// Permission was already granted; no prompt shown.
    AlreadyGranted,
    /// The user granted permission when asked.
    Granted,
    /// Permission remains off; the advisory was shown.
    Denied { status: PermissionStatus },
    /// The platform call failed; nothing was shown.
    Failed(PermissionError),
}

/// Per-side-effect outcome of a completed session.
#[derive(Debug, Clone)]
pub struct CompletionReport {
    pub session_id: Uuid,
    pub answers: AnswerSet,
    pub reminders: ReminderOutcome,
    pub answers_saved: Result<(), StoreError>,
    pub flag_saved: Result<(), StoreError>,
    pub route: Route,
    pub completed_at: DateTime<Utc>,
}

impl CompletionReport {
    /// True when both writes landed and no permission call failed.
    pub fn is_clean(&self) -> bool {
        self.answers_saved.is_ok()
            && self.flag_saved.is_ok()
            && !matches!(self.reminders, ReminderOutcome::Failed(_))
    }
}

/// Result of a successful `submit_answer`.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Moved on to the question at `index`.
    Advanced { index: usize },
    /// Last answer given; side effects ran and the app navigated to main.
    Completed(CompletionReport),
}

/// One onboarding session.
///
/// Only one submission runs at a time. A second call made while the first
/// is still awaiting the store or the platform fails with
/// [`OnboardingError::TransitionInFlight`] and changes nothing.
pub struct OnboardingFlow {
    session_id: Uuid,
    questions: Arc<QuestionSet>,
    deps: OnboardingDeps,
    state: Mutex<OnboardingState>,
}

impl OnboardingFlow {
    pub fn new(questions: Arc<QuestionSet>, deps: OnboardingDeps) -> Self {
        let session_id = Uuid::new_v4();
        info!(
            session_id = %session_id,
            questions = questions.len(),
            "Onboarding started"
        );
        Self {
            session_id,
            questions,
            deps,
            state: Mutex::new(OnboardingState::new()),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// Snapshot of the current state. Waits for an in-flight submission.
    pub async fn state(&self) -> OnboardingState {
        self.state.lock().await.clone()
    }

    /// The question awaiting an answer, `None` once completed.
    pub async fn current_question(&self) -> Option<Question> {
        let state = self.state.lock().await;
        state
            .current_index()
            .and_then(|i| self.questions.get(i))
            .cloned()
    }

    /// Answer the current question.
    ///
    /// On the last question this persists the answers and the completion
    /// flag and navigates to [`Route::Main`]. Side-effect failures are logged
    /// and reported in the [`CompletionReport`], never returned as errors.
    pub async fn submit_answer(&self, option: &str) -> Result<SubmitOutcome, OnboardingError> {
        let mut state = self.state.try_lock().map_err(|_| {
            warn!(session_id = %self.session_id, "Answer submitted while another is in flight");
            OnboardingError::TransitionInFlight
        })?;

        let phase = state.submit(&self.questions, option).inspect_err(|e| {
            warn!(session_id = %self.session_id, error = %e, "Answer rejected");
        })?;

        match phase {
            OnboardingPhase::AnsweringQuestion(index) => {
                debug!(
                    session_id = %self.session_id,
                    answered = index,
                    of = self.questions.len(),
                    "Question answered"
                );
                Ok(SubmitOutcome::Advanced { index })
            }
            OnboardingPhase::Completed => {
                let answers = state.answers().clone();
                // Guard stays held until every side effect has finished.
                let report = self.complete(answers).await;
                drop(state);
                Ok(SubmitOutcome::Completed(report))
            }
        }
    }

    /// Run the completion side effects in order. Each one is independent.
    async fn complete(&self, answers: AnswerSet) -> CompletionReport {
        let reminders = if answers.wants_reminders() {
            self.request_reminders().await
        } else {
            ReminderOutcome::NotRequested
        };

        let answers_saved = self.deps.preferences.save_onboarding_answers(&answers).await;
        if let Err(ref e) = answers_saved {
            warn!(session_id = %self.session_id, error = %e, "Failed to save onboarding answers");
        }

        let flag_saved = self.deps.preferences.set_onboarding_complete().await;
        if let Err(ref e) = flag_saved {
            warn!(session_id = %self.session_id, error = %e, "Failed to save onboarding status");
        }

        let route = Route::Main;
        self.deps.navigator.replace_route(route);

        let report = CompletionReport {
            session_id: self.session_id,
            answers,
            reminders,
            answers_saved,
            flag_saved,
            route,
            completed_at: Utc::now(),
        };
        info!(
            session_id = %self.session_id,
            clean = report.is_clean(),
            reminders = ?report.reminders,
            "Onboarding complete"
        );

        if let Some(ref observer) = self.deps.observer {
            observer.on_completion(&report);
        }
        report
    }

    /// Make sure notifications are allowed, asking only if they are not.
    async fn request_reminders(&self) -> ReminderOutcome {
        let permissions = &self.deps.permissions;

        let existing = match permissions.permission_status().await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Error reading notification permission");
                return ReminderOutcome::Failed(e);
            }
        };
        if existing == PermissionStatus::Granted {
            return ReminderOutcome::AlreadyGranted;
        }

        match permissions.request_permission().await {
            Ok(PermissionStatus::Granted) => ReminderOutcome::Granted,
            Ok(status) => {
                self.deps
                    .advisories
                    .show_advisory(&Advisory::notifications_disabled());
                ReminderOutcome::Denied { status }
            }
            Err(e) => {
                warn!(error = %e, "Error requesting notification permission");
                ReminderOutcome::Failed(e)
            }
        }
    }
}

//! Onboarding state machine — tracks which question the user is on.

use serde::{Deserialize, Serialize};

use crate::error::OnboardingError;

use super::model::{AnswerSet, QuestionSet};

/// Position in the questionnaire.
///
/// Progresses linearly: AnsweringQuestion(0) → … → AnsweringQuestion(N-1) → Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingPhase {
    AnsweringQuestion(usize),
    Completed,
}

impl OnboardingPhase {
    /// Check if a transition from `self` to `target` is valid for `total` questions.
    pub fn can_transition_to(&self, target: OnboardingPhase, total: usize) -> bool {
        use OnboardingPhase::*;
        match (*self, target) {
            (AnsweringQuestion(i), AnsweringQuestion(j)) => j == i + 1 && j < total,
            (AnsweringQuestion(i), Completed) => i + 1 == total,
            _ => false,
        }
    }

    /// Whether this phase is terminal (onboarding is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Get the next phase in the linear progression, if any.
    pub fn next(&self, total: usize) -> Option<OnboardingPhase> {
        match self {
            Self::AnsweringQuestion(i) if i + 1 < total => Some(Self::AnsweringQuestion(i + 1)),
            Self::AnsweringQuestion(_) => Some(Self::Completed),
            Self::Completed => None,
        }
    }
}

impl Default for OnboardingPhase {
    fn default() -> Self {
        Self::AnsweringQuestion(0)
    }
}

impl std::fmt::Display for OnboardingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnsweringQuestion(i) => write!(f, "answering_question({i})"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// In-memory questionnaire state for one onboarding session.
///
/// Invariant: while answering question `i`, exactly `i` answers are recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OnboardingState {
    phase: OnboardingPhase,
    answers: AnswerSet,
}

impl OnboardingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> OnboardingPhase {
        self.phase
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Index of the question awaiting an answer, `None` once completed.
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            OnboardingPhase::AnsweringQuestion(i) => Some(i),
            OnboardingPhase::Completed => None,
        }
    }

    /// 1-based position of the question awaiting an answer, for "k of N" displays.
    pub fn position(&self) -> Option<usize> {
        self.current_index().map(|i| i + 1)
    }

    /// Fraction of the questionnaire reached, counting the current question.
    pub fn progress(&self, questions: &QuestionSet) -> f32 {
        match self.phase {
            OnboardingPhase::AnsweringQuestion(i) => (i + 1) as f32 / questions.len() as f32,
            OnboardingPhase::Completed => 1.0,
        }
    }

    /// Record an answer to the current question and advance.
    ///
    /// An option outside the current question's choices is rejected and the
    /// state is left untouched.
    pub fn submit(
        &mut self,
        questions: &QuestionSet,
        option: &str,
    ) -> Result<OnboardingPhase, OnboardingError> {
        let index = self
            .current_index()
            .ok_or(OnboardingError::AlreadyCompleted)?;
        let question = questions
            .get(index)
            .ok_or(OnboardingError::AlreadyCompleted)?;

        if !question.accepts(option) {
            return Err(OnboardingError::InvalidAnswer {
                question_id: question.id.clone(),
                option: option.to_string(),
            });
        }

        let next = self
            .phase
            .next(questions.len())
            .ok_or(OnboardingError::AlreadyCompleted)?;
        debug_assert!(self.phase.can_transition_to(next, questions.len()));

        self.answers.record(&question.id, option);
        self.phase = next;
        Ok(next)
    }
}

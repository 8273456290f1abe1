//! Questionnaire data models.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::OnboardingError;

/// Id of the question whose "Yes" answer triggers a notification-permission request.
pub const DREAM_REMINDERS: &str = "dreamReminders";

/// Answer to [`DREAM_REMINDERS`] that opts into reminders.
pub const REMINDERS_OPT_IN: &str = "Yes";

/// A single multiple-choice onboarding question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    /// Stable key under which the answer is stored, e.g. "dreamRecall".
    pub id: String,
    /// Display text.
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Selectable answers, in display order.
    pub options: Vec<String>,
}

impl Question {
    pub fn new<I, S>(id: &str, prompt: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            description: None,
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Whether `option` is one of this question's choices.
    pub fn accepts(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Ordered, validated sequence of questions. Order is the flow order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Validate and wrap a question list.
    ///
    /// Rejects an empty list, questions without options, and repeated ids.
    pub fn new(questions: Vec<Question>) -> Result<Self, OnboardingError> {
        if questions.is_empty() {
            return Err(OnboardingError::EmptyQuestionSet);
        }
        let mut seen = HashSet::new();
        for q in &questions {
            if q.options.is_empty() {
                return Err(OnboardingError::QuestionWithoutOptions { id: q.id.clone() });
            }
            if !seen.insert(q.id.as_str()) {
                return Err(OnboardingError::DuplicateQuestionId { id: q.id.clone() });
            }
        }
        Ok(Self { questions })
    }

    /// The lucid-dreaming questionnaire shipped with the app.
    pub fn lucid_dreaming() -> Self {
        Self {
            questions: vec![
                Question::new(
                    "lucidDreamBefore",
                    "Have you had a lucid dream before?",
                    ["Yes", "No", "Not sure"],
                )
                .with_description(
                    "Lucid dreaming is when you are aware that you are dreaming, which allows you to control your dreams",
                ),
                Question::new(
                    "dreamGoals",
                    "What do you want to do in your dreams?",
                    [
                        "Fly",
                        "Fulfill desires",
                        "Visit a person or place",
                        "Seek guidance",
                        "Meditate",
                    ],
                ),
                Question::new(
                    "dreamJournalBefore",
                    "Have you had a dream journal before?",
                    ["Yes", "No"],
                )
                .with_description("Writing down what you dreamt of makes lucid dreaming easier"),
                Question::new(
                    "dreamRecall",
                    "How often do you remember what you dreamt of?",
                    [
                        "Every night",
                        "Every week",
                        "Monthly",
                        "Few times a year",
                        "Almost never",
                    ],
                ),
                Question::new(
                    "dreamType",
                    "What are your usual dreams like?",
                    [
                        "Normal",
                        "Uncomfortable",
                        "Engaging/meaningful",
                        "Bizarre/wild",
                        "Joyful/blissful",
                    ],
                ),
                Question::new(
                    "sleepHours",
                    "How many hours of sleep do you get each night?",
                    ["Less than 6", "6-7", "7-8", "8-9", "9 or more"],
                ),
                Question::new(
                    "alarmFrequency",
                    "How often do you wake up with an alarm?",
                    ["Every day", "Often", "Occasionally", "Rarely", "Never"],
                ),
                Question::new(
                    "dedicationTime",
                    "How much time can you dedicate to lucid dreaming each day?",
                    [
                        "5 minutes or less",
                        "10 mins",
                        "20 mins",
                        "30 mins",
                        "1 hour or more",
                    ],
                ),
                Question::new(
                    DREAM_REMINDERS,
                    "Do you want am-i-dreaming reminders?",
                    ["Yes", "No"],
                )
                .with_description("Asking yourself if you are dreaming helps you lucid dream"),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self::lucid_dreaming()
    }
}

/// Chosen option per question id.
///
/// Persisted as a flat JSON object under
/// [`preference_keys::ONBOARDING_ANSWERS`](crate::store::preference_keys::ONBOARDING_ANSWERS).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether the user opted into dream reminders.
    pub fn wants_reminders(&self) -> bool {
        self.get(DREAM_REMINDERS) == Some(REMINDERS_OPT_IN)
    }

    pub(crate) fn record(&mut self, question_id: &str, option: &str) {
        self.0.insert(question_id.to_string(), option.to_string());
    }
}

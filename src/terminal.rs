//! Terminal front end — stdin/stdout stand-ins for the app's screens.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::error::{PermissionError, Result};
use crate::onboarding::{
    CompletionReport, OnboardingFlow, OnboardingState, Question, QuestionSet, SubmitOutcome,
};
use crate::platform::{
    Advisory, AdvisorySink, Navigator, NotificationPermissions, PermissionStatus, Route,
};
use crate::store::Preferences;

type LineSource = Box<dyn AsyncBufRead + Send + Unpin>;

/// Line reader shared by everything that needs user input.
pub struct Prompter {
    lines: tokio::sync::Mutex<Lines<LineSource>>,
}

impl Prompter {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        let source: LineSource = Box::new(reader);
        Self {
            lines: tokio::sync::Mutex::new(source.lines()),
        }
    }

    /// Next trimmed line, `None` on EOF.
    pub async fn read_line(&self) -> std::io::Result<Option<String>> {
        let line = self.lines.lock().await.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}

/// Render a question with its "k of N" progress header and numbered options.
pub fn render_question(
    question: &Question,
    state: &OnboardingState,
    questions: &QuestionSet,
) -> String {
    let total = questions.len();
    let position = state.position().unwrap_or(total);
    let percent = state.progress(questions) * 100.0;
    let mut parts = vec![
        format!("[{} of {}] {:.0}%", position, total, percent),
        question.prompt.clone(),
    ];
    if let Some(ref description) = question.description {
        parts.push(format!("  {}", description));
    }
    for (i, option) in question.options.iter().enumerate() {
        parts.push(format!("  {}) {}", i + 1, option));
    }
    parts.join("\n")
}

/// Map user input to one of the question's options.
///
/// Exact option text wins, then the option number (1-based), then the
/// option text ignoring case.
pub fn parse_choice<'q>(input: &str, question: &'q Question) -> Option<&'q str> {
    let input = input.trim();
    if let Some(exact) = question.options.iter().find(|o| o.as_str() == input) {
        return Some(exact);
    }
    let by_number = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| question.options.get(i));
    by_number
        .or_else(|| question.options.iter().find(|o| o.eq_ignore_ascii_case(input)))
        .map(String::as_str)
}

/// Ask every remaining question until the flow completes.
///
/// Returns `None` if input ends before the last answer.
pub async fn run_questionnaire(
    flow: &OnboardingFlow,
    prompter: &Prompter,
) -> Result<Option<CompletionReport>> {
    tracing::debug!(session_id = %flow.session_id(), "Questionnaire attached to terminal");

    loop {
        let state = flow.state().await;
        let Some(question) = state
            .current_index()
            .and_then(|i| flow.questions().get(i))
            .cloned()
        else {
            return Ok(None);
        };
        println!("\n{}", render_question(&question, &state, flow.questions()));
        eprint!("> ");

        let Some(line) = prompter.read_line().await? else {
            return Ok(None);
        };
        let Some(choice) = parse_choice(&line, &question) else {
            eprintln!("Pick a number between 1 and {}.", question.options.len());
            continue;
        };

        if let SubmitOutcome::Completed(report) = flow.submit_answer(choice).await? {
            return Ok(Some(report));
        }
    }
}

/// One "  id: answer" line per stored answer, empty if none were saved.
pub async fn answer_summary(preferences: &Preferences) -> Result<Vec<String>> {
    let Some(answers) = preferences.onboarding_answers().await? else {
        return Ok(Vec::new());
    };
    Ok(answers
        .iter()
        .map(|(id, answer)| format!("  {id}: {answer}"))
        .collect())
}

/// Prints each route change and remembers the last one.
#[derive(Default)]
pub struct TerminalNavigator {
    current: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn current(&self) -> Option<Route> {
        self.current.lock().map(|r| *r).unwrap_or(None)
    }
}

impl Navigator for TerminalNavigator {
    fn replace_route(&self, route: Route) {
        eprintln!("→ {}", route);
        if let Ok(mut current) = self.current.lock() {
            *current = Some(route);
        }
    }
}

/// Prints advisories to stderr.
pub struct TerminalAdvisories;

impl AdvisorySink for TerminalAdvisories {
    fn show_advisory(&self, advisory: &Advisory) {
        eprintln!("⚠️  {}: {}", advisory.title, advisory.message);
    }
}

/// Asks a y/n question the first time permission is requested.
pub struct TerminalPermissions {
    prompter: std::sync::Arc<Prompter>,
    status: tokio::sync::Mutex<PermissionStatus>,
}

impl TerminalPermissions {
    pub fn new(prompter: std::sync::Arc<Prompter>) -> Self {
        Self {
            prompter,
            status: tokio::sync::Mutex::new(PermissionStatus::Undetermined),
        }
    }
}

#[async_trait]
impl NotificationPermissions for TerminalPermissions {
    async fn permission_status(&self) -> std::result::Result<PermissionStatus, PermissionError> {
        Ok(*self.status.lock().await)
    }

    async fn request_permission(&self) -> std::result::Result<PermissionStatus, PermissionError> {
        let mut status = self.status.lock().await;
        if *status != PermissionStatus::Undetermined {
            return Ok(*status);
        }

        println!("\nAllow reminder notifications? [y/n]");
        eprint!("> ");
        let answer = self
            .prompter
            .read_line()
            .await
            .map_err(|e| PermissionError::RequestFailed(e.to_string()))?
            .ok_or(PermissionError::Unavailable)?;

        *status = if matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes") {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        Ok(*status)
    }
}

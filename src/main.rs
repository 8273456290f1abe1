use std::sync::Arc;

use anyhow::Context;

use lucid_onboarding::config::AppConfig;
use lucid_onboarding::launch::LaunchRouter;
use lucid_onboarding::onboarding::{OnboardingDeps, OnboardingFlow, QuestionSet};
use lucid_onboarding::platform::Route;
use lucid_onboarding::store::{LibSqlPreferenceStore, PreferenceStore, Preferences};
use lucid_onboarding::terminal::{
    self, Prompter, TerminalAdvisories, TerminalNavigator, TerminalPermissions,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();

    eprintln!("🌙 Lucid v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Preferences: {}", config.db_path.display());
    if let Some(timeout) = config.store_timeout {
        eprintln!("   Store timeout: {:?}", timeout);
    }

    // ── Store ───────────────────────────────────────────────────────────
    let store: Arc<dyn PreferenceStore> = Arc::new(
        LibSqlPreferenceStore::new_local(&config.db_path)
            .await
            .with_context(|| format!("opening preferences at {}", config.db_path.display()))?,
    );
    let preferences = Preferences::new(store).with_timeout(config.store_timeout);

    // ── Launch ──────────────────────────────────────────────────────────
    let navigator = Arc::new(TerminalNavigator::default());
    let router = LaunchRouter::new(preferences.clone());
    eprintln!("   Loading...");
    let route = router.launch(navigator.as_ref()).await;

    if route == Route::Onboarding {
        let prompter = Arc::new(Prompter::stdin());
        let deps = OnboardingDeps {
            preferences: preferences.clone(),
            permissions: Arc::new(TerminalPermissions::new(Arc::clone(&prompter))),
            navigator: navigator.clone(),
            advisories: Arc::new(TerminalAdvisories),
            observer: None,
        };
        let flow = OnboardingFlow::new(Arc::new(QuestionSet::lucid_dreaming()), deps);

        match terminal::run_questionnaire(&flow, &prompter).await? {
            Some(report) if !report.is_clean() => {
                eprintln!("   Some answers could not be saved; you may be asked again next time.");
            }
            Some(_) => {}
            None => {
                eprintln!("\nOnboarding interrupted. Run again to continue.");
                return Ok(());
            }
        }
    }

    // ── Main ────────────────────────────────────────────────────────────
    println!("\nWelcome to Lucid. Sweet dreams!");
    match terminal::answer_summary(&preferences).await {
        Ok(lines) if !lines.is_empty() => {
            println!("Your answers:");
            for line in lines {
                println!("{line}");
            }
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Could not read onboarding answers"),
    }

    Ok(())
}

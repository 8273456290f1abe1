//! Lucid onboarding — launch routing and the first-run questionnaire.

pub mod config;
pub mod error;
pub mod launch;
pub mod onboarding;
pub mod platform;
pub mod store;
pub mod terminal;

#[cfg(test)]
pub(crate) mod test_support;

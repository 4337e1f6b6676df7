use tracing::warn;

use crate::analytics::summary::AnalyticsSummary;
use crate::insights::client::InsightClient;
use crate::insights::prompt::build_prompt;

/// Minimum logged sessions before the external call is worth making.
const MIN_SESSIONS_FOR_ANALYSIS: usize = 3;

pub(crate) const UNCONFIGURED_MESSAGE: &str =
    "AI analysis unavailable. Ask the operator to configure an API key for the \
     insight service.";

pub(crate) const FALLBACK_MESSAGE: &str = "AI analysis is temporarily unavailable. \
     In the meantime: keep your study sessions consistent, rate your focus honestly, \
     and log sleep and stress daily. Experiment with different study times to find \
     your peak hours, and check back in a few minutes.";

fn getting_started(session_count: usize) -> String {
    format!(
        "You have {session_count} study session(s) logged. Log at least \
         {MIN_SESSIONS_FOR_ANALYSIS} sessions, along with some wellness data and \
         assessment scores, and the coach will have enough to find patterns: peak \
         performance times, how sleep and stress relate to focus, and which study \
         methods work best for you."
    )
}

/// Produce the coaching text for a user. Never fails: external-service
/// errors degrade to the fallback message after one immediate retry.
pub async fn coach_text(
    client: &dyn InsightClient,
    summary: &AnalyticsSummary,
    session_count: usize,
) -> String {
    if !client.is_configured() {
        return UNCONFIGURED_MESSAGE.to_string();
    }
    if session_count < MIN_SESSIONS_FOR_ANALYSIS {
        return getting_started(session_count);
    }

    let prompt = build_prompt(summary);
    match client.generate(&prompt).await {
        Ok(text) => text,
        Err(first) => {
            warn!(error = %first, "insight generation failed, retrying once");
            match client.generate(&prompt).await {
                Ok(text) => text,
                Err(second) => {
                    warn!(error = %second, "insight generation failed again, using fallback");
                    FALLBACK_MESSAGE.to_string()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::analytics::summary::{build_summary, fixtures::session};
    use crate::insights::client::UnconfiguredClient;

    struct ScriptedClient {
        calls: AtomicUsize,
        fail_first: usize,
    }

    impl ScriptedClient {
        fn failing(times: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first: times,
            }
        }
    }

    #[async_trait]
    impl InsightClient for ScriptedClient {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first {
                anyhow::bail!("simulated endpoint failure")
            }
            Ok("coach says hi".to_string())
        }
    }

    fn enough_sessions() -> AnalyticsSummary {
        let sessions = vec![
            session(0, "Math", 30, 3),
            session(1, "Math", 45, 4),
            session(2, "Math", 60, 4),
        ];
        build_summary(&sessions, &[], &[])
    }

    #[tokio::test]
    async fn happy_path_returns_generated_text() {
        let client = ScriptedClient::failing(0);
        let text = coach_text(&client, &enough_sessions(), 3).await;
        assert_eq!(text, "coach says hi");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn one_failure_is_retried() {
        let client = ScriptedClient::failing(1);
        let text = coach_text(&client, &enough_sessions(), 3).await;
        assert_eq!(text, "coach says hi");
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn repeated_failure_degrades_to_fallback() {
        let client = ScriptedClient::failing(2);
        let text = coach_text(&client, &enough_sessions(), 3).await;
        assert_eq!(text, FALLBACK_MESSAGE);
        // One retry, never a loop.
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn sparse_data_short_circuits_before_calling_out() {
        let client = ScriptedClient::failing(0);
        let text = coach_text(&client, &enough_sessions(), 1).await;
        assert!(text.contains("1 study session(s)"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_key_reports_unconfigured() {
        let text = coach_text(&UnconfiguredClient, &enough_sessions(), 10).await;
        assert_eq!(text, UNCONFIGURED_MESSAGE);
    }
}

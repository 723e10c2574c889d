//! Bounty Applier application shell
//!
//! Thin binary glue: logging, configuration, wiring and the operator report.
//! The workflow itself lives in the `crates/` directory.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bounty_client::{HttpTransport, ListingClient};
use bounty_core::AppConfig;
use bounty_harvester::{Harvester, ListingOutcome, RunSummary, SubmissionOrchestrator};
use bounty_llm::{ApplicationGenerator, OpenAiProvider};
use tracing::info;

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,bounty=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Wire the client, generator, harvester and orchestrator from configuration.
pub fn build(config: &AppConfig) -> anyhow::Result<(SubmissionOrchestrator, Harvester)> {
    let transport =
        HttpTransport::from_config(&config.api).context("failed to create marketplace session")?;
    let client = Arc::new(ListingClient::new(Arc::new(transport), config.contact.clone()));

    let provider =
        OpenAiProvider::from_config(&config.generator).context("failed to create provider")?;
    let generator = ApplicationGenerator::from_config(Arc::new(provider), &config.generator)
        .context("invalid generator configuration")?;

    let harvester = Harvester::from_config(client.clone(), &config.harvest);
    let delay = Duration::from_millis(config.submission.delay_between_applications_ms);
    let orchestrator =
        SubmissionOrchestrator::new(client, generator).with_delay_between_applications(delay);

    Ok((orchestrator, harvester))
}

/// Lines printed to the operator after a run.
#[must_use]
pub fn report_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .outcomes
        .iter()
        .filter(|o| !matches!(o, ListingOutcome::Skipped { .. }))
        .map(ToString::to_string)
        .collect();
    lines.push(summary.to_string());
    lines
}

/// Load configuration, run the workflow and print the report.
pub async fn run() -> anyhow::Result<()> {
    info!("Starting bounty applier v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_with_env().context("failed to load configuration")?;
    let (orchestrator, harvester) = build(&config)?;

    let summary = orchestrator
        .run(&harvester)
        .await
        .context("run aborted")?;

    for line in report_lines(&summary) {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bounty_core::{ListingId, Secret};
    use bounty_harvester::SkipReason;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.contact.email = Some("dev@example.com".to_string());
        config.generator.prompt_template = "Apply to [Project Name]".to_string();
        config.api.session_cookie = Some(Secret::new("cookie"));
        config.generator.api_key = Some(Secret::new("sk-test"));
        config
    }

    #[test]
    fn test_build_from_valid_config() {
        assert!(build(&config()).is_ok());
    }

    #[test]
    fn test_build_rejects_template_without_placeholder() {
        let mut config = config();
        config.generator.prompt_template = "Apply".to_string();
        assert!(build(&config).is_err());
    }

    #[test]
    fn test_report_lines_hide_skipped_listings() {
        let now = chrono::Utc::now();
        let summary = RunSummary {
            run_id: uuid::Uuid::new_v4(),
            started_at: now,
            finished_at: now,
            harvested: 2,
            outcomes: vec![
                ListingOutcome::Skipped {
                    listing_id: ListingId::new(1),
                    title: "Old".to_string(),
                    reason: SkipReason::AlreadyApplied,
                },
                ListingOutcome::Applied {
                    listing_id: ListingId::new(2),
                    title: "New".to_string(),
                    content: "Hello".to_string(),
                },
            ],
        };

        let lines = report_lines(&summary);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Applied successfully to New, message: Hello");
        assert!(lines[1].contains("1 applied, 1 skipped"));
    }
}

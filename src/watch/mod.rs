//! Poll watch daemon
//!
//! Headless monitor that keeps an eye on the poll collection and raises a
//! desktop notification when a new poll opens or the current one closes.
//! Useful for audiences who keep the TUI closed between questions.

use anyhow::Result;
use std::time::Duration;
use tokio::time::interval;

use crate::api::types::PollSummary;
use crate::api::ApiClient;
use crate::config::AppConfig;

const CHECK_INTERVAL_SECS: u64 = 5;

/// What the daemon remembers between checks
struct WatchState {
    last_active: Option<PollSummary>,
}

impl WatchState {
    fn new() -> Self {
        Self { last_active: None }
    }
}

/// Run the watch loop until interrupted
pub async fn start_watching(config: AppConfig) -> Result<()> {
    let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;
    let mut check_interval = interval(Duration::from_secs(CHECK_INTERVAL_SECS));
    let mut state = WatchState::new();

    tracing::info!("Starting pollbooth watch daemon ({})", config.api_base_url);

    loop {
        check_interval.tick().await;

        if let Err(e) = run_check(&api, &config, &mut state).await {
            tracing::warn!("Watch cycle error: {}", e);
        }
    }
}

async fn run_check(api: &ApiClient, config: &AppConfig, state: &mut WatchState) -> Result<()> {
    let polls = api.list_polls().await?;
    let active = PollSummary::first_active(&polls).cloned();

    match (&state.last_active, &active) {
        (None, Some(poll)) => {
            tracing::info!("Poll opened: {} ({})", poll.question, poll.id);
            notify(config, "New poll is live", &poll.question);
        }
        (Some(prev), Some(poll)) if prev.id != poll.id => {
            tracing::info!("Poll changed: {} ({})", poll.question, poll.id);
            notify(config, "New poll is live", &poll.question);
        }
        (Some(prev), None) => {
            tracing::info!("Poll closed: {} ({})", prev.question, prev.id);
            notify(config, "Voting has ended", &prev.question);
        }
        _ => {}
    }

    state.last_active = active;
    Ok(())
}

fn notify(config: &AppConfig, summary: &str, body: &str) {
    if !config.notifications {
        return;
    }

    if let Err(e) = notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .icon("dialog-information")
        .show()
    {
        tracing::warn!("Notification failed: {}", e);
    }
}

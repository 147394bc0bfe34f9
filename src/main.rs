mod api;
mod app;
mod config;
mod theme;
mod ui;
mod watch;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::types::PollSummary;
use api::ApiClient;
use app::{App, View};
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "pollbooth")]
#[command(version = "0.1.0")]
#[command(about = "A terminal client for live audience polls")]
struct Args {
    /// Output the current active poll as JSON (for status bars and scripts)
    #[arg(short, long)]
    status: bool,

    /// Print the results of a poll as JSON and exit
    #[arg(short, long, value_name = "POLL_ID")]
    results: Option<String>,

    /// Run the watch daemon (desktop notifications on poll transitions)
    #[arg(short, long)]
    watch: bool,

    /// Override the configured API base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }

    // Handle CLI-only commands
    if args.status {
        return print_status(&config).await;
    }

    if let Some(poll_id) = args.results {
        return print_results(&config, &poll_id).await;
    }

    if args.watch {
        return watch::start_watching(config).await;
    }

    // Run TUI
    run_tui(config).await
}

async fn print_status(config: &AppConfig) -> Result<()> {
    let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;
    let polls = api.list_polls().await.unwrap_or_default();

    let output = match PollSummary::first_active(&polls) {
        Some(poll) => serde_json::json!({
            "active": true,
            "id": poll.id,
            "question": poll.question,
            "totalVotes": poll.total_votes,
        }),
        None => serde_json::json!({ "active": false }),
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

async fn print_results(config: &AppConfig, poll_id: &str) -> Result<()> {
    let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;
    let results = api.results(poll_id).await?;

    let output = serde_json::json!({
        "question": results.question,
        "totalVotes": results.total_votes,
        "status": results.status,
        "results": results.results,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_tui(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config).await?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        // 'q' would be swallowed by the admin form's text input
                        KeyCode::Char('q') if app.view != View::Admin => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key).await {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Periodic refresh
        let _ = app.tick().await;
    }
}

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::api::types::{PollDetail, PollResults, PollStatus, PollSummary};
use crate::api::ApiClient;
use crate::config::AppConfig;

/// How long the create-poll confirmation stays up before the form resets
const CONFIRMATION_MS: u64 = 2500;

/// Status line messages auto-clear after this many seconds
const STATUS_CLEAR_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Vote,
    Admin,
    Results,
}

/// Vote view: loading until the first fetch resolves, then one of three states
#[derive(Debug, Clone)]
pub enum VoteState {
    Loading,
    NoPoll,
    Active(VotingCard),
    Closed { poll_id: String },
}

/// Selection and submission state for the active poll
#[derive(Debug, Clone)]
pub struct VotingCard {
    pub poll: PollDetail,
    pub selected: Option<usize>,
    pub has_voted: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl VotingCard {
    fn new(poll: PollDetail) -> Self {
        Self {
            poll,
            selected: None,
            has_voted: false,
            submitting: false,
            error: None,
        }
    }

    /// Selection is frozen once a vote is in flight or submitted
    pub fn can_select(&self) -> bool {
        !self.has_voted && !self.submitting
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminField {
    Question,
    Option(usize),
}

/// Confirmation shown after a successful create, reverts after a short window
#[derive(Debug, Clone)]
pub struct CreateConfirmation {
    pub poll_id: String,
    pub shown_at: Instant,
}

#[derive(Debug, Clone)]
pub struct AdminState {
    pub question: String,
    pub options: Vec<String>,
    pub field: AdminField,
    pub error: Option<String>,
    pub creating: bool,
    pub closing: bool,
    pub active_poll: Option<PollSummary>,
    pub confirmation: Option<CreateConfirmation>,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            question: String::new(),
            options: vec![String::new(), String::new()],
            field: AdminField::Question,
            error: None,
            creating: false,
            closing: false,
            active_poll: None,
            confirmation: None,
        }
    }
}

impl AdminState {
    /// Validate the create form. Returns the trimmed question and the
    /// non-empty options, or the inline error to show.
    pub fn validate(&self) -> std::result::Result<(String, Vec<String>), String> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err("Please enter a question".to_string());
        }

        let filled: Vec<String> = self
            .options
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(|o| o.to_string())
            .collect();
        if filled.len() < 2 {
            return Err("Please provide at least 2 options".to_string());
        }

        Ok((question.to_string(), filled))
    }

    fn reset_form(&mut self) {
        self.question.clear();
        self.options = vec![String::new(), String::new()];
        self.field = AdminField::Question;
        self.confirmation = None;
    }

    fn focused_field_mut(&mut self) -> &mut String {
        match self.field {
            AdminField::Question => &mut self.question,
            AdminField::Option(i) => &mut self.options[i],
        }
    }

    fn focus_next(&mut self) {
        self.field = match self.field {
            AdminField::Question => AdminField::Option(0),
            AdminField::Option(i) if i + 1 < self.options.len() => AdminField::Option(i + 1),
            AdminField::Option(_) => AdminField::Question,
        };
    }

    fn focus_prev(&mut self) {
        self.field = match self.field {
            AdminField::Question => AdminField::Option(self.options.len() - 1),
            AdminField::Option(0) => AdminField::Question,
            AdminField::Option(i) => AdminField::Option(i - 1),
        };
    }

    fn add_option(&mut self) {
        self.options.push(String::new());
        self.field = AdminField::Option(self.options.len() - 1);
        self.error = None;
    }

    fn remove_focused_option(&mut self) {
        // Always keep at least two option fields
        if let AdminField::Option(i) = self.field {
            if self.options.len() > 2 {
                self.options.remove(i);
                self.field = AdminField::Option(i.min(self.options.len() - 1));
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultsState {
    /// Poll being viewed; None renders the terminal error state
    pub poll_id: Option<String>,
    pub results: Option<PollResults>,
    pub loading: bool,
    pub error: Option<String>,
    pub new_poll_available: bool,
}

impl ResultsState {
    pub fn is_closed(&self) -> bool {
        self.results
            .as_ref()
            .map(|r| r.status == PollStatus::Closed)
            .unwrap_or(false)
    }
}

pub struct App {
    pub view: View,
    pub vote: VoteState,
    pub admin: AdminState,
    pub results: ResultsState,

    // Status line feedback (auto-clears after a timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    pub config: AppConfig,
    api: ApiClient,

    last_vote_refresh: Instant,
    last_results_refresh: Instant,
}

impl App {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;
        Ok(Self::with_client(config, api).await)
    }

    /// Build with an injected client (tests point this at a mock server)
    pub async fn with_client(config: AppConfig, api: ApiClient) -> Self {
        let mut app = Self {
            view: View::Vote,
            vote: VoteState::Loading,
            admin: AdminState::default(),
            results: ResultsState::default(),
            status_message: None,
            status_message_time: None,
            config,
            api,
            last_vote_refresh: Instant::now(),
            last_results_refresh: Instant::now(),
        };

        app.refresh_vote().await;
        app
    }

    /// Set a status message (auto-clears after a few seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    // Navigation. Each view's transient state is discarded on entry.

    pub async fn goto_vote(&mut self) {
        self.view = View::Vote;
        self.vote = VoteState::Loading;
        self.refresh_vote().await;
    }

    pub async fn goto_admin(&mut self) {
        self.view = View::Admin;
        self.admin = AdminState::default();
        self.load_admin_poll().await;
    }

    pub async fn goto_results(&mut self, poll_id: Option<String>) {
        self.view = View::Results;
        self.results = ResultsState {
            poll_id,
            loading: true,
            ..Default::default()
        };
        self.refresh_results().await;
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.view {
            View::Vote => self.handle_vote_key(key).await,
            View::Admin => self.handle_admin_key(key).await,
            View::Results => self.handle_results_key(key).await,
        }
    }

    async fn handle_vote_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Enter | KeyCode::Char(' ') => match &self.vote {
                VoteState::Active(_) => self.submit_vote().await?,
                VoteState::Closed { poll_id } => {
                    let id = poll_id.clone();
                    self.goto_results(Some(id)).await;
                }
                _ => {}
            },
            KeyCode::Char('a') => self.goto_admin().await,
            KeyCode::Char('r') => {
                if let VoteState::Closed { poll_id } = &self.vote {
                    let id = poll_id.clone();
                    self.goto_results(Some(id)).await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn move_selection(&mut self, delta: isize) {
        if let VoteState::Active(card) = &mut self.vote {
            if !card.can_select() || card.poll.options.is_empty() {
                return;
            }
            let len = card.poll.options.len() as isize;
            let current = card.selected.map(|i| i as isize).unwrap_or(-delta.signum());
            let next = (current + delta).rem_euclid(len);
            card.selected = Some(next as usize);
        }
    }

    async fn submit_vote(&mut self) -> Result<()> {
        let (poll_id, selected) = match &mut self.vote {
            VoteState::Active(card) => {
                let Some(selected) = card.selected else {
                    return Ok(());
                };
                if card.has_voted || card.submitting {
                    return Ok(());
                }
                card.submitting = true;
                card.error = None;
                (card.poll.id.clone(), selected)
            }
            _ => return Ok(()),
        };

        let outcome = self.api.vote(&poll_id, selected).await;

        // The card may have been replaced if the active poll changed
        if let VoteState::Active(card) = &mut self.vote {
            if card.poll.id == poll_id {
                card.submitting = false;
                match outcome {
                    Ok(()) => {
                        card.has_voted = true;
                        self.set_status("Vote submitted");
                    }
                    Err(e) => card.error = Some(e.to_string()),
                }
            }
        }
        Ok(())
    }

    async fn handle_admin_key(&mut self, key: KeyEvent) -> Result<()> {
        // Confirmation panel: any key skips the wait and returns to the form
        if self.admin.confirmation.is_some() {
            match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                    self.admin.reset_form();
                }
                _ => {}
            }
            return Ok(());
        }

        if self.admin.creating || self.admin.closing {
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.goto_vote().await,
            KeyCode::Tab | KeyCode::Down => self.admin.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.admin.focus_prev(),
            KeyCode::Enter => self.admin.focus_next(),
            KeyCode::F(2) => self.submit_create().await?,
            KeyCode::Char('s') if ctrl => self.submit_create().await?,
            KeyCode::Char('n') if ctrl => self.admin.add_option(),
            KeyCode::Char('d') if ctrl => self.admin.remove_focused_option(),
            KeyCode::Char('k') if ctrl => self.close_active_poll().await?,
            KeyCode::Char('r') if ctrl => {
                if let Some(active) = &self.admin.active_poll {
                    let id = active.id.clone();
                    self.goto_results(Some(id)).await;
                }
            }
            KeyCode::Backspace => {
                self.admin.focused_field_mut().pop();
                self.admin.error = None;
            }
            KeyCode::Char(c) if !ctrl => {
                self.admin.focused_field_mut().push(c);
                self.admin.error = None;
            }
            _ => {}
        }
        Ok(())
    }

    /// One-shot fetch of the poll listing; adopts the first active poll
    async fn load_admin_poll(&mut self) {
        match self.api.list_polls().await {
            Ok(polls) => {
                if let Some(active) = PollSummary::first_active(&polls) {
                    self.admin.active_poll = Some(active.clone());
                }
            }
            Err(e) => tracing::warn!("Failed to fetch polls: {}", e),
        }
    }

    async fn submit_create(&mut self) -> Result<()> {
        let (question, options) = match self.admin.validate() {
            Ok(parts) => parts,
            Err(msg) => {
                // Blocked client-side, no request goes out
                self.admin.error = Some(msg);
                return Ok(());
            }
        };

        self.admin.creating = true;
        self.admin.error = None;

        match self.api.create_poll(&question, &options).await {
            Ok(created) => {
                self.admin.active_poll = created.poll.clone().or(Some(PollSummary {
                    id: created.poll_id.clone(),
                    question,
                    status: PollStatus::Active,
                    total_votes: 0,
                }));
                self.admin.confirmation = Some(CreateConfirmation {
                    poll_id: created.poll_id,
                    shown_at: Instant::now(),
                });
                self.set_status("Poll created");
            }
            Err(e) => self.admin.error = Some(e.to_string()),
        }
        self.admin.creating = false;
        Ok(())
    }

    async fn close_active_poll(&mut self) -> Result<()> {
        let Some(active) = self.admin.active_poll.clone() else {
            return Ok(());
        };

        self.admin.closing = true;
        self.admin.error = None;

        match self.api.close_poll(&active.id).await {
            Ok(()) => {
                self.admin.active_poll = None;
                self.admin.closing = false;
                self.set_status("Poll closed");
                self.goto_results(Some(active.id)).await;
            }
            Err(e) => {
                self.admin.error = Some(e.to_string());
                self.admin.closing = false;
            }
        }
        Ok(())
    }

    async fn handle_results_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('v') => self.goto_vote().await,
            KeyCode::Char('g') => {
                if self.results.new_poll_available {
                    self.goto_vote().await;
                }
            }
            KeyCode::Char('r') => self.refresh_results().await,
            KeyCode::Enter => {
                // Error state has a single recovery action
                if self.results.error.is_some() || self.results.results.is_none() {
                    self.goto_vote().await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub async fn tick(&mut self) -> Result<()> {
        // Clear status message after a few seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_CLEAR_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        // Create confirmation reverts to an empty, editable form
        self.revert_confirmation_if_elapsed();

        match self.view {
            View::Vote => {
                if self.last_vote_refresh.elapsed() >= self.config.vote_refresh() {
                    self.refresh_vote().await;
                }
            }
            View::Results => {
                if self.last_results_refresh.elapsed() >= self.config.results_refresh() {
                    self.refresh_results().await;
                }
            }
            // Admin loads once on entry, no periodic refresh
            View::Admin => {}
        }

        Ok(())
    }

    fn revert_confirmation_if_elapsed(&mut self) {
        if let Some(confirmation) = &self.admin.confirmation {
            if confirmation.shown_at.elapsed() >= Duration::from_millis(CONFIRMATION_MS) {
                self.admin.reset_form();
            }
        }
    }

    /// Fetch the poll listing and settle the vote view state. Failures
    /// degrade to the no-poll state; the next tick retries anyway.
    async fn refresh_vote(&mut self) {
        self.last_vote_refresh = Instant::now();

        let polls = match self.api.list_polls().await {
            Ok(polls) => polls,
            Err(e) => {
                tracing::debug!("Failed to fetch polls: {}", e);
                self.vote = VoteState::NoPoll;
                return;
            }
        };

        if let Some(active) = PollSummary::first_active(&polls) {
            let id = active.id.clone();
            match self.api.poll_detail(&id).await {
                Ok(detail) => self.adopt_active_poll(detail),
                Err(e) => {
                    tracing::debug!("Failed to fetch poll details: {}", e);
                    self.vote = VoteState::NoPoll;
                }
            }
        } else if let Some(closed) = PollSummary::first_closed(&polls) {
            self.vote = VoteState::Closed {
                poll_id: closed.id.clone(),
            };
        } else {
            self.vote = VoteState::NoPoll;
        }
    }

    /// Keep selection and voted flags across refreshes of the same poll;
    /// a different poll id gets a fresh card
    fn adopt_active_poll(&mut self, detail: PollDetail) {
        match &mut self.vote {
            VoteState::Active(card) if card.poll.id == detail.id => {
                card.poll = detail;
            }
            _ => self.vote = VoteState::Active(VotingCard::new(detail)),
        }
    }

    /// Fetch tallies for the viewed poll, then independently check whether a
    /// different poll has gone active (the "new poll available" banner)
    async fn refresh_results(&mut self) {
        self.last_results_refresh = Instant::now();

        let Some(poll_id) = self.results.poll_id.clone() else {
            self.results.loading = false;
            self.results.error = Some("No poll ID provided".to_string());
            return;
        };

        match self.api.results(&poll_id).await {
            Ok(results) => {
                // Discard if navigation moved to a different poll meanwhile
                if self.results.poll_id.as_deref() == Some(poll_id.as_str()) {
                    self.results.results = Some(results);
                    self.results.error = None;
                }
            }
            Err(e) => self.results.error = Some(e.to_string()),
        }
        self.results.loading = false;

        match self.api.list_polls().await {
            Ok(polls) => {
                self.results.new_poll_available = PollSummary::first_active(&polls)
                    .map(|p| Some(p.id.as_str()) != self.results.poll_id.as_deref())
                    .unwrap_or(false);
            }
            Err(e) => tracing::debug!("Failed to check for new polls: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn app_for(server: &MockServer) -> App {
        let api = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        App::with_client(AppConfig::default(), api).await
    }

    fn mock_polls(entries: serde_json::Value) -> Mock {
        Mock::given(method("GET"))
            .and(path("/polls"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "polls": entries
            })))
    }

    #[tokio::test]
    async fn vote_view_adopts_active_poll_detail() {
        let server = MockServer::start().await;
        mock_polls(json!([{ "id": "p1", "question": "Q?", "status": "active", "totalVotes": 0 }]))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/polls/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "poll": { "id": "p1", "question": "Q?", "options": ["A", "B"], "status": "active" }
            })))
            .mount(&server)
            .await;

        let app = app_for(&server).await;
        match &app.vote {
            VoteState::Active(card) => {
                assert_eq!(card.poll.id, "p1");
                assert_eq!(card.poll.options, vec!["A", "B"]);
                assert!(!card.has_voted);
            }
            other => panic!("expected active state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn vote_view_falls_back_to_closed_poll() {
        let server = MockServer::start().await;
        mock_polls(json!([{ "id": "p2", "question": "Q?", "status": "closed", "totalVotes": 4 }]))
            .mount(&server)
            .await;

        let app = app_for(&server).await;
        match &app.vote {
            VoteState::Closed { poll_id } => assert_eq!(poll_id, "p2"),
            other => panic!("expected closed state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn vote_view_degrades_to_no_poll_on_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/polls"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = app_for(&server).await;
        assert!(matches!(app.vote, VoteState::NoPoll));
    }

    #[tokio::test]
    async fn selection_is_frozen_after_voting() {
        let server = MockServer::start().await;
        mock_polls(json!([])).mount(&server).await;
        let mut app = app_for(&server).await;

        let mut card = VotingCard::new(PollDetail {
            id: "p1".to_string(),
            question: "Q?".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
            status: PollStatus::Active,
            total_votes: 0,
        });
        card.selected = Some(0);
        card.has_voted = true;
        app.vote = VoteState::Active(card);

        app.handle_key(key(KeyCode::Down)).await.unwrap();
        match &app.vote {
            VoteState::Active(card) => assert_eq!(card.selected, Some(0)),
            other => panic!("expected active state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_vote_keeps_selection_and_shows_error() {
        let server = MockServer::start().await;
        mock_polls(json!([])).mount(&server).await;
        Mock::given(method("POST"))
            .and(path("/polls/p1/vote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Poll is closed"
            })))
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        let mut card = VotingCard::new(PollDetail {
            id: "p1".to_string(),
            question: "Q?".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
            status: PollStatus::Active,
            total_votes: 0,
        });
        card.selected = Some(1);
        app.vote = VoteState::Active(card);

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        match &app.vote {
            VoteState::Active(card) => {
                assert!(!card.has_voted);
                assert_eq!(card.selected, Some(1));
                assert_eq!(card.error.as_deref(), Some("Poll is closed"));
            }
            other => panic!("expected active state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_is_blocked_without_two_options() {
        let server = MockServer::start().await;
        mock_polls(json!([])).mount(&server).await;
        Mock::given(method("POST"))
            .and(path("/polls/create"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(0)
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        app.goto_admin().await;
        app.admin.question = "Lunch?".to_string();
        app.admin.options = vec!["Pizza".to_string(), "   ".to_string()];

        app.handle_key(key(KeyCode::F(2))).await.unwrap();
        assert_eq!(
            app.admin.error.as_deref(),
            Some("Please provide at least 2 options")
        );
        assert!(app.admin.confirmation.is_none());
        server.verify().await;
    }

    #[tokio::test]
    async fn create_confirmation_reverts_to_empty_form() {
        let server = MockServer::start().await;
        mock_polls(json!([])).mount(&server).await;
        Mock::given(method("POST"))
            .and(path("/polls/create"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "pollId": "p5",
                "poll": { "id": "p5", "question": "Lunch?", "status": "active", "totalVotes": 0 }
            })))
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        app.goto_admin().await;
        app.admin.question = "Lunch?".to_string();
        app.admin.options = vec!["Pizza".to_string(), "Sushi".to_string()];

        app.handle_key(ctrl('s')).await.unwrap();
        assert_eq!(
            app.admin.confirmation.as_ref().map(|c| c.poll_id.as_str()),
            Some("p5")
        );
        assert_eq!(
            app.admin.active_poll.as_ref().map(|p| p.id.as_str()),
            Some("p5")
        );

        // Form keeps its contents until the confirmation window elapses
        assert_eq!(app.admin.question, "Lunch?");

        app.admin.confirmation.as_mut().unwrap().shown_at =
            Instant::now() - Duration::from_millis(CONFIRMATION_MS + 100);
        app.tick().await.unwrap();

        assert!(app.admin.confirmation.is_none());
        assert!(app.admin.question.is_empty());
        assert_eq!(app.admin.options, vec!["".to_string(), "".to_string()]);
    }

    #[tokio::test]
    async fn close_poll_navigates_to_results() {
        let server = MockServer::start().await;
        mock_polls(json!([{ "id": "p1", "question": "Q?", "status": "active", "totalVotes": 7 }]))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/polls/p1/close"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/polls/p1/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "question": "Q?",
                "totalVotes": 7,
                "status": "closed",
                "results": [{ "option": "A", "votes": 7, "percentage": 100 }]
            })))
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        app.goto_admin().await;
        assert!(app.admin.active_poll.is_some());

        app.handle_key(ctrl('k')).await.unwrap();
        assert_eq!(app.view, View::Results);
        assert_eq!(app.results.poll_id.as_deref(), Some("p1"));
        assert!(app.results.is_closed());
        assert!(app.admin.active_poll.is_none());
    }

    #[tokio::test]
    async fn results_view_shows_tallies_and_banner_for_newer_poll() {
        let server = MockServer::start().await;
        mock_polls(json!([{ "id": "p3", "question": "New?", "status": "active", "totalVotes": 0 }]))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/polls/p1/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "question": "Old?",
                "totalVotes": 5,
                "status": "closed",
                "results": [
                    { "option": "A", "votes": 3, "percentage": 60 },
                    { "option": "B", "votes": 2, "percentage": 40 }
                ]
            })))
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        app.goto_results(Some("p1".to_string())).await;

        let results = app.results.results.as_ref().unwrap();
        assert_eq!(results.total_votes, 5);
        assert_eq!(results.results[0].percentage, 60.0);
        assert_eq!(results.results[1].percentage, 40.0);
        assert!(app.results.new_poll_available);
    }

    #[tokio::test]
    async fn results_view_without_poll_id_is_an_error_state() {
        let server = MockServer::start().await;
        mock_polls(json!([])).mount(&server).await;

        let mut app = app_for(&server).await;
        app.goto_results(None).await;
        assert_eq!(app.results.error.as_deref(), Some("No poll ID provided"));

        // The single recovery action returns to the vote view
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.view, View::Vote);
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Active,
    Closed,
}

impl PollStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, PollStatus::Active)
    }
}

/// Poll as it appears in the collection listing (no options)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSummary {
    pub id: String,
    pub question: String,
    pub status: PollStatus,
    #[serde(rename = "totalVotes", default)]
    pub total_votes: u64,
}

impl PollSummary {
    /// The poll the client treats as "active": first active entry in listing order
    pub fn first_active(polls: &[PollSummary]) -> Option<&PollSummary> {
        polls.iter().find(|p| p.status.is_active())
    }

    /// First closed entry, used by the vote view for the results shortcut
    pub fn first_closed(polls: &[PollSummary]) -> Option<&PollSummary> {
        polls.iter().find(|p| p.status == PollStatus::Closed)
    }
}

/// Full poll detail including the ordered option labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollDetail {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_status")]
    pub status: PollStatus,
    #[serde(rename = "totalVotes", default)]
    pub total_votes: u64,
}

fn default_status() -> PollStatus {
    PollStatus::Active
}

/// Server-computed tally for one option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionTally {
    pub option: String,
    #[serde(default)]
    pub votes: u64,
    #[serde(default)]
    pub percentage: f64,
}

/// Aggregated results for a poll, rendered read-only
#[derive(Debug, Clone, Deserialize)]
pub struct PollResults {
    pub question: String,
    #[serde(rename = "totalVotes", default)]
    pub total_votes: u64,
    pub status: PollStatus,
    #[serde(default)]
    pub results: Vec<OptionTally>,
}

/// What the create endpoint hands back
#[derive(Debug, Clone)]
pub struct CreatedPoll {
    pub poll_id: String,
    pub poll: Option<PollSummary>,
}

// Wire envelopes. Every endpoint wraps its payload in a success flag and
// an optional message used when success is false.

#[derive(Debug, Deserialize)]
pub(crate) struct ListPollsResponse {
    pub success: bool,
    #[serde(default)]
    pub polls: Vec<PollSummary>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PollDetailResponse {
    pub success: bool,
    pub poll: Option<PollDetail>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePollResponse {
    pub success: bool,
    #[serde(rename = "pollId")]
    pub poll_id: Option<String>,
    pub poll: Option<PollSummary>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VoteRequest {
    #[serde(rename = "optionIndex")]
    pub option_index: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AckResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsResponse {
    pub success: bool,
    pub question: Option<String>,
    #[serde(rename = "totalVotes", default)]
    pub total_votes: u64,
    pub status: Option<PollStatus>,
    #[serde(default)]
    pub results: Vec<OptionTally>,
    pub message: Option<String>,
}

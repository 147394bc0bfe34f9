pub mod types;

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use self::types::*;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Backend answered but reported failure; message comes from the response body
    #[error("{0}")]
    Server(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Typed client for the polling backend. The base URL is injected so tests
/// and alternate deployments can point it anywhere.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /polls - the full poll collection, newest first per the backend
    pub async fn list_polls(&self) -> ApiResult<Vec<PollSummary>> {
        let resp: ListPollsResponse = self
            .http
            .get(self.url("/polls"))
            .send()
            .await?
            .json()
            .await?;

        if resp.success {
            Ok(resp.polls)
        } else {
            Err(server_error(resp.message, "Failed to fetch polls"))
        }
    }

    /// GET /polls/:id - full detail including options
    pub async fn poll_detail(&self, id: &str) -> ApiResult<PollDetail> {
        let resp: PollDetailResponse = self
            .http
            .get(self.url(&format!("/polls/{}", id)))
            .send()
            .await?
            .json()
            .await?;

        match (resp.success, resp.poll) {
            (true, Some(poll)) => Ok(poll),
            (_, _) => Err(server_error(resp.message, "Failed to fetch poll details")),
        }
    }

    /// POST /polls/create
    pub async fn create_poll(&self, question: &str, options: &[String]) -> ApiResult<CreatedPoll> {
        let body = CreatePollRequest {
            question: question.to_string(),
            options: options.to_vec(),
        };
        let resp: CreatePollResponse = self
            .http
            .post(self.url("/polls/create"))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        match (resp.success, resp.poll_id) {
            (true, Some(poll_id)) => Ok(CreatedPoll {
                poll_id,
                poll: resp.poll,
            }),
            (_, _) => Err(server_error(resp.message, "Failed to create poll")),
        }
    }

    /// PUT /polls/:id/close
    pub async fn close_poll(&self, id: &str) -> ApiResult<()> {
        let resp: AckResponse = self
            .http
            .put(self.url(&format!("/polls/{}/close", id)))
            .send()
            .await?
            .json()
            .await?;

        if resp.success {
            Ok(())
        } else {
            Err(server_error(resp.message, "Failed to close poll"))
        }
    }

    /// POST /polls/:id/vote with the selected option index
    pub async fn vote(&self, id: &str, option_index: usize) -> ApiResult<()> {
        let body = VoteRequest { option_index };
        let resp: AckResponse = self
            .http
            .post(self.url(&format!("/polls/{}/vote", id)))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if resp.success {
            Ok(())
        } else {
            Err(server_error(resp.message, "Failed to submit vote"))
        }
    }

    /// GET /polls/:id/results - tallies and percentages, computed server-side
    pub async fn results(&self, id: &str) -> ApiResult<PollResults> {
        let resp: ResultsResponse = self
            .http
            .get(self.url(&format!("/polls/{}/results", id)))
            .send()
            .await?
            .json()
            .await?;

        match (resp.success, resp.question, resp.status) {
            (true, Some(question), Some(status)) => Ok(PollResults {
                question,
                total_votes: resp.total_votes,
                status,
                results: resp.results,
            }),
            (_, _, _) => Err(server_error(resp.message, "Failed to fetch results")),
        }
    }
}

fn server_error(message: Option<String>, fallback: &str) -> ApiError {
    ApiError::Server(message.unwrap_or_else(|| fallback.to_string()))
}

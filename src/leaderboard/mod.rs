//! Leaderboard client
//!
//! Talks to the leaderboard HTTP API:
//! - `GET  /api/leaderboard` returns the current board
//! - `POST /api/leaderboard` with `{player_name, score}` returns the updated
//!   board, or `{detail}` on failure
//!
//! The HTTP layer sits behind [`Transport`] so the browser uses `fetch` and
//! tests use a recording mock.

pub mod board;
#[cfg(target_arch = "wasm32")]
pub mod fetch;

pub use board::{EMPTY_PLACEHOLDER, Leaderboard, LeaderboardRow, format_score};

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_PATH;
use crate::sim::ScoreSubmission;

/// Message shown when the server gives no usable reason
pub const GENERIC_SUBMIT_FAILURE: &str = "Failed to submit score.";

/// A single leaderboard record as sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    /// Wider than a run score; the server stores any non-negative integer
    pub score: u64,
}

/// Error body of a failed request. `detail` is usually a string, but request
/// validation failures carry a list of objects.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// The request never got a response
    Network(String),
    /// Non-2xx response; `detail` is the server's reason if it sent one
    Rejected { status: u16, detail: Option<String> },
    /// 2xx response whose body isn't an entry list
    Decode(String),
}

impl LeaderboardError {
    /// Text to show the player after a failed submission
    pub fn user_message(&self) -> String {
        match self {
            LeaderboardError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_SUBMIT_FAILURE.to_string(),
        }
    }
}

impl std::fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardError::Network(msg) => write!(f, "network error: {}", msg),
            LeaderboardError::Rejected {
                status,
                detail: Some(detail),
            } => write!(f, "rejected with HTTP {}: {}", status, detail),
            LeaderboardError::Rejected { status, detail: None } => {
                write!(f, "rejected with HTTP {}", status)
            }
            LeaderboardError::Decode(msg) => write!(f, "invalid leaderboard response: {}", msg),
        }
    }
}

impl std::error::Error for LeaderboardError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// An outgoing request. `body` is JSON when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

/// A received response; `body` may be empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request and resolves with whatever status the server answered.
/// Only failures to get any response are errors.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, LeaderboardError>>;
}

pub struct LeaderboardClient<T> {
    url: String,
    transport: T,
}

impl<T: Transport> LeaderboardClient<T> {
    /// Client for the API served from `origin` (e.g. `https://example.com`)
    pub fn new(origin: &str, transport: T) -> Self {
        Self {
            url: format!("{}{}", origin.trim_end_matches('/'), LEADERBOARD_PATH),
            transport,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current board
    pub async fn fetch(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let response = self
            .transport
            .send(HttpRequest {
                method: Method::Get,
                url: self.url.clone(),
                body: None,
            })
            .await?;
        interpret(response)
    }

    /// Post a score; resolves with the updated board
    pub async fn submit(
        &self,
        submission: &ScoreSubmission,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let body = serde_json::to_string(submission)
            .map_err(|e| LeaderboardError::Decode(e.to_string()))?;
        log::info!(
            "Submitting score {} for {}",
            submission.score,
            submission.player_name
        );
        let response = self
            .transport
            .send(HttpRequest {
                method: Method::Post,
                url: self.url.clone(),
                body: Some(body),
            })
            .await?;
        interpret(response)
    }
}

/// Map a raw response to the board it carries or the reason it failed
pub fn interpret(response: HttpResponse) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
    if response.is_success() {
        return serde_json::from_str(&response.body)
            .map_err(|e| LeaderboardError::Decode(e.to_string()));
    }

    let detail = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        });
    Err(LeaderboardError::Rejected {
        status: response.status,
        detail,
    })
}

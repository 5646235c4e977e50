//! Remote leaderboard
//!
//! Score records live on a small HTTP server (JSON bodies). The game only
//! touches the leaderboard at session boundaries, and every call is
//! fire-and-forget with respect to the simulation: a failed or slow call
//! degrades to an empty or stale view, never to broken game state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server keeps at most this many entries, sorted descending by score
pub const MAX_ENTRIES: usize = 20;
/// Initials are truncated to this many characters
pub const MAX_INITIALS_LEN: usize = 4;

/// One ranked score record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub initials: String,
    pub score: u32,
}

impl LeaderboardEntry {
    /// Build an entry with sanitized initials
    pub fn new(initials: &str, score: u32) -> Self {
        Self {
            initials: sanitize_initials(initials),
            score,
        }
    }
}

/// Clamp raw initials to the stored form: at most four characters,
/// `"???"` when nothing usable was entered
pub fn sanitize_initials(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "???".to_string();
    }
    trimmed.chars().take(MAX_INITIALS_LEN).collect()
}

/// Local view of the remote leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Decode a server payload, treating anything malformed as empty
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<LeaderboardEntry>>(json) {
            Ok(entries) => Self { entries },
            Err(err) => {
                log::warn!("malformed leaderboard payload, treating as empty: {err}");
                Self::default()
            }
        }
    }

    /// Merge a new entry the way the server does: append, re-sort
    /// descending by score, keep the top [`MAX_ENTRIES`]
    pub fn insert(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

/// Failures at the leaderboard boundary
///
/// None of these ever touch local game state; the caller logs or surfaces
/// them and moves on.
#[derive(Debug, Clone)]
pub enum LeaderboardError {
    /// Transport-level failure (fetch rejected, no window, bad response body)
    Network(String),
    /// Server refused the passkey on a reset
    Unauthorized(String),
    /// Server answered with a non-success status
    BadStatus(u16),
    /// No transport on this platform
    Unavailable,
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "leaderboard request failed: {msg}"),
            Self::Unauthorized(msg) => write!(f, "leaderboard reset refused: {msg}"),
            Self::BadStatus(code) => write!(f, "leaderboard server returned status {code}"),
            Self::Unavailable => write!(f, "leaderboard transport unavailable on this platform"),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// HTTP client for the leaderboard API
#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    base_url: String,
}

impl LeaderboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/leaderboard{path}", self.base_url)
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_client {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use super::*;

    /// Reply envelope for `POST /api/leaderboard`
    #[derive(Debug, Deserialize)]
    struct SaveReply {
        #[serde(default)]
        leaderboard: Option<Vec<LeaderboardEntry>>,
        #[serde(default)]
        error: Option<String>,
    }

    /// Reply envelope for `POST /api/leaderboard/reset`
    #[derive(Debug, Deserialize)]
    struct ResetReply {
        #[serde(default)]
        error: Option<String>,
    }

    fn network_err(err: JsValue) -> LeaderboardError {
        LeaderboardError::Network(format!("{err:?}"))
    }

    /// Run a request and return the body text of a successful response
    async fn request_text(request: &Request) -> Result<(u16, String), LeaderboardError> {
        let window = web_sys::window()
            .ok_or_else(|| LeaderboardError::Network("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(request))
            .await
            .map_err(network_err)?;
        let resp: Response = resp_value.dyn_into().map_err(network_err)?;
        let status = resp.status();
        let text_promise = resp.text().map_err(network_err)?;
        let text = JsFuture::from(text_promise).await.map_err(network_err)?;
        Ok((status, text.as_string().unwrap_or_default()))
    }

    fn json_request(url: &str, method: &str, body: Option<&str>) -> Result<Request, LeaderboardError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(body));
        }
        let request = Request::new_with_str_and_init(url, &opts).map_err(network_err)?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(network_err)?;
        }
        Ok(request)
    }

    impl LeaderboardClient {
        /// `GET /api/leaderboard` - the current ranked list
        pub async fn fetch(&self) -> Result<Leaderboard, LeaderboardError> {
            let request = json_request(&self.url(""), "GET", None)?;
            let (status, body) = request_text(&request).await?;
            if !(200..300).contains(&status) {
                return Err(LeaderboardError::BadStatus(status));
            }
            Ok(Leaderboard::from_json(&body))
        }

        /// `POST /api/leaderboard` - submit a result, get the new ranking
        pub async fn submit(
            &self,
            initials: &str,
            score: u32,
        ) -> Result<Leaderboard, LeaderboardError> {
            let entry = LeaderboardEntry::new(initials, score);
            let body = serde_json::to_string(&entry)
                .map_err(|e| LeaderboardError::Network(e.to_string()))?;
            let request = json_request(&self.url(""), "POST", Some(&body))?;
            let (status, body) = request_text(&request).await?;
            if !(200..300).contains(&status) {
                return Err(LeaderboardError::BadStatus(status));
            }
            let reply: SaveReply = serde_json::from_str(&body).unwrap_or(SaveReply {
                leaderboard: None,
                error: None,
            });
            if let Some(error) = reply.error {
                return Err(LeaderboardError::Network(error));
            }
            Ok(Leaderboard {
                entries: reply.leaderboard.unwrap_or_default(),
            })
        }

        /// `POST /api/leaderboard/reset` - clear all entries, passkey-gated
        ///
        /// Success is only what the server explicitly confirms; a refusal
        /// surfaces as [`LeaderboardError::Unauthorized`].
        pub async fn reset(&self, passkey: &str) -> Result<(), LeaderboardError> {
            let body = serde_json::json!({ "passkey": passkey }).to_string();
            let request = json_request(&self.url("/reset"), "POST", Some(&body))?;
            let (status, body) = request_text(&request).await?;
            let reply: ResetReply =
                serde_json::from_str(&body).unwrap_or(ResetReply { error: None });
            if let Some(error) = reply.error {
                return Err(LeaderboardError::Unauthorized(error));
            }
            if !(200..300).contains(&status) {
                return Err(LeaderboardError::BadStatus(status));
            }
            Ok(())
        }
    }
}

/// Native stubs: headless builds have no leaderboard transport
#[cfg(not(target_arch = "wasm32"))]
impl LeaderboardClient {
    pub async fn fetch(&self) -> Result<Leaderboard, LeaderboardError> {
        log::debug!("leaderboard fetch skipped ({})", self.url(""));
        Ok(Leaderboard::default())
    }

    pub async fn submit(
        &self,
        initials: &str,
        score: u32,
    ) -> Result<Leaderboard, LeaderboardError> {
        log::debug!(
            "leaderboard submit skipped: {} -> {score}",
            sanitize_initials(initials)
        );
        Ok(Leaderboard::default())
    }

    pub async fn reset(&self, _passkey: &str) -> Result<(), LeaderboardError> {
        Err(LeaderboardError::Unavailable)
    }
}

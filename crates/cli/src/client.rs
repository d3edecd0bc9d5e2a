//! HTTP client for the BeProd server REST API.
//!
//! The login session token is persisted to a file under the user config
//! directory so `run`, `history`, and `stats` work across invocations.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use beprod_core::CompletedSession;
use reqwest::header::{COOKIE, SET_COOKIE};
use serde::Deserialize;

const COOKIE_NAME: &str = "beprod_session";
const TOKEN_FILE: &str = "session.token";

/// Client for the BeProd server.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
    token_path: PathBuf,
}

/// User info returned by auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
}

/// A persisted session record.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecordInfo {
    pub id: i64,
    #[serde(rename = "type")]
    pub session_type: String,
    pub name: String,
    pub duration_seconds: i32,
    pub completed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One day of aggregated activity.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyStatInfo {
    pub day: chrono::NaiveDate,
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub completed_cycles: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Extract the session token from a `Set-Cookie` header value like
/// `beprod_session=abc123; HttpOnly; Path=/`.
fn token_from_set_cookie(value: &str, cookie_name: &str) -> Option<String> {
    let first_pair = value.split(';').next()?;
    let (name, token) = first_pair.trim().split_once('=')?;
    (name == cookie_name && !token.is_empty()).then(|| token.to_string())
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("beprod")
        .join(TOKEN_FILE)
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let token_path = default_token_path();
        let token = std::fs::read_to_string(&token_path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token,
            token_path,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_cookie(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.header(COOKIE, format!("{}={}", COOKIE_NAME, token)),
            None => req,
        }
    }

    /// Turn a non-success response into an error carrying the server's message.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        bail!("server returned {}: {}", status, message)
    }

    fn save_token(&mut self, token: String) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.token_path, &token)
            .with_context(|| format!("failed to write {}", self.token_path.display()))?;
        self.token = Some(token);
        Ok(())
    }

    fn capture_session(&mut self, resp: &reqwest::Response) -> Result<()> {
        let token = resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|v| token_from_set_cookie(v, COOKIE_NAME))
            .context("server response carried no session cookie")?;
        self.save_token(token)
    }

    // ── Auth ──────────────────────────────────────────────────────

    pub async fn register(&mut self, username: &str, password: &str) -> Result<UserInfo> {
        let resp = self
            .http
            .post(self.url("/api/register"))
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .context("failed to reach server")?;
        let resp = Self::check(resp).await?;
        self.capture_session(&resp)?;
        resp.json().await.context("failed to parse user")
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<UserInfo> {
        let resp = self
            .http
            .post(self.url("/api/login"))
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .context("failed to reach server")?;
        let resp = Self::check(resp).await?;
        self.capture_session(&resp)?;
        resp.json().await.context("failed to parse user")
    }

    pub async fn logout(&mut self) -> Result<()> {
        let resp = self
            .with_cookie(self.http.post(self.url("/api/logout")))
            .send()
            .await
            .context("failed to reach server")?;
        Self::check(resp).await?;
        self.token = None;
        // A missing token file is already the state we want.
        let _ = std::fs::remove_file(&self.token_path);
        Ok(())
    }

    pub async fn current_user(&self) -> Result<UserInfo> {
        let resp = self
            .with_cookie(self.http.get(self.url("/api/user")))
            .send()
            .await
            .context("failed to reach server")?;
        let resp = Self::check(resp).await?;
        resp.json().await.context("failed to parse user")
    }

    // ── Sessions ──────────────────────────────────────────────────

    pub async fn create_session(&self, session: &CompletedSession) -> Result<SessionRecordInfo> {
        let resp = self
            .with_cookie(self.http.post(self.url("/api/pomodoro-sessions")))
            .json(session)
            .send()
            .await
            .context("failed to reach server")?;
        let resp = Self::check(resp).await?;
        resp.json().await.context("failed to parse session record")
    }

    pub async fn list_sessions(&self) -> Result<Vec<SessionRecordInfo>> {
        let resp = self
            .with_cookie(self.http.get(self.url("/api/pomodoro-sessions")))
            .send()
            .await
            .context("failed to reach server")?;
        let resp = Self::check(resp).await?;
        resp.json().await.context("failed to parse session list")
    }

    pub async fn daily_stats(&self, days: u32) -> Result<Vec<DailyStatInfo>> {
        let resp = self
            .with_cookie(
                self.http
                    .get(self.url("/api/stats/daily"))
                    .query(&[("days", days)]),
            )
            .send()
            .await
            .context("failed to reach server")?;
        let resp = Self::check(resp).await?;
        resp.json().await.context("failed to parse stats")
    }

    /// Check if the server is reachable.
    pub async fn health_check(&self) -> Result<()> {
        self.http
            .get(self.url("/health"))
            .timeout(std::time::Duration::from_secs(3))
            .send()
            .await
            .context("server not reachable")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_from_set_cookie() {
        let v = "beprod_session=abc123; HttpOnly; SameSite=Lax; Path=/; Max-Age=2592000";
        assert_eq!(
            token_from_set_cookie(v, "beprod_session").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn ignores_other_cookies_and_empty_tokens() {
        assert!(token_from_set_cookie("other=abc; Path=/", "beprod_session").is_none());
        assert!(token_from_set_cookie("beprod_session=; Max-Age=0", "beprod_session").is_none());
        assert!(token_from_set_cookie("garbage", "beprod_session").is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3001/");
        assert_eq!(client.url("/health"), "http://localhost:3001/health");
    }
}

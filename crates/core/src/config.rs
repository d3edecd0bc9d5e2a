use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    pub auth: AuthConfig,
    pub timer: TimerDefaults,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            postgres: PostgresConfig::from_env(),
            auth: AuthConfig::from_env(),
            timer: TimerDefaults::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:    {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  postgres:  host={}, db={}",
            self.postgres.host,
            self.postgres.database
        );
        tracing::info!(
            "  auth:      cookie={}, ttl={}d",
            self.auth.cookie_name,
            self.auth.session_ttl_days
        );
        tracing::info!(
            "  timer:     work={}m, break={}m, long={}m, long every {} cycles",
            self.timer.work_minutes,
            self.timer.short_break_minutes,
            self.timer.long_break_minutes,
            self.timer.cycles_before_long_break
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 3001),
            cors_origin: env_or("CORS_ORIGIN", "*"),
        }
    }
}

// ── PostgreSQL ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl PostgresConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("PG_HOST", "localhost"),
            port: env_u16("PG_PORT", 5432),
            database: env_or("PG_DATABASE", "beprod"),
            username: env_opt("PG_USERNAME"),
            password: env_opt("PG_PASSWORD"),
            ssl_mode: env_or("PG_SSL_MODE", "prefer"),
            max_connections: env_u32("PG_MAX_CONNECTIONS", 10),
        }
    }

    pub fn connection_string(&self) -> String {
        let user = self.username.as_deref().unwrap_or("postgres");
        let pass = self.password.as_deref().unwrap_or("");
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            user, pass, self.host, self.port, self.database, self.ssl_mode
        )
    }
}

// ── Auth ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub cookie_name: String,
    pub session_ttl_days: u32,
    pub min_password_len: u32,
}

impl AuthConfig {
    fn from_env() -> Self {
        Self {
            cookie_name: env_or("AUTH_COOKIE_NAME", "beprod_session"),
            session_ttl_days: env_u32("AUTH_SESSION_TTL_DAYS", 30),
            min_password_len: env_u32("AUTH_MIN_PASSWORD_LEN", 6),
        }
    }
}

// ── Timer defaults ────────────────────────────────────────────

/// Default timer durations, overridable per-user at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerDefaults {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub goal_cycles: u32,
    pub cycles_before_long_break: u32,
}

impl TimerDefaults {
    pub fn from_env() -> Self {
        Self {
            work_minutes: env_u32("TIMER_WORK_MINUTES", 25),
            short_break_minutes: env_u32("TIMER_SHORT_BREAK_MINUTES", 5),
            long_break_minutes: env_u32("TIMER_LONG_BREAK_MINUTES", 15),
            goal_cycles: env_u32("TIMER_GOAL_CYCLES", 4),
            cycles_before_long_break: env_u32("TIMER_CYCLES_BEFORE_LONG_BREAK", 4),
        }
    }
}

impl Default for TimerDefaults {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            goal_cycles: 4,
            cycles_before_long_break: 4,
        }
    }
}

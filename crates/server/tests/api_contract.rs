//! JSON-contract tests for the session API.
//!
//! `beprod-server` is a binary crate (no lib.rs), so these tests pin the
//! wire format with mirror types and verify that what the timer emits is
//! exactly what the create endpoint accepts.

use beprod_timer::{PomodoroTimer, TimerSettings};
use serde::{Deserialize, Serialize};

/// Phase values accepted by the `session_type` CHECK constraint.
const WIRE_SESSION_TYPES: &[&str] = &["work", "short_break", "long_break"];

// ── Mirror types matching the API contract ────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct CreateSessionBody {
    #[serde(rename = "type")]
    session_type: String,
    name: String,
    duration_seconds: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionRecordBody {
    id: i64,
    user_id: i64,
    #[serde(rename = "type")]
    session_type: String,
    name: String,
    duration_seconds: i32,
    completed: bool,
    created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DailyStatBody {
    day: String,
    work_minutes: i64,
    break_minutes: i64,
    completed_cycles: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct CredentialsBody {
    username: String,
    password: String,
}

// ── Tests ─────────────────────────────────────────────────────────

#[test]
fn timer_output_matches_create_request_contract() {
    let mut timer = PomodoroTimer::new(TimerSettings::default());
    timer.start();
    timer.set_session_name("Morning focus");

    let completed = loop {
        if let Some(done) = timer.tick() {
            break done;
        }
    };

    // What the timer emits must deserialize as a create request body.
    let json = serde_json::to_string(&completed).unwrap();
    let body: CreateSessionBody = serde_json::from_str(&json).unwrap();

    assert!(WIRE_SESSION_TYPES.contains(&body.session_type.as_str()));
    assert_eq!(body.session_type, "work");
    assert_eq!(body.name, "Morning focus");
    assert_eq!(body.duration_seconds, 25 * 60);
}

#[test]
fn record_response_contract_roundtrips() {
    let json = r#"{
        "id": 12,
        "user_id": 3,
        "type": "short_break",
        "name": "Short Break",
        "duration_seconds": 300,
        "completed": true,
        "created_at": "2026-08-25T09:30:00Z"
    }"#;
    let rec: SessionRecordBody = serde_json::from_str(json).unwrap();
    assert_eq!(rec.session_type, "short_break");
    assert_eq!(rec.duration_seconds, 300);

    // The field stays "type" on re-serialization.
    let v: serde_json::Value = serde_json::to_value(&rec).unwrap();
    assert!(v.get("type").is_some());
    assert!(v.get("session_type").is_none());
}

#[test]
fn daily_stats_contract() {
    let json = r#"[
        {"day": "2026-08-24", "work_minutes": 100, "break_minutes": 20, "completed_cycles": 4},
        {"day": "2026-08-25", "work_minutes": 50, "break_minutes": 10, "completed_cycles": 2}
    ]"#;
    let stats: Vec<DailyStatBody> = serde_json::from_str(json).unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].completed_cycles, 4);
}

#[test]
fn every_phase_serializes_to_a_valid_wire_value() {
    let settings = TimerSettings::new(&beprod_core::config::TimerDefaults {
        work_minutes: 1,
        short_break_minutes: 1,
        long_break_minutes: 5,
        goal_cycles: 4,
        cycles_before_long_break: 2,
    });
    let mut timer = PomodoroTimer::new(settings);
    timer.start();

    let mut seen = std::collections::BTreeSet::new();
    // Enough ticks to pass through work, short break, and long break.
    for _ in 0..1500 {
        if let Some(done) = timer.tick() {
            let v = serde_json::to_value(&done).unwrap();
            let wire = v["type"].as_str().unwrap().to_string();
            assert!(
                WIRE_SESSION_TYPES.contains(&wire.as_str()),
                "bad wire value {wire}"
            );
            seen.insert(wire);
        }
    }
    assert_eq!(seen.len(), 3, "expected all three phases, saw {seen:?}");
}

#[test]
fn credentials_contract_is_flat_username_password() {
    let json = r#"{"username":"alice","password":"hunter42"}"#;
    let c: CredentialsBody = serde_json::from_str(json).unwrap();
    assert_eq!(c.username, "alice");
    assert_eq!(c.password, "hunter42");
}

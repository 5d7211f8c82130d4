use serde::Serialize;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

static RUNS_STARTED: AtomicU64 = AtomicU64::new(0);
static RUNS_SUCCEEDED: AtomicU64 = AtomicU64::new(0);
static RUNS_FAILED: AtomicU64 = AtomicU64::new(0);

static ENGINE_DURATION_COUNT: AtomicU64 = AtomicU64::new(0);
static ENGINE_DURATION_TOTAL_MS: AtomicU64 = AtomicU64::new(0);

static AUDIT_WRITE_FAILURES: AtomicU64 = AtomicU64::new(0);

static LAST_ERROR_TS: AtomicI64 = AtomicI64::new(0);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub runs_started: u64,
    pub runs_succeeded: u64,
    pub runs_failed: u64,
    pub engine_duration_count: u64,
    pub engine_duration_avg_ms: u64,
    pub audit_write_failures: u64,
    pub last_error_ts: i64,
}

pub fn inc_runs_started() {
    RUNS_STARTED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_runs_succeeded() {
    RUNS_SUCCEEDED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_runs_failed() {
    RUNS_FAILED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_audit_write_failures() {
    AUDIT_WRITE_FAILURES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_engine_duration_ms(duration_ms: u64) {
    ENGINE_DURATION_COUNT.fetch_add(1, Ordering::Relaxed);
    ENGINE_DURATION_TOTAL_MS.fetch_add(duration_ms, Ordering::Relaxed);
}

pub fn set_last_error_ts(ts: i64) {
    LAST_ERROR_TS.store(ts, Ordering::Relaxed);
}

pub fn snapshot() -> MetricsSnapshot {
    let engine_count = ENGINE_DURATION_COUNT.load(Ordering::Relaxed);

    MetricsSnapshot {
        runs_started: RUNS_STARTED.load(Ordering::Relaxed),
        runs_succeeded: RUNS_SUCCEEDED.load(Ordering::Relaxed),
        runs_failed: RUNS_FAILED.load(Ordering::Relaxed),
        engine_duration_count: engine_count,
        engine_duration_avg_ms: if engine_count > 0 {
            ENGINE_DURATION_TOTAL_MS.load(Ordering::Relaxed) / engine_count
        } else {
            0
        },
        audit_write_failures: AUDIT_WRITE_FAILURES.load(Ordering::Relaxed),
        last_error_ts: LAST_ERROR_TS.load(Ordering::Relaxed),
    }
}

use crate::infra::REQUEST_LOGS_COLLECTION;
use crate::module::model_run::model::AuditRecord;
use crate::module::model_run::schema::SimulationParameters;
use crate::service::metrics_service;
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Query(String),
    #[error("{0}")]
    Write(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Connected,
    Disconnected,
    Memory,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug)]
enum Backend {
    Mongo(Database),
    Memory(Mutex<Vec<AuditRecord>>),
    Detached { reason: String },
}

/// Append-only log of model runs, queried per user newest first.
#[derive(Debug)]
pub struct AuditLogger {
    backend: Backend,
}

impl AuditLogger {
    pub fn mongo(db: &Database) -> Self {
        Self {
            backend: Backend::Mongo(db.clone()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(Vec::new())),
        }
    }

    /// No store behind it: writes are dropped and history reports the reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Detached {
                reason: reason.into(),
            },
        }
    }

    /// Best effort. A failed write is logged and counted, never surfaced.
    pub async fn record(
        &self,
        username: &str,
        params: &SimulationParameters,
        success: bool,
        result_count: i64,
        error: Option<&str>,
    ) {
        let record = AuditRecord {
            id: Uuid::now_v7().to_string(),
            username: username.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            parameters: *params,
            success,
            result_count,
            error_message: error.map(str::to_string),
        };

        match self.append(record).await {
            Ok(()) => {}
            Err(AuditError::Unavailable(reason)) => {
                debug!(username, reason = %reason, "audit store detached; run not logged");
            }
            Err(err) => {
                metrics_service::inc_audit_write_failures();
                warn!(username, error = %err, "audit write failed");
            }
        }
    }

    async fn append(&self, record: AuditRecord) -> Result<(), AuditError> {
        match &self.backend {
            Backend::Mongo(db) => {
                request_logs(db)
                    .insert_one(record)
                    .await
                    .map_err(|e| AuditError::Write(format!("insert request log failed: {e}")))?;
                Ok(())
            }
            Backend::Memory(records) => {
                records
                    .lock()
                    .map_err(|_| AuditError::Write("audit store lock poisoned".to_string()))?
                    .push(record);
                Ok(())
            }
            Backend::Detached { reason } => Err(AuditError::Unavailable(reason.clone())),
        }
    }

    /// Up to `HISTORY_LIMIT` records for `username`, newest first.
    pub async fn history(&self, username: &str) -> Result<Vec<AuditRecord>, AuditError> {
        match &self.backend {
            Backend::Mongo(db) => {
                let mut cursor = request_logs(db)
                    .find(doc! { "username": username })
                    .sort(doc! { "timestamp": -1, "id": -1 })
                    .limit(HISTORY_LIMIT as i64)
                    .await
                    .map_err(|e| AuditError::Query(e.to_string()))?;

                let mut records = Vec::new();
                while cursor
                    .advance()
                    .await
                    .map_err(|e| AuditError::Query(e.to_string()))?
                {
                    match cursor.deserialize_current() {
                        Ok(record) => records.push(record),
                        Err(e) => warn!(username, error = %e, "skipping malformed request log"),
                    }
                }
                Ok(records)
            }
            Backend::Memory(records) => {
                let guard = records
                    .lock()
                    .map_err(|_| AuditError::Query("audit store lock poisoned".to_string()))?;
                let mut matching: Vec<AuditRecord> = guard
                    .iter()
                    .rev()
                    .filter(|r| r.username == username)
                    .cloned()
                    .collect();
                // stable, so equal timestamps keep newest-inserted first
                matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                matching.truncate(HISTORY_LIMIT);
                Ok(matching)
            }
            Backend::Detached { reason } => Err(AuditError::Unavailable(reason.clone())),
        }
    }

    pub async fn probe(&self) -> StoreStatus {
        match &self.backend {
            Backend::Mongo(db) => match db.run_command(doc! { "ping": 1 }).await {
                Ok(_) => StoreStatus::Connected,
                Err(e) => {
                    warn!(error = %e, "audit store ping failed");
                    StoreStatus::Disconnected
                }
            },
            Backend::Memory(_) => StoreStatus::Memory,
            Backend::Detached { .. } => StoreStatus::Disconnected,
        }
    }
}

fn request_logs(db: &Database) -> Collection<AuditRecord> {
    db.collection(REQUEST_LOGS_COLLECTION)
}

use crate::service::metrics_service::MetricsSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StatusData {
    pub timestamp: i64,
    pub version: &'static str,
    /// `connected`, `disconnected` or `memory`.
    pub database: &'static str,
    pub metrics: MetricsSnapshot,
}

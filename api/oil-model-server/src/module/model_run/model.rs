use super::schema::SimulationParameters;
use serde::{Deserialize, Serialize};

/// One row of the `request_logs` collection, written for every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: String,
    pub username: String,
    /// Unix milliseconds.
    pub timestamp: i64,
    pub parameters: SimulationParameters,
    pub success: bool,
    pub result_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

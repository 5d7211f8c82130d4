use serde::{Deserialize, Serialize};

/// Parameters as sent by the caller, before coercion. Absent and `null`
/// fields are replaced by defaults like any other invalid value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[serde(default)]
    pub scenario: Option<i64>,
    #[serde(default)]
    pub drilling_rate: Option<i64>,
    #[serde(default)]
    pub oil_price: Option<f64>,
    #[serde(default)]
    pub exchange_rate: Option<f64>,
}

/// Parameters after normalization; every field is inside its valid domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    pub scenario: i64,
    pub drilling_rate: i64,
    pub oil_price: f64,
    pub exchange_rate: f64,
}

impl SimulationParameters {
    pub const DEFAULT_SCENARIO: i64 = 1;
    pub const DEFAULT_DRILLING_RATE: i64 = 50;
    pub const DEFAULT_OIL_PRICE: f64 = 80.0;
    pub const DEFAULT_EXCHANGE_RATE: f64 = 75.0;
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            scenario: Self::DEFAULT_SCENARIO,
            drilling_rate: Self::DEFAULT_DRILLING_RATE,
            oil_price: Self::DEFAULT_OIL_PRICE,
            exchange_rate: Self::DEFAULT_EXCHANGE_RATE,
        }
    }
}

/// One point of the yearly output grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub year: i64,
    pub scenario: i64,
    pub revenue: f64,
    pub production_volume: f64,
    pub new_wells_fund: f64,
    pub old_wells_fund: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunModelData {
    pub parameters: SimulationParameters,
    pub results: Vec<SimulationResult>,
    pub timestamp: i64,
}

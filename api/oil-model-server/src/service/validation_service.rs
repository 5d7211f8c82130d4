use crate::module::model_run::schema::{SimulationParameters, SimulationRequest};

pub const SCENARIO_MIN: i64 = 1;
pub const SCENARIO_MAX: i64 = 3;

/// Coerces out-of-domain fields to their defaults. Never rejects.
pub fn normalize_parameters(req: &SimulationRequest) -> SimulationParameters {
    let defaults = SimulationParameters::default();
    SimulationParameters {
        scenario: req
            .scenario
            .filter(|s| (SCENARIO_MIN..=SCENARIO_MAX).contains(s))
            .unwrap_or(defaults.scenario),
        drilling_rate: req
            .drilling_rate
            .filter(|d| *d > 0)
            .unwrap_or(defaults.drilling_rate),
        oil_price: positive_or(req.oil_price, defaults.oil_price),
        exchange_rate: positive_or(req.exchange_rate, defaults.exchange_rate),
    }
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value
        .filter(|v| *v > 0.0 && v.is_finite())
        .unwrap_or(default)
}

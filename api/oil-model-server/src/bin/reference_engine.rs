//! Stand-in engine speaking the process contract: four positional arguments
//! in, the yearly CSV on stdout, diagnostics on stderr.

use oil_model_server::module::model_run::schema::SimulationParameters;
use oil_model_server::service::csv_codec_service::render_csv;
use oil_model_server::service::resample_service::{
    resample_channels, ChannelSeries, TimeSeries, HORIZON_YEARS,
};
use std::env;
use std::io::Write;
use std::str::FromStr;

const INITIAL_OLD_WELLS: f64 = 1200.0;
const OLD_WELL_DECLINE: f64 = 0.045;
const OLD_WELL_YIELD: f64 = 0.011;
const NEW_WELL_YIELD: f64 = 0.018;

fn main() {
    if let Err(e) = run() {
        eprintln!("reference-engine error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let defaults = SimulationParameters::default();
    let params = SimulationParameters {
        scenario: arg_or(&args, 0, defaults.scenario)?,
        drilling_rate: arg_or(&args, 1, defaults.drilling_rate)?,
        oil_price: arg_or(&args, 2, defaults.oil_price)?,
        exchange_rate: arg_or(&args, 3, defaults.exchange_rate)?,
    };
    eprintln!(
        "reference-engine: scenario={} drilling_rate={} oil_price={:.2} exchange_rate={:.2}",
        params.scenario, params.drilling_rate, params.oil_price, params.exchange_rate
    );

    let channels = simulate(&params);
    eprintln!(
        "reference-engine: {} integrator steps",
        channels.production_volume.points().len()
    );

    let csv = render_csv(&resample_channels(&channels, &params))?;
    std::io::stdout()
        .write_all(csv.as_bytes())
        .map_err(|e| format!("failed to write results: {e}"))?;
    Ok(())
}

fn arg_or<T: FromStr>(args: &[String], idx: usize, default: T) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match args.get(idx) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("invalid argument {}: {raw:?} ({e})", idx + 1)),
        None => Ok(default),
    }
}

/// Integrates the well stock with an uneven step so the channels do not land
/// on whole years.
fn simulate(params: &SimulationParameters) -> ChannelSeries {
    let (decline_factor, drilling_factor) = match params.scenario {
        2 => (0.8, 1.25),
        3 => (1.3, 0.7),
        _ => (1.0, 1.0),
    };
    let horizon = HORIZON_YEARS as f64;

    let mut times = Vec::new();
    let mut t = 0.0_f64;
    let mut step = 0_u32;
    while t < horizon {
        times.push(t);
        t += 0.3 + 0.2 * (f64::from(step) * 0.7).sin().abs();
        step += 1;
    }
    times.push(horizon);

    let mut old_wells = Vec::with_capacity(times.len());
    let mut new_wells = Vec::with_capacity(times.len());
    let mut production = Vec::with_capacity(times.len());
    for &t in &times {
        let old = INITIAL_OLD_WELLS * (-OLD_WELL_DECLINE * decline_factor * t).exp();
        let new = params.drilling_rate as f64 * drilling_factor * t;
        old_wells.push((t, old));
        new_wells.push((t, new));
        production.push((t, old * OLD_WELL_YIELD + new * NEW_WELL_YIELD));
    }

    let peak = production
        .iter()
        .map(|&(_, p)| p)
        .fold(0.0_f64, f64::max);
    let revenue = production
        .iter()
        .map(|&(t, p)| (t, if peak > 0.0 { p / peak } else { 0.0 }))
        .collect();

    ChannelSeries {
        revenue: TimeSeries::new(revenue),
        production_volume: TimeSeries::new(production),
        new_wells_fund: TimeSeries::new(new_wells),
        old_wells_fund: TimeSeries::new(old_wells),
    }
}

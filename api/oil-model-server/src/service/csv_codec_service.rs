//! The stdout contract between the service and an engine process.
//!
//! Header line, then one row per year:
//! `year(%.2f),scenario(%d),revenue,productionVolume,newWellsFund,oldWellsFund`
//! with every float printed to two decimals.

use crate::module::model_run::schema::SimulationResult;
use csv::{ReaderBuilder, Trim, WriterBuilder};

pub const CSV_HEADER: [&str; 6] = [
    "Year",
    "Scenario",
    "Revenue",
    "ProductionVolume",
    "NewWellsFund",
    "OldWellsFund",
];

const FIELD_COUNT: usize = CSV_HEADER.len();

/// Parses engine stdout. The first line is always treated as the header and
/// rows with fewer than six fields are dropped. Numeric fields that do not
/// parse read as zero.
pub fn parse_csv(output: &str) -> Vec<SimulationResult> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(output.as_bytes());

    let mut results = Vec::new();
    for record in reader.records() {
        let rec = match record {
            Ok(r) => r,
            Err(_) => continue,
        };
        if rec.len() < FIELD_COUNT {
            continue;
        }
        let float = |idx: usize| -> f64 {
            rec.get(idx)
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or_default()
        };
        results.push(SimulationResult {
            year: float(0).round() as i64,
            scenario: rec
                .get(1)
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or_default(),
            revenue: float(2),
            production_volume: float(3),
            new_wells_fund: float(4),
            old_wells_fund: float(5),
        });
    }
    results
}

/// Writes rows in the engine output format.
pub fn render_csv(rows: &[SimulationResult]) -> Result<String, String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| format!("csv header write failed: {e}"))?;
    for row in rows {
        writer
            .write_record([
                format!("{:.2}", row.year as f64),
                row.scenario.to_string(),
                format!("{:.2}", row.revenue),
                format!("{:.2}", row.production_volume),
                format!("{:.2}", row.new_wells_fund),
                format!("{:.2}", row.old_wells_fund),
            ])
            .map_err(|e| format!("csv row write failed: {e}"))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| format!("csv flush failed: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("csv output not utf-8: {e}"))
}

//! Resampling of engine channels onto the yearly output grid.
//!
//! Engines emit each channel at whatever times their integrator chose. The
//! service contract is one row per integer year `0..=HORIZON_YEARS`, so every
//! channel is linearly interpolated at those marks and clamped outside its
//! sampled range.

use crate::module::model_run::schema::{SimulationParameters, SimulationResult};

/// Simulated horizon handed to every engine, independent of caller input.
pub const HORIZON_YEARS: i64 = 30;

/// A channel sampled at non-decreasing times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: Vec<(f64, f64)>,
}

impl TimeSeries {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Value at time `t`. Empty series read as zero.
    pub fn sample_at(&self, t: f64) -> f64 {
        let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) =
            (self.points.first(), self.points.last())
        else {
            return 0.0;
        };
        if t <= first_x {
            return first_y;
        }
        if t >= last_x {
            return last_y;
        }

        for pair in self.points.windows(2) {
            let (x1, y1) = pair[0];
            let (x2, y2) = pair[1];
            if t >= x1 && t <= x2 {
                if x2 == x1 {
                    return y1;
                }
                return y1 + (t - x1) / (x2 - x1) * (y2 - y1);
            }
        }
        last_y
    }
}

/// Raw per-channel output of one engine run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelSeries {
    pub revenue: TimeSeries,
    pub production_volume: TimeSeries,
    pub new_wells_fund: TimeSeries,
    pub old_wells_fund: TimeSeries,
}

pub fn year_grid() -> impl Iterator<Item = i64> {
    0..=HORIZON_YEARS
}

pub fn sample_at_years(series: &TimeSeries) -> Vec<f64> {
    year_grid().map(|year| series.sample_at(year as f64)).collect()
}

/// Some engine builds emit revenue normalized to `[0, 1]`. When that happens
/// alongside positive production, the absolute figure is rebuilt from
/// production and prices.
pub fn resolve_revenue(raw: f64, production: f64, oil_price: f64, exchange_rate: f64) -> f64 {
    if (0.0..=1.0).contains(&raw) && production > 0.0 {
        production * oil_price * exchange_rate
    } else {
        raw
    }
}

pub fn resample_channels(
    channels: &ChannelSeries,
    params: &SimulationParameters,
) -> Vec<SimulationResult> {
    year_grid()
        .map(|year| {
            let t = year as f64;
            let production = channels.production_volume.sample_at(t);
            let revenue = resolve_revenue(
                channels.revenue.sample_at(t),
                production,
                params.oil_price,
                params.exchange_rate,
            );
            SimulationResult {
                year,
                scenario: params.scenario,
                revenue,
                production_volume: production,
                new_wells_fund: channels.new_wells_fund.sample_at(t),
                old_wells_fund: channels.old_wells_fund.sample_at(t),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f64, f64)]) -> TimeSeries {
        TimeSeries::new(points.to_vec())
    }

    #[test]
    fn empty_series_samples_to_zero() {
        let empty = TimeSeries::default();
        assert_eq!(empty.sample_at(0.0), 0.0);
        assert_eq!(empty.sample_at(12.5), 0.0);
        assert!(sample_at_years(&empty).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn clamps_outside_sampled_range() {
        let s = series(&[(2.5, 10.0), (4.0, 40.0), (7.5, 5.0)]);
        for t in [-3.0, 0.0, 1.0, 2.5] {
            assert_eq!(s.sample_at(t), 10.0);
        }
        for t in [7.5, 8.0, 30.0, 1e9] {
            assert_eq!(s.sample_at(t), 5.0);
        }
    }

    #[test]
    fn interpolates_linearly_between_samples() {
        let s = series(&[(0.0, 0.0), (2.0, 10.0), (4.0, 30.0)]);
        assert_eq!(s.sample_at(1.0), 5.0);
        assert_eq!(s.sample_at(3.0), 20.0);
        assert_eq!(s.sample_at(3.5), 25.0);
    }

    #[test]
    fn interpolated_values_stay_within_bracket() {
        let s = series(&[(0.0, 3.0), (0.7, -2.0), (1.9, 8.0), (4.3, 8.0), (9.1, 1.5)]);
        for pair in s.points().windows(2) {
            let (x1, y1) = pair[0];
            let (x2, y2) = pair[1];
            let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
            for step in 1..10 {
                let t = x1 + (x2 - x1) * step as f64 / 10.0;
                let v = s.sample_at(t);
                assert!(v >= lo - 1e-12 && v <= hi + 1e-12, "t={t} v={v}");
            }
        }
    }

    #[test]
    fn duplicate_sample_times_do_not_divide_by_zero() {
        let s = series(&[(0.0, 1.0), (5.0, 2.0), (5.0, 9.0), (10.0, 3.0)]);
        let v = s.sample_at(5.0);
        assert!(v.is_finite());
        assert_eq!(v, 2.0);
    }

    #[test]
    fn single_point_series_is_constant() {
        let s = series(&[(12.0, 4.25)]);
        assert!(sample_at_years(&s).iter().all(|v| *v == 4.25));
    }

    #[test]
    fn grid_covers_every_year_inclusive() {
        let s = series(&[(0.0, 0.0), (30.0, 30.0)]);
        let values = sample_at_years(&s);
        assert_eq!(values.len(), 31);
        for (year, value) in values.iter().enumerate() {
            assert!((value - year as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let s = series(&[(0.0, 1.0), (0.33, 1.7), (1.21, 0.4), (29.9, 12.0)]);
        assert_eq!(sample_at_years(&s), sample_at_years(&s));
    }

    #[test]
    fn normalized_revenue_is_rebuilt_from_production() {
        assert_eq!(resolve_revenue(0.5, 10.0, 80.0, 75.0), 60000.0);
        assert_eq!(resolve_revenue(0.0, 10.0, 80.0, 75.0), 60000.0);
        assert_eq!(resolve_revenue(1.0, 2.0, 80.0, 75.0), 12000.0);
    }

    #[test]
    fn absolute_revenue_is_kept() {
        assert_eq!(resolve_revenue(1.5, 10.0, 80.0, 75.0), 1.5);
        assert_eq!(resolve_revenue(-0.2, 10.0, 80.0, 75.0), -0.2);
        // no production, nothing to rebuild from
        assert_eq!(resolve_revenue(0.5, 0.0, 80.0, 75.0), 0.5);
    }

    #[test]
    fn revenue_override_is_evaluated_per_year() {
        let channels = ChannelSeries {
            // normalized in the first half, absolute afterwards
            revenue: series(&[(0.0, 0.5), (15.0, 0.5), (15.5, 5000.0), (30.0, 5000.0)]),
            production_volume: series(&[(0.0, 10.0), (30.0, 10.0)]),
            new_wells_fund: series(&[(0.0, 0.0), (30.0, 60.0)]),
            old_wells_fund: series(&[(0.0, 100.0), (30.0, 40.0)]),
        };
        let params = SimulationParameters::default();
        let rows = resample_channels(&channels, &params);

        assert_eq!(rows.len(), 31);
        assert_eq!(rows[0].revenue, 60000.0);
        assert_eq!(rows[15].revenue, 60000.0);
        assert_eq!(rows[16].revenue, 5000.0);
        assert_eq!(rows[30].revenue, 5000.0);
        assert!((rows[10].new_wells_fund - 20.0).abs() < 1e-9);
        assert_eq!(rows[15].old_wells_fund, 70.0);
        assert!(rows.iter().all(|r| r.scenario == 1));
        assert!(rows.windows(2).all(|w| w[0].year + 1 == w[1].year));
    }
}

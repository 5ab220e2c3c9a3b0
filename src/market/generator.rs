//! Mock value generators
//!
//! Every simulated number on the board comes from these two functions: a
//! single-step random jitter and a fixed-length chart series built from
//! repeated jitter. Both take the random source as a parameter so callers
//! can inject a seeded generator.

use rand::Rng;

/// One point of a mini chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Hour label, "00:00", "01:00", ...
    pub time: String,
    pub value: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Round to two decimals, the precision every quote is displayed with
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Uniform centered noise in [-0.5, 0.5)
fn centered<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>() - 0.5
}

/// Perturb `value` by a uniform delta of at most `volatility * value / 2`
/// in either direction, rounded to two decimals.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, value: f64, volatility: f64) -> f64 {
    let delta = centered(rng) * volatility * value;
    round2(value + delta)
}

/// Additive drift of at most `amplitude / 2` in either direction.
///
/// Used where a widget walks its change figure independently of the price.
pub fn drift<R: Rng + ?Sized>(rng: &mut R, value: f64, amplitude: f64) -> f64 {
    value + centered(rng) * amplitude
}

/// Build a random-walk series of exactly `points` entries starting at `base`.
///
/// Step size scales with `base`, not with the running value, so the walk
/// does not compound.
pub fn generate_series<R: Rng + ?Sized>(
    rng: &mut R,
    base: f64,
    points: usize,
    volatility: f64,
) -> Vec<ChartPoint> {
    let step = volatility * base;
    let mut value = base;

    (0..points)
        .map(|i| {
            value += centered(rng) * step;
            let open = value - rng.gen::<f64>() * step;
            let high = value + rng.gen::<f64>() * step * 0.5;
            let low = value - rng.gen::<f64>() * step * 0.5;
            ChartPoint {
                time: format!("{:02}:00", i),
                value: round2(value),
                open: round2(open),
                high: round2(high),
                low: round2(low),
                close: round2(value),
            }
        })
        .collect()
}

/// Extract plain values for the chart widgets
pub fn series_values(points: &[ChartPoint]) -> Vec<f64> {
    points.iter().map(|p| p.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_volatility_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(jitter(&mut rng, 100.0, 0.0), 100.0);
        }
    }

    #[test]
    fn test_jitter_stays_within_half_volatility_band() {
        let mut rng = StdRng::seed_from_u64(42);
        let volatilities = [0.0003, 0.001, 0.002, 0.02, 0.5];
        for &v in &volatilities {
            for &p in &[4.32, 100.0, 1398.5, 97842.5] {
                let lo = p * (1.0 - v / 2.0) - 0.005;
                let hi = p * (1.0 + v / 2.0) + 0.005;
                for _ in 0..500 {
                    let next = jitter(&mut rng, p, v);
                    assert!(next >= lo && next <= hi, "{} out of [{}, {}]", next, lo, hi);
                }
            }
        }
    }

    #[test]
    fn test_jitter_is_reproducible_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let xs: Vec<f64> = (0..20).map(|_| jitter(&mut a, 2456.78, 0.001)).collect();
        let ys: Vec<f64> = (0..20).map(|_| jitter(&mut b, 2456.78, 0.001)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_drift_bounded_by_half_amplitude() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let d = drift(&mut rng, 10.0, 2.0);
            assert!((9.0..=11.0).contains(&d));
        }
    }

    #[test]
    fn test_series_has_requested_length_and_ordered_labels() {
        let mut rng = StdRng::seed_from_u64(11);
        for &n in &[0usize, 1, 24, 30, 48] {
            let series = generate_series(&mut rng, 2456.0, n, 0.008);
            assert_eq!(series.len(), n);
            for (i, point) in series.iter().enumerate() {
                assert_eq!(point.time, format!("{:02}:00", i));
            }
            for pair in series.windows(2) {
                assert!(pair[0].time < pair[1].time);
            }
        }
        let series = generate_series(&mut rng, 100.0, 3, 0.1);
        assert_eq!(series[0].time, "00:00");
        assert_eq!(series[2].time, "02:00");
    }

    #[test]
    fn test_series_close_matches_value_and_high_low_bracket() {
        let mut rng = StdRng::seed_from_u64(5);
        let series = generate_series(&mut rng, 890.0, 24, 0.015);
        for point in &series {
            assert_eq!(point.close, point.value);
            assert!(point.high >= point.value - 0.01);
            assert!(point.low <= point.value + 0.01);
        }
    }

    #[test]
    fn test_series_zero_volatility_is_flat() {
        let mut rng = StdRng::seed_from_u64(9);
        let values = series_values(&generate_series(&mut rng, 712.0, 10, 0.0));
        assert!(values.iter().all(|&v| v == 712.0));
    }
}

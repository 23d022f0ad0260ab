/// Relative Strength Index with Wilder's smoothing.
///
/// Needs `length + 1` values for the first reading, so the first defined
/// index is `length`. A flat market (zero average gain AND zero average
/// loss) reads 50; all-gains reads 100. Output is always within [0, 100]
/// and never divides by zero.
pub fn rsi(values: &[f64], length: usize) -> Vec<f64> {
    assert!(length >= 1, "RSI length must be >= 1");

    let mut out = vec![f64::NAN; values.len()];
    if values.len() < length + 1 {
        return out;
    }

    // Initial averages over the first `length` deltas.
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=length {
        let delta = values[i] - values[i - 1];
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss += -delta;
        }
    }
    avg_gain /= length as f64;
    avg_loss /= length as f64;
    out[length] = rsi_value(avg_gain, avg_loss);

    // Wilder smoothing for the rest.
    for i in length + 1..values.len() {
        let delta = values[i] - values[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        avg_gain = (avg_gain * (length - 1) as f64 + gain) / length as f64;
        avg_loss = (avg_loss * (length - 1) as f64 + loss) / length as f64;
        out[i] = rsi_value(avg_gain, avg_loss);
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // Flat market: neutral. Pure gains: pinned at the ceiling.
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_warmup_is_nan() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&values, 14);
        assert!(out[..14].iter().all(|v| v.is_nan()));
        assert!(out[14].is_finite());
    }

    #[test]
    fn rsi_insufficient_data_is_all_nan() {
        let out = rsi(&[100.0; 14], 14); // need 15
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_of_constant_series_is_50() {
        let out = rsi(&[1.2345; 40], 14);
        for &v in &out[14..] {
            assert!((v - 50.0).abs() < 1e-9, "expected 50, got {v}");
        }
    }

    #[test]
    fn rsi_strictly_increasing_approaches_100() {
        let values: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&values, 14);
        let last = *out.last().unwrap();
        assert!((last - 100.0).abs() < 1e-9, "expected ~100, got {last}");
    }

    #[test]
    fn rsi_strictly_decreasing_approaches_0() {
        let values: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        let out = rsi(&values, 14);
        let last = *out.last().unwrap();
        assert!(last.abs() < 1e-9, "expected ~0, got {last}");
    }

    #[test]
    fn rsi_stays_in_range_on_mixed_input() {
        let values: Vec<f64> = (0..100)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let out = rsi(&values, 14);
        for &v in out.iter().filter(|v| v.is_finite()) {
            assert!((0.0..=100.0).contains(&v), "RSI out of range: {v}");
        }
    }
}

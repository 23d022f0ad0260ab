/// Exponential Moving Average.
///
/// Smoothing factor `k = 2 / (length + 1)`. Seeded with the SMA of the
/// first `length` values, so the first defined index is `length - 1`;
/// everything before it is NaN.
pub fn ema(values: &[f64], length: usize) -> Vec<f64> {
    assert!(length >= 1, "EMA length must be >= 1");

    let mut out = vec![f64::NAN; values.len()];
    if values.len() < length {
        return out;
    }

    let k = 2.0 / (length as f64 + 1.0);
    let seed: f64 = values[..length].iter().sum::<f64>() / length as f64;
    out[length - 1] = seed;

    let mut prev = seed;
    for i in length..values.len() {
        prev = values[i] * k + prev * (1.0 - k);
        out[i] = prev;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_warmup_is_nan() {
        let out = ema(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!(out[2].is_finite());
    }

    #[test]
    fn ema_of_constant_series_is_the_constant() {
        let out = ema(&[42.0; 20], 9);
        for &v in &out[8..] {
            assert!((v - 42.0).abs() < 1e-12, "expected 42, got {v}");
        }
    }

    #[test]
    fn ema_length_one_tracks_input() {
        let input = [1.0, 5.0, 2.0, 8.0];
        let out = ema(&input, 1);
        for (a, b) in input.iter().zip(&out) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn ema_shorter_than_window_is_all_nan() {
        let out = ema(&[1.0, 2.0], 5);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn ema_seed_is_sma_of_first_window() {
        let out = ema(&[2.0, 4.0, 6.0, 8.0], 3);
        assert!((out[2] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn ema_faster_window_reacts_faster() {
        // Step input: EMA with the shorter window must sit closer to the
        // new level after the step.
        let mut input = vec![100.0; 30];
        input.extend(vec![110.0; 10]);
        let fast = ema(&input, 5);
        let slow = ema(&input, 20);
        let last = input.len() - 1;
        assert!(fast[last] > slow[last]);
    }
}

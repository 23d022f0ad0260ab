/// Average Directional Index (Wilder).
///
/// Directional movement per bar: +DM = high − prevHigh when that exceeds
/// both prevLow − low and zero, else 0 (−DM mirrored). +DM, −DM and true
/// range are Wilder-smoothed over `length`, combined into DI+/DI−, then
/// DX = 100·|DI+ − DI−| / (DI+ + DI−), and DX is smoothed again into ADX.
///
/// Both zero-denominator cases yield 0, never an error: a zero smoothed
/// true range gives DI = 0, and DI+ + DI− = 0 gives DX = 0. The first
/// defined index is `2·length − 1`.
pub fn adx(high: &[f64], low: &[f64], close: &[f64], length: usize) -> Vec<f64> {
    assert!(length >= 1, "ADX length must be >= 1");
    assert!(
        high.len() == low.len() && low.len() == close.len(),
        "ADX input series must be the same length"
    );

    let n = close.len();
    let mut out = vec![f64::NAN; n];
    if n < 2 * length {
        return out;
    }

    // Per-bar directional movement and true range, defined from bar 1.
    let mut dm_plus = vec![0.0; n];
    let mut dm_minus = vec![0.0; n];
    let mut tr = vec![0.0; n];
    for i in 1..n {
        let up = high[i] - high[i - 1];
        let down = low[i - 1] - low[i];
        if up > down && up > 0.0 {
            dm_plus[i] = up;
        }
        if down > up && down > 0.0 {
            dm_minus[i] = down;
        }
        let prev_close = close[i - 1];
        tr[i] = (high[i] - low[i])
            .max((high[i] - prev_close).abs())
            .max((low[i] - prev_close).abs());
    }

    // Wilder smoothing of DM/TR, then DX, defined from bar `length`.
    let mut sm_plus = mean(&dm_plus[1..=length]);
    let mut sm_minus = mean(&dm_minus[1..=length]);
    let mut sm_tr = mean(&tr[1..=length]);

    let mut dx = vec![f64::NAN; n];
    dx[length] = dx_value(sm_plus, sm_minus, sm_tr);
    for i in length + 1..n {
        let w = (length - 1) as f64 / length as f64;
        sm_plus = sm_plus * w + dm_plus[i] / length as f64;
        sm_minus = sm_minus * w + dm_minus[i] / length as f64;
        sm_tr = sm_tr * w + tr[i] / length as f64;
        dx[i] = dx_value(sm_plus, sm_minus, sm_tr);
    }

    // Second smoothing pass: ADX.
    let first = 2 * length - 1;
    let mut adx_val = mean(&dx[length..=first]);
    out[first] = adx_val;
    for i in first + 1..n {
        adx_val = (adx_val * (length - 1) as f64 + dx[i]) / length as f64;
        out[i] = adx_val;
    }
    out
}

fn dx_value(sm_plus: f64, sm_minus: f64, sm_tr: f64) -> f64 {
    if sm_tr == 0.0 {
        return 0.0;
    }
    let di_plus = 100.0 * sm_plus / sm_tr;
    let di_minus = 100.0 * sm_minus / sm_tr;
    let sum = di_plus + di_minus;
    if sum == 0.0 {
        return 0.0;
    }
    100.0 * (di_plus - di_minus).abs() / sum
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending(n: usize, step: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64 * step).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 0.5).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 0.5).collect();
        (high, low, close)
    }

    #[test]
    fn adx_warmup_is_nan() {
        let (h, l, c) = trending(60, 1.0);
        let out = adx(&h, &l, &c, 14);
        assert!(out[..27].iter().all(|v| v.is_nan()));
        assert!(out[27].is_finite());
    }

    #[test]
    fn adx_insufficient_data_is_all_nan() {
        let (h, l, c) = trending(20, 1.0); // need 28 for length 14
        let out = adx(&h, &l, &c, 14);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn adx_flat_market_is_zero_not_an_error() {
        // high == low == close: DI+ + DI− = 0 on every bar.
        let c = vec![1.5; 60];
        let out = adx(&c, &c, &c, 14);
        for &v in out.iter().filter(|v| v.is_finite()) {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn adx_strong_trend_reads_high() {
        let (h, l, c) = trending(80, 2.0);
        let out = adx(&h, &l, &c, 14);
        let last = *out.last().unwrap();
        assert!(last > 50.0, "expected strong-trend ADX, got {last}");
    }

    #[test]
    fn adx_stays_in_range() {
        let c: Vec<f64> = (0..100)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 4.0)
            .collect();
        let h: Vec<f64> = c.iter().map(|v| v + 0.3).collect();
        let l: Vec<f64> = c.iter().map(|v| v - 0.3).collect();
        let out = adx(&h, &l, &c, 14);
        for &v in out.iter().filter(|v| v.is_finite()) {
            assert!((0.0..=100.0).contains(&v), "ADX out of range: {v}");
        }
    }
}

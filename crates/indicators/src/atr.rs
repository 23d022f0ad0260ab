/// Average True Range with Wilder's smoothing.
///
/// True range = max(high − low, |high − prevClose|, |low − prevClose|);
/// the first bar has no previous close and uses high − low alone. The
/// first defined index is `length - 1` (mean of the first `length` true
/// ranges), recursive Wilder mean after that.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], length: usize) -> Vec<f64> {
    assert!(length >= 1, "ATR length must be >= 1");
    assert!(
        high.len() == low.len() && low.len() == close.len(),
        "ATR input series must be the same length"
    );

    let n = close.len();
    let mut out = vec![f64::NAN; n];
    if n < length {
        return out;
    }

    let tr = true_ranges(high, low, close);

    let seed: f64 = tr[..length].iter().sum::<f64>() / length as f64;
    out[length - 1] = seed;

    let mut prev = seed;
    for i in length..n {
        prev = (prev * (length - 1) as f64 + tr[i]) / length as f64;
        out[i] = prev;
    }
    out
}

fn true_ranges(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    (0..close.len())
        .map(|i| {
            let range = high[i] - low[i];
            if i == 0 {
                return range;
            }
            let prev_close = close[i - 1];
            range
                .max((high[i] - prev_close).abs())
                .max((low[i] - prev_close).abs())
        })
        .collect()
}

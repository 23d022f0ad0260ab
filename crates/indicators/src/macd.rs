use crate::ema::ema;

/// MACD output: three series aligned 1:1 with the input.
///
/// `line[i]` is defined from index `slow - 1`; `signal` and `histogram`
/// from index `slow + signal - 2`.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Moving Average Convergence/Divergence.
///
/// MACD line = EMA(fast) − EMA(slow); signal = EMA(line, signal_length);
/// histogram = line − signal.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_length: usize) -> MacdSeries {
    assert!(fast < slow, "MACD fast length must be less than slow length");
    assert!(signal_length >= 1, "MACD signal length must be >= 1");

    let n = values.len();
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);

    let mut line = vec![f64::NAN; n];
    for i in 0..n {
        if fast_ema[i].is_finite() && slow_ema[i].is_finite() {
            line[i] = fast_ema[i] - slow_ema[i];
        }
    }

    // Signal line: EMA over the defined stretch of the MACD line, placed
    // back at the original indices.
    let mut signal = vec![f64::NAN; n];
    let line_start = slow.saturating_sub(1);
    if n > line_start {
        let defined = &line[line_start..];
        let sig = ema(defined, signal_length);
        for (offset, v) in sig.into_iter().enumerate() {
            signal[line_start + offset] = v;
        }
    }

    let histogram = (0..n)
        .map(|i| {
            if line[i].is_finite() && signal[i].is_finite() {
                line[i] - signal[i]
            } else {
                f64::NAN
            }
        })
        .collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}

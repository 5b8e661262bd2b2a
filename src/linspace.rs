//! Evenly spaced sampling helpers.

/// `count` values evenly spaced over `[start, stop]`, both ends included.
///
/// A single value yields `[start]`; zero yields an empty vector. The last
/// element is exactly `stop` regardless of rounding in the step.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut out: Vec<f64> = (0..count).map(|i| i as f64 * step + start).collect();
            out[count - 1] = stop;
            out
        }
    }
}

/// Integer indices from [`linspace`], truncated toward zero.
pub fn linspace_indices(start: f64, stop: f64, count: usize) -> Vec<usize> {
    linspace(start, stop, count)
        .into_iter()
        .map(|v| v.max(0.0) as usize)
        .collect()
}
